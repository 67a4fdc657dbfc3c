//! Pricing Section

use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use web_sys::VisibilityState;

use course_core::{CourseTier, Submission};

use crate::api::{self, StorefrontClient};
use crate::components::CourseCard;

#[component]
pub fn PricingSection() -> impl IntoView {
    let client: Rc<StorefrontClient> = Rc::new(api::storefront_client());
    let (processing, set_processing) = signal(None::<CourseTier>);

    // Returning from the hosted page (back button, bfcache, tab switch)
    // must leave the buttons usable again
    let reset = {
        let client = Rc::clone(&client);
        move || {
            client.reset();
            set_processing.set(None);
        }
    };
    let on_focus = window_event_listener(ev::focus, {
        let reset = reset.clone();
        move |_| reset()
    });
    let on_pageshow = window_event_listener(ev::pageshow, {
        let reset = reset.clone();
        move |_| reset()
    });
    let on_visible = window_event_listener_untyped("visibilitychange", move |_| {
        if document().visibility_state() == VisibilityState::Visible {
            reset();
        }
    });
    on_cleanup(move || {
        on_focus.remove();
        on_pageshow.remove();
        on_visible.remove();
    });

    let checkout = move |tier: CourseTier| {
        if client.is_in_flight() {
            return;
        }
        set_processing.set(Some(tier));

        let client = Rc::clone(&client);
        leptos::task::spawn_local(async move {
            match client.start(tier).await {
                Submission::Navigate(navigation) => api::navigate(navigation.url()),
                Submission::TimedOut => set_processing.set(None),
                Submission::Ignored | Submission::Superseded => {}
            }
        });
    };

    view! {
        <section id="pricing" class="pricing">
            <h1>"Choose your path"</h1>
            <p class="subtitle">"One-time payment, lifetime access"</p>

            <div class="plans">
                {CourseTier::ALL
                    .into_iter()
                    .map(|tier| {
                        view! { <CourseCard tier=tier processing=processing on_select=checkout.clone() /> }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
