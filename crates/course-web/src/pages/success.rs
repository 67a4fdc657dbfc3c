//! Success Page

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use course_core::{CourseTier, ResultRoute};

use crate::api;
use crate::components::CoursePrice;

/// Route for the session the page was opened with.
///
/// A page opened without an id, or whose lookup fails, still thanks the
/// buyer: the server answers unknown sessions the same way.
async fn resolve_route(session_id: Option<String>) -> ResultRoute {
    let fallback = ResultRoute::Success {
        tier: CourseTier::Basic,
        demo: true,
        customer_email: None,
    };

    let Some(session_id) = session_id else {
        return fallback;
    };

    match api::fetch_session_details(&session_id).await {
        Ok(details) => ResultRoute::from_details(&details),
        Err(e) => {
            leptos::logging::warn!("session lookup failed: {e}");
            fallback
        }
    }
}

#[component]
pub fn SuccessPage() -> impl IntoView {
    let query = use_query_map();
    let (route, set_route) = signal(None::<ResultRoute>);

    Effect::new(move |_| {
        let session_id = query.read().get("session_id");
        leptos::task::spawn_local(async move {
            let resolved = resolve_route(session_id).await;
            if let Some(path) = resolved.redirect_path() {
                api::navigate(&path);
            }
            set_route.set(Some(resolved));
        });
    });

    view! {
        <div class="result success">
            {move || match route.get() {
                None => view! { <p class="loading">"Confirming your payment..."</p> }.into_any(),
                Some(ResultRoute::Success { tier, demo, customer_email }) => {
                    view! {
                        <h1>"Thank you for your purchase!"</h1>
                        <p>"You now have access to " {tier.offering().display_name} "."</p>
                        <CoursePrice tier=tier />
                        {customer_email
                            .map(|email| {
                                view! { <p class="receipt">"A receipt was sent to " <strong>{email}</strong></p> }
                            })}
                        {demo
                            .then(|| {
                                view! { <p class="notice">"Demo purchase: no payment was taken."</p> }
                            })}
                        <a href="/" class="btn btn-primary">"Back to home"</a>
                    }
                        .into_any()
                }
                Some(ResultRoute::Failure { .. }) => {
                    view! { <p class="loading">"Redirecting..."</p> }.into_any()
                }
            }}
        </div>
    }
}
