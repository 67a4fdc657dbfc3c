//! UI Components

use leptos::prelude::*;

use course_core::CourseTier;

/// Pricing card with a buy button
#[component]
pub fn CourseCard<F>(
    tier: CourseTier,
    /// Tier whose checkout is in progress, if any
    processing: ReadSignal<Option<CourseTier>>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(CourseTier) + 'static,
{
    let offering = tier.offering();
    let class = if tier == CourseTier::Standard {
        "plan featured"
    } else {
        "plan"
    };

    view! {
        <div class=class>
            {(tier == CourseTier::Standard).then(|| view! { <span class="badge">"Popular"</span> })}
            <h2>{offering.short_name}</h2>
            <div class="price">{offering.price_label()}</div>
            <p class="description">{offering.description}</p>
            <button
                class="btn btn-primary"
                disabled=move || processing.get().is_some()
                on:click=move |_| on_select(tier)
            >
                {move || {
                    if processing.get() == Some(tier) { "Processing..." } else { "Buy now" }
                }}
            </button>
        </div>
    }
}

/// Course name and price, as shown on the result pages
#[component]
pub fn CoursePrice(tier: CourseTier) -> impl IntoView {
    let offering = tier.offering();

    view! {
        <div class="course-summary">
            <span class="name">{offering.short_name}</span>
            <span class="price">{offering.price_label()}</span>
        </div>
    }
}
