//! Payment Failed Page

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use course_core::{CourseTier, FailureReason};

use crate::components::CoursePrice;

#[component]
pub fn PaymentFailedPage() -> impl IntoView {
    let query = use_query_map();

    let reason = move || FailureReason::from_param(query.read().get("reason").as_deref());
    let tier = move || {
        query
            .read()
            .get("course")
            .and_then(|course| course.parse::<CourseTier>().ok())
            .unwrap_or_default()
    };
    let session_id = move || query.read().get("session_id");

    view! {
        <div class="result failed">
            <h1>{move || reason().title()}</h1>
            <p class="message">{move || reason().message()}</p>

            {move || view! { <CoursePrice tier=tier() /> }}

            {move || {
                session_id().map(|id| view! { <p class="reference">"Reference: " <code>{id}</code></p> })
            }}

            <div class="cta">
                <a href="/#pricing" class="btn btn-primary">"Try again"</a>
                <a href="/" class="btn">"Back to home"</a>
            </div>
        </div>
    }
}
