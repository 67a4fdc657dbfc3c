//! Home Page

use leptos::prelude::*;

use super::PricingSection;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"Recovery After Infidelity"</h1>
                <p class="tagline">"A step-by-step course for rebuilding trust, at your own pace"</p>
                <div class="cta">
                    <a href="#pricing" class="btn btn-primary">"See the programs"</a>
                </div>
            </header>

            <PricingSection />
        </div>
    }
}
