//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{HomePage, PaymentFailedPage, SuccessPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/success") view=SuccessPage />
                    <Route path=path!("/payment-failed") view=PaymentFailedPage />
                </Routes>
            </main>
        </Router>
    }
}
