//! Page Components

mod home;
mod payment_failed;
mod pricing;
mod success;

pub use home::HomePage;
pub use payment_failed::PaymentFailedPage;
pub use pricing::PricingSection;
pub use success::SuccessPage;
