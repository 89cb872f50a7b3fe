//! Page objects for the storefront demo application.
//!
//! One type per screen, each constructed with an explicit [`SessionHandle`]
//! and exposing the operations that screen supports. Navigation methods
//! consume the current page and return the destination page, so the flow
//! Home → Shopping → Checkout → Purchase is enforced by the type system.
//!
//! Shared capabilities (typed input, dropdown selection) live in [`support`]
//! and are composed into pages rather than inherited.
//!
//! [`SessionHandle`]: crate::session::SessionHandle

pub mod checkout;
pub mod home;
pub mod order_confirmation;
pub mod purchase;
pub mod shopping;
pub mod support;

pub use checkout::CheckoutPage;
pub use home::HomePage;
pub use order_confirmation::ConfirmationPage;
pub use purchase::PurchasePage;
pub use shopping::ShoppingPage;
