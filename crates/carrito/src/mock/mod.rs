//! In-memory storefront implementing the session contract.
//!
//! Lets the suite's own tests run hermetically: [`MockStorefront`] serves the
//! same screens as the live demo application (home form, shop, checkout,
//! purchase) out of an in-memory DOM, and scripts the application behavior
//! behind clicks. Navigation re-renders the document and invalidates
//! outstanding element handles, reproducing the staleness semantics of a real
//! driver.

mod dom;
mod storefront;

pub use storefront::MockStorefront;

/// Scripted application behavior attached to a clickable node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ClickAction {
    /// Navigate from home to the shop screen
    GoToShop,
    /// Add the named product to the cart
    AddToCart(String),
    /// Navigate from shop to the checkout screen
    GoToCheckout,
    /// Remove the named item's row from the cart
    RemoveCartItem(String),
    /// Navigate from checkout to the purchase screen
    GoToPurchase,
    /// Accept the country suggestion
    ChooseCountry,
    /// Finalize the order
    CompletePurchase,
    /// Submit the home-page form
    SubmitForm,
}
