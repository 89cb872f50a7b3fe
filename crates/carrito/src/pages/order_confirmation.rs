//! Legacy purchase-page variant without presence waits.
//!
//! Kept for suites written before the suggestion dropdown and confirmation
//! banner started rendering asynchronously. New code should use
//! [`PurchasePage`], which waits for both.
//!
//! [`PurchasePage`]: crate::pages::PurchasePage

use crate::locator::{Locator, LocatorRegistry};
use crate::pages::support;
use crate::result::CarritoResult;
use crate::session::SessionHandle;

/// Legacy order page. Superseded by [`PurchasePage`].
///
/// Every lookup here is immediate; on a slow page these operations fail with
/// `ElementNotFound` where [`PurchasePage`] would have waited.
///
/// [`PurchasePage`]: crate::pages::PurchasePage
#[derive(Clone)]
pub struct ConfirmationPage {
    session: SessionHandle,
}

impl std::fmt::Debug for ConfirmationPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationPage").finish_non_exhaustive()
    }
}

impl ConfirmationPage {
    /// Attach to the session's current page as the legacy order page.
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    /// All locators this page uses, by name.
    ///
    /// # Errors
    ///
    /// Fails with [`CarritoError::DuplicateLocator`] if two entries collide.
    ///
    /// [`CarritoError::DuplicateLocator`]: crate::result::CarritoError::DuplicateLocator
    pub fn registry() -> CarritoResult<LocatorRegistry> {
        LocatorRegistry::builder()
            .define("country-input", Locator::id("country"))
            .define("country-suggestion", Locator::link_text("India"))
            .define("terms-checkbox", Locator::id("checkbox2"))
            .define("purchase-button", Locator::css("input[value='Purchase']"))
            .define("success-alert", Locator::class_name("alert-success"))
            .build()
    }

    /// Type a prefix into the country field and click the suggestion,
    /// without waiting for it to appear.
    pub async fn set_delivery_location(&self, prefix: &str) -> CarritoResult<()> {
        support::type_into(self.session.as_ref(), &Locator::id("country"), prefix).await?;
        support::click(self.session.as_ref(), &Locator::link_text("India")).await
    }

    /// Tick the terms checkbox if it is not already ticked.
    pub async fn accept_terms(&self) -> CarritoResult<()> {
        let checkbox = self.session.find_element(&Locator::id("checkbox2")).await?;
        support::set_checked(checkbox.as_ref(), true).await
    }

    /// Submit the order.
    pub async fn complete_purchase(&self) -> CarritoResult<()> {
        support::click(self.session.as_ref(), &Locator::css("input[value='Purchase']")).await
    }

    /// Read the confirmation banner's text immediately.
    pub async fn success_message(&self) -> CarritoResult<String> {
        support::text_of(self.session.as_ref(), &Locator::class_name("alert-success")).await
    }
}
