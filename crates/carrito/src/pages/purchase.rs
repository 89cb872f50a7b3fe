//! Purchase page: delivery details and order completion.

use crate::locator::{Locator, LocatorRegistry};
use crate::pages::support;
use crate::result::CarritoResult;
use crate::session::SessionHandle;
use crate::wait::{wait_for_presence, WaitOptions};

/// The final order page.
///
/// Supersedes [`ConfirmationPage`]: the delivery-location suggestion and the
/// confirmation banner render asynchronously on the live site, so both are
/// awaited through the bounded wait here.
///
/// [`ConfirmationPage`]: crate::pages::ConfirmationPage
#[derive(Clone)]
pub struct PurchasePage {
    session: SessionHandle,
    wait: WaitOptions,
}

impl std::fmt::Debug for PurchasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchasePage")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl PurchasePage {
    /// Attach to the session's current page as the purchase page.
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            wait: WaitOptions::default(),
        }
    }

    /// Override the wait options used by this page.
    #[must_use]
    pub const fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
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
            .define("country-input", Self::country_input())
            .define("country-suggestion", Self::country_suggestion())
            .define("terms-checkbox", Self::terms_checkbox())
            .define("purchase-button", Self::purchase_button())
            .define("success-alert", Self::success_alert())
            .build()
    }

    fn country_input() -> Locator {
        Locator::id("country")
    }

    fn country_suggestion() -> Locator {
        Locator::css(".suggestions a")
    }

    fn terms_checkbox() -> Locator {
        Locator::id("checkbox2")
    }

    fn purchase_button() -> Locator {
        Locator::css("input[value='Purchase']")
    }

    fn success_alert() -> Locator {
        Locator::css(".alert-success")
    }

    /// Type a prefix into the country field, wait for the suggestion to
    /// appear, and click it.
    pub async fn set_delivery_location(&self, prefix: &str) -> CarritoResult<()> {
        tracing::debug!(prefix, "typing delivery location");
        support::type_into(self.session.as_ref(), &Self::country_input(), prefix).await?;
        let suggestion =
            wait_for_presence(self.session.as_ref(), &Self::country_suggestion(), &self.wait)
                .await?;
        suggestion.click().await
    }

    /// Tick the terms checkbox. Already-accepted terms stay accepted; the
    /// box is never toggled off.
    pub async fn accept_terms(&self) -> CarritoResult<()> {
        let checkbox = self.session.find_element(&Self::terms_checkbox()).await?;
        support::set_checked(checkbox.as_ref(), true).await
    }

    /// Submit the order.
    pub async fn complete_purchase(&self) -> CarritoResult<()> {
        tracing::info!("completing purchase");
        support::click(self.session.as_ref(), &Self::purchase_button()).await
    }

    /// Wait for the confirmation banner and return its text.
    pub async fn success_message(&self) -> CarritoResult<String> {
        let alert =
            wait_for_presence(self.session.as_ref(), &Self::success_alert(), &self.wait).await?;
        Ok(alert.text().await?.trim().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockStorefront;
    use crate::pages::HomePage;

    async fn open_purchase(app: &MockStorefront) -> PurchasePage {
        let session = app.session();
        session.goto("https://storefront.test/").await.unwrap();
        let shop = HomePage::new(session).navigate_to_shop().await.unwrap();
        assert!(shop.find_and_add_to_cart("Iphone X").await.unwrap());
        let checkout = shop.proceed_to_checkout().await.unwrap();
        checkout.proceed_to_purchase().await.unwrap()
    }

    #[test]
    fn test_registry_names_are_unique() {
        let registry = PurchasePage::registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert!(registry.get("country-suggestion").is_some());
    }

    #[tokio::test]
    async fn test_location_suggestion_is_accepted() {
        let app = MockStorefront::new();
        let purchase = open_purchase(&app).await;

        purchase.set_delivery_location("ind").await.unwrap();

        let country = purchase
            .session
            .find_element(&Locator::id("country"))
            .await
            .unwrap();
        assert_eq!(
            country.attribute("value").await.unwrap().as_deref(),
            Some("India")
        );
    }

    #[tokio::test]
    async fn test_accept_terms_clicks_at_most_once() {
        let app = MockStorefront::new();
        let purchase = open_purchase(&app).await;

        purchase.accept_terms().await.unwrap();
        purchase.accept_terms().await.unwrap();
        assert_eq!(app.click_count("checkbox2"), 1);
    }

    #[tokio::test]
    async fn test_purchase_confirms_with_success_banner() {
        let app = MockStorefront::new();
        let purchase = open_purchase(&app).await;

        purchase.set_delivery_location("ind").await.unwrap();
        purchase.accept_terms().await.unwrap();
        purchase.complete_purchase().await.unwrap();

        let message = purchase.success_message().await.unwrap();
        assert!(message.contains("Success"));
    }
}
