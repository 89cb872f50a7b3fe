//! Checkout page: cart review, quantity, item removal.

use crate::locator::{Locator, LocatorRegistry};
use crate::pages::support;
use crate::pages::PurchasePage;
use crate::result::{CarritoError, CarritoResult};
use crate::session::{ElementHandle, SessionHandle};
use crate::wait::WaitOptions;

/// The cart review page.
#[derive(Clone)]
pub struct CheckoutPage {
    session: SessionHandle,
    wait: WaitOptions,
}

impl std::fmt::Debug for CheckoutPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutPage")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl CheckoutPage {
    /// Attach to the session's current page as the checkout page.
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
            .define("cart-row", Self::cart_row())
            .define("item-name", Self::item_name())
            .define("remove-button", Self::remove_button())
            .define("quantity-input", Self::quantity_input())
            .define("purchase-button", Self::purchase_button())
            .build()
    }

    fn cart_row() -> Locator {
        Locator::css("tr.cart-row")
    }

    fn item_name() -> Locator {
        Locator::class_name("media-heading")
    }

    fn remove_button() -> Locator {
        Locator::css(".btn-danger")
    }

    fn quantity_input() -> Locator {
        Locator::id("quantity")
    }

    fn purchase_button() -> Locator {
        Locator::css(".btn-success")
    }

    /// Snapshot of the item-name elements in the cart, possibly empty.
    pub async fn cart_items(&self) -> CarritoResult<Vec<ElementHandle>> {
        self.session.find_elements(&Self::item_name()).await
    }

    /// Trimmed names of all items in the cart, in row order.
    pub async fn item_names(&self) -> CarritoResult<Vec<String>> {
        let mut names = Vec::new();
        for item in self.cart_items().await? {
            names.push(item.text().await?.trim().to_string());
        }
        Ok(names)
    }

    /// Current value of the quantity field.
    pub async fn quantity(&self) -> CarritoResult<String> {
        let input = self.session.find_element(&Self::quantity_input()).await?;
        Ok(input.attribute("value").await?.unwrap_or_default())
    }

    /// Replace the quantity field's value.
    pub async fn set_quantity(&self, quantity: &str) -> CarritoResult<()> {
        support::type_into(self.session.as_ref(), &Self::quantity_input(), quantity).await
    }

    /// Remove the cart row whose item name matches `name` after trimming.
    ///
    /// # Errors
    ///
    /// Fails with [`CarritoError::ItemNotFound`] when no row matches; the
    /// cart is left unchanged in that case.
    pub async fn remove_item(&self, name: &str) -> CarritoResult<()> {
        let rows = self.session.find_elements(&Self::cart_row()).await?;
        for row in &rows {
            let title = row.find_element(&Self::item_name()).await?;
            if title.text().await?.trim() == name.trim() {
                row.find_element(&Self::remove_button()).await?.click().await?;
                tracing::debug!(item = name, "removed from cart");
                return Ok(());
            }
        }
        Err(CarritoError::ItemNotFound {
            name: name.to_string(),
        })
    }

    /// Continue to the purchase page. Consumes this page and returns the
    /// purchase page.
    pub async fn proceed_to_purchase(self) -> CarritoResult<PurchasePage> {
        tracing::info!("proceeding to purchase");
        support::click(self.session.as_ref(), &Self::purchase_button()).await?;
        Ok(PurchasePage::new(self.session).with_wait_options(self.wait))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockStorefront;
    use crate::pages::HomePage;

    async fn checkout_with(app: &MockStorefront, items: &[&str]) -> CheckoutPage {
        let session = app.session();
        session.goto("https://storefront.test/").await.unwrap();
        let shop = HomePage::new(session).navigate_to_shop().await.unwrap();
        for item in items {
            assert!(shop.find_and_add_to_cart(item).await.unwrap());
        }
        shop.proceed_to_checkout().await.unwrap()
    }

    #[test]
    fn test_registry_names_are_unique() {
        let registry = CheckoutPage::registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert!(registry.get("quantity-input").is_some());
    }

    #[tokio::test]
    async fn test_item_names_match_additions() {
        let app = MockStorefront::new();
        let checkout = checkout_with(&app, &["Blackberry", "Nokia Edge"]).await;
        assert_eq!(checkout.item_names().await.unwrap(), vec!["Blackberry", "Nokia Edge"]);
    }

    #[tokio::test]
    async fn test_quantity_defaults_and_updates() {
        let app = MockStorefront::new();
        let checkout = checkout_with(&app, &["Blackberry"]).await;

        assert_eq!(checkout.quantity().await.unwrap(), "1");
        checkout.set_quantity("2").await.unwrap();
        assert_eq!(checkout.quantity().await.unwrap(), "2");
    }

    #[tokio::test]
    async fn test_remove_item_leaves_the_rest() {
        let app = MockStorefront::new();
        let checkout = checkout_with(&app, &["Blackberry", "Nokia Edge"]).await;

        checkout.remove_item("Blackberry").await.unwrap();
        assert_eq!(checkout.item_names().await.unwrap(), vec!["Nokia Edge"]);
        assert_eq!(app.cart_contents(), vec!["Nokia Edge"]);
    }

    #[tokio::test]
    async fn test_remove_missing_item_changes_nothing() {
        let app = MockStorefront::new();
        let checkout = checkout_with(&app, &["Blackberry"]).await;

        let err = checkout.remove_item("Iphone X").await.unwrap_err();
        assert!(matches!(err, CarritoError::ItemNotFound { name } if name == "Iphone X"));
        assert_eq!(checkout.item_names().await.unwrap(), vec!["Blackberry"]);
    }
}
