//! Shop page: product cards and the checkout link.

use crate::locator::{Locator, LocatorRegistry};
use crate::pages::support;
use crate::pages::CheckoutPage;
use crate::result::CarritoResult;
use crate::session::{ElementHandle, SessionHandle};
use crate::wait::WaitOptions;

/// The product listing page.
#[derive(Clone)]
pub struct ShoppingPage {
    session: SessionHandle,
    wait: WaitOptions,
}

impl std::fmt::Debug for ShoppingPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoppingPage")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl ShoppingPage {
    /// Attach to the session's current page as the shop page.
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
            .define("product-card", Self::product_card())
            .define("product-title", Self::product_title())
            .define("add-button", Self::add_button())
            .define("checkout-link", Self::checkout_link())
            .build()
    }

    fn product_card() -> Locator {
        Locator::css(".card")
    }

    fn product_title() -> Locator {
        Locator::css(".card-title")
    }

    fn add_button() -> Locator {
        Locator::css(".card-footer button")
    }

    fn checkout_link() -> Locator {
        Locator::css("a.nav-link")
    }

    /// Snapshot of the product cards currently on the page, possibly empty.
    /// An empty listing is a valid state, not a failure.
    pub async fn products(&self) -> CarritoResult<Vec<ElementHandle>> {
        self.session.find_elements(&Self::product_card()).await
    }

    /// Visible name of one product card.
    pub async fn product_name(&self, product: &ElementHandle) -> CarritoResult<String> {
        let title = product.find_element(&Self::product_title()).await?;
        Ok(title.text().await?.trim().to_string())
    }

    /// Add one product card's item to the cart.
    pub async fn add_to_cart(&self, product: &ElementHandle) -> CarritoResult<()> {
        product.find_element(&Self::add_button()).await?.click().await
    }

    /// Scan the cards for an exact, case-sensitive name match and add it.
    /// Returns whether a match was found; an absent product is not an error.
    pub async fn find_and_add_to_cart(&self, name: &str) -> CarritoResult<bool> {
        for product in self.products().await? {
            if self.product_name(&product).await? == name {
                self.add_to_cart(&product).await?;
                tracing::debug!(product = name, "added to cart");
                return Ok(true);
            }
        }
        tracing::debug!(product = name, "not in catalog");
        Ok(false)
    }

    /// Follow the checkout link. Consumes this page and returns the checkout
    /// page.
    pub async fn proceed_to_checkout(self) -> CarritoResult<CheckoutPage> {
        tracing::info!("proceeding to checkout");
        support::click(self.session.as_ref(), &Self::checkout_link()).await?;
        Ok(CheckoutPage::new(self.session).with_wait_options(self.wait))
    }
}
