//! Scripted in-memory storefront application.
//!
//! Serves the four screens of the demo application and mutates its state in
//! response to clicks and keystrokes. Navigation re-renders the document and
//! bumps an epoch counter; element handles created against an older epoch (or
//! pointing at detached nodes) fail with a stale-element error, like handles
//! from a real driver after a page load.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::dom::{Document, El, NodeId};
use super::ClickAction;
use crate::locator::Locator;
use crate::result::{CarritoError, CarritoResult};
use crate::session::{Element, ElementHandle, Session, SessionHandle};

/// Product names offered by the shop screen, matching the demo application.
const DEFAULT_CATALOG: [&str; 4] = ["Iphone X", "Samsung Note 8", "Nokia Edge", "Blackberry"];

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Home,
    Shop,
    Checkout,
    Purchase,
}

impl Route {
    const fn path(self) -> &'static str {
        match self {
            Self::Home => "",
            Self::Shop => "shop",
            Self::Checkout => "checkout",
            Self::Purchase => "purchase",
        }
    }
}

#[derive(Debug)]
struct StorefrontState {
    doc: Document,
    epoch: u64,
    route: Route,
    base_url: String,
    catalog: Vec<String>,
    cart: Vec<String>,
    clicks: HashMap<String, u64>,
    closed: bool,
}

impl StorefrontState {
    fn new(catalog: Vec<String>) -> Self {
        Self {
            doc: build_home(),
            epoch: 0,
            route: Route::Home,
            base_url: String::new(),
            catalog,
            cart: Vec::new(),
            clicks: HashMap::new(),
            closed: false,
        }
    }

    fn rebuild(&mut self) {
        self.doc = match self.route {
            Route::Home => build_home(),
            Route::Shop => build_shop(&self.catalog, self.cart.len()),
            Route::Checkout => build_checkout(&self.cart),
            Route::Purchase => build_purchase(),
        };
    }

    fn navigate(&mut self, route: Route) {
        self.route = route;
        self.rebuild();
        self.epoch += 1;
    }

    fn show_alert(&mut self, text: &str) {
        let root = self.doc.root();
        let _ = self
            .doc
            .append(root, El::new("div").class("alert alert-success").text(text));
    }

    fn update_cart_badge(&mut self) {
        let root = self.doc.root();
        if let Some(badge) = self.doc.query(root, &Locator::css("a.nav-link")).first() {
            self.doc.node_mut(*badge).text = format!("Checkout ( {} )", self.cart.len());
        }
    }

    /// The country input spawns a suggestion link once the typed prefix
    /// matches a known country, and drops it again when it stops matching.
    fn update_country_suggestions(&mut self) {
        let root = self.doc.root();
        let value = self
            .doc
            .query(root, &Locator::id("country"))
            .first()
            .and_then(|id| self.doc.node(*id).attrs.get("value").cloned())
            .unwrap_or_default()
            .to_lowercase();

        let matching = !value.is_empty() && "india".starts_with(&value);
        let existing = self.doc.query(root, &Locator::css(".suggestions")).first().copied();

        match (matching, existing) {
            (true, None) => {
                let list = self.doc.append(root, El::new("div").class("suggestions"));
                let _ = self.doc.append(
                    list,
                    El::new("a").text("India").on_click(ClickAction::ChooseCountry),
                );
            }
            (false, Some(list)) => self.doc.detach(list),
            _ => {}
        }
    }

    fn handle_click(&mut self, id: NodeId) {
        if let Some(dom_id) = self.doc.node(id).attrs.get("id").cloned() {
            *self.clicks.entry(dom_id).or_default() += 1;
        }

        match self.doc.node(id).action.clone() {
            Some(ClickAction::GoToShop) => self.navigate(Route::Shop),
            Some(ClickAction::AddToCart(name)) => {
                self.cart.push(name);
                self.update_cart_badge();
            }
            Some(ClickAction::GoToCheckout) => self.navigate(Route::Checkout),
            Some(ClickAction::RemoveCartItem(name)) => {
                if let Some(pos) = self.cart.iter().position(|n| *n == name) {
                    let _ = self.cart.remove(pos);
                }
                if let Some(row) = self.doc.ancestor_with_tag(id, "tr") {
                    self.doc.detach(row);
                }
            }
            Some(ClickAction::GoToPurchase) => self.navigate(Route::Purchase),
            Some(ClickAction::ChooseCountry) => {
                let root = self.doc.root();
                if let Some(input) = self.doc.query(root, &Locator::id("country")).first().copied()
                {
                    let _ = self
                        .doc
                        .node_mut(input)
                        .attrs
                        .insert("value".to_string(), "India".to_string());
                }
                if let Some(list) = self
                    .doc
                    .query(root, &Locator::css(".suggestions"))
                    .first()
                    .copied()
                {
                    self.doc.detach(list);
                }
            }
            Some(ClickAction::CompletePurchase) => {
                self.show_alert("Success! Thank you! Your order will be delivered in next few weeks :-).");
            }
            Some(ClickAction::SubmitForm) => {
                self.show_alert("Success! The Form has been submitted successfully.");
            }
            None => self.widget_click(id),
        }
    }

    /// Default behavior for form widgets with no scripted action.
    fn widget_click(&mut self, id: NodeId) {
        let tag = self.doc.node(id).tag.clone();
        match tag.as_str() {
            "input" => {
                let kind = self.doc.node(id).attrs.get("type").cloned();
                match kind.as_deref() {
                    Some("checkbox") => {
                        let checked = self.doc.node(id).attrs.get("checked").is_some();
                        if checked {
                            let _ = self.doc.node_mut(id).attrs.remove("checked");
                        } else {
                            let _ = self
                                .doc
                                .node_mut(id)
                                .attrs
                                .insert("checked".to_string(), "true".to_string());
                        }
                    }
                    Some("radio") => {
                        let group = self.doc.node(id).attrs.get("name").cloned();
                        let root = self.doc.root();
                        for other in self.doc.query(root, &Locator::xpath("//input")) {
                            let node = self.doc.node(other);
                            let same_group = node.attrs.get("type").map(String::as_str)
                                == Some("radio")
                                && node.attrs.get("name") == group.as_ref();
                            if same_group {
                                let _ = self.doc.node_mut(other).attrs.remove("checked");
                            }
                        }
                        let _ = self
                            .doc
                            .node_mut(id)
                            .attrs
                            .insert("checked".to_string(), "true".to_string());
                    }
                    _ => {}
                }
            }
            "option" => {
                if let Some(parent) = self.doc.node(id).parent {
                    let siblings = self.doc.node(parent).children.clone();
                    for sibling in siblings {
                        if self.doc.node(sibling).tag == "option" {
                            let _ = self.doc.node_mut(sibling).attrs.remove("selected");
                        }
                    }
                }
                let _ = self
                    .doc
                    .node_mut(id)
                    .attrs
                    .insert("selected".to_string(), "true".to_string());
            }
            _ => {}
        }
    }
}

fn build_home() -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let _ = doc.append(
        root,
        El::new("a")
            .class("nav-link")
            .text("Shop")
            .on_click(ClickAction::GoToShop),
    );

    let form = doc.append(root, El::new("form"));
    let _ = doc.append(form, El::new("input").attr("type", "text").attr("name", "name"));
    let _ = doc.append(form, El::new("input").attr("type", "text").attr("name", "email"));
    let _ = doc.append(
        form,
        El::new("input")
            .attr("type", "password")
            .attr("id", "exampleInputPassword1"),
    );
    let _ = doc.append(
        form,
        El::new("input").attr("type", "checkbox").attr("id", "exampleCheck1"),
    );

    let gender = doc.append(form, El::new("select").attr("id", "exampleFormControlSelect1"));
    let _ = doc.append(gender, El::new("option").text("Male").attr("selected", "true"));
    let _ = doc.append(gender, El::new("option").text("Female"));

    let radios = [
        ("inlineRadio1", "Student", false),
        ("inlineRadio2", "Employed", false),
        // Disabled on the live site as well.
        ("inlineRadio3", "Entrepreneur", true),
    ];
    for (id, value, disabled) in radios {
        let mut radio = El::new("input")
            .attr("type", "radio")
            .attr("name", "inlineRadioOptions")
            .attr("id", id)
            .attr("value", value);
        if disabled {
            radio = radio.attr("disabled", "true");
        }
        let _ = doc.append(form, radio);
    }

    let _ = doc.append(form, El::new("input").attr("type", "date").attr("name", "bday"));
    let _ = doc.append(
        form,
        El::new("input")
            .attr("type", "submit")
            .class("btn btn-success")
            .on_click(ClickAction::SubmitForm),
    );
    doc
}

fn build_shop(catalog: &[String], cart_len: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let _ = doc.append(
        root,
        El::new("a")
            .class("nav-link btn btn-primary")
            .text(format!("Checkout ( {cart_len} )"))
            .on_click(ClickAction::GoToCheckout),
    );

    for product in catalog {
        let card = doc.append(root, El::new("div").class("card"));
        let body = doc.append(card, El::new("div").class("card-body"));
        let _ = doc.append(body, El::new("h4").class("card-title").text(product.clone()));
        let footer = doc.append(card, El::new("div").class("card-footer"));
        let _ = doc.append(
            footer,
            El::new("button")
                .class("btn btn-info")
                .text("Add")
                .on_click(ClickAction::AddToCart(product.clone())),
        );
    }
    doc
}

fn build_checkout(cart: &[String]) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let table = doc.append(root, El::new("table").attr("id", "cart"));
    for item in cart {
        let row = doc.append(table, El::new("tr").class("cart-row"));
        let name_cell = doc.append(row, El::new("td"));
        let _ = doc.append(
            name_cell,
            El::new("h4").class("media-heading").text(item.clone()),
        );
        let action_cell = doc.append(row, El::new("td"));
        let _ = doc.append(
            action_cell,
            El::new("button")
                .class("btn btn-danger")
                .text("X")
                .on_click(ClickAction::RemoveCartItem(item.clone())),
        );
    }
    let _ = doc.append(
        root,
        El::new("input").attr("id", "quantity").attr("value", "1"),
    );
    let _ = doc.append(
        root,
        El::new("button")
            .class("btn btn-success")
            .text("Checkout")
            .on_click(ClickAction::GoToPurchase),
    );
    doc
}

fn build_purchase() -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let _ = doc.append(
        root,
        El::new("input").attr("type", "text").attr("id", "country"),
    );
    let _ = doc.append(
        root,
        El::new("input").attr("type", "checkbox").attr("id", "checkbox2"),
    );
    let _ = doc.append(
        root,
        El::new("input")
            .attr("type", "submit")
            .attr("value", "Purchase")
            .class("btn btn-success")
            .on_click(ClickAction::CompletePurchase),
    );
    doc
}

/// The in-memory storefront application.
///
/// Cloning is cheap and shares the underlying application state; use
/// [`MockStorefront::session`] to hand the suite a [`SessionHandle`] and keep
/// a clone for state assertions.
#[derive(Debug, Clone)]
pub struct MockStorefront {
    state: Arc<Mutex<StorefrontState>>,
}

impl Default for MockStorefront {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStorefront {
    /// Create a storefront with the demo application's product catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(DEFAULT_CATALOG)
    }

    /// Create a storefront with a custom product catalog.
    #[must_use]
    pub fn with_catalog<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog = products.into_iter().map(Into::into).collect();
        Self {
            state: Arc::new(Mutex::new(StorefrontState::new(catalog))),
        }
    }

    /// Hand out a session handle onto this storefront.
    #[must_use]
    pub fn session(&self) -> SessionHandle {
        Arc::new(self.clone())
    }

    /// Current cart contents, in add order. Test assertion hook.
    #[must_use]
    pub fn cart_contents(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.cart.clone())
            .unwrap_or_default()
    }

    /// How often the element with the given DOM id has been clicked.
    /// Test assertion hook.
    #[must_use]
    pub fn click_count(&self, dom_id: &str) -> u64 {
        self.state
            .lock()
            .map(|state| state.clicks.get(dom_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn lock(&self) -> CarritoResult<MutexGuard<'_, StorefrontState>> {
        self.state.lock().map_err(|_| CarritoError::Session {
            message: "storefront state poisoned".to_string(),
        })
    }
}

fn ensure_open(state: &StorefrontState) -> CarritoResult<()> {
    if state.closed {
        return Err(CarritoError::Session {
            message: "session is closed".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl Session for MockStorefront {
    async fn goto(&self, url: &str) -> CarritoResult<()> {
        let mut state = self.lock()?;
        ensure_open(&state)?;
        state.base_url = url.to_string();
        state.cart.clear();
        state.navigate(Route::Home);
        tracing::debug!(url, "navigated to storefront home");
        Ok(())
    }

    async fn refresh(&self) -> CarritoResult<()> {
        let mut state = self.lock()?;
        ensure_open(&state)?;
        // A reload resets the client-side application state.
        state.cart.clear();
        state.rebuild();
        state.epoch += 1;
        Ok(())
    }

    async fn current_url(&self) -> CarritoResult<String> {
        let state = self.lock()?;
        ensure_open(&state)?;
        Ok(format!("{}{}", state.base_url, state.route.path()))
    }

    async fn find_element(&self, locator: &Locator) -> CarritoResult<ElementHandle> {
        let state = self.lock()?;
        ensure_open(&state)?;
        let root = state.doc.root();
        match state.doc.query(root, locator).first() {
            Some(id) => Ok(Box::new(MockElement {
                state: Arc::clone(&self.state),
                node: *id,
                epoch: state.epoch,
            })),
            None => Err(CarritoError::ElementNotFound {
                locator: locator.to_string(),
            }),
        }
    }

    async fn find_elements(&self, locator: &Locator) -> CarritoResult<Vec<ElementHandle>> {
        let state = self.lock()?;
        ensure_open(&state)?;
        let root = state.doc.root();
        Ok(state
            .doc
            .query(root, locator)
            .into_iter()
            .map(|id| {
                Box::new(MockElement {
                    state: Arc::clone(&self.state),
                    node: id,
                    epoch: state.epoch,
                }) as ElementHandle
            })
            .collect())
    }

    async fn screenshot(&self) -> CarritoResult<Vec<u8>> {
        let state = self.lock()?;
        ensure_open(&state)?;
        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(state.route.path().as_bytes());
        Ok(data)
    }

    async fn close(&self) -> CarritoResult<()> {
        let mut state = self.lock()?;
        state.closed = true;
        Ok(())
    }
}

struct MockElement {
    state: Arc<Mutex<StorefrontState>>,
    node: NodeId,
    epoch: u64,
}

impl MockElement {
    fn lock(&self) -> CarritoResult<MutexGuard<'_, StorefrontState>> {
        self.state.lock().map_err(|_| CarritoError::Session {
            message: "storefront state poisoned".to_string(),
        })
    }

    fn guard(&self, state: &StorefrontState, op: &str) -> CarritoResult<()> {
        if state.epoch != self.epoch || !state.doc.is_attached(self.node) {
            return Err(CarritoError::StaleElement {
                context: op.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Element for MockElement {
    async fn click(&self) -> CarritoResult<()> {
        let mut state = self.lock()?;
        self.guard(&state, "click")?;
        state.handle_click(self.node);
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> CarritoResult<()> {
        let mut state = self.lock()?;
        self.guard(&state, "send_keys")?;
        let value = state
            .doc
            .node(self.node)
            .attrs
            .get("value")
            .cloned()
            .unwrap_or_default();
        let _ = state
            .doc
            .node_mut(self.node)
            .attrs
            .insert("value".to_string(), format!("{value}{text}"));
        if state.doc.node(self.node).attrs.get("id").map(String::as_str) == Some("country") {
            state.update_country_suggestions();
        }
        Ok(())
    }

    async fn clear(&self) -> CarritoResult<()> {
        let mut state = self.lock()?;
        self.guard(&state, "clear")?;
        let _ = state
            .doc
            .node_mut(self.node)
            .attrs
            .insert("value".to_string(), String::new());
        Ok(())
    }

    async fn text(&self) -> CarritoResult<String> {
        let state = self.lock()?;
        self.guard(&state, "text")?;
        Ok(state.doc.text_of(self.node).trim().to_string())
    }

    async fn is_selected(&self) -> CarritoResult<bool> {
        let state = self.lock()?;
        self.guard(&state, "is_selected")?;
        let attrs = &state.doc.node(self.node).attrs;
        Ok(attrs.contains_key("checked") || attrs.contains_key("selected"))
    }

    async fn is_enabled(&self) -> CarritoResult<bool> {
        let state = self.lock()?;
        self.guard(&state, "is_enabled")?;
        Ok(!state.doc.node(self.node).attrs.contains_key("disabled"))
    }

    async fn attribute(&self, name: &str) -> CarritoResult<Option<String>> {
        let state = self.lock()?;
        self.guard(&state, "attribute")?;
        Ok(state.doc.node(self.node).attrs.get(name).cloned())
    }

    async fn find_element(&self, locator: &Locator) -> CarritoResult<ElementHandle> {
        let state = self.lock()?;
        self.guard(&state, "find_element")?;
        match state.doc.query(self.node, locator).first() {
            Some(id) => Ok(Box::new(MockElement {
                state: Arc::clone(&self.state),
                node: *id,
                epoch: state.epoch,
            })),
            None => Err(CarritoError::ElementNotFound {
                locator: locator.to_string(),
            }),
        }
    }

    async fn find_elements(&self, locator: &Locator) -> CarritoResult<Vec<ElementHandle>> {
        let state = self.lock()?;
        self.guard(&state, "find_elements")?;
        Ok(state
            .doc
            .query(self.node, locator)
            .into_iter()
            .map(|id| {
                Box::new(MockElement {
                    state: Arc::clone(&self.state),
                    node: id,
                    epoch: state.epoch,
                }) as ElementHandle
            })
            .collect())
    }
}

impl std::fmt::Debug for MockElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockElement")
            .field("node", &self.node)
            .field("epoch", &self.epoch)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    async fn open_home(app: &MockStorefront) -> SessionHandle {
        let session = app.session();
        session.goto("https://storefront.test/").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_navigation_invalidates_handles() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;

        let shop_link = session.find_element(&Locator::link_text("Shop")).await.unwrap();
        shop_link.click().await.unwrap();

        let err = shop_link.click().await.unwrap_err();
        assert!(matches!(err, CarritoError::StaleElement { .. }));
    }

    #[tokio::test]
    async fn test_detached_row_handle_is_stale() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;
        session
            .find_element(&Locator::link_text("Shop"))
            .await
            .unwrap()
            .click()
            .await
            .unwrap();

        // Add one product, then go to checkout.
        let buttons = session.find_elements(&Locator::css(".card-footer button")).await.unwrap();
        buttons[0].click().await.unwrap();
        session
            .find_element(&Locator::css("a.nav-link"))
            .await
            .unwrap()
            .click()
            .await
            .unwrap();

        let row = session.find_element(&Locator::css("tr.cart-row")).await.unwrap();
        let remove = row.find_element(&Locator::css(".btn-danger")).await.unwrap();
        remove.click().await.unwrap();

        let err = row.text().await.unwrap_err();
        assert!(matches!(err, CarritoError::StaleElement { .. }));
        assert!(app.cart_contents().is_empty());
    }

    #[tokio::test]
    async fn test_entrepreneur_radio_is_disabled() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;

        let radio = session.find_element(&Locator::id("inlineRadio3")).await.unwrap();
        assert!(!radio.is_enabled().await.unwrap());
        let radio = session.find_element(&Locator::id("inlineRadio1")).await.unwrap();
        assert!(radio.is_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_radio_group_is_exclusive() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;

        let student = session.find_element(&Locator::id("inlineRadio1")).await.unwrap();
        let employed = session.find_element(&Locator::id("inlineRadio2")).await.unwrap();

        student.click().await.unwrap();
        assert!(student.is_selected().await.unwrap());

        employed.click().await.unwrap();
        assert!(employed.is_selected().await.unwrap());
        assert!(!student.is_selected().await.unwrap());
    }

    #[tokio::test]
    async fn test_checkbox_toggles_and_counts_clicks() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;

        let checkbox = session.find_element(&Locator::id("exampleCheck1")).await.unwrap();
        assert!(!checkbox.is_selected().await.unwrap());
        checkbox.click().await.unwrap();
        assert!(checkbox.is_selected().await.unwrap());
        checkbox.click().await.unwrap();
        assert!(!checkbox.is_selected().await.unwrap());
        assert_eq!(app.click_count("exampleCheck1"), 2);
    }

    #[tokio::test]
    async fn test_country_suggestion_appears_and_disappears() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;
        // Jump straight to the purchase screen.
        session
            .find_element(&Locator::link_text("Shop"))
            .await
            .unwrap()
            .click()
            .await
            .unwrap();
        session
            .find_element(&Locator::css("a.nav-link"))
            .await
            .unwrap()
            .click()
            .await
            .unwrap();
        session
            .find_element(&Locator::css("button.btn-success"))
            .await
            .unwrap()
            .click()
            .await
            .unwrap();

        let country = session.find_element(&Locator::id("country")).await.unwrap();
        country.send_keys("ind").await.unwrap();
        let suggestion = session.find_element(&Locator::link_text("India")).await.unwrap();

        suggestion.click().await.unwrap();
        assert_eq!(
            country.attribute("value").await.unwrap().as_deref(),
            Some("India")
        );
        assert!(session.find_element(&Locator::css(".suggestions")).await.is_err());
    }

    #[tokio::test]
    async fn test_screenshot_is_png_tagged() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;
        let png = session.screenshot().await.unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_closed_session_rejects_queries() {
        let app = MockStorefront::new();
        let session = open_home(&app).await;
        session.close().await.unwrap();
        let err = session.find_element(&Locator::link_text("Shop")).await.unwrap_err();
        assert!(matches!(err, CarritoError::Session { .. }));
    }
}
