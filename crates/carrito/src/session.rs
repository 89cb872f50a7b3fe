//! Session and element capability traits.
//!
//! One [`Session`] represents one live browser-automation connection. The
//! concrete driver behind it is an external collaborator; the suite only
//! consumes this contract, and the in-memory storefront in [`crate::mock`]
//! implements it for hermetic tests.
//!
//! Page objects borrow the session as an `Arc<dyn Session>`; the test harness
//! constructs one session per test unit and passes it explicitly into every
//! page object constructor. There is no process-wide driver singleton.

use async_trait::async_trait;
use std::sync::Arc;

use crate::locator::Locator;
use crate::result::CarritoResult;

/// Shared handle to one live automation session.
pub type SessionHandle = Arc<dyn Session>;

/// A transient reference to a live element.
///
/// Valid until the document changes underneath it; operations on an
/// invalidated handle fail with [`CarritoError::StaleElement`]. Page objects
/// never store these across method boundaries.
///
/// [`CarritoError::StaleElement`]: crate::result::CarritoError::StaleElement
pub type ElementHandle = Box<dyn Element>;

/// Capability set of one live browser-automation connection.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigate to a URL.
    async fn goto(&self, url: &str) -> CarritoResult<()>;

    /// Reload the current page. Treated by the suite as an external reset,
    /// not a typed page transition.
    async fn refresh(&self) -> CarritoResult<()>;

    /// URL of the current page.
    async fn current_url(&self) -> CarritoResult<String>;

    /// Find the first element matching `locator`, scoped to the whole
    /// document.
    ///
    /// # Errors
    ///
    /// Fails with [`CarritoError::ElementNotFound`] when nothing matches.
    ///
    /// [`CarritoError::ElementNotFound`]: crate::result::CarritoError::ElementNotFound
    async fn find_element(&self, locator: &Locator) -> CarritoResult<ElementHandle>;

    /// Find all elements matching `locator` (possibly empty), scoped to the
    /// whole document. The returned sequence is a snapshot at call time, not
    /// live-updating.
    async fn find_elements(&self, locator: &Locator) -> CarritoResult<Vec<ElementHandle>>;

    /// Capture a screenshot of the current page as PNG bytes.
    async fn screenshot(&self) -> CarritoResult<Vec<u8>>;

    /// Tear the session down.
    async fn close(&self) -> CarritoResult<()>;
}

/// Operations available on a live element.
///
/// This is an opaque capability type: nothing about the underlying node is
/// exposed beyond these operations. `Debug` is required so handles work with
/// `Result` assertion helpers in tests.
#[async_trait]
pub trait Element: Send + Sync + std::fmt::Debug {
    /// Click the element.
    async fn click(&self) -> CarritoResult<()>;

    /// Type text into the element (appends to existing content).
    async fn send_keys(&self, text: &str) -> CarritoResult<()>;

    /// Clear the element's current value.
    async fn clear(&self) -> CarritoResult<()>;

    /// Visible text content of the element and its descendants.
    async fn text(&self) -> CarritoResult<String>;

    /// Whether a checkbox, radio, or option is currently selected.
    async fn is_selected(&self) -> CarritoResult<bool>;

    /// Whether the element can be interacted with.
    async fn is_enabled(&self) -> CarritoResult<bool>;

    /// Value of an attribute, if present.
    async fn attribute(&self, name: &str) -> CarritoResult<Option<String>>;

    /// Find the first matching element, scoped to this element's subtree.
    async fn find_element(&self, locator: &Locator) -> CarritoResult<ElementHandle>;

    /// Find all matching elements (possibly empty), scoped to this element's
    /// subtree.
    async fn find_elements(&self, locator: &Locator) -> CarritoResult<Vec<ElementHandle>>;
}
