//! Result and error types for Carrito.

use thiserror::Error;

/// Result type for Carrito operations
pub type CarritoResult<T> = Result<T, CarritoError>;

/// Errors that can occur while driving the application under test.
///
/// The page-object layer never swallows or retries any of these; every
/// failure propagates unchanged to the calling test scenario. The single
/// exception is the bounded wait in [`crate::wait`], which retries presence
/// checks internally until its deadline and then surfaces [`Timeout`].
///
/// [`Timeout`]: CarritoError::Timeout
#[derive(Debug, Error)]
pub enum CarritoError {
    /// An element query matched nothing in the current document
    #[error("no element matches {locator}")]
    ElementNotFound {
        /// Rendered locator (strategy + selector)
        locator: String,
    },

    /// A bounded wait exceeded its deadline
    #[error("timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Configured timeout in milliseconds
        ms: u64,
        /// What the wait was polling for
        waiting_for: String,
    },

    /// An element handle was invalidated by a document change
    #[error("stale element reference: {context}")]
    StaleElement {
        /// Where the stale handle was used
        context: String,
    },

    /// Caller passed an option outside the enumerated domain
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// A matched control is present but cannot be interacted with
    #[error("control matched by {locator} is disabled")]
    DisabledControl {
        /// Rendered locator of the disabled control
        locator: String,
    },

    /// A named cart item is absent from the cart
    #[error("cart item '{name}' not found")]
    ItemNotFound {
        /// Displayed item name that was searched for
        name: String,
    },

    /// No dropdown option matched the requested visible text
    #[error("no option with visible text '{text}'")]
    NoSuchOption {
        /// Visible text that was searched for
        text: String,
    },

    /// Driver-level session failure (navigation, screenshot, teardown)
    #[error("session error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// Test data could not be loaded
    #[error("test data error: {message}")]
    Data {
        /// Error message
        message: String,
    },

    /// Two locators in a page registry share a name
    #[error("duplicate locator name '{name}' in registry")]
    DuplicateLocator {
        /// The colliding name
        name: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CarritoError {
    /// Check whether this error means "nothing matched right now".
    ///
    /// The bounded wait uses this to decide whether another poll is useful.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::StaleElement { .. }
        )
    }
}
