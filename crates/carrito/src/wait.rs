//! Bounded wait for element presence.
//!
//! The only operation in the suite with suspension semantics: a polling loop
//! with a maximum duration, used to tolerate asynchronous UI updates. Every
//! other operation completes or fails immediately.

use std::time::Duration;
use tokio::time::Instant;

use crate::locator::Locator;
use crate::result::{CarritoError, CarritoResult};
use crate::session::{ElementHandle, Session};

/// Default timeout for presence waits (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for the bounded wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll the document until an element matching `locator` exists, or the
/// timeout elapses.
///
/// Returns the first matching handle. Only "nothing matched right now"
/// failures are retried; any other session failure propagates immediately.
/// The call never blocks longer than `options.timeout_ms` plus one poll.
///
/// # Errors
///
/// Fails with [`CarritoError::Timeout`] when no match appears in time.
pub async fn wait_for_presence(
    session: &dyn Session,
    locator: &Locator,
    options: &WaitOptions,
) -> CarritoResult<ElementHandle> {
    let deadline = Instant::now() + options.timeout();

    loop {
        match session.find_element(locator).await {
            Ok(element) => return Ok(element),
            Err(err) if err.is_retryable() => {}
            Err(err) => return Err(err),
        }

        if Instant::now() >= deadline {
            tracing::debug!(%locator, timeout_ms = options.timeout_ms, "presence wait timed out");
            return Err(CarritoError::Timeout {
                ms: options.timeout_ms,
                waiting_for: locator.to_string(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockStorefront;

    #[test]
    fn test_options_builders() {
        let options = WaitOptions::new().with_timeout(500).with_poll_interval(10);
        assert_eq!(options.timeout(), Duration::from_millis(500));
        assert_eq!(options.poll_interval(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_present_element_returns_immediately() {
        let app = MockStorefront::new();
        let session = app.session();
        session.goto("https://storefront.test/").await.unwrap();

        let handle = wait_for_presence(
            session.as_ref(),
            &Locator::link_text("Shop"),
            &WaitOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(handle.text().await.unwrap(), "Shop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_element_times_out() {
        let app = MockStorefront::new();
        let session = app.session();
        session.goto("https://storefront.test/").await.unwrap();

        let options = WaitOptions::new().with_timeout(200).with_poll_interval(50);
        let err = wait_for_presence(session.as_ref(), &Locator::id("does-not-exist"), &options)
            .await
            .unwrap_err();

        assert!(matches!(err, CarritoError::Timeout { ms: 200, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_still_queries_once() {
        let app = MockStorefront::new();
        let session = app.session();
        session.goto("https://storefront.test/").await.unwrap();

        let options = WaitOptions::new().with_timeout(0);
        let found =
            wait_for_presence(session.as_ref(), &Locator::link_text("Shop"), &options).await;
        assert!(found.is_ok());
    }
}
