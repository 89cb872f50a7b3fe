//! Per-test session lifecycle.
//!
//! One [`Harness`] per test unit: it owns the configuration, the session
//! handle, and the failure reporter, and hands out the entry page. Tests
//! never share a session.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SuiteConfig;
use crate::pages::HomePage;
use crate::reporter::FailureReporter;
use crate::result::CarritoResult;
use crate::session::SessionHandle;

/// Owns one test's session from launch to teardown.
#[derive(Clone)]
pub struct Harness {
    config: SuiteConfig,
    session: SessionHandle,
    reporter: FailureReporter,
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Harness {
    /// Create the artifact tree, navigate the session to the configured base
    /// URL, and wrap it for the test's lifetime.
    ///
    /// # Errors
    ///
    /// Propagates artifact-directory and navigation failures.
    pub async fn launch(config: SuiteConfig, session: SessionHandle) -> CarritoResult<Self> {
        config.ensure_artifact_dirs()?;
        session.goto(&config.base_url).await?;
        tracing::info!(
            base_url = %config.base_url,
            browser = %config.browser,
            headless = config.headless,
            "session launched"
        );
        let reporter = FailureReporter::new(config.screenshot_dir());
        Ok(Self {
            config,
            session,
            reporter,
        })
    }

    /// The entry page, configured with this harness's wait timeout.
    #[must_use]
    pub fn home(&self) -> HomePage {
        HomePage::new(Arc::clone(&self.session)).with_wait_options(self.config.wait_options())
    }

    /// Reload the current page. An external reset, not a typed transition;
    /// callers re-enter through [`Harness::home`] afterwards.
    pub async fn reset(&self) -> CarritoResult<()> {
        self.session.refresh().await
    }

    /// Capture a failure screenshot named after `test_name`.
    ///
    /// # Errors
    ///
    /// Propagates screenshot and filesystem failures.
    pub async fn report_failure(&self, test_name: &str) -> CarritoResult<PathBuf> {
        self.reporter.capture(self.session.as_ref(), test_name).await
    }

    /// Tear the session down.
    pub async fn close(&self) -> CarritoResult<()> {
        tracing::info!("session closed");
        self.session.close().await
    }

    /// The wrapped session handle.
    #[must_use]
    pub fn session(&self) -> SessionHandle {
        Arc::clone(&self.session)
    }

    /// The configuration this harness was launched with.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }
}
