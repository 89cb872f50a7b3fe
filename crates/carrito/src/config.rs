//! Suite configuration.
//!
//! Defaults match the demo deployment; everything can be overridden through
//! `CARRITO_*` environment variables before a run.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::result::{CarritoError, CarritoResult};
use crate::wait::{WaitOptions, DEFAULT_WAIT_TIMEOUT_MS};

/// Base URL of the demo application.
pub const DEFAULT_BASE_URL: &str = "https://rahulshettyacademy.com/angularpractice/";

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Browser the suite asks the driver to launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    /// Chrome / Chromium
    #[default]
    Chrome,
    /// Firefox
    Firefox,
}

impl Browser {
    /// Lowercase name, as used in configuration values.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Browser {
    type Err = CarritoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chrome" | "chromium" => Ok(Self::Chrome),
            "firefox" => Ok(Self::Firefox),
            other => Err(CarritoError::InvalidArgument {
                message: format!("unknown browser '{other}'"),
            }),
        }
    }
}

/// Per-run configuration for the suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL the entry page is served from
    pub base_url: String,
    /// Browser to request from the driver
    pub browser: Browser,
    /// Run the browser without a visible window
    pub headless: bool,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Timeout applied to presence waits, in milliseconds
    pub wait_timeout_ms: u64,
    /// Root directory for logs, screenshots, and reports
    pub artifact_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: Browser::default(),
            headless: false,
            window_width: 1920,
            window_height: 1080,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
        }
    }
}

impl SuiteConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden from the process environment.
    ///
    /// Recognized variables: `CARRITO_BASE_URL`, `CARRITO_BROWSER`,
    /// `CARRITO_HEADLESS`, `CARRITO_ARTIFACT_DIR`.
    ///
    /// # Errors
    ///
    /// Fails with [`CarritoError::InvalidArgument`] when a set variable has
    /// an unparseable value.
    pub fn from_env() -> CarritoResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden from an arbitrary variable lookup. `from_env` is
    /// this with `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CarritoResult<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("CARRITO_BASE_URL") {
            config.base_url = url;
        }
        if let Some(browser) = lookup("CARRITO_BROWSER") {
            config.browser = browser.parse()?;
        }
        if let Some(headless) = lookup("CARRITO_HEADLESS") {
            config.headless = parse_bool(&headless)?;
        }
        if let Some(dir) = lookup("CARRITO_ARTIFACT_DIR") {
            config.artifact_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the artifact root directory.
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    /// Set the presence-wait timeout in milliseconds.
    #[must_use]
    pub const fn with_wait_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.wait_timeout_ms = timeout_ms;
        self
    }

    /// Directory for run logs.
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.artifact_dir.join("logs")
    }

    /// Directory for failure screenshots.
    #[must_use]
    pub fn screenshot_dir(&self) -> PathBuf {
        self.artifact_dir.join("screenshots")
    }

    /// Directory for HTML reports.
    #[must_use]
    pub fn report_dir(&self) -> PathBuf {
        self.artifact_dir.join("reports")
    }

    /// Wait options derived from the configured timeout.
    #[must_use]
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new().with_timeout(self.wait_timeout_ms)
    }

    /// Create the artifact directory tree.
    ///
    /// # Errors
    ///
    /// Propagates filesystem failures as [`CarritoError::Io`].
    pub fn ensure_artifact_dirs(&self) -> CarritoResult<()> {
        for dir in [self.log_dir(), self.screenshot_dir(), self.report_dir()] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> CarritoResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(CarritoError::InvalidArgument {
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Path to a file shipped under the crate's `testdata/` directory.
#[must_use]
pub fn testdata_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}
