//! Failure artifacts: screenshots and report embeds.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Local;

use crate::result::CarritoResult;
use crate::session::Session;

/// Captures failure screenshots into a per-run directory.
#[derive(Debug, Clone)]
pub struct FailureReporter {
    screenshot_dir: PathBuf,
}

impl FailureReporter {
    /// Create a reporter writing into `screenshot_dir`.
    #[must_use]
    pub fn new(screenshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            screenshot_dir: screenshot_dir.into(),
        }
    }

    /// Directory screenshots are written into.
    #[must_use]
    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    /// Capture the session's current page and write it as
    /// `{test_name}_failed_{timestamp}.png`. Returns the written path.
    ///
    /// # Errors
    ///
    /// Propagates screenshot failures from the session and filesystem
    /// failures as [`CarritoError::Io`].
    ///
    /// [`CarritoError::Io`]: crate::result::CarritoError::Io
    pub async fn capture(&self, session: &dyn Session, test_name: &str) -> CarritoResult<PathBuf> {
        let png = session.screenshot().await?;
        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = self
            .screenshot_dir
            .join(format!("{test_name}_failed_{stamp}.png"));
        tokio::fs::create_dir_all(&self.screenshot_dir).await?;
        tokio::fs::write(&path, &png).await?;
        tracing::error!(test = test_name, path = %path.display(), "failure screenshot captured");
        Ok(path)
    }
}

/// HTML `<img>` snippet referencing a screenshot file, for report embedding.
#[must_use]
pub fn embed_html(screenshot: &Path) -> String {
    format!(
        "<div><img src=\"{}\" alt=\"screenshot\" style=\"width:304px;height:228px;\" \
         onclick=\"window.open(this.src)\" align=\"right\"/></div>",
        screenshot.display()
    )
}

/// HTML `<img>` snippet with the PNG inlined as a base64 data URI, for
/// self-contained reports.
#[must_use]
pub fn embed_data_uri(png: &[u8]) -> String {
    format!(
        "<div><img src=\"data:image/png;base64,{}\" alt=\"screenshot\" \
         style=\"width:304px;height:228px;\" onclick=\"window.open(this.src)\" \
         align=\"right\"/></div>",
        STANDARD.encode(png)
    )
}
