//! Test logging initialization.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install an env-filtered subscriber writing through the test harness's
/// capture, once per process. Safe to call from every test.
///
/// Filtering defaults to `info` and follows `RUST_LOG` when set.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
