//! Diagnostic logging
//!
//! Filter resolution order:
//!
//! 1. `EXPENSE_TRACKER_LOG` (e.g. `debug`, `expense_tracker=trace`)
//! 2. `RUST_LOG`
//! 3. the `log_level` setting
//! 4. `warn`
//!
//! Output goes to stderr so command output on stdout stays clean.

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides every other log filter source
pub const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter from the environment, then `configured`, then the default
pub fn resolve_filter(configured: Option<&str>) -> EnvFilter {
    if let Ok(level) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(level) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    configured
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber; later calls are ignored
pub fn init(configured: Option<&str>) {
    let console_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(resolve_filter(configured))
        .with(console_layer)
        .try_init();
}
