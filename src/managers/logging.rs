//! Logging manager
//!
//! The agent runs under cron inside a container, so all output goes to the
//! console; `RUST_LOG` overrides the default level.

use tracing_subscriber::EnvFilter;

/// Initialize console logging.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}
