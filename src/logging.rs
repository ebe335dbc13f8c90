//! Log output to stderr.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INIT_GUARD: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    if INIT_GUARD.set(()).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore AlreadyInit when a test harness installed its own subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
