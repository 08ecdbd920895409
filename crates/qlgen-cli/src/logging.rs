//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Diagnostics go to stderr so generated-file listings on stdout stay
/// machine-consumable. `RUST_LOG` overrides the default `warn` filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
