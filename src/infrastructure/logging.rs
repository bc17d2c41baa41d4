//! Tracing setup
//!
//! Library code only emits `tracing` events; binaries call [`init`] once.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "KITBASH_LOG";

/// Install a stderr `fmt` subscriber. `KITBASH_LOG` wins over `filter`.
/// Calling this twice is harmless; the second call is a no-op.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Map CLI `-v` occurrences onto a filter directive.
pub fn filter_for_verbosity(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "kitbash=debug".to_string(),
        _ => "kitbash=trace".to_string(),
    }
}
