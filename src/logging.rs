//! Diagnostic logging to stderr.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise the
/// level is `debug` with `verbose` and `warn` without. Safe to call twice.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
