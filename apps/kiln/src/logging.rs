//! Tracing initialisation for the CLI

use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects the debug level.
pub fn init(debug: bool) {
    let default = if debug { "kiln=debug" } else { "kiln=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
