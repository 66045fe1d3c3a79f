//! Diagnostics go to stderr so stdout only carries progress lines.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,kml_photos=info";

/// Installs a fmt subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
