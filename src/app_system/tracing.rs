use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber once at startup. `RUST_LOG` wins; the default
/// keeps the actors and handlers at info.
pub fn setup_tracing() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
