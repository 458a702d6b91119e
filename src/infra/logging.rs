use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber once, honoring RUST_LOG if set.
/// Defaults to info level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
