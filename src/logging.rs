use tracing_subscriber::EnvFilter;

/// Send diagnostics to stderr so stdout stays clean for results.
/// Unknown directives fall back to `warn`; repeated calls are no-ops.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
