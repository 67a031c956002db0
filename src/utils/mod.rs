pub mod build_info;

pub const DEFAULT_LOG_FILTER: &str = "calcbook=info";

/// Installs the global tracing subscriber, writing to stderr so command
/// output on stdout stays clean. Returns `false` when a subscriber was
/// already installed.
pub fn init_tracing(filter: &str) -> bool {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
