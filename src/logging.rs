use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,gaming_stresscheck=info";

/// Install the stderr subscriber used by the binaries.
pub fn init() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// A non-empty, parseable `RUST_LOG` replaces the default filter of `warn`,
/// raised to `info` for this crate.
pub fn filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
