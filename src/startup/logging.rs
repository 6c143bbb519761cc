//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "authenticator=info";
const VERBOSE_FILTER: &str = "authenticator=debug";

/// Pick the filter directive: `RUST_LOG` wins, then `--verbose`.
pub fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ if verbose => VERBOSE_FILTER.to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install a stderr `fmt` subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::try_new(filter_directive(verbose, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
