//! Diagnostic logging to stderr.
//!
//! The filter comes from `-v` flags when given, otherwise from
//! `REFLOW_LOG`, then `RUST_LOG`, then `warn`.

use tracing_subscriber::EnvFilter;

/// Primary filter environment variable.
pub const LOG_ENV: &str = "REFLOW_LOG";
/// Fallback filter environment variable.
pub const FALLBACK_LOG_ENV: &str = "RUST_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter directive for a verbosity count and environment lookup.
#[must_use]
pub fn filter_directive<F>(verbose: u8, get_env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match verbose {
        0 => get_env(LOG_ENV)
            .or_else(|| get_env(FALLBACK_LOG_ENV))
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: u8) {
    let directive = filter_directive(verbose, |key| std::env::var(key).ok());
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
