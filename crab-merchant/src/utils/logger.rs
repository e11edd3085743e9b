//! Logging Infrastructure
//!
//! Structured logging setup: human-readable output in development, optional
//! JSON lines in production, and a daily rolling file when a log directory
//! is configured.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// File name prefix of rolled log files
const LOG_FILE_PREFIX: &str = "crab-merchant";

/// Directives used when `RUST_LOG` is not set
fn default_directives(level: &str) -> String {
    format!("crab_merchant={level},shared={level},tower_http=info")
}

/// Initialize the global subscriber
///
/// `RUST_LOG` wins over `log_level` when present. A `log_dir` that does not
/// exist is ignored and output goes to stdout.
pub fn init_logger(log_level: &str, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let log_dir = log_dir.map(Path::new).filter(|dir| dir.exists());

    match (json, log_dir) {
        (true, Some(dir)) => builder
            .json()
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
            .init(),
        (true, None) => builder.json().init(),
        (false, Some(dir)) => builder
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
            .init(),
        (false, None) => builder.init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("debug"),
            "crab_merchant=debug,shared=debug,tower_http=info"
        );
        assert!(EnvFilter::try_new(default_directives("warn")).is_ok());
    }
}
