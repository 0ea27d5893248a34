//! Logging setup for applications embedding media values.
//!
//! Value operations report rejected input through `tracing` at debug level;
//! this module installs a subscriber that makes those events visible.
//!
//! ```no_run
//! use media_values::logging::{init_tracing, LogLevel};
//!
//! init_tracing(LogLevel::Debug);
//! let _ = media_values::parse_rational("1//2");
//! ```

mod types;

pub use types::LogLevel;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_can_be_installed_twice() {
        init_test_tracing();
        init_test_tracing();
        assert!(crate::parse_rational("1/").is_err());
    }
}
