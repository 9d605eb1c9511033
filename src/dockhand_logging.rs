//! Logging setup.
//!
//! Unique responsibility: install a `tracing` subscriber for binaries built
//! on this crate. Events go to stderr; filtering follows `RUST_LOG`
//! (e.g. `dockhand_provider=debug` to see every request attempt).

use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Install the stderr subscriber with the `info` default.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_logging() -> Result<(), TryInitError> {
    init_logging_with_default(DEFAULT_LOG_LEVEL)
}

/// Install the stderr subscriber, falling back to `default_level` when
/// `RUST_LOG` is unset.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_logging_with_default(default_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init()
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
