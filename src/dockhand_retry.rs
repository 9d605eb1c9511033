//! Retry policy for Dockhand requests.
//!
//! Unique responsibility: decide whether a failed attempt may be repeated,
//! how long to wait before repeating it, and how much of a response body to
//! keep. Nothing here performs I/O except the cancellable backoff sleep.
//!
//! Policy:
//! - POST/PUT/PATCH are never retried.
//! - GET/DELETE are retried on transport errors and on 429/502/503/504.
//! - Cancellation ends the call before any retry decision is made.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::dockhand_error::DockhandError;

/// Total attempts for one logical call (1 initial + 2 retries).
pub const MAX_ATTEMPTS: usize = 3;

/// Body cap for 2xx responses (10 MiB).
pub const SUCCESS_BODY_LIMIT: usize = 10 << 20;

/// Body cap for non-2xx responses (64 KiB); error bodies are diagnostic only.
pub const ERROR_BODY_LIMIT: usize = 64 << 10;

/// Outcome of a single attempt that did not end the call by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Connect/TLS/timeout/reset or body-read failure.
    TransportError,
    /// The backend answered with this status.
    Status(StatusCode),
}

/// Decide whether an attempt may be repeated.
#[must_use]
pub fn should_retry(method: &Method, attempt: Attempt) -> bool {
    if *method != Method::GET && *method != Method::DELETE {
        return false;
    }

    match attempt {
        Attempt::TransportError => true,
        Attempt::Status(status) => is_retryable_status(status),
    }
}

#[inline]
const fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 502 | 503 | 504)
}

/// Delay before retrying after the attempt with the given zero-based index.
#[must_use]
pub const fn backoff_delay(attempt: usize) -> Duration {
    match attempt {
        0 => Duration::from_millis(200),
        _ => Duration::from_millis(500),
    }
}

/// Maximum number of body bytes kept for a response with this status.
#[must_use]
pub fn body_limit(status: StatusCode) -> usize {
    if status.is_success() {
        SUCCESS_BODY_LIMIT
    } else {
        ERROR_BODY_LIMIT
    }
}

/// Sleep for the backoff of `attempt`, returning early if `cancel` fires.
///
/// # Errors
///
/// Returns [`DockhandError::Cancelled`] when the token is cancelled before
/// the delay elapses.
pub async fn sleep_backoff(cancel: &CancellationToken, attempt: usize) -> Result<(), DockhandError> {
    sleep_cancellable(cancel, backoff_delay(attempt)).await
}

/// Sleep for `delay`, returning early if `cancel` fires.
///
/// # Errors
///
/// Returns [`DockhandError::Cancelled`] when the token is cancelled first.
pub async fn sleep_cancellable(cancel: &CancellationToken, delay: Duration) -> Result<(), DockhandError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(DockhandError::Cancelled),
        () = tokio::time::sleep(delay) => Ok(()),
    }
}
