//! Error type shared by every Dockhand client operation.
//!
//! Backend failures keep their HTTP status so callers can treat a 404 as
//! "resource absent" without matching on message text.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed error used for transport failures coming from any [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for Dockhand client operations.
#[derive(Debug, Error)]
pub enum DockhandError {
    /// The endpoint was empty.
    #[error("endpoint is required")]
    MissingEndpoint,

    /// The session credential was empty.
    #[error("session cookie is required")]
    MissingSessionCookie,

    /// The session credential cannot be sent as a header value.
    #[error("session cookie contains characters not allowed in a header")]
    InvalidSessionCookie,

    /// The endpoint could not be parsed as a URL.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// The endpoint after scheme normalization.
        endpoint: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// A request path could not be resolved against the base URL.
    #[error("invalid request path {path:?}: {source}")]
    InvalidPath {
        /// The path that failed to resolve.
        path: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// A request path contains a `.` or `..` segment.
    #[error("request path {0:?} contains a dot segment")]
    DotSegment(String),

    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Missing required environment variable.
    #[error("missing required env var: {0}")]
    MissingEnv(&'static str),

    /// Invalid environment variable value.
    #[error("invalid env var {key}={value:?}: {reason}")]
    InvalidEnv {
        /// The environment variable key.
        key: &'static str,
        /// The offending value.
        value: String,
        /// The reason for invalidity.
        reason: &'static str,
    },

    /// Only one of username/password was provided.
    #[error("incomplete dockhand authentication: {0}")]
    IncompleteCredentials(&'static str),

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connection, TLS, timeout or body-read failure.
    #[error("http error: {source}")]
    Transport {
        /// Status, when the failure happened after headers were received.
        status: Option<StatusCode>,
        /// Underlying error.
        #[source]
        source: BoxError,
    },

    /// The backend answered with a non-2xx status.
    #[error("dockhand api returned status {}{}", .status.as_u16(), body_suffix(.body.as_deref()))]
    Api {
        /// HTTP status code.
        status: StatusCode,
        /// Trimmed response body, if any.
        body: Option<String>,
    },

    /// A successful response carried malformed JSON.
    #[error("failed to decode response (status {}): {source}", .status.as_u16())]
    Decode {
        /// HTTP status of the successful response.
        status: StatusCode,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The stack list was neither an array nor an object with a `stacks` field.
    #[error("unexpected stack list response shape (status {})", .status.as_u16())]
    UnexpectedShape {
        /// HTTP status of the response.
        status: StatusCode,
    },

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,

    /// The overall request deadline elapsed.
    #[error("request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// Login failed.
    #[error("{0}")]
    Login(String),
}

impl DockhandError {
    /// HTTP status associated with the failure, when the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. }
            | Self::Decode { status, .. }
            | Self::UnexpectedShape { status } => Some(*status),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the backend reported the resource as absent (404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the call was aborted by cancellation or the request deadline.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded(_))
    }
}

fn body_suffix(body: Option<&str>) -> String {
    body.map(|b| format!(": {b}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_without_body_is_generic() {
        let err = DockhandError::Api {
            status: StatusCode::BAD_GATEWAY,
            body: None,
        };
        assert_eq!(err.to_string(), "dockhand api returned status 502");
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn api_error_includes_body_text() {
        let err = DockhandError::Api {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: Some("name already taken".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "dockhand api returned status 422: name already taken"
        );
    }

    #[test]
    fn not_found_is_detected_from_status() {
        let err = DockhandError::Api {
            status: StatusCode::NOT_FOUND,
            body: None,
        };
        assert!(err.is_not_found());
        assert!(!DockhandError::Cancelled.is_not_found());
        assert!(DockhandError::Cancelled.is_cancelled());
        assert_eq!(DockhandError::MissingEndpoint.status(), None);
    }
}
