//! Request descriptors and typed responses.

use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::dockhand_error::DockhandError;

/// Characters escaped inside a single path segment (everything but RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Escape a value for use as one path segment (`a/b` becomes `a%2Fb`).
///
/// `.` and `..` pass through unchanged; the client refuses to send them.
#[must_use]
pub fn escape_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Description of one logical API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(&'static str, String)>,
    pub(crate) body: Option<Bytes>,
}

impl ApiRequest {
    /// Create a request for `method` on `path` (absolute, already escaped).
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter. Empty values are omitted from the URL.
    #[must_use]
    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.query.push((key, value));
        }
        self
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// The bytes are produced once and replayed on every retry attempt.
    ///
    /// # Errors
    ///
    /// Returns [`DockhandError::Encode`] if serialization fails.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, DockhandError> {
        let bytes = serde_json::to_vec(body).map_err(DockhandError::Encode)?;
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }

    /// HTTP method of the request.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path of the request.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Successful response: status plus decoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status: StatusCode,
    /// Decoded payload (`Default` when the body was empty).
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Drop the status and keep the payload.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Transform the payload, keeping the status.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            data: f(self.data),
        }
    }
}
