//! Dockhand API client.
//!
//! Unique responsibility: turn an [`ApiRequest`] into one logical HTTP call
//! against the Dockhand backend, with session-cookie authentication,
//! bounded retries for idempotent methods, capped bodies and status
//! evaluation.
//!
//! API conventions:
//! - Base URL from the provider endpoint (`https://` assumed when no scheme)
//! - Header: Cookie: `dockhand_session=<token>`
//! - Environment-scoped endpoints take `?env=<id>`
//!
//! The typed endpoint wrappers live in `dockhand_api`.

use std::{fmt, sync::Arc};

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::dockhand_error::DockhandError;
use crate::dockhand_request::{ApiRequest, ApiResponse};
use crate::dockhand_retry::{Attempt, MAX_ATTEMPTS, body_limit, should_retry, sleep_backoff};
use crate::dockhand_transport::{
    PreparedRequest, RawResponse, REQUEST_TIMEOUT, ReqwestTransport, Transport,
};

const APPLICATION_JSON: &str = "application/json";

/// Client for the Dockhand REST API.
///
/// Cloning is cheap: clones share the connection pool.
#[derive(Clone)]
pub struct DockhandClient {
    base_url: Url,
    session_cookie: HeaderValue,
    default_env: String,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
}

impl fmt::Debug for DockhandClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockhandClient")
            .field("base_url", &self.base_url.as_str())
            .field("session_cookie", &"<redacted>")
            .field("default_env", &self.default_env)
            .finish_non_exhaustive()
    }
}

impl DockhandClient {
    /// Create a client for `endpoint` authenticated with `session_cookie`.
    ///
    /// `default_env` is sent as the `env` query parameter whenever a caller
    /// passes an empty environment. With `insecure`, TLS certificates are not
    /// verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or cookie is empty, the endpoint does
    /// not parse, or the HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        session_cookie: &str,
        default_env: &str,
        insecure: bool,
    ) -> Result<Self, DockhandError> {
        let (base_url, cookie) = validate(endpoint, session_cookie)?;
        let transport = ReqwestTransport::new(insecure)?;

        debug!(base_url = %base_url, default_env, insecure, "dockhand client created");

        Ok(Self::from_parts(base_url, cookie, default_env, Arc::new(transport)))
    }

    /// Create a client that sends requests through a custom [`Transport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or cookie is empty or the endpoint
    /// does not parse.
    pub fn with_transport(
        endpoint: &str,
        session_cookie: &str,
        default_env: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, DockhandError> {
        let (base_url, cookie) = validate(endpoint, session_cookie)?;
        Ok(Self::from_parts(base_url, cookie, default_env, transport))
    }

    fn from_parts(
        base_url: Url,
        session_cookie: HeaderValue,
        default_env: &str,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url,
            session_cookie,
            default_env: default_env.to_string(),
            transport,
            cancel: CancellationToken::new(),
        }
    }

    /// Clone of this client whose calls abort when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self.clone()
        }
    }

    pub(crate) const fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Environment used when callers pass an empty one.
    #[must_use]
    pub fn default_env(&self) -> &str {
        &self.default_env
    }

    /// Return `env` if non-empty, otherwise the configured default.
    #[must_use]
    pub fn resolve_env<'a>(&'a self, env: &'a str) -> &'a str {
        if env.is_empty() { &self.default_env } else { env }
    }

    /// Perform `request` and decode the JSON body into `T`.
    ///
    /// An empty body or a JSON `null` yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, cancellation,
    /// deadline expiry, or malformed JSON in a successful response.
    pub async fn execute<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>, DockhandError>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.execute_raw(request).await?;
        if raw.data.is_empty() {
            return Ok(raw.map(|_| T::default()));
        }

        let data = serde_json::from_slice::<Option<T>>(&raw.data).map_err(|source| {
            DockhandError::Decode {
                status: raw.status,
                source,
            }
        })?;
        Ok(ApiResponse {
            status: raw.status,
            data: data.unwrap_or_default(),
        })
    }

    /// Perform `request` and discard the response body.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute), minus decoding.
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<ApiResponse<()>, DockhandError> {
        Ok(self.execute_raw(request).await?.map(|_| ()))
    }

    /// Perform `request` and return the raw (capped) body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, cancellation
    /// or deadline expiry.
    pub async fn execute_raw(&self, request: ApiRequest) -> Result<ApiResponse<Bytes>, DockhandError> {
        let prepared = self.prepare(request)?;

        let response = tokio::time::timeout(REQUEST_TIMEOUT, self.run_attempts(&prepared))
            .await
            .map_err(|_| DockhandError::DeadlineExceeded(REQUEST_TIMEOUT))??;

        evaluate(response)
    }

    /// Build URL and headers once for all attempts.
    fn prepare(&self, request: ApiRequest) -> Result<PreparedRequest, DockhandError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = request;

        if path.split('/').any(is_dot_segment) {
            return Err(DockhandError::DotSegment(path));
        }

        let mut url = self
            .base_url
            .join(&path)
            .map_err(|source| DockhandError::InvalidPath { path, source })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }
        headers.insert(COOKIE, self.session_cookie.clone());

        Ok(PreparedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Attempt loop: at most [`MAX_ATTEMPTS`] sequential sends.
    async fn run_attempts(&self, prepared: &PreparedRequest) -> Result<RawResponse, DockhandError> {
        let mut attempt = 0;

        loop {
            debug!(
                method = %prepared.method,
                url = %prepared.url,
                attempt = attempt + 1,
                "dockhand request"
            );

            let outcome = tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Err(DockhandError::Cancelled),
                outcome = self.transport.send(prepared) => outcome,
            };
            let attempts_left = attempt + 1 < MAX_ATTEMPTS;

            match outcome {
                Err(failure) => {
                    if attempts_left && should_retry(&prepared.method, Attempt::TransportError) {
                        warn!(
                            method = %prepared.method,
                            url = %prepared.url,
                            attempt = attempt + 1,
                            error = %failure.source,
                            "dockhand request failed, retrying"
                        );
                        sleep_backoff(&self.cancel, attempt).await?;
                        attempt += 1;
                        continue;
                    }
                    return Err(failure.into());
                }
                Ok(mut response) => {
                    response.body.truncate(body_limit(response.status));

                    if attempts_left && should_retry(&prepared.method, Attempt::Status(response.status)) {
                        warn!(
                            method = %prepared.method,
                            url = %prepared.url,
                            attempt = attempt + 1,
                            status = response.status.as_u16(),
                            "dockhand returned a transient status, retrying"
                        );
                        sleep_backoff(&self.cancel, attempt).await?;
                        attempt += 1;
                        continue;
                    }
                    return Ok(response);
                }
            }
        }
    }
}

/// `.` or `..`, literal or percent-encoded, which URL resolution would collapse.
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// Turn the final response of the loop into a result.
fn evaluate(response: RawResponse) -> Result<ApiResponse<Bytes>, DockhandError> {
    let RawResponse { status, body, .. } = response;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body).trim().to_string();
        debug!(status = status.as_u16(), "dockhand returned an error status");
        return Err(DockhandError::Api {
            status,
            body: (!text.is_empty()).then_some(text),
        });
    }

    Ok(ApiResponse { status, data: body })
}

/// Check required inputs and normalize the endpoint.
fn validate(endpoint: &str, session_cookie: &str) -> Result<(Url, HeaderValue), DockhandError> {
    if endpoint.is_empty() {
        return Err(DockhandError::MissingEndpoint);
    }
    if session_cookie.is_empty() {
        return Err(DockhandError::MissingSessionCookie);
    }

    let base_url = normalize_endpoint(endpoint)?;
    let mut cookie =
        HeaderValue::from_str(session_cookie).map_err(|_| DockhandError::InvalidSessionCookie)?;
    cookie.set_sensitive(true);

    Ok((base_url, cookie))
}

/// Prepend `https://` when the endpoint has no scheme, then parse it.
///
/// # Errors
///
/// Returns [`DockhandError::InvalidEndpoint`] if the result is not a valid URL.
pub fn normalize_endpoint(endpoint: &str) -> Result<Url, DockhandError> {
    let endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };

    Url::parse(&endpoint).map_err(|source| DockhandError::InvalidEndpoint { endpoint, source })
}
