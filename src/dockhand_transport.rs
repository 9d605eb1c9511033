//! HTTP transport for the Dockhand client.
//!
//! Unique responsibility: send one prepared request and hand back the status
//! and a size-capped body. Retrying, cancellation and status evaluation live
//! in the client; the [`Transport`] trait is the seam tests use to script
//! backend behaviour without a network.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, StatusCode, header::HeaderMap};
use url::Url;

use crate::dockhand_error::{BoxError, DockhandError};
use crate::dockhand_retry::body_limit;

/// TCP connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP keep-alive interval.
pub const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

/// How long an idle pooled connection is kept.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Idle connections kept per host.
pub const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Wall-clock budget for one logical call, retries included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully built request, reused unchanged across retry attempts.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the encoded query.
    pub url: Url,
    /// Accept / Content-Type / Cookie headers.
    pub headers: HeaderMap,
    /// JSON body, serialized once.
    pub body: Option<Bytes>,
}

/// Status, headers and (capped) body of a response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, at most [`body_limit`] bytes.
    pub body: Bytes,
}

/// Failure reported by a transport.
#[derive(Debug)]
pub struct TransportFailure {
    /// Set when headers were received before the failure (body read error).
    pub status: Option<StatusCode>,
    /// Underlying error.
    pub source: BoxError,
}

impl TransportFailure {
    /// Failure before any response was received.
    #[must_use]
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            status: None,
            source: source.into(),
        }
    }

    /// Failure while reading the body of a response with `status`.
    #[must_use]
    pub fn after_response(status: StatusCode, source: impl Into<BoxError>) -> Self {
        Self {
            status: Some(status),
            source: source.into(),
        }
    }
}

impl From<TransportFailure> for DockhandError {
    fn from(value: TransportFailure) -> Self {
        Self::Transport {
            status: value.status,
            source: value.source,
        }
    }
}

/// Sends prepared requests.
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` once and return its status, headers and capped body.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportFailure`] when no complete response was received.
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportFailure>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the transport with the fixed Dockhand connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(insecure: bool) -> Result<Self, DockhandError> {
        Ok(Self {
            http: build_http_client(insecure)?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportFailure> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let mut response = builder.send().await.map_err(TransportFailure::new)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = read_capped(&mut response, body_limit(status))
            .await
            .map_err(|e| TransportFailure::after_response(status, e))?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Build the pooled HTTP client used for all Dockhand traffic.
///
/// HTTP/2 is negotiated through ALPN when the server offers it.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(insecure: bool) -> Result<reqwest::Client, DockhandError> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .tcp_keepalive(TCP_KEEPALIVE)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .timeout(REQUEST_TIMEOUT)
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .danger_accept_invalid_certs(insecure)
        .build()
        .map_err(DockhandError::HttpClient)
}

/// Read at most `limit` bytes of the body; the rest is discarded with the connection.
async fn read_capped(response: &mut reqwest::Response, limit: usize) -> Result<Bytes, reqwest::Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = limit.saturating_sub(buf.len());
        if chunk.len() >= remaining {
            buf.extend_from_slice(&chunk[..remaining]);
            break;
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}
