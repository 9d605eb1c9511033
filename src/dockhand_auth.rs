//! Session login.
//!
//! Unique responsibility: exchange username/password (and optional MFA code)
//! for a `dockhand_session` cookie that a [`DockhandClient`] can send.
//!
//! Login is a single POST; it is never retried.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::{
    Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, SET_COOKIE},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dockhand_client::{DockhandClient, normalize_endpoint};
use crate::dockhand_config::{DEFAULT_AUTH_PROVIDER, DockhandConfig};
use crate::dockhand_error::DockhandError;
use crate::dockhand_transport::{PreparedRequest, REQUEST_TIMEOUT, ReqwestTransport, Transport};

/// Name of the session cookie issued by the backend.
pub const SESSION_COOKIE_NAME: &str = "dockhand_session";

const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
    provider: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mfa_token: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LoginResponse {
    requires_mfa: bool,
    error: String,
}

/// Log in with the credentials in `config` and return the Cookie header
/// value (`dockhand_session=<token>`).
///
/// # Errors
///
/// Returns an error if inputs are missing, the request fails, the backend
/// rejects the credentials, or no session cookie is issued.
pub async fn login(config: &DockhandConfig) -> Result<String, DockhandError> {
    let transport = ReqwestTransport::new(config.insecure)?;
    login_with_transport(&transport, config).await
}

/// [`login`] through a custom [`Transport`].
///
/// # Errors
///
/// Same as [`login`].
pub async fn login_with_transport(
    transport: &dyn Transport,
    config: &DockhandConfig,
) -> Result<String, DockhandError> {
    if config.endpoint.is_empty() {
        return Err(DockhandError::MissingEndpoint);
    }
    if config.username.is_empty() || config.password.is_empty() {
        return Err(DockhandError::IncompleteCredentials(
            "username and password are required for login-based auth",
        ));
    }

    let provider = if config.auth_provider.is_empty() {
        DEFAULT_AUTH_PROVIDER
    } else {
        config.auth_provider.as_str()
    };
    let payload = LoginPayload {
        username: &config.username,
        password: &config.password,
        provider,
        mfa_token: config.mfa_token.as_deref().filter(|t| !t.is_empty()),
    };
    let body = serde_json::to_vec(&payload).map_err(DockhandError::Encode)?;

    let base_url = normalize_endpoint(&config.endpoint)?;
    let url = base_url
        .join(LOGIN_PATH)
        .map_err(|source| DockhandError::InvalidPath {
            path: LOGIN_PATH.to_string(),
            source,
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let request = PreparedRequest {
        method: Method::POST,
        url,
        headers,
        body: Some(Bytes::from(body)),
    };

    debug!(url = %request.url, username = %config.username, provider, "dockhand login");

    let response = tokio::time::timeout(REQUEST_TIMEOUT, transport.send(&request))
        .await
        .map_err(|_| DockhandError::DeadlineExceeded(REQUEST_TIMEOUT))??;

    let parsed: LoginResponse = serde_json::from_slice(&response.body).unwrap_or_default();

    if !response.status.is_success() {
        return Err(login_failure(response.status, &parsed, &response.body));
    }

    match session_cookie_from_headers(&response.headers) {
        Some(cookie) => {
            info!(username = %config.username, "dockhand login succeeded");
            Ok(cookie)
        }
        None if parsed.requires_mfa => Err(DockhandError::Login(
            "dockhand login requires an MFA token (set DOCKHAND_MFA_TOKEN)".to_string(),
        )),
        None => Err(DockhandError::Login(format!(
            "dockhand login succeeded but no {SESSION_COOKIE_NAME} cookie was returned"
        ))),
    }
}

fn login_failure(status: StatusCode, parsed: &LoginResponse, body: &[u8]) -> DockhandError {
    if !parsed.error.is_empty() {
        return DockhandError::Login(format!("dockhand login failed: {}", parsed.error));
    }
    DockhandError::Login(format!(
        "dockhand login failed (status {}): {}",
        status.as_u16(),
        String::from_utf8_lossy(body).trim()
    ))
}

/// Find a non-empty `dockhand_session` cookie in `Set-Cookie` headers and
/// return it as `dockhand_session=<value>`.
#[must_use]
pub fn session_cookie_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?.trim();
            let (name, value) = pair.split_once('=')?;
            (name.trim() == SESSION_COOKIE_NAME && !value.trim().is_empty())
                .then(|| format!("{SESSION_COOKIE_NAME}={}", value.trim()))
        })
}

impl DockhandClient {
    /// Log in with `config` and build a client carrying the session cookie.
    ///
    /// # Errors
    ///
    /// Returns any error from [`login`] or [`DockhandClient::new`].
    pub async fn connect(config: &DockhandConfig) -> Result<Self, DockhandError> {
        let transport = Arc::new(ReqwestTransport::new(config.insecure)?);
        let cookie = login_with_transport(transport.as_ref(), config).await?;
        Self::with_transport(&config.endpoint, &cookie, &config.default_env, transport)
    }
}
