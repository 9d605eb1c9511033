//! Provider configuration.
//!
//! Unique responsibility: load and validate the settings needed to log in
//! and build a [`DockhandClient`](crate::DockhandClient).
//!
//! Environment variables (a `.env` file is honoured):
//! - `DOCKHAND_ENDPOINT` (required)
//! - `DOCKHAND_USERNAME`, `DOCKHAND_PASSWORD` (required together)
//! - `DOCKHAND_MFA_TOKEN` (optional)
//! - `DOCKHAND_AUTH_PROVIDER` (default `local`)
//! - `DOCKHAND_DEFAULT_ENV` (optional)
//! - `DOCKHAND_INSECURE` (`true`/`false`, default `false`)

use std::{env, fmt};

use crate::dockhand_error::DockhandError;

/// Login provider used when none is configured.
pub const DEFAULT_AUTH_PROVIDER: &str = "local";

const ENDPOINT: &str = "DOCKHAND_ENDPOINT";
const USERNAME: &str = "DOCKHAND_USERNAME";
const PASSWORD: &str = "DOCKHAND_PASSWORD";
const MFA_TOKEN: &str = "DOCKHAND_MFA_TOKEN";
const AUTH_PROVIDER: &str = "DOCKHAND_AUTH_PROVIDER";
const DEFAULT_ENV: &str = "DOCKHAND_DEFAULT_ENV";
const INSECURE: &str = "DOCKHAND_INSECURE";

/// Connection and credential settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DockhandConfig {
    /// Backend endpoint; `https://` is assumed when no scheme is given.
    pub endpoint: String,
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
    /// One-time MFA code, when the account requires it.
    pub mfa_token: Option<String>,
    /// Login provider ID.
    pub auth_provider: String,
    /// Environment used when a call passes an empty one.
    pub default_env: String,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

impl fmt::Debug for DockhandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockhandConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("mfa_token", &self.mfa_token.as_ref().map(|_| "<redacted>"))
            .field("auth_provider", &self.auth_provider)
            .field("default_env", &self.default_env)
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl DockhandConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, only one of
    /// username/password is set, or `DOCKHAND_INSECURE` is not a boolean.
    pub fn from_env() -> Result<Self, DockhandError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DockhandError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let endpoint = get(ENDPOINT).ok_or(DockhandError::MissingEnv(ENDPOINT))?;

        let (username, password) = match (get(USERNAME), get(PASSWORD)) {
            (Some(username), Some(password)) => (username, password),
            (Some(_), None) => {
                return Err(DockhandError::IncompleteCredentials(
                    "DOCKHAND_PASSWORD must be set when DOCKHAND_USERNAME is set",
                ));
            }
            (None, Some(_)) => {
                return Err(DockhandError::IncompleteCredentials(
                    "DOCKHAND_USERNAME must be set when DOCKHAND_PASSWORD is set",
                ));
            }
            (None, None) => return Err(DockhandError::MissingEnv(USERNAME)),
        };

        let insecure = match get(INSECURE) {
            Some(value) => parse_bool(INSECURE, value)?,
            None => false,
        };

        Ok(Self {
            endpoint,
            username,
            password,
            mfa_token: get(MFA_TOKEN),
            auth_provider: get(AUTH_PROVIDER).unwrap_or_else(|| DEFAULT_AUTH_PROVIDER.to_string()),
            default_env: get(DEFAULT_ENV).unwrap_or_default(),
            insecure,
        })
    }
}

#[inline]
fn parse_bool(key: &'static str, value: String) -> Result<bool, DockhandError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DockhandError::InvalidEnv {
            key,
            value,
            reason: "expected a boolean",
        }),
    }
}
