//! Login request construction.
//!
//! Interacta accepts two mutually exclusive logins: username/password, or a
//! JWT assertion signed with a service-account key. Both answer with an
//! `accessToken` used as bearer token on every other call.

mod service_account;

use std::fmt;

use serde::Serialize;

use crate::config::Settings;
use crate::error::{InteractaError, Result};

pub use service_account::{
    check_service_account_json, AssertionClaims, KeyId, ServiceAccount, AUDIENCE,
    DEFAULT_ALGORITHM, DEFAULT_TOKEN_EXPIRATION_MINUTES,
};

/// Login path for username/password credentials, relative to the API base.
pub const LOGIN_CREDENTIALS_PATH: &str = "auth/internal/login/credentials";

/// Login path for service-account assertions, relative to the API base.
pub const LOGIN_SERVICE_PATH: &str = "auth/internal/login/service";

/// Body of a login call.
#[derive(Clone, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    /// Username/password login.
    Credentials { username: String, password: String },
    /// Service-account login with a signed assertion.
    ServiceAccount {
        #[serde(rename = "jwtAssertion")]
        jwt_assertion: String,
    },
}

impl LoginRequest {
    /// The login path for this variant.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Credentials { .. } => LOGIN_CREDENTIALS_PATH,
            Self::ServiceAccount { .. } => LOGIN_SERVICE_PATH,
        }
    }

    /// Short name of the login mode, for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Credentials { .. } => "credentials",
            Self::ServiceAccount { .. } => "service_account",
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credentials { username, .. } => f
                .debug_struct("Credentials")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::ServiceAccount { .. } => f.debug_struct("ServiceAccount").finish_non_exhaustive(),
        }
    }
}

/// Build the login request for `settings`.
///
/// A configured service account always wins; otherwise both username and
/// password must be set.
///
/// # Errors
///
/// Returns [`InteractaError::Config`] when neither login mode has enough
/// data, or [`InteractaError::Signing`] when the assertion cannot be signed.
pub fn build_login_request(settings: &Settings) -> Result<LoginRequest> {
    if let Some(account) = &settings.service_account {
        return Ok(LoginRequest::ServiceAccount {
            jwt_assertion: account.sign_assertion()?,
        });
    }

    let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
    match (non_empty(&settings.username), non_empty(&settings.password)) {
        (Some(username), Some(password)) => Ok(LoginRequest::Credentials { username, password }),
        _ => Err(InteractaError::Config(
            "no service account configured and username/password not set".to_string(),
        )),
    }
}
