//! Error types for Interacta API operations.

use thiserror::Error;

use crate::response::RawResponse;

/// Errors that can occur during Interacta API operations.
#[derive(Debug, Error)]
pub enum InteractaError {
    /// Settings are missing or invalid, so no login can be attempted.
    #[error("Interacta configuration error: {0}")]
    Config(String),

    /// The service-account assertion could not be built or signed.
    #[error("Failed to sign service account assertion: {0}")]
    Signing(String),

    /// The login exchange failed.
    ///
    /// The message carries the request URL and, when the server answered,
    /// its status, headers and body.
    #[error("Login failed: {message}")]
    Login {
        message: String,
        response: Option<Box<RawResponse>>,
    },

    /// An authorized call returned a status other than 200.
    #[error("Interacta API error: {}", .0.describe())]
    Response(Box<RawResponse>),

    /// The response body does not match the expected shape.
    #[error("Response does not match {target}: {source}")]
    SchemaValidation {
        target: &'static str,
        source: serde_json::Error,
    },

    /// A lookup helper found no matching object.
    #[error("{0}")]
    ObjectNotFound(String),

    /// A lookup helper found more than one matching object.
    #[error("{0}")]
    MultipleObjectsFound(String),

    /// An authorized call was attempted before a successful login.
    #[error("Not authenticated: call login() first")]
    NotAuthenticated,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InteractaError {
    /// The HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(raw) => Some(raw.status.as_u16()),
            Self::Login {
                response: Some(raw),
                ..
            } => Some(raw.status.as_u16()),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token (401 or 403).
    ///
    /// Callers use this to decide when to log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Response(_)) && matches!(self.status(), Some(401 | 403))
    }
}

/// Result type alias for Interacta operations.
pub type Result<T> = core::result::Result<T, InteractaError>;
