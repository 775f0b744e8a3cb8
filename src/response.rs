//! Response snapshots and typed results.
//!
//! Every endpoint either returns the [`RawResponse`] unchanged or parses it
//! into an [`ApiResponse<T>`], which keeps the raw response attached for
//! diagnostics.

use std::ops::{Deref, DerefMut};

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use url::Url;

use crate::error::{InteractaError, Result};

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The final request URL.
    pub url: Url,
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Read the whole response body into a snapshot.
    pub(crate) async fn read(response: Response) -> Result<Self> {
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self {
            url,
            status,
            headers,
            body,
        })
    }

    /// Returns true for a 200 response.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Parse the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`InteractaError::SchemaValidation`] if the body does not fit `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| InteractaError::SchemaValidation {
            target: std::any::type_name::<T>(),
            source,
        })
    }

    /// One-line diagnostic used in error messages.
    pub fn describe(&self) -> String {
        format!(
            "url: {} - response {} headers: {:?} content: {}",
            self.url,
            self.status.as_u16(),
            self.headers,
            self.body
        )
    }
}

/// Conversion from a successful [`RawResponse`] into an endpoint result.
pub trait FromResponse: Sized {
    /// Build the result from the raw response.
    fn from_response(raw: RawResponse) -> Result<Self>;
}

impl FromResponse for RawResponse {
    fn from_response(raw: RawResponse) -> Result<Self> {
        Ok(raw)
    }
}

impl<T: DeserializeOwned> FromResponse for ApiResponse<T> {
    fn from_response(raw: RawResponse) -> Result<Self> {
        let data = raw.json()?;
        Ok(Self { data, raw })
    }
}

/// A parsed response body with the raw response attached.
///
/// Dereferences to the parsed value. Serializing an `ApiResponse` only
/// emits the parsed value.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    data: T,
    raw: RawResponse,
}

impl<T> ApiResponse<T> {
    /// The raw HTTP response this value was parsed from.
    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    /// Discard the raw response.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Split into the parsed value and the raw response.
    pub fn into_parts(self) -> (T, RawResponse) {
        (self.data, self.raw)
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for ApiResponse<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

#[cfg(test)]
pub(crate) fn raw_for_test(status: u16, body: &str) -> RawResponse {
    RawResponse {
        url: Url::parse("https://example.org/portal/api/test").unwrap(),
        status: StatusCode::from_u16(status).unwrap(),
        headers: HeaderMap::new(),
        body: body.to_string(),
    }
}
