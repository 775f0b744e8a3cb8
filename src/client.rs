//! Interacta API client.
//!
//! Low-level HTTP session that handles login, the bearer token and raw
//! requests. Higher-level operations are implemented via traits on entity
//! types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::auth::{build_login_request, LoginRequest};
use crate::config::Settings;
use crate::error::{InteractaError, Result};
use crate::response::{FromResponse, RawResponse};

/// Path appended to the portal base URL.
pub const API_PATH: &str = "portal/api/";

const USER_AGENT: &str = concat!("interactapi/", env!("CARGO_PKG_VERSION"));
const APPLICATION_JSON: &str = "application/json";

/// Interacta API session.
///
/// Holds the HTTP transport, the normalized API base URL and, after a
/// successful [`login`](Self::login), the bearer token. Entity-specific
/// operations are implemented via the `Get`, `List`, `Create`, `Update` and
/// `Delete` traits on model types.
///
/// Logging in needs `&mut self`; every other call takes `&self`.
///
/// # Example
///
/// ```no_run
/// use interactapi::{InteractaClient, Settings};
///
/// # async fn example() -> interactapi::Result<()> {
/// let settings = Settings::new("https://acme.interacta.space")
///     .with_credentials("user", "password");
/// let mut client = InteractaClient::new(settings)?;
/// client.login().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InteractaClient {
    http: Client,
    base_url: Arc<Url>,
    settings: Arc<Settings>,
    access_token: Option<String>,
}

impl std::fmt::Debug for InteractaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractaClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl InteractaClient {
    /// Create a client from `INTERACTA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be loaded or the base URL is
    /// invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(Settings::from_env()?)
    }

    /// Create an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the transport cannot
    /// be built.
    pub fn new(settings: Settings) -> Result<Self> {
        let base_url = api_base_url(&settings.base_url)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            settings: Arc::new(settings),
            access_token: None,
        })
    }

    /// The API base URL, always ending in `/portal/api/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The settings this client was built from.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current bearer token, if logged in.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Reuse a token obtained elsewhere.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Whether a bearer token is held.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Log in with the mode selected by the settings.
    ///
    /// A configured service account wins over username/password. On success
    /// the token is stored and returned.
    ///
    /// # Errors
    ///
    /// Returns [`InteractaError::Config`] or [`InteractaError::Signing`] if no
    /// login request can be built, and [`InteractaError::Login`] if the server
    /// refuses it.
    pub async fn login(&mut self) -> Result<String> {
        let request = build_login_request(&self.settings)?;
        self.login_with(&request).await
    }

    /// Send a prepared login request.
    ///
    /// # Errors
    ///
    /// Returns [`InteractaError::Login`] on transport failure, on any status
    /// other than 200 and when the answer has no `accessToken`. The stored
    /// token is left untouched on failure.
    #[tracing::instrument(skip(self, request), fields(mode = request.mode()))]
    pub async fn login_with(&mut self, request: &LoginRequest) -> Result<String> {
        let url = self.base_url.join(request.path())?;

        let login_error = |message: String, raw: Option<RawResponse>| InteractaError::Login {
            message,
            response: raw.map(Box::new),
        };

        let response = self
            .http
            .post(url.clone())
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .json(request)
            .send()
            .await
            .map_err(|e| login_error(format!("url: {url} - {e}"), None))?;

        let raw = RawResponse::read(response)
            .await
            .map_err(|e| login_error(format!("url: {url} - {e}"), None))?;

        if !raw.is_ok() {
            tracing::warn!(status = raw.status.as_u16(), "login refused");
            return Err(login_error(raw.describe(), Some(raw)));
        }

        let token = serde_json::from_str::<serde_json::Value>(&raw.body)
            .ok()
            .and_then(|body| body.get("accessToken")?.as_str().map(str::to_string));

        match token {
            Some(token) => {
                tracing::info!("login succeeded");
                self.access_token = Some(token.clone());
                Ok(token)
            }
            None => Err(login_error(
                format!("{} - No accessToken", raw.describe()),
                Some(raw),
            )),
        }
    }

    /// Headers sent with every authorized call.
    ///
    /// # Errors
    ///
    /// Returns [`InteractaError::NotAuthenticated`] before a successful login.
    pub fn authorized_headers(&self) -> Result<HeaderMap> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(InteractaError::NotAuthenticated)?;

        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| InteractaError::Config("access token is not a valid header value".into()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Ok(headers)
    }

    /// Make a GET request.
    pub async fn get<R: FromResponse>(&self, path: &str) -> Result<R> {
        self.execute(self.request(Method::GET, path)?).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_query<Q, R>(&self, path: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: FromResponse,
    {
        self.execute(self.request(Method::GET, path)?.query(query))
            .await
    }

    /// Make a POST request with JSON body.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: FromResponse,
    {
        self.execute(self.request(Method::POST, path)?.json(body))
            .await
    }

    /// Make a POST request with query parameters and JSON body.
    pub async fn post_with_query<Q, B, R>(&self, path: &str, query: &Q, body: &B) -> Result<R>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
        R: FromResponse,
    {
        self.execute(self.request(Method::POST, path)?.query(query).json(body))
            .await
    }

    /// Make a PUT request with JSON body.
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: FromResponse,
    {
        self.execute(self.request(Method::PUT, path)?.json(body))
            .await
    }

    /// Make a DELETE request.
    pub async fn delete<R: FromResponse>(&self, path: &str) -> Result<R> {
        self.execute(self.request(Method::DELETE, path)?).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        Ok(self.http.request(method, url).headers(self.authorized_headers()?))
    }

    /// Send, snapshot the response and convert it.
    async fn execute<R: FromResponse>(&self, builder: RequestBuilder) -> Result<R> {
        let request = builder.build()?;
        let method = request.method().clone();

        let response = self.http.execute(request).await?;
        let raw = RawResponse::read(response).await?;
        self.log_call(&method, &raw);

        if !raw.is_ok() {
            return Err(InteractaError::Response(Box::new(raw)));
        }
        R::from_response(raw)
    }

    fn log_call(&self, method: &Method, raw: &RawResponse) {
        let status = raw.status.as_u16();
        if self.settings.log_api_calls {
            tracing::info!(%method, url = %raw.url, status, "api call");
        } else {
            tracing::debug!(%method, url = %raw.url, status, "api call");
        }
    }
}

/// Normalize a portal URL into the API base.
///
/// Trailing slashes are dropped and `/portal/api/` is appended, unless the
/// URL already ends with it.
fn api_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim_end_matches('/');
    let api_root = API_PATH.trim_end_matches('/');
    let normalized = if trimmed.ends_with(api_root) {
        format!("{trimmed}/")
    } else {
        format!("{trimmed}/{API_PATH}")
    };
    Ok(Url::parse(&normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> InteractaClient {
        InteractaClient::new(Settings::new(base_url)).unwrap()
    }

    #[test]
    fn test_client_debug() {
        let mut client = client("https://example.org");
        client.set_access_token("secret-token");
        let debug = format!("{:?}", client);
        assert!(debug.contains("InteractaClient"));
        assert!(debug.contains("base_url"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = client("https://example.org");
        let client2 = client("https://example.org/");
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(client1.base_url().as_str(), "https://example.org/portal/api/");
    }

    #[test]
    fn test_base_url_already_pointing_at_api() {
        let client = client("https://example.org/portal/api/");
        assert_eq!(client.base_url().as_str(), "https://example.org/portal/api/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = InteractaClient::new(Settings::new("not a url")).unwrap_err();
        assert!(matches!(err, InteractaError::Url(_)));
    }

    #[test]
    fn test_authorized_headers_require_token() {
        let mut client = client("https://example.org");
        assert!(!client.is_authenticated());
        assert!(matches!(
            client.authorized_headers(),
            Err(InteractaError::NotAuthenticated)
        ));

        client.set_access_token("abc123");
        let headers = client.authorized_headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(client.access_token(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_calls_before_login_fail_without_sending() {
        let client = client("https://example.org");
        let result: Result<RawResponse> = client.get("external/v2/anything").await;
        assert!(matches!(result, Err(InteractaError::NotAuthenticated)));
    }
}
