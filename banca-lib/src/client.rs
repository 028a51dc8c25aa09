//! Main BancaClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;

/// Path prefix of every REST resource.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Message used for a failed response without a JSON `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorFallback {
    /// `"Error {status}: {reason}"`.
    Status,
    /// The body text, when it is plain text.
    Text,
}

/// The client for the bank's REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use banca_lib::BancaClient;
///
/// # async fn run() -> Result<(), banca_lib::error::ApiError> {
/// let client = BancaClient::builder()
///     .url("http://localhost:8080")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let clientes = client.clientes().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BancaClient {
    inner: Arc<BancaClientInner>,
}

#[derive(Debug)]
struct BancaClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl BancaClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> BancaClientBuilder<Missing> {
        BancaClientBuilder::new()
    }

    /// Returns the resolved base URL, prefix included.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    // -------------------------------------------------------------------------
    // Request plumbing
    // -------------------------------------------------------------------------

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        log::debug!("{} {}", method, url);

        let mut request = self.inner.http_client.request(method, url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    /// Sends a request and deserializes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send_json_with(request, ErrorFallback::Status).await
    }

    pub(crate) async fn send_json_with<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: ErrorFallback,
    ) -> Result<T, ApiError> {
        let response = self.send(request, fallback).await?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }

    /// Sends a request and returns the body as text.
    pub(crate) async fn send_text(
        &self,
        request: RequestBuilder,
        fallback: ErrorFallback,
    ) -> Result<String, ApiError> {
        let response = self.send(request, fallback).await?;
        response.text().await.map_err(|e| self.transport_error(e))
    }

    /// Sends a request and discards the body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request, ErrorFallback::Status).await.map(|_| ())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        fallback: ErrorFallback,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or_default();
        let body = response.text().await.unwrap_or_default();
        let error = match fallback {
            ErrorFallback::Status => ApiError::from_response(status.as_u16(), reason, &body),
            ErrorFallback::Text => ApiError::from_text_response(status.as_u16(), reason, &body),
        };
        log::debug!("Request failed: {}", error);
        Err(error)
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`BancaClient`].
///
/// Uses the typestate pattern so `build` is only available once the URL
/// has been set.
pub struct BancaClientBuilder<U> {
    url: U,
    api_prefix: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl BancaClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the server URL, e.g. `http://localhost:8080`.
    pub fn url(self, url: impl Into<String>) -> BancaClientBuilder<Set<String>> {
        BancaClientBuilder {
            url: Set(url.into()),
            api_prefix: self.api_prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for BancaClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> BancaClientBuilder<U> {
    /// Sets the path prefix of the REST resources.
    ///
    /// Defaults to `/api`. An empty prefix addresses resources at the root.
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl BancaClientBuilder<Set<String>> {
    /// Builds the [`BancaClient`].
    ///
    /// Fails if the URL is not an absolute `http(s)` URL or the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<BancaClient, ApiError> {
        let base_url = resolve_base_url(&self.url.0, &self.api_prefix)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(BancaClient {
            inner: Arc::new(BancaClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

/// Joins server URL and prefix, without a trailing slash.
fn resolve_base_url(url: &str, prefix: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ApiError::InvalidUrl(format!("{} ({})", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(url.to_string()));
    }

    let root = parsed.as_str().trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        Ok(root.to_string())
    } else {
        Ok(format!("{}/{}", root, prefix))
    }
}
