//! Request gateway: the single choke point for outbound API calls.
//!
//! # Responsibilities
//!
//! - URL composition: `api_root + endpoint`, plain concatenation
//! - Header merging: defaults < caller headers < injected `Authorization`
//! - Failure normalization: every non-2xx response becomes one message
//!
//! Calls are stateless and independent. The gateway never retries, never
//! backs off and imposes no timeout of its own.
//!
//! # Example
//!
//! ```rust,ignore
//! use farm_direct_client::gateway::{Gateway, RequestOptions};
//!
//! let gateway = Gateway::new("https://api.farmdirect.example");
//!
//! // Public call
//! let categories: serde_json::Value = gateway
//!     .request("/product/category", RequestOptions::get())
//!     .await?;
//!
//! // Authenticated call
//! let mine: serde_json::Value = gateway
//!     .authenticated_request("/product/user-products", RequestOptions::get(), Some(token))
//!     .await?;
//! ```

mod error;
mod headers;
mod options;

pub use error::{GatewayError, error_message};
pub use headers::{bearer, default_headers, merge_headers};
pub use options::RequestOptions;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ClientConfig;

/// HTTP gateway to the marketplace API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    client: reqwest::Client,
    api_root: String,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("api_root", &self.inner.api_root)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Create a gateway for the given API root.
    #[must_use]
    pub fn new(api_root: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_root)
    }

    /// Create a gateway from loaded configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_root_url.clone())
    }

    /// Create a gateway that reuses an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                client,
                api_root: api_root.into(),
            }),
        }
    }

    /// The configured API root.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }

    /// Full URL for an endpoint path.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.inner.api_root)
    }

    /// Issue an unauthenticated request and decode the JSON response body.
    ///
    /// Decoding into `serde_json::Value` returns the body unchanged. An empty
    /// success body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// - `GatewayError::Transport` if the call never got a response
    /// - `GatewayError::Api` for a non-2xx status, carrying the normalized
    ///   message
    /// - `GatewayError::Decode` if a 2xx body does not decode into `T`
    /// - `GatewayError::InvalidHeader` for unusable header values
    ///
    /// Every failure is logged before it is returned.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, GatewayError> {
        self.send(endpoint, options, None).await
    }

    /// Issue a request with `Authorization: Bearer <token>` injected.
    ///
    /// A `None` or empty token sends exactly what [`Gateway::request`] would.
    /// Whether an endpoint needs a token is the server's call, not the
    /// gateway's.
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::request`].
    pub async fn authenticated_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<T, GatewayError> {
        let authorization = match bearer(token) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(endpoint, error = %err, "API request failed");
                return Err(err);
            }
        };
        self.send(endpoint, options, authorization).await
    }

    #[instrument(skip(self, options, authorization), fields(method = %options.method))]
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        authorization: Option<reqwest::header::HeaderValue>,
    ) -> Result<T, GatewayError> {
        let result = self.execute(endpoint, options, authorization).await;

        if let Err(err) = &result {
            tracing::error!(
                endpoint,
                status = err.status(),
                error = %err,
                "API request failed"
            );
        }

        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        authorization: Option<reqwest::header::HeaderValue>,
    ) -> Result<T, GatewayError> {
        let url = self.url(endpoint);
        let headers = merge_headers(default_headers(), &options.headers, authorization);

        let mut builder = self
            .inner
            .client
            .request(options.method, &url)
            .headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            // An unreadable error body reads as empty.
            let body = response.bytes().await.unwrap_or_default();
            tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "API response");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "API response");

        decode_body(&body)
    }
}

/// Decode a success body, reading an empty body as JSON `null`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null).map_err(GatewayError::Decode);
    }
    serde_json::from_slice(body).map_err(GatewayError::Decode)
}
