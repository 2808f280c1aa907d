//! Per-request options.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use super::GatewayError;

/// Method, headers and body for one gateway call.
///
/// The default is a `GET` with no caller headers and no body; the gateway
/// adds `Content-Type: application/json` underneath whatever is set here.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Caller headers, merged over the gateway defaults.
    pub headers: HeaderMap,
    /// Serialized request body.
    pub body: Option<String>,
}

impl RequestOptions {
    /// Options for a request with the given method.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// A `GET` request.
    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// A `POST` request.
    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// A `PATCH` request.
    #[must_use]
    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    /// A `DELETE` request.
    #[must_use]
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Encode` if `body` cannot be serialized. The
    /// failure is logged like any other gateway failure.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, GatewayError> {
        match serde_json::to_string(body) {
            Ok(json) => {
                self.body = Some(json);
                Ok(self)
            }
            Err(e) => {
                let err = GatewayError::Encode(e);
                tracing::error!(method = %self.method, error = %err, "API request failed");
                Err(err)
            }
        }
    }

    /// Set a raw, already-serialized body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a caller header, replacing earlier values for the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a caller header from strings.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidHeader` if the name or value is not
    /// valid HTTP.
    pub fn header(self, name: &str, value: &str) -> Result<Self, GatewayError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GatewayError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::InvalidHeader(format!("{name}: {e}")))?;
        Ok(self.with_header(name, value))
    }
}
