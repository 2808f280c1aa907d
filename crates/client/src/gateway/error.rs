//! Gateway failures and error message normalization.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by the request gateway.
///
/// Every variant renders as a single human-readable message through
/// `Display`, so consumers can show `err.to_string()` as-is.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The transport failed before a response arrived (DNS, connect, TLS).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Normalized message extracted from the response body.
        message: String,
    },

    /// A 2xx response body did not decode into the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("Invalid request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A header name or value was not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl GatewayError {
    /// HTTP status of an API rejection, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Resolve the message for a failed response.
///
/// Precedence: the body's `message` field, then its `detail` field, then
/// `HTTP error! status: <code>`. A body that is not a JSON object is treated
/// as `{}`. Fields that are `null`, `false`, `0` or empty count as absent.
#[must_use]
pub fn error_message(status: u16, body: &[u8]) -> String {
    let parsed: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    field_message(&parsed, "message")
        .or_else(|| field_message(&parsed, "detail"))
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

fn field_message(body: &Value, key: &str) -> Option<String> {
    let value = body.as_object()?.get(key)?;
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        // Validation failures arrive as a list of `{ loc, msg, type }` objects.
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(Value::as_str)
                        .map_or_else(|| render(item), str::to_owned)
                })
                .collect();
            Some(messages.join("; "))
        }
        other => Some(render(other)),
    }
}

fn render(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_owned)
}
