//! Header defaults and the ordered header merge.
//!
//! Precedence, lowest to highest:
//!
//! 1. Defaults (`Content-Type: application/json`)
//! 2. Caller-supplied headers
//! 3. The injected `Authorization` header
//!
//! Header names are case-insensitive; a higher layer replaces every value a
//! lower layer set for the same name.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::GatewayError;

/// Headers every request starts from.
#[must_use]
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Merge header layers into the set sent on the wire.
#[must_use]
pub fn merge_headers(
    defaults: HeaderMap,
    caller: &HeaderMap,
    authorization: Option<HeaderValue>,
) -> HeaderMap {
    let mut merged = defaults;

    for name in caller.keys() {
        merged.remove(name);
        for value in caller.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }

    if let Some(value) = authorization {
        merged.insert(AUTHORIZATION, value);
    }

    merged
}

/// Build the `Authorization: Bearer <token>` value.
///
/// Returns `Ok(None)` for an absent or empty token; that is not an error.
///
/// # Errors
///
/// Returns `GatewayError::InvalidHeader` if the token contains characters
/// that cannot appear in a header value.
pub fn bearer(token: Option<&str>) -> Result<Option<HeaderValue>, GatewayError> {
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return Ok(None);
    };

    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| GatewayError::InvalidHeader(format!("authorization: {e}")))?;
    value.set_sensitive(true);
    Ok(Some(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::header::{ACCEPT, HeaderName};

    use super::*;

    #[test]
    fn test_defaults_apply_without_caller_headers() {
        let merged = merge_headers(default_headers(), &HeaderMap::new(), None);
        assert_eq!(merged.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(merged.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_caller_overrides_default_case_insensitively() {
        let mut caller = HeaderMap::new();
        let name = HeaderName::from_bytes(b"CONTENT-TYPE").unwrap();
        caller.insert(name, HeaderValue::from_static("text/plain"));
        caller.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let merged = merge_headers(default_headers(), &caller, None);
        let content_types: Vec<_> = merged.get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types, vec!["text/plain"]);
        assert_eq!(merged.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_injected_authorization_overrides_caller() {
        let mut caller = HeaderMap::new();
        caller.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));

        let merged = merge_headers(default_headers(), &caller, bearer(Some("abc")).unwrap());
        let values: Vec<_> = merged.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Bearer abc"]);
    }

    #[test]
    fn test_caller_authorization_kept_without_token() {
        let mut caller = HeaderMap::new();
        caller.insert(AUTHORIZATION, HeaderValue::from_static("Bearer caller"));

        let merged = merge_headers(default_headers(), &caller, bearer(None).unwrap());
        assert_eq!(merged.get(AUTHORIZATION).unwrap(), "Bearer caller");
    }

    #[test]
    fn test_bearer_ignores_empty_token() {
        assert!(bearer(Some("")).unwrap().is_none());
        assert!(bearer(None).unwrap().is_none());
    }

    #[test]
    fn test_bearer_rejects_control_characters() {
        let err = bearer(Some("abc\ndef")).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidHeader(_)));
    }
}
