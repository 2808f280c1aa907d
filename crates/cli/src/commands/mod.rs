//! Subcommand implementations.
//!
//! Commands print results to stdout (JSON for resources, plain text for
//! status lines) and leave logging to `tracing` on stderr.

pub mod auth;
pub mod bulk_requests;
pub mod products;

use farm_direct_client::MarketplaceClient;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

/// Probe the API root.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or answers non-2xx.
pub async fn health(api: &MarketplaceClient) -> Result<(), Box<dyn std::error::Error>> {
    api.health_check().await?;
    print_line(&format!("{} is up", api.gateway().api_root()));
    Ok(())
}

/// List all product categories.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn categories(api: &MarketplaceClient) -> Result<(), Box<dyn std::error::Error>> {
    let categories = api.list_categories().await?;
    print_json(&categories)?;
    Ok(())
}

/// Borrow the token as the plain string the API calls take.
fn exposed(token: Option<&SecretString>) -> Option<&str> {
    token.map(ExposeSecret::expose_secret)
}

/// Print the server message of a mutation and its payload, if any.
fn print_outcome(message: Option<&str>, data: Option<&Value>) -> Result<(), serde_json::Error> {
    if let Some(message) = message {
        print_line(message);
    }
    if let Some(data) = data.filter(|d| !d.is_null()) {
        print_json(data)?;
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}

#[allow(clippy::print_stdout)]
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposed_token() {
        let token = SecretString::from("t1");
        assert_eq!(exposed(Some(&token)), Some("t1"));
        assert_eq!(exposed(None), None);
    }

    #[test]
    fn test_print_helpers_accept_values() {
        assert!(print_json(&serde_json::json!({"id": 1})).is_ok());
        assert!(print_outcome(Some("Deleted"), Some(&Value::Null)).is_ok());
    }
}
