//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::gateway::GatewayError;
use crate::session::StorageError;

/// Any error the client can return.
///
/// Library calls return the narrower type for their concern; this is for
/// callers that mix them behind one `?`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Loading configuration failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An API call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The session storage backend failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login or registration was refused.
    #[error("{0}")]
    Auth(String),
}

impl ClientError {
    /// HTTP status of a rejected API call, if that is what this is.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway(err) => err.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_message_passes_through() {
        let err = ClientError::from(GatewayError::Api {
            status: 401,
            message: "Incorrect username or password".to_string(),
        });
        assert_eq!(err.to_string(), "Incorrect username or password");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_config_error_is_prefixed() {
        let err = ClientError::from(ConfigError::MissingEnvVar("FARM_DIRECT_API_ROOT_URL".to_string()));
        assert!(err.to_string().starts_with("Configuration error: "));
        assert_eq!(err.status(), None);
    }
}
