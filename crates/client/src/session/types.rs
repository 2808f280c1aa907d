//! Session-related types.

use farm_direct_core::{Email, UserId, UserType};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// Identity of the logged-in user.
///
/// This is also the persisted user record, serialized as
/// `{"id": 1, "username": "alice", "userType": "seller"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User's API ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Kind of account.
    pub user_type: UserType,
}

/// The authenticated identity and its bearer token.
///
/// `Debug` never prints the token.
#[derive(Debug, Clone)]
pub struct Session {
    user: SessionUser,
    token: SecretString,
}

impl Session {
    /// Pair a user with the token that authenticates them.
    #[must_use]
    pub fn new(user: SessionUser, token: SecretString) -> Self {
        Self { user, token }
    }

    /// The session's user.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }

    /// The session's bearer token.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user && self.token.expose_secret() == other.token.expose_secret()
    }
}

impl Eq for Session {}

/// Outcome of a login or registration attempt.
///
/// Failures carry the single message to show the user. Network failures and
/// rejected credentials look the same here on purpose: both become a
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult<T> {
    /// The attempt succeeded.
    Success(T),
    /// The attempt failed with a human-readable message.
    Failure {
        /// Message to display.
        error: String,
    },
}

impl<T> AuthResult<T> {
    /// Failed outcome with the given message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Whether the attempt succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure message for a failed attempt.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { error } => Err(error),
        }
    }
}

/// Fields for a new account.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: Email,
    /// Account password.
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
    /// Kind of account.
    pub user_type: UserType,
}

fn expose_password<S: Serializer>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

/// Successful registration response.
///
/// Registration does not log the user in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Registered {
    /// Server confirmation message.
    #[serde(default)]
    pub message: Option<String>,
    /// Server payload (the created user).
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// `data` of a successful login response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    pub access_token: String,
    pub user_id: UserId,
    pub username: String,
    pub user_type: UserType,
}

/// Body of a successful login response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub data: Option<LoginData>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_user_record_format() {
        let user = SessionUser {
            id: UserId::new(1),
            username: "alice".to_string(),
            user_type: UserType::Seller,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "username": "alice", "userType": "seller"})
        );
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new(
            SessionUser {
                id: UserId::new(1),
                username: "alice".to_string(),
                user_type: UserType::Customer,
            },
            SecretString::from("very-secret-token"),
        );
        let debug = format!("{session:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("very-secret-token"));
    }

    #[test]
    fn test_registration_serializes_password() {
        let registration = Registration {
            username: "bob".to_string(),
            email: Email::parse("bob@example.com").unwrap(),
            password: SecretString::from("pw"),
            user_type: UserType::Business,
        };
        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": "pw",
                "user_type": "business"
            })
        );
        assert!(!format!("{registration:?}").contains("\"pw\""));
    }

    #[test]
    fn test_auth_result_accessors() {
        let ok: AuthResult<u8> = AuthResult::Success(1);
        assert!(ok.is_success());
        assert_eq!(ok.error(), None);

        let failed: AuthResult<u8> = AuthResult::failure("Incorrect username or password");
        assert_eq!(failed.error(), Some("Incorrect username or password"));
        assert_eq!(
            failed.into_result(),
            Err("Incorrect username or password".to_string())
        );
    }
}
