//! Session store: who is logged in, and the only writer of that fact.
//!
//! # Lifecycle
//!
//! ```text
//! Unresolved ──bootstrap──▶ Anonymous ◀──logout── Authenticated
//!                  │            │                      ▲
//!                  └────────────┴───────login──────────┘
//! ```
//!
//! `Unresolved` is left inside [`SessionStore::new`], so a constructed store
//! always reports `Anonymous` or `Authenticated`.
//!
//! # Persistence
//!
//! The session is persisted as two records, [`keys::TOKEN`] and
//! [`keys::USER`]. Both exist or neither does: a half-present or corrupt
//! pair is wiped at bootstrap and the store starts anonymous.
//!
//! # Overlapping logins
//!
//! Each login takes a ticket from a monotonic counter. A login that
//! completes after a newer login (or a logout) has already been applied is
//! dropped and reported as a failure, so the newest session change always
//! wins regardless of response order.

mod storage;
mod types;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError, keys};
pub use types::{AuthResult, Registered, Registration, Session, SessionUser};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::header::{AUTHORIZATION, HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::gateway::{Gateway, GatewayError, RequestOptions, bearer};
use types::LoginResponse;

/// Login endpoint path.
pub const LOGIN_ENDPOINT: &str = "/user/login";

/// Registration endpoint path.
pub const REGISTER_ENDPOINT: &str = "/user/register";

/// Message for a login overtaken by a newer login or a logout.
pub const SUPERSEDED_LOGIN: &str = "login superseded by a newer session change";

/// Authentication state of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// The persisted session has not been loaded yet.
    Unresolved,
    /// No valid session.
    Anonymous,
    /// A user and token are held in memory.
    Authenticated,
}

/// Client-side session container.
///
/// Cheap to clone; clones share one session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    gateway: Gateway,
    storage: Arc<dyn SessionStorage>,
    slot: RwLock<SessionSlot>,
    /// Last ticket handed to a login attempt.
    tickets: AtomicU64,
}

#[derive(Default)]
struct SessionSlot {
    resolved: bool,
    session: Option<Session>,
    /// Highest ticket whose outcome has been applied. Logout raises it to
    /// the last issued ticket, invalidating every login still in flight.
    applied: u64,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .field("user", &self.user())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store and restore any persisted session.
    #[must_use]
    pub fn new(gateway: Gateway, storage: Arc<dyn SessionStorage>) -> Self {
        let store = Self {
            inner: Arc::new(SessionStoreInner {
                gateway,
                storage,
                slot: RwLock::new(SessionSlot::default()),
                tickets: AtomicU64::new(0),
            }),
        };
        store.bootstrap();
        store
    }

    /// The gateway this store authenticates through.
    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived State
    // ─────────────────────────────────────────────────────────────────────────

    /// Current authentication state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        let slot = self.read_slot();
        match (slot.resolved, slot.session.is_some()) {
            (false, _) => AuthState::Unresolved,
            (true, false) => AuthState::Anonymous,
            (true, true) => AuthState::Authenticated,
        }
    }

    /// Whether a user and token are held in memory.
    ///
    /// Never consults storage.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_slot().session.is_some()
    }

    /// The logged-in user.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.read_slot().session.as_ref().map(|s| s.user().clone())
    }

    /// The current bearer token.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read_slot().session.as_ref().map(|s| s.token().clone())
    }

    /// The whole current session.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.read_slot().session.clone()
    }

    /// `Authorization: Bearer <token>` when authenticated, else empty.
    ///
    /// For callers that build their own requests instead of going through
    /// [`Gateway::authenticated_request`].
    #[must_use]
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let slot = self.read_slot();
        let token = slot.session.as_ref().map(|s| s.token().expose_secret());

        match bearer(token) {
            Ok(Some(value)) => {
                headers.insert(AUTHORIZATION, value);
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "Stored token is not a valid header value"),
        }
        headers
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Log in and, on success, replace the current session.
    ///
    /// Failures (network, rejected credentials, malformed response) come
    /// back as [`AuthResult::Failure`] and leave the current session as it
    /// was.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &SecretString) -> AuthResult<SessionUser> {
        let ticket = self.inner.tickets.fetch_add(1, Ordering::SeqCst) + 1;

        let session = match self.request_session(username, password).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "Login failed");
                return AuthResult::failure(err.to_string());
            }
        };

        let user = session.user().clone();
        if !self.apply_login(ticket, session) {
            tracing::warn!(ticket, "Discarding stale login response");
            return AuthResult::failure(SUPERSEDED_LOGIN);
        }

        tracing::info!(user_id = %user.id, user_type = %user.user_type, "Logged in");
        AuthResult::Success(user)
    }

    /// Create an account. Does not log in.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> AuthResult<Registered> {
        let options = match RequestOptions::post().json(registration) {
            Ok(options) => options,
            Err(err) => return AuthResult::failure(err.to_string()),
        };

        match self
            .inner
            .gateway
            .request::<Registered>(REGISTER_ENDPOINT, options)
            .await
        {
            Ok(registered) => {
                tracing::info!("Registered new account");
                AuthResult::Success(registered)
            }
            Err(err) => AuthResult::failure(err.to_string()),
        }
    }

    /// Drop the session from memory and storage.
    ///
    /// Idempotent. Logins still in flight are invalidated.
    pub fn logout(&self) {
        let mut slot = self.write_slot();
        let was_authenticated = slot.session.take().is_some();
        slot.applied = slot.applied.max(self.inner.tickets.load(Ordering::SeqCst));
        self.clear_persisted();
        drop(slot);

        if was_authenticated {
            tracing::info!("Logged out");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    /// Restore the persisted session, wiping both records if they are not a
    /// valid pair. Never fails outward.
    fn bootstrap(&self) {
        let mut slot = self.write_slot();

        match self.read_persisted() {
            Ok(session) => {
                tracing::debug!(user_id = %session.user().id, "Restored persisted session");
                slot.session = Some(session);
            }
            Err(reason) => {
                if reason != BootstrapMiss::Empty {
                    tracing::warn!(reason = ?reason, "Discarding persisted session");
                }
                slot.session = None;
                self.clear_persisted();
            }
        }

        slot.resolved = true;
    }

    fn read_persisted(&self) -> Result<Session, BootstrapMiss> {
        let storage = &self.inner.storage;
        let token = storage.get(keys::TOKEN).map_err(|_| BootstrapMiss::Unreadable)?;
        let user = storage.get(keys::USER).map_err(|_| BootstrapMiss::Unreadable)?;

        let (token, user) = match (token, user) {
            (None, None) => return Err(BootstrapMiss::Empty),
            (Some(token), Some(user)) if !token.is_empty() && !user.is_empty() => (token, user),
            _ => return Err(BootstrapMiss::Partial),
        };

        let user: SessionUser =
            serde_json::from_str(&user).map_err(|_| BootstrapMiss::Corrupt)?;
        Ok(Session::new(user, SecretString::from(token)))
    }

    async fn request_session(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Session, LoginError> {
        let body = serde_json::json!({
            "username": username,
            "password": password.expose_secret(),
        });
        let options = RequestOptions::post().json(&body)?;

        let response: LoginResponse = self.inner.gateway.request(LOGIN_ENDPOINT, options).await?;
        let data = response
            .data
            .filter(|data| !data.access_token.is_empty())
            .ok_or(LoginError::MissingToken)?;

        let user = SessionUser {
            id: data.user_id,
            username: data.username,
            user_type: data.user_type,
        };
        Ok(Session::new(user, SecretString::from(data.access_token)))
    }

    /// Install a login result unless something newer already landed.
    fn apply_login(&self, ticket: u64, session: Session) -> bool {
        let mut slot = self.write_slot();
        if ticket <= slot.applied {
            return false;
        }

        slot.applied = ticket;
        self.persist(&session);
        slot.session = Some(session);
        true
    }

    /// Write both records. Memory stays authoritative if storage fails.
    fn persist(&self, session: &Session) {
        let user = match serde_json::to_string(session.user()) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize session user");
                self.clear_persisted();
                return;
            }
        };

        let storage = &self.inner.storage;
        let written = storage
            .set(keys::TOKEN, session.token().expose_secret())
            .and_then(|()| storage.set(keys::USER, &user));

        if let Err(err) = written {
            tracing::warn!(error = %err, "Failed to persist session, it will not survive a restart");
            self.clear_persisted();
        }
    }

    fn clear_persisted(&self) {
        for key in [keys::TOKEN, keys::USER] {
            if let Err(err) = self.inner.storage.remove(key) {
                tracing::warn!(key, error = %err, "Failed to remove persisted session record");
            }
        }
    }

    fn read_slot(&self) -> RwLockReadGuard<'_, SessionSlot> {
        self.inner.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, SessionSlot> {
        self.inner.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Why a login attempt produced no session.
#[derive(Debug, thiserror::Error)]
enum LoginError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Login response did not include an access token")]
    MissingToken,
}

/// Why bootstrap found no usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BootstrapMiss {
    Empty,
    Partial,
    Corrupt,
    Unreadable,
}
