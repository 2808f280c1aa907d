//! Farm Direct marketplace client.
//!
//! Two pieces carry the weight:
//!
//! - [`gateway::Gateway`]: composes URLs, merges headers, injects the bearer
//!   token and turns every failed response into one human-readable message.
//! - [`session::SessionStore`]: the single source of truth for who is logged
//!   in, persisted across restarts through a [`session::SessionStorage`]
//!   backend.
//!
//! [`api::MarketplaceClient`] layers typed product, category and bulk
//! request calls on top of the gateway.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use farm_direct_client::{ClientConfig, FileStorage, Gateway, SessionStore};
//!
//! let config = ClientConfig::from_env()?;
//! let gateway = Gateway::from_config(&config);
//! let store = SessionStore::new(gateway, Arc::new(FileStorage::new(&config.session_file)));
//!
//! if let Some(user) = store.user() {
//!     println!("Logged in as {}", user.username);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;

pub use api::MarketplaceClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use gateway::{Gateway, GatewayError, RequestOptions};
pub use session::{
    AuthResult, AuthState, FileStorage, MemoryStorage, Registered, Registration, Session,
    SessionStorage, SessionStore, SessionUser, StorageError,
};
