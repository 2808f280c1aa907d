//! Typed access to the marketplace resources.
//!
//! Every call goes through the [`Gateway`]; this layer only composes
//! endpoints and query strings and picks the payload out of the response
//! envelope. Calls that need a token take it as a plain argument, usually
//! `SessionStore::token()`.
//!
//! ```rust,ignore
//! let api = MarketplaceClient::new(gateway.clone());
//! let first_page = api.list_products(0, 10).await?;
//!
//! let token = store.token();
//! let mine = api
//!     .user_products(&ProductQuery::default(), token.as_ref().map(ExposeSecret::expose_secret))
//!     .await?;
//! ```

mod bulk_requests;
mod categories;
mod health;
mod products;
mod query;
mod types;

pub use query::{BulkRequestQuery, ProductQuery, SortOrder};
pub use types::*;

use crate::gateway::Gateway;

/// Client for products, categories, bulk requests and the health probe.
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    gateway: Gateway,
}

impl MarketplaceClient {
    /// Wrap a gateway.
    #[must_use]
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}
