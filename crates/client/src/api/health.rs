//! Backend liveness probe.

use serde::de::IgnoredAny;

use super::MarketplaceClient;
use crate::gateway::{GatewayError, RequestOptions};

impl MarketplaceClient {
    /// Whether the API root answers with a 2xx status.
    ///
    /// The body is not inspected.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for transport failures and non-2xx statuses.
    pub async fn health_check(&self) -> Result<bool, GatewayError> {
        match self.gateway.request::<IgnoredAny>("/", RequestOptions::get()).await {
            Ok(_) | Err(GatewayError::Decode(_)) => Ok(true),
            Err(err) => Err(err),
        }
    }
}
