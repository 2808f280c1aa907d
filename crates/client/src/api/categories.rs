//! Category endpoint.

use tracing::instrument;

use super::MarketplaceClient;
use super::types::{Category, CategoryList, Envelope};
use crate::gateway::{GatewayError, RequestOptions};

const CATEGORIES_ENDPOINT: &str = "/product/category";

impl MarketplaceClient {
    /// All product categories.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        let envelope: Envelope<CategoryList> = self
            .gateway
            .request(CATEGORIES_ENDPOINT, RequestOptions::get())
            .await?;
        Ok(envelope.data.map(|d| d.categories).unwrap_or_default())
    }
}
