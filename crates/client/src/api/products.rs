//! Product endpoints.

use farm_direct_core::ProductId;
use tracing::instrument;

use super::types::{Envelope, NewProduct, Product, ProductData, ProductList, ProductUpdate, Required};
use super::{MarketplaceClient, ProductQuery};
use crate::gateway::{GatewayError, RequestOptions};

const PRODUCTS_ENDPOINT: &str = "/product";
const USER_PRODUCTS_ENDPOINT: &str = "/product/user-products";

fn product_endpoint(id: ProductId) -> String {
    format!("{PRODUCTS_ENDPOINT}/{id}")
}

impl MarketplaceClient {
    /// One page of the public product listing.
    ///
    /// A response without `data.products` reads as an empty page.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, offset: u32, limit: u32) -> Result<Vec<Product>, GatewayError> {
        let endpoint = format!("{PRODUCTS_ENDPOINT}?offset={offset}&limit={limit}");
        let envelope: Envelope<ProductList> =
            self.gateway.request(&endpoint, RequestOptions::get()).await?;

        let products = envelope.data.map(|d| d.products).unwrap_or_default();
        if products.is_empty() {
            tracing::debug!(offset, limit, "No products found in the response");
        }
        Ok(products)
    }

    /// The authenticated seller's own products.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self, token))]
    pub async fn user_products(
        &self,
        query: &ProductQuery,
        token: Option<&str>,
    ) -> Result<ProductList, GatewayError> {
        let envelope: Envelope<ProductList> = self
            .gateway
            .authenticated_request(&query.apply(USER_PRODUCTS_ENDPOINT), RequestOptions::get(), token)
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Create a product and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails or the response carries
    /// no `data.product`.
    #[instrument(skip(self, product, token), fields(name = %product.name))]
    pub async fn create_product(
        &self,
        product: &NewProduct,
        token: Option<&str>,
    ) -> Result<Product, GatewayError> {
        let response: Required<ProductData> = self
            .gateway
            .authenticated_request(PRODUCTS_ENDPOINT, RequestOptions::post().json(product)?, token)
            .await?;
        Ok(response.data.product)
    }

    /// Apply a partial update and return the updated product.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails or the response carries
    /// no `data.product`.
    #[instrument(skip(self, update, token))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
        token: Option<&str>,
    ) -> Result<Product, GatewayError> {
        let response: Required<ProductData> = self
            .gateway
            .authenticated_request(&product_endpoint(id), RequestOptions::patch().json(update)?, token)
            .await?;
        Ok(response.data.product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self, token))]
    pub async fn delete_product(
        &self,
        id: ProductId,
        token: Option<&str>,
    ) -> Result<Envelope<serde_json::Value>, GatewayError> {
        self.gateway
            .authenticated_request(&product_endpoint(id), RequestOptions::delete(), token)
            .await
    }
}
