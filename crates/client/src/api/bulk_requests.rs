//! Bulk request endpoints.
//!
//! Businesses see their own requests; sellers see every open request they
//! could pledge to. The server decides which from the token.

use farm_direct_core::BulkRequestId;
use serde_json::Value;
use tracing::instrument;

use super::types::{BulkRequestPage, BulkRequestUpdate, Envelope, NewBulkRequest};
use super::{BulkRequestQuery, MarketplaceClient};
use crate::gateway::{GatewayError, RequestOptions};

const BULK_REQUESTS_ENDPOINT: &str = "/bulk-request";

fn bulk_request_endpoint(id: BulkRequestId) -> String {
    format!("{BULK_REQUESTS_ENDPOINT}/{id}")
}

impl MarketplaceClient {
    /// One page of bulk requests matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list_bulk_requests(
        &self,
        query: &BulkRequestQuery,
        token: Option<&str>,
    ) -> Result<BulkRequestPage, GatewayError> {
        let envelope: Envelope<BulkRequestPage> = self
            .gateway
            .authenticated_request(&query.apply(BULK_REQUESTS_ENDPOINT), RequestOptions::get(), token)
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Create a bulk request.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self, request, token), fields(title = %request.title))]
    pub async fn create_bulk_request(
        &self,
        request: &NewBulkRequest,
        token: Option<&str>,
    ) -> Result<Envelope<Value>, GatewayError> {
        self.gateway
            .authenticated_request(BULK_REQUESTS_ENDPOINT, RequestOptions::post().json(request)?, token)
            .await
    }

    /// Apply a partial update to a bulk request.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self, update, token))]
    pub async fn update_bulk_request(
        &self,
        id: BulkRequestId,
        update: &BulkRequestUpdate,
        token: Option<&str>,
    ) -> Result<Envelope<Value>, GatewayError> {
        self.gateway
            .authenticated_request(&bulk_request_endpoint(id), RequestOptions::patch().json(update)?, token)
            .await
    }

    /// Delete a bulk request.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    #[instrument(skip(self, token))]
    pub async fn delete_bulk_request(
        &self,
        id: BulkRequestId,
        token: Option<&str>,
    ) -> Result<Envelope<Value>, GatewayError> {
        self.gateway
            .authenticated_request(&bulk_request_endpoint(id), RequestOptions::delete(), token)
            .await
    }
}
