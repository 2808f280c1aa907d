//! Resource types exchanged with the marketplace API.

use chrono::{DateTime, NaiveDateTime, Utc};
use farm_direct_core::{BulkRequestId, BulkRequestStatus, CategoryId, Price, ProductId, UserId};
use serde::{Deserialize, Deserializer, Serialize};

/// Uniform response wrapper: `{ success, message, data }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    /// Whether the server considers the call successful.
    #[serde(default)]
    pub success: bool,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload. A missing field reads as `None`.
    pub data: Option<T>,
}

/// Envelope whose `data` must be present.
#[derive(Debug, Deserialize)]
pub(crate) struct Required<T> {
    pub data: T,
}

/// Paging info attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub pages: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────────

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Products
// ─────────────────────────────────────────────────────────────────────────────

/// A product listed by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Category name, as returned by the public listing.
    #[serde(default)]
    pub category: Option<String>,
}

/// Fields for a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// Partial product update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// `data` of product list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
    /// Present on the seller's own listing.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `data` of single-product responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ProductData {
    pub product: Product,
}

/// `data` of the category list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Bulk Requests
// ─────────────────────────────────────────────────────────────────────────────

/// A business's request for a large quantity of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRequest {
    pub id: BulkRequestId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub quantity_needed: f64,
    /// Unit of measurement ("kg", "tons", "pieces").
    pub unit: String,
    #[serde(default)]
    pub max_price_per_unit: Option<Price>,
    #[serde(default)]
    pub total_budget: Option<Price>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub delivery_deadline: DateTime<Utc>,
    pub delivery_location: String,
    #[serde(default)]
    pub delivery_instructions: Option<String>,
    #[serde(default)]
    pub status: BulkRequestStatus,
    #[serde(default)]
    pub quantity_pledged: f64,
    pub buyer_id: UserId,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `data` of the bulk request list response.
///
/// The rows sit one level deeper, under `data.data`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkRequestPage {
    #[serde(default)]
    pub data: Vec<BulkRequest>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Fields for a new bulk request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBulkRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub quantity_needed: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price_per_unit: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<Price>,
    pub delivery_deadline: DateTime<Utc>,
    pub delivery_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_instructions: Option<String>,
}

/// Partial bulk request update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_needed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price_per_unit: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BulkRequestStatus>,
}

const fn default_true() -> bool {
    true
}

/// Parse an RFC 3339 timestamp, or a zone-less one taken as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc()))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_timestamp(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_public_product_listing_shape() {
        let json = r#"{
            "id": 3,
            "name": "Heirloom tomatoes",
            "description": null,
            "price": 4.5,
            "photo_url": null,
            "is_active": true,
            "category": "Vegetables"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price.to_string(), "4.50");
        assert_eq!(product.category.as_deref(), Some("Vegetables"));
        assert!(product.category_id.is_none());
    }

    #[test]
    fn test_bulk_request_page_is_nested() {
        let json = r#"{
            "success": true,
            "message": "Bulk Request List",
            "data": {
                "data": [],
                "pagination": {"page": 1, "limit": 10, "total": 0, "pages": 0}
            }
        }"#;
        let envelope: Envelope<BulkRequestPage> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let page = envelope.data.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.unwrap().limit, 10);
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: Envelope<ProductList> =
            serde_json::from_str(r#"{"success": false, "message": "Request Failed"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_product_update_only_sends_set_fields() {
        let update = ProductUpdate {
            is_active: Some(false),
            ..ProductUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"is_active": false})
        );
    }

    #[test]
    fn test_bulk_request_defaults() {
        let json = r#"{
            "id": 9,
            "title": "Winter potatoes",
            "product_name": "Potatoes",
            "quantity_needed": 500.0,
            "unit": "kg",
            "delivery_deadline": "2026-12-01T00:00:00Z",
            "delivery_location": "Depot 4",
            "buyer_id": 2
        }"#;
        let request: BulkRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, BulkRequestStatus::Open);
        assert!(request.max_price_per_unit.is_none());
        assert_eq!(request.buyer_id, UserId::new(2));
    }

    #[test]
    fn test_zoneless_timestamps_read_as_utc() {
        let json = r#"{
            "id": 9,
            "title": "Winter potatoes",
            "product_name": "Potatoes",
            "quantity_needed": 500.0,
            "unit": "kg",
            "delivery_deadline": "2026-12-01T08:30:00",
            "delivery_location": "Depot 4",
            "buyer_id": 2,
            "created_at": "2026-10-01T12:00:00.123456",
            "updated_at": null
        }"#;
        let request: BulkRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.delivery_deadline.to_rfc3339(), "2026-12-01T08:30:00+00:00");
        assert!(request.created_at.is_some());
        assert!(request.updated_at.is_none());
    }
}
