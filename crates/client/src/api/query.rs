//! List filters and their query strings.

use std::fmt;

use farm_direct_core::{BulkRequestStatus, CategoryId};
use rust_decimal::Decimal;
use url::form_urlencoded;

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("Invalid sort order: {other}")),
        }
    }
}

/// Filters for the seller's own product listing.
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_active: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ProductQuery {
    /// `endpoint` with this query appended.
    #[must_use]
    pub fn apply(&self, endpoint: &str) -> String {
        QueryString::default()
            .push("page", self.page)
            .push("limit", self.limit)
            .push("search", self.search.as_deref())
            .push("category_id", self.category_id)
            .push("is_active", self.is_active)
            .push("min_price", self.min_price)
            .push("max_price", self.max_price)
            .push("sort_by", self.sort_by.as_deref())
            .push("sort_order", self.sort_order)
            .finish(endpoint)
    }
}

/// Filters for the bulk request listing.
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkRequestQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<BulkRequestStatus>,
    pub min_quantity: Option<f64>,
    pub max_quantity: Option<f64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl BulkRequestQuery {
    /// `endpoint` with this query appended.
    #[must_use]
    pub fn apply(&self, endpoint: &str) -> String {
        QueryString::default()
            .push("page", self.page)
            .push("limit", self.limit)
            .push("search", self.search.as_deref())
            .push("category_id", self.category_id)
            .push("status", self.status)
            .push("min_quantity", self.min_quantity)
            .push("max_quantity", self.max_quantity)
            .push("min_price", self.min_price)
            .push("max_price", self.max_price)
            .push("sort_by", self.sort_by.as_deref())
            .push("sort_order", self.sort_order)
            .finish(endpoint)
    }
}

/// Form-encoded query that skips unset values.
#[derive(Default)]
struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    fn push<T: fmt::Display>(mut self, key: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.pairs.push((key, value));
            }
        }
        self
    }

    fn finish(self, endpoint: &str) -> String {
        if self.pairs.is_empty() {
            return endpoint.to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs)
            .finish();
        format!("{endpoint}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_leaves_endpoint_alone() {
        assert_eq!(
            ProductQuery::default().apply("/product/user-products"),
            "/product/user-products"
        );
        assert_eq!(BulkRequestQuery::default().apply("/bulk-request"), "/bulk-request");
    }

    #[test]
    fn test_product_query_keeps_field_order_and_encodes() {
        let query = ProductQuery {
            page: Some(2),
            limit: Some(20),
            search: Some("green beans".to_string()),
            is_active: Some(false),
            sort_order: Some(SortOrder::Asc),
            ..ProductQuery::default()
        };
        assert_eq!(
            query.apply("/product/user-products"),
            "/product/user-products?page=2&limit=20&search=green+beans&is_active=false&sort_order=asc"
        );
    }

    #[test]
    fn test_bulk_request_query_status_and_ranges() {
        let query = BulkRequestQuery {
            status: Some(BulkRequestStatus::PartiallyFilled),
            min_quantity: Some(100.5),
            max_price: Some(Decimal::new(1250, 2)),
            category_id: Some(CategoryId::new(4)),
            ..BulkRequestQuery::default()
        };
        assert_eq!(
            query.apply("/bulk-request"),
            "/bulk-request?category_id=4&status=partially_filled&min_quantity=100.5&max_price=12.50"
        );
    }

    #[test]
    fn test_empty_search_is_skipped() {
        let query = ProductQuery {
            search: Some(String::new()),
            ..ProductQuery::default()
        };
        assert_eq!(query.apply("/p"), "/p");
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
