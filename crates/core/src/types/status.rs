//! Account and bulk request status enums.

use serde::{Deserialize, Serialize};

/// Kind of marketplace account.
///
/// Sellers are the farmers listing products; businesses post bulk requests;
/// customers browse and buy. The API spells the seller variant `seller`,
/// older clients wrote `farmer`, and both are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    Customer,
    #[serde(alias = "farmer")]
    Seller,
    Business,
}

impl UserType {
    /// Wire name of the user type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
            Self::Business => "business",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "seller" | "farmer" => Ok(Self::Seller),
            "business" => Ok(Self::Business),
            _ => Err(format!("invalid user type: {s}")),
        }
    }
}

/// Lifecycle of a business's bulk request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BulkRequestStatus {
    /// Accepting pledges.
    #[default]
    Open,
    /// Some pledges accepted.
    PartiallyFilled,
    /// All quantity pledged.
    FullyFilled,
    /// Manually closed by the buyer.
    Closed,
    /// Past its delivery deadline.
    Expired,
}

impl BulkRequestStatus {
    /// Wire name of the status, as used in list filters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::PartiallyFilled => "partially_filled",
            Self::FullyFilled => "fully_filled",
            Self::Closed => "closed",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for BulkRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BulkRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "partially_filled" => Ok(Self::PartiallyFilled),
            "fully_filled" => Ok(Self::FullyFilled),
            "closed" => Ok(Self::Closed),
            "expired" => Ok(Self::Expired),
            _ => Err(format!("invalid bulk request status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_accepts_farmer_alias() {
        let parsed: UserType = serde_json::from_str("\"farmer\"").unwrap();
        assert_eq!(parsed, UserType::Seller);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"seller\"");
    }

    #[test]
    fn test_user_type_from_str() {
        assert_eq!("business".parse::<UserType>().unwrap(), UserType::Business);
        assert!("admin".parse::<UserType>().is_err());
    }

    #[test]
    fn test_bulk_request_status_wire_names() {
        let status: BulkRequestStatus = serde_json::from_str("\"partially_filled\"").unwrap();
        assert_eq!(status, BulkRequestStatus::PartiallyFilled);
        assert_eq!(status.to_string(), "partially_filled");
    }
}
