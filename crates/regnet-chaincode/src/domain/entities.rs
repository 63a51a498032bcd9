//! # Core Domain Entities
//!
//! Ledger records of the registration workflow. Field names and JSON shapes
//! match the records already stored on the ledger, so existing data keeps
//! decoding:
//!
//! - coin balance is stored as `upgradCoins`
//! - `price` and `upgradCoins` decode from numbers or decimal strings and
//!   are always written back as numbers
//! - status `onSale` decodes as `ForSale`

use crate::domain::value_objects::{Coins, PropertyStatus};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use std::fmt;

// =============================================================================
// RECORD TYPE
// =============================================================================

/// Kind of record addressed by a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Pending user registration.
    UserRequest,
    /// Registrar-approved user.
    ApprovedUser,
    /// Pending property registration.
    PropertyRequest,
    /// Registrar-approved property.
    ApprovedProperty,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UserRequest => "user request",
            Self::ApprovedUser => "approved user",
            Self::PropertyRequest => "property request",
            Self::ApprovedProperty => "approved property",
        })
    }
}

// =============================================================================
// USERS
// =============================================================================

/// Pending user registration. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// User name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Aadhar number.
    pub aadhar_number: String,
    /// Request timestamp as supplied by the caller.
    pub created_at: String,
}

/// Approved user with a coin balance.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedUser {
    /// User name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Aadhar number.
    pub aadhar_number: String,
    /// Timestamp copied from the request.
    pub created_at: String,
    /// Coin balance.
    #[serde(rename = "upgradCoins")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub coin_balance: Coins,
}

impl ApprovedUser {
    /// Approves a request: all fields are copied and the balance starts at 0.
    #[must_use]
    pub fn from_request(request: UserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            aadhar_number: request.aadhar_number,
            created_at: request.created_at,
            coin_balance: 0,
        }
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

/// Pending property registration. Never mutated after creation.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    /// Property identifier.
    pub property_id: String,
    /// Approved-user key of the owner.
    pub owner: String,
    /// Asking price in coins.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub price: Coins,
    /// Requested sale status.
    pub status: PropertyStatus,
}

/// Approved property.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedProperty {
    /// Property identifier.
    pub property_id: String,
    /// Approved-user key of the current owner.
    pub owner: String,
    /// Price in coins.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub price: Coins,
    /// Sale status.
    pub status: PropertyStatus,
}

impl From<PropertyRequest> for ApprovedProperty {
    fn from(request: PropertyRequest) -> Self {
        Self {
            property_id: request.property_id,
            owner: request.owner,
            price: request.price,
            status: request.status,
        }
    }
}

// =============================================================================
// PURCHASE RECEIPT
// =============================================================================

/// Records written by a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Property after transfer (owned by the buyer, `Registered`).
    pub property: ApprovedProperty,
    /// Buyer after debit.
    pub buyer: ApprovedUser,
    /// Seller after credit.
    pub seller: ApprovedUser,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> UserRequest {
        UserRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "9999900000".to_string(),
            aadhar_number: "1111".to_string(),
            created_at: "2020-06-01T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_user_request_json_shape() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(json["phoneNumber"], "9999900000");
        assert_eq!(json["aadharNumber"], "1111");
        assert_eq!(json["createdAt"], "2020-06-01T10:00:00.000Z");
    }

    #[test]
    fn test_approval_copies_fields_with_zero_balance() {
        let request = sample_request();
        let approved = ApprovedUser::from_request(request.clone());
        assert_eq!(approved.name, request.name);
        assert_eq!(approved.email, request.email);
        assert_eq!(approved.phone_number, request.phone_number);
        assert_eq!(approved.aadhar_number, request.aadhar_number);
        assert_eq!(approved.created_at, request.created_at);
        assert_eq!(approved.coin_balance, 0);
    }

    #[test]
    fn test_approved_user_uses_ledger_field_name() {
        let user = ApprovedUser::from_request(sample_request());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["upgradCoins"], 0);
        assert!(json.get("coinBalance").is_none());
    }

    #[test]
    fn test_legacy_string_numerics_decode() {
        let json = r#"{"name":"Bob","email":"b@x","phoneNumber":"1","aadharNumber":"2222",
            "createdAt":"2020-06-01","upgradCoins":"500"}"#;
        let user: ApprovedUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.coin_balance, 500);

        let json = r#"{"propertyId":"P1","owner":"k","price":"800","status":"onSale"}"#;
        let property: ApprovedProperty = serde_json::from_str(json).unwrap();
        assert_eq!(property.price, 800);
        assert_eq!(property.status, PropertyStatus::ForSale);

        // Written back as numbers.
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["price"], 800);
        assert_eq!(json["status"], "ForSale");
    }

    #[test]
    fn test_property_approval_copies_request() {
        let request = PropertyRequest {
            property_id: "P1".to_string(),
            owner: "owner-key".to_string(),
            price: 800,
            status: PropertyStatus::ForSale,
        };
        let approved = ApprovedProperty::from(request);
        assert_eq!(approved.property_id, "P1");
        assert_eq!(approved.owner, "owner-key");
        assert_eq!(approved.price, 800);
        assert_eq!(approved.status, PropertyStatus::ForSale);
    }

    #[test]
    fn test_negative_balance_is_rejected() {
        let json = r#"{"name":"Bob","email":"b@x","phoneNumber":"1","aadharNumber":"2222",
            "createdAt":"2020-06-01","upgradCoins":-1}"#;
        assert!(serde_json::from_str::<ApprovedUser>(json).is_err());
    }
}
