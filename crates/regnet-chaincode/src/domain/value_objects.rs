//! # Value Objects
//!
//! Immutable domain primitives for the registration workflow.
//! These types represent concepts that are defined by their value, not identity.

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Internal coin amount (`upgradCoins` on the ledger).
pub type Coins = u64;

// =============================================================================
// USER ID
// =============================================================================

/// Natural identity of a user: name plus Aadhar number.
///
/// Both the pending request and the approved record are addressed by
/// `name-aadharNumber`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId {
    name: String,
    aadhar_number: String,
}

impl UserId {
    /// Creates a user id. Name and Aadhar number must be non-empty.
    pub fn new(name: &str, aadhar_number: &str) -> Result<Self, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidArgument(
                "user name must not be empty".to_string(),
            ));
        }
        if aadhar_number.trim().is_empty() {
            return Err(RegistryError::InvalidArgument(
                "aadhar number must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            aadhar_number: aadhar_number.to_string(),
        })
    }

    /// User name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aadhar number.
    #[must_use]
    pub fn aadhar_number(&self) -> &str {
        &self.aadhar_number
    }

    /// Single key attribute: `name-aadharNumber`.
    #[must_use]
    pub fn key_part(&self) -> String {
        format!("{}-{}", self.name, self.aadhar_number)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.aadhar_number)
    }
}

// =============================================================================
// RECHARGE TIER
// =============================================================================

/// Coin pack bought through a bank transaction.
///
/// | Transaction id | Coins |
/// |----------------|-------|
/// | `upg100`  | 100  |
/// | `upg500`  | 500  |
/// | `upg1000` | 1000 |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RechargeTier {
    /// `upg100`
    Upg100,
    /// `upg500`
    Upg500,
    /// `upg1000`
    Upg1000,
}

impl RechargeTier {
    /// Every tier, in ascending order.
    pub const ALL: [Self; 3] = [Self::Upg100, Self::Upg500, Self::Upg1000];

    /// Bank transaction id naming this tier.
    #[must_use]
    pub const fn transaction_id(self) -> &'static str {
        match self {
            Self::Upg100 => "upg100",
            Self::Upg500 => "upg500",
            Self::Upg1000 => "upg1000",
        }
    }

    /// Coin balance granted by this tier.
    #[must_use]
    pub const fn amount(self) -> Coins {
        match self {
            Self::Upg100 => 100,
            Self::Upg500 => 500,
            Self::Upg1000 => 1000,
        }
    }
}

impl FromStr for RechargeTier {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.transaction_id() == s)
            .ok_or_else(|| RegistryError::InvalidTransaction {
                transaction_id: s.to_string(),
            })
    }
}

// =============================================================================
// PROPERTY STATUS
// =============================================================================

/// Sale status of an approved property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyStatus {
    /// Listed; can be purchased.
    #[serde(alias = "onSale")]
    ForSale,
    /// Held by its owner; not purchasable.
    Registered,
}

impl PropertyStatus {
    /// Returns true if the property can be purchased.
    #[must_use]
    pub fn is_for_sale(self) -> bool {
        matches!(self, Self::ForSale)
    }

    /// Ledger spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForSale => "ForSale",
            Self::Registered => "Registered",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ForSale" | "onSale" => Ok(Self::ForSale),
            "Registered" => Ok(Self::Registered),
            other => Err(RegistryError::InvalidArgument(format!(
                "unknown property status: {other}"
            ))),
        }
    }
}

// =============================================================================
// PRICE
// =============================================================================

/// Parses a price argument. Prices are positive integers.
pub fn parse_price(raw: &str) -> Result<Coins, RegistryError> {
    match raw.trim().parse::<Coins>() {
        Ok(price) if price > 0 => Ok(price),
        _ => Err(RegistryError::InvalidPrice {
            price: raw.to_string(),
        }),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_key_part() {
        let user = UserId::new("Alice", "1111").unwrap();
        assert_eq!(user.key_part(), "Alice-1111");
        assert_eq!(user.to_string(), "Alice-1111");
    }

    #[test]
    fn test_user_id_rejects_blank_fields() {
        assert!(matches!(
            UserId::new("", "1111"),
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            UserId::new("Alice", "  "),
            Err(RegistryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_recharge_tier_table() {
        assert_eq!("upg100".parse::<RechargeTier>().unwrap().amount(), 100);
        assert_eq!("upg500".parse::<RechargeTier>().unwrap().amount(), 500);
        assert_eq!("upg1000".parse::<RechargeTier>().unwrap().amount(), 1000);
    }

    #[test]
    fn test_recharge_tier_rejects_unknown_ids() {
        for id in ["upg200", "UPG100", "", "100", "upg100 "] {
            assert!(
                matches!(
                    id.parse::<RechargeTier>(),
                    Err(RegistryError::InvalidTransaction { .. })
                ),
                "{id:?} should not name a tier"
            );
        }
    }

    #[test]
    fn test_property_status_parsing() {
        assert_eq!("ForSale".parse::<PropertyStatus>().unwrap(), PropertyStatus::ForSale);
        assert_eq!("onSale".parse::<PropertyStatus>().unwrap(), PropertyStatus::ForSale);
        assert_eq!(
            "Registered".parse::<PropertyStatus>().unwrap(),
            PropertyStatus::Registered
        );
        assert!("sold".parse::<PropertyStatus>().is_err());
    }

    #[test]
    fn test_property_status_serde() {
        let status: PropertyStatus = serde_json::from_str("\"onSale\"").unwrap();
        assert_eq!(status, PropertyStatus::ForSale);
        assert_eq!(
            serde_json::to_string(&PropertyStatus::ForSale).unwrap(),
            "\"ForSale\""
        );
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("800").unwrap(), 800);
        for raw in ["0", "-5", "abc", "", "1.5"] {
            assert!(
                matches!(parse_price(raw), Err(RegistryError::InvalidPrice { .. })),
                "{raw:?} should be rejected"
            );
        }
    }
}
