//! # Domain Invariants
//!
//! Invariants a purchase settlement MUST satisfy before its records are
//! staged. They are re-checked on every computed settlement; a violation
//! aborts the invocation with nothing written.
//!
//! - INVARIANT-1: Coin Conservation (buyer + seller total unchanged)
//! - INVARIANT-2: Exact Debit (buyer loses exactly the price)
//! - INVARIANT-3: Exact Credit (seller gains exactly the price)
//! - INVARIANT-4: Ownership Transfer (property owned by buyer, `Registered`)
//! - INVARIANT-5: Listing Precondition (only `ForSale` property was sold)

use crate::domain::entities::{ApprovedProperty, ApprovedUser, PurchaseReceipt};

/// Records as loaded before settlement.
#[derive(Clone, Copy, Debug)]
pub struct SettlementInputs<'a> {
    /// Property as listed.
    pub property: &'a ApprovedProperty,
    /// Buyer before debit.
    pub buyer: &'a ApprovedUser,
    /// Seller before credit.
    pub seller: &'a ApprovedUser,
    /// Ledger key of the buyer.
    pub buyer_key: &'a str,
}

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Coin Conservation
#[must_use]
pub fn check_conservation_invariant(before: &SettlementInputs<'_>, after: &PurchaseReceipt) -> bool {
    let total_before = u128::from(before.buyer.coin_balance) + u128::from(before.seller.coin_balance);
    let total_after = u128::from(after.buyer.coin_balance) + u128::from(after.seller.coin_balance);
    total_before == total_after
}

/// INVARIANT-2: Exact Debit
#[must_use]
pub fn check_debit_invariant(before: &SettlementInputs<'_>, after: &PurchaseReceipt) -> bool {
    u128::from(after.buyer.coin_balance) + u128::from(before.property.price)
        == u128::from(before.buyer.coin_balance)
}

/// INVARIANT-3: Exact Credit
#[must_use]
pub fn check_credit_invariant(before: &SettlementInputs<'_>, after: &PurchaseReceipt) -> bool {
    u128::from(after.seller.coin_balance)
        == u128::from(before.seller.coin_balance) + u128::from(before.property.price)
}

/// INVARIANT-4: Ownership Transfer
///
/// Price and id are carried over untouched.
#[must_use]
pub fn check_transfer_invariant(before: &SettlementInputs<'_>, after: &PurchaseReceipt) -> bool {
    after.property.owner == before.buyer_key
        && !after.property.status.is_for_sale()
        && after.property.price == before.property.price
        && after.property.property_id == before.property.property_id
}

/// INVARIANT-5: Listing Precondition
#[must_use]
pub fn check_listing_invariant(before: &SettlementInputs<'_>) -> bool {
    before.property.status.is_for_sale() && before.property.owner != before.buyer_key
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(
    before: &SettlementInputs<'_>,
    after: &PurchaseReceipt,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_conservation_invariant(before, after) {
        violations.push(InvariantViolation::CoinsNotConserved {
            before: before.buyer.coin_balance.saturating_add(before.seller.coin_balance),
            after: after.buyer.coin_balance.saturating_add(after.seller.coin_balance),
        });
    }

    if !check_debit_invariant(before, after) {
        violations.push(InvariantViolation::WrongDebit {
            expected: before.buyer.coin_balance.saturating_sub(before.property.price),
            actual: after.buyer.coin_balance,
        });
    }

    if !check_credit_invariant(before, after) {
        violations.push(InvariantViolation::WrongCredit {
            expected: before.seller.coin_balance.saturating_add(before.property.price),
            actual: after.seller.coin_balance,
        });
    }

    if !check_transfer_invariant(before, after) {
        violations.push(InvariantViolation::OwnershipNotTransferred);
    }

    if !check_listing_invariant(before) {
        violations.push(InvariantViolation::NotListed);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Buyer + seller total changed.
    CoinsNotConserved { before: u64, after: u64 },
    /// Buyer was not debited exactly the price.
    WrongDebit { expected: u64, actual: u64 },
    /// Seller was not credited exactly the price.
    WrongCredit { expected: u64, actual: u64 },
    /// Property not handed to the buyer as `Registered`.
    OwnershipNotTransferred,
    /// Property was not for sale, or buyer already owned it.
    NotListed,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CoinsNotConserved { before, after } => {
                write!(f, "coin supply changed: {before} -> {after}")
            }
            Self::WrongDebit { expected, actual } => {
                write!(f, "buyer balance {actual}, expected {expected}")
            }
            Self::WrongCredit { expected, actual } => {
                write!(f, "seller balance {actual}, expected {expected}")
            }
            Self::OwnershipNotTransferred => {
                write!(f, "property not transferred to buyer")
            }
            Self::NotListed => write!(f, "property was not listed for this buyer"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PropertyStatus;

    fn user(name: &str, balance: u64) -> ApprovedUser {
        ApprovedUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone_number: "0".to_string(),
            aadhar_number: "0".to_string(),
            created_at: "t".to_string(),
            coin_balance: balance,
        }
    }

    fn listed(price: u64) -> ApprovedProperty {
        ApprovedProperty {
            property_id: "P1".to_string(),
            owner: "seller-key".to_string(),
            price,
            status: PropertyStatus::ForSale,
        }
    }

    fn settled(property: &ApprovedProperty, buyer: &ApprovedUser, seller: &ApprovedUser) -> PurchaseReceipt {
        let mut property = property.clone();
        let mut buyer = buyer.clone();
        let mut seller = seller.clone();
        buyer.coin_balance -= property.price;
        seller.coin_balance += property.price;
        property.owner = "buyer-key".to_string();
        property.status = PropertyStatus::Registered;
        PurchaseReceipt { property, buyer, seller }
    }

    #[test]
    fn test_valid_settlement() {
        let property = listed(800);
        let buyer = user("Bob", 1000);
        let seller = user("Alice", 1000);
        let before = SettlementInputs {
            property: &property,
            buyer: &buyer,
            seller: &seller,
            buyer_key: "buyer-key",
        };
        let after = settled(&property, &buyer, &seller);
        assert!(check_all_invariants(&before, &after).is_valid());
    }

    #[test]
    fn test_minted_coins_detected() {
        let property = listed(800);
        let buyer = user("Bob", 1000);
        let seller = user("Alice", 1000);
        let before = SettlementInputs {
            property: &property,
            buyer: &buyer,
            seller: &seller,
            buyer_key: "buyer-key",
        };
        let mut after = settled(&property, &buyer, &seller);
        after.seller.coin_balance += 1;

        match check_all_invariants(&before, &after) {
            InvariantCheckResult::Invalid(violations) => {
                assert!(violations.contains(&InvariantViolation::CoinsNotConserved {
                    before: 2000,
                    after: 2001
                }));
                assert!(violations.contains(&InvariantViolation::WrongCredit {
                    expected: 1800,
                    actual: 1801
                }));
            }
            InvariantCheckResult::Valid => panic!("minted coin not detected"),
        }
    }

    #[test]
    fn test_missing_transfer_detected() {
        let property = listed(100);
        let buyer = user("Bob", 100);
        let seller = user("Alice", 0);
        let before = SettlementInputs {
            property: &property,
            buyer: &buyer,
            seller: &seller,
            buyer_key: "buyer-key",
        };
        let mut after = settled(&property, &buyer, &seller);
        after.property.owner = "seller-key".to_string();
        assert!(!check_transfer_invariant(&before, &after));
        assert!(!check_all_invariants(&before, &after).is_valid());
    }

    #[test]
    fn test_registered_property_is_not_listed() {
        let mut property = listed(100);
        property.status = PropertyStatus::Registered;
        let buyer = user("Bob", 100);
        let seller = user("Alice", 0);
        let before = SettlementInputs {
            property: &property,
            buyer: &buyer,
            seller: &seller,
            buyer_key: "buyer-key",
        };
        assert!(!check_listing_invariant(&before));
    }

    #[test]
    fn test_violation_display() {
        let v = InvariantViolation::CoinsNotConserved { before: 10, after: 11 };
        assert_eq!(v.to_string(), "coin supply changed: 10 -> 11");
    }
}
