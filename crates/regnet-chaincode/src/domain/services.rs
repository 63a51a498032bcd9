//! # Domain Services
//!
//! Pure settlement logic. No I/O; the purchase workflow loads the records,
//! calls [`settle_purchase`] and stages whatever comes back.

use crate::domain::entities::{ApprovedProperty, ApprovedUser, PurchaseReceipt};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult, SettlementInputs};
use crate::domain::value_objects::PropertyStatus;
use crate::errors::RegistryError;

/// Computes the records produced by selling `property` to the buyer.
///
/// The buyer is debited, the seller credited, ownership moves to
/// `buyer_key` and the property becomes `Registered`. Balance checks and
/// existence checks are the caller's job; this only refuses settlements that
/// would overflow or break an invariant.
pub fn settle_purchase(inputs: &SettlementInputs<'_>) -> Result<PurchaseReceipt, RegistryError> {
    let price = inputs.property.price;

    let buyer_balance = inputs.buyer.coin_balance.checked_sub(price).ok_or(
        RegistryError::InsufficientFunds {
            required: price,
            available: inputs.buyer.coin_balance,
        },
    )?;
    let seller_balance = inputs
        .seller
        .coin_balance
        .checked_add(price)
        .ok_or_else(|| RegistryError::InvalidPurchase("seller balance overflow".to_string()))?;

    let receipt = PurchaseReceipt {
        property: ApprovedProperty {
            owner: inputs.buyer_key.to_string(),
            status: PropertyStatus::Registered,
            ..inputs.property.clone()
        },
        buyer: ApprovedUser {
            coin_balance: buyer_balance,
            ..inputs.buyer.clone()
        },
        seller: ApprovedUser {
            coin_balance: seller_balance,
            ..inputs.seller.clone()
        },
    };

    match check_all_invariants(inputs, &receipt) {
        InvariantCheckResult::Valid => Ok(receipt),
        InvariantCheckResult::Invalid(violations) => Err(RegistryError::InvariantViolated(
            violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )),
    }
}

// =============================================================================
// TESTS
// =============================================================================
