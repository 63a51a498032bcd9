//! # Purchase Workflow
//!
//! ```text
//! load property ─→ listed? ─→ load buyer ─→ not owner? ─→ funds? ─→ load seller
//!                                                                      │
//!        stage property + buyer + seller ←── settle + invariants ←─────┘
//! ```
//!
//! All three records are staged in the same context, so they commit
//! together or not at all.

use crate::context::TxContext;
use crate::domain::entities::{ApprovedProperty, ApprovedUser, PurchaseReceipt, RecordType};
use crate::domain::invariants::SettlementInputs;
use crate::domain::keys::describe_key;
use crate::domain::services::settle_purchase;
use crate::domain::value_objects::UserId;
use crate::errors::RegistryError;
use crate::ports::outbound::KeyStore;
use tracing::debug;

/// Sells a listed property to the named approved user.
pub async fn purchase_property<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    property_id: &str,
    buyer_name: &str,
    buyer_aadhar_number: &str,
) -> Result<PurchaseReceipt, RegistryError> {
    let property_key = ctx.keys().approved_property_key(property_id)?;
    let buyer_id = UserId::new(buyer_name, buyer_aadhar_number)?;
    let buyer_key = ctx.keys().approved_user_key(&buyer_id)?;

    let property: ApprovedProperty =
        ctx.get_record(&property_key)
            .await?
            .ok_or_else(|| RegistryError::NotFound {
                record: RecordType::ApprovedProperty,
                id: property_id.to_string(),
            })?;

    if !property.status.is_for_sale() {
        return Err(RegistryError::NotForSale {
            property_id: property_id.to_string(),
        });
    }

    let buyer: ApprovedUser =
        ctx.get_record(&buyer_key)
            .await?
            .ok_or_else(|| RegistryError::BuyerNotApproved {
                buyer: buyer_id.to_string(),
            })?;

    if property.owner == buyer_key {
        return Err(RegistryError::InvalidPurchase(format!(
            "{buyer_id} already owns property {property_id}"
        )));
    }

    if buyer.coin_balance < property.price {
        return Err(RegistryError::InsufficientFunds {
            required: property.price,
            available: buyer.coin_balance,
        });
    }

    let seller_key = property.owner.clone();
    let seller: ApprovedUser =
        ctx.get_record(&seller_key)
            .await?
            .ok_or_else(|| RegistryError::SellerNotFound {
                seller: describe_key(&seller_key),
            })?;

    let receipt = settle_purchase(&SettlementInputs {
        property: &property,
        buyer: &buyer,
        seller: &seller,
        buyer_key: &buyer_key,
    })?;

    ctx.put_record(property_key, &receipt.property)?;
    ctx.put_record(buyer_key, &receipt.buyer)?;
    ctx.put_record(seller_key.clone(), &receipt.seller)?;

    debug!(
        property_id,
        buyer = %buyer_id,
        seller = %describe_key(&seller_key),
        price = property.price,
        "property purchase settled"
    );
    Ok(receipt)
}

// =============================================================================
// TESTS
// =============================================================================
