//! # Property Registry
//!
//! Properties are keyed by `propertyId` alone; the owner is a field holding
//! the owner's approved-user key. The owner reference is weak, so every
//! operation that relies on it looks the user up again.

use crate::context::TxContext;
use crate::domain::entities::{ApprovedProperty, ApprovedUser, PropertyRequest, RecordType};
use crate::domain::keys::describe_key;
use crate::domain::value_objects::{Coins, PropertyStatus};
use crate::errors::RegistryError;
use crate::ports::outbound::KeyStore;
use tracing::debug;

/// Stores a pending property registration.
///
/// Checks run in this order: price, owner approval, duplicate request.
pub async fn property_registration_request<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    property_id: &str,
    owner_key: &str,
    price: Coins,
    status: PropertyStatus,
) -> Result<PropertyRequest, RegistryError> {
    let request_key = ctx.keys().property_request_key(property_id)?;

    if price == 0 {
        return Err(RegistryError::InvalidPrice {
            price: price.to_string(),
        });
    }

    let owner_not_approved = || RegistryError::OwnerNotApproved {
        owner: describe_key(owner_key),
    };
    if !ctx.keys().is_approved_user_key(owner_key) {
        return Err(owner_not_approved());
    }
    let owner: Option<ApprovedUser> = ctx.get_record(owner_key).await?;
    if owner.is_none() {
        return Err(owner_not_approved());
    }

    if ctx.get_state(&request_key).await?.is_some() {
        return Err(RegistryError::AlreadyExists {
            record: RecordType::PropertyRequest,
            id: property_id.to_string(),
        });
    }

    let request = PropertyRequest {
        property_id: property_id.to_string(),
        owner: owner_key.to_string(),
        price,
        status,
    };
    ctx.put_record(request_key, &request)?;

    debug!(property_id, owner = %describe_key(owner_key), price, "property registration requested");
    Ok(request)
}

/// Turns a pending property registration into an approved property.
pub async fn approve_property_registration<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    property_id: &str,
) -> Result<ApprovedProperty, RegistryError> {
    let request_key = ctx.keys().property_request_key(property_id)?;
    let approved_key = ctx.keys().approved_property_key(property_id)?;

    let request: Option<PropertyRequest> = ctx.get_record(&request_key).await?;
    let already_approved = ctx.get_state(&approved_key).await?.is_some();

    let Some(request) = request else {
        return Err(RegistryError::NotFound {
            record: RecordType::PropertyRequest,
            id: property_id.to_string(),
        });
    };
    if already_approved {
        return Err(RegistryError::AlreadyApproved {
            record: RecordType::ApprovedProperty,
            id: property_id.to_string(),
        });
    }

    let approved = ApprovedProperty::from(request);
    ctx.put_record(approved_key, &approved)?;

    debug!(property_id, status = %approved.status, "property approved");
    Ok(approved)
}

/// Reads an approved property.
pub async fn view_property<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    property_id: &str,
) -> Result<ApprovedProperty, RegistryError> {
    let key = ctx.keys().approved_property_key(property_id)?;
    ctx.get_record(&key)
        .await?
        .ok_or_else(|| RegistryError::NotFound {
            record: RecordType::ApprovedProperty,
            id: property_id.to_string(),
        })
}

/// Changes the sale status. The caller must be the recorded owner.
pub async fn update_property_status<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    property_id: &str,
    status: PropertyStatus,
) -> Result<ApprovedProperty, RegistryError> {
    let key = ctx.keys().approved_property_key(property_id)?;
    let mut property: ApprovedProperty =
        ctx.get_record(&key)
            .await?
            .ok_or_else(|| RegistryError::NotFound {
                record: RecordType::ApprovedProperty,
                id: property_id.to_string(),
            })?;

    if ctx.caller() != property.owner {
        return Err(RegistryError::Unauthorized {
            caller: describe_key(ctx.caller()),
            property_id: property_id.to_string(),
        });
    }

    let previous = property.status;
    property.status = status;
    ctx.put_record(key, &property)?;

    debug!(property_id, %previous, %status, "property status updated");
    Ok(property)
}

// =============================================================================
// TESTS
// =============================================================================
