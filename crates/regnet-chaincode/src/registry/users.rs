//! # User Registry
//!
//! ```text
//! requestNewUser ──→ [users/<name>-<aadhar>]
//!                          │ approveNewUser
//!                          ↓
//!                    [approvedUsers/<name>-<aadhar>] ←── rechargeAccount, purchase
//! ```

use crate::context::TxContext;
use crate::domain::entities::{ApprovedUser, RecordType, UserRequest};
use crate::domain::value_objects::{RechargeTier, UserId};
use crate::errors::RegistryError;
use crate::ports::outbound::KeyStore;
use tracing::debug;

/// Stores a pending registration.
pub async fn request_new_user<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    name: &str,
    email: &str,
    phone_number: &str,
    aadhar_number: &str,
    created_at: &str,
) -> Result<UserRequest, RegistryError> {
    let user = UserId::new(name, aadhar_number)?;
    let key = ctx.keys().user_request_key(&user)?;

    if ctx.get_state(&key).await?.is_some() {
        return Err(RegistryError::AlreadyExists {
            record: RecordType::UserRequest,
            id: user.to_string(),
        });
    }

    let request = UserRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone_number: phone_number.to_string(),
        aadhar_number: aadhar_number.to_string(),
        created_at: created_at.to_string(),
    };
    ctx.put_record(key, &request)?;

    debug!(user = %user, "user registration requested");
    Ok(request)
}

/// Turns a pending registration into an approved user with no coins.
pub async fn approve_new_user<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    name: &str,
    aadhar_number: &str,
) -> Result<ApprovedUser, RegistryError> {
    let user = UserId::new(name, aadhar_number)?;
    let request_key = ctx.keys().user_request_key(&user)?;
    let approved_key = ctx.keys().approved_user_key(&user)?;

    let request: Option<UserRequest> = ctx.get_record(&request_key).await?;
    let already_approved = ctx.get_state(&approved_key).await?.is_some();

    let Some(request) = request else {
        return Err(RegistryError::NotFound {
            record: RecordType::UserRequest,
            id: user.to_string(),
        });
    };
    if already_approved {
        return Err(RegistryError::AlreadyApproved {
            record: RecordType::ApprovedUser,
            id: user.to_string(),
        });
    }

    let approved = ApprovedUser::from_request(request);
    ctx.put_record(approved_key, &approved)?;

    debug!(user = %user, "user approved");
    Ok(approved)
}

/// Reads an approved user.
pub async fn view_user<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    name: &str,
    aadhar_number: &str,
) -> Result<ApprovedUser, RegistryError> {
    let user = UserId::new(name, aadhar_number)?;
    let key = ctx.keys().approved_user_key(&user)?;

    ctx.get_record(&key)
        .await?
        .ok_or_else(|| RegistryError::NotFound {
            record: RecordType::ApprovedUser,
            id: user.to_string(),
        })
}

/// Sets the coin balance to the amount of the named recharge tier.
///
/// The balance is assigned, not topped up.
pub async fn recharge_account<S: KeyStore>(
    ctx: &mut TxContext<'_, S>,
    name: &str,
    aadhar_number: &str,
    bank_transaction_id: &str,
) -> Result<ApprovedUser, RegistryError> {
    let tier: RechargeTier = bank_transaction_id.parse()?;
    let user = UserId::new(name, aadhar_number)?;
    let key = ctx.keys().approved_user_key(&user)?;

    let mut approved: ApprovedUser =
        ctx.get_record(&key)
            .await?
            .ok_or_else(|| RegistryError::UserNotApproved {
                user: user.to_string(),
            })?;

    let previous = approved.coin_balance;
    approved.coin_balance = tier.amount();
    ctx.put_record(key, &approved)?;

    debug!(
        user = %user,
        tier = tier.transaction_id(),
        previous,
        balance = approved.coin_balance,
        "account recharged"
    );
    Ok(approved)
}

// =============================================================================
// TESTS
// =============================================================================
