//! # Driving Ports (API - Inbound)
//!
//! Operations exposed to the dispatcher. Each call is one ledger
//! transaction: it either commits all of its writes or fails with nothing
//! written. Every method receives the invoking identity.

use crate::domain::entities::{
    ApprovedProperty, ApprovedUser, PropertyRequest, PurchaseReceipt, UserRequest,
};
use crate::domain::value_objects::{Coins, PropertyStatus};
use crate::errors::RegistryError;
use async_trait::async_trait;

// =============================================================================
// USER REGISTRY
// =============================================================================

/// User onboarding and coin balance.
#[async_trait]
pub trait UserRegistryApi: Send + Sync {
    /// Store a pending registration for `name`/`aadhar_number`.
    ///
    /// Fails `AlreadyExists` if a request is already stored.
    async fn request_new_user(
        &self,
        caller: &str,
        name: &str,
        email: &str,
        phone_number: &str,
        aadhar_number: &str,
        created_at: &str,
    ) -> Result<UserRequest, RegistryError>;

    /// Registrar approval of a pending registration.
    ///
    /// Fails `NotFound` without a request, `AlreadyApproved` if approved.
    async fn approve_new_user(
        &self,
        caller: &str,
        name: &str,
        aadhar_number: &str,
    ) -> Result<ApprovedUser, RegistryError>;

    /// Read an approved user.
    async fn view_user(
        &self,
        caller: &str,
        name: &str,
        aadhar_number: &str,
    ) -> Result<ApprovedUser, RegistryError>;

    /// Set the balance to the tier named by `bank_transaction_id`.
    async fn recharge_account(
        &self,
        caller: &str,
        name: &str,
        aadhar_number: &str,
        bank_transaction_id: &str,
    ) -> Result<ApprovedUser, RegistryError>;
}

// =============================================================================
// PROPERTY REGISTRY
// =============================================================================

/// Property registration and listing status.
#[async_trait]
pub trait PropertyRegistryApi: Send + Sync {
    /// Store a pending property registration owned by `owner_key`.
    async fn property_registration_request(
        &self,
        caller: &str,
        property_id: &str,
        owner_key: &str,
        price: Coins,
        status: PropertyStatus,
    ) -> Result<PropertyRequest, RegistryError>;

    /// Registrar approval of a pending property registration.
    async fn approve_property_registration(
        &self,
        caller: &str,
        property_id: &str,
    ) -> Result<ApprovedProperty, RegistryError>;

    /// Read an approved property.
    async fn view_property(
        &self,
        caller: &str,
        property_id: &str,
    ) -> Result<ApprovedProperty, RegistryError>;

    /// Change the sale status. Only the recorded owner may do this.
    async fn update_property_status(
        &self,
        caller: &str,
        property_id: &str,
        status: PropertyStatus,
    ) -> Result<ApprovedProperty, RegistryError>;

    /// Owner key for an approved user, as stored on properties.
    fn owner_key(&self, name: &str, aadhar_number: &str) -> Result<String, RegistryError>;
}

// =============================================================================
// PURCHASE
// =============================================================================

/// Coin-settled property transfer.
#[async_trait]
pub trait PurchaseApi: Send + Sync {
    /// Buy a listed property for the named approved user.
    async fn purchase_property(
        &self,
        caller: &str,
        property_id: &str,
        buyer_name: &str,
        buyer_aadhar_number: &str,
    ) -> Result<PurchaseReceipt, RegistryError>;
}

/// Everything the dispatcher needs.
pub trait RegistryApi: UserRegistryApi + PropertyRegistryApi + PurchaseApi {}

impl<T: UserRegistryApi + PropertyRegistryApi + PurchaseApi> RegistryApi for T {}
