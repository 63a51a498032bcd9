//! # Error Types
//!
//! All error types for the registration chaincode.
//!
//! `StoreError` is raised by ledger adapters. `RegistryError` is the single
//! failure type of every invocation; its [`ErrorKind`] is what callers see in
//! a structured failure response.

use crate::domain::entities::RecordType;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors reported by a key-value ledger adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The ledger could not serve the request (I/O, connection, shim failure).
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The ledger refused to apply a write batch.
    #[error("commit rejected: {0}")]
    CommitRejected(String),
}

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Failure of a single registry invocation.
///
/// Every variant is terminal for the invocation: the write set is discarded
/// and nothing reaches the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A record of this type is already stored under the derived key.
    #[error("{record} already exists: {id}")]
    AlreadyExists { record: RecordType, id: String },

    /// No record of this type is stored under the derived key.
    #[error("{record} not found: {id}")]
    NotFound { record: RecordType, id: String },

    /// The request has already been turned into an approved record.
    #[error("{record} already approved: {id}")]
    AlreadyApproved { record: RecordType, id: String },

    /// Recharge target has no approved user record.
    #[error("user {user} does not exist or is not approved")]
    UserNotApproved { user: String },

    /// Property owner does not resolve to an approved user.
    #[error("property owner {owner} is not an approved user")]
    OwnerNotApproved { owner: String },

    /// Price is zero or not a positive integer.
    #[error("invalid price: {price}")]
    InvalidPrice { price: String },

    /// Bank transaction id does not name a recharge tier.
    #[error("invalid bank transaction id: {transaction_id}")]
    InvalidTransaction { transaction_id: String },

    /// Caller is not the recorded owner of the property.
    #[error("caller {caller} is not the owner of property {property_id}")]
    Unauthorized { caller: String, property_id: String },

    /// Property is registered, not listed for sale.
    #[error("property {property_id} is not for sale")]
    NotForSale { property_id: String },

    /// Buyer has no approved user record.
    #[error("buyer {buyer} does not exist or is not approved")]
    BuyerNotApproved { buyer: String },

    /// Buyer balance is below the property price.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// Recorded owner of the property has no approved user record.
    #[error("seller {seller} not found")]
    SellerNotFound { seller: String },

    /// Purchase cannot be settled (self-purchase, balance overflow).
    #[error("invalid purchase: {0}")]
    InvalidPurchase(String),

    /// Malformed invocation argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Stored bytes do not decode as the expected record.
    #[error("corrupt record at {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    /// A settlement broke a ledger invariant; nothing was written.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),

    /// Contract name is not served by this chaincode.
    #[error("unknown contract: {0}")]
    UnknownContract(String),

    /// Function is not exposed by the named contract.
    #[error("function {function} is not exposed by contract {contract}")]
    UnknownFunction { contract: String, function: String },

    /// The ledger failed a read or a commit.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl RegistryError {
    /// Machine-readable kind of this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyApproved { .. } => ErrorKind::AlreadyApproved,
            Self::UserNotApproved { .. } => ErrorKind::UserNotApproved,
            Self::OwnerNotApproved { .. } => ErrorKind::OwnerNotApproved,
            Self::InvalidPrice { .. } => ErrorKind::InvalidPrice,
            Self::InvalidTransaction { .. } => ErrorKind::InvalidTransaction,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotForSale { .. } => ErrorKind::NotForSale,
            Self::BuyerNotApproved { .. } => ErrorKind::BuyerNotApproved,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::SellerNotFound { .. } => ErrorKind::SellerNotFound,
            Self::InvalidPurchase(_) => ErrorKind::InvalidPurchase,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::CorruptRecord { .. } => ErrorKind::CorruptRecord,
            Self::InvariantViolated(_) => ErrorKind::InvariantViolated,
            Self::UnknownContract(_) => ErrorKind::UnknownContract,
            Self::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// Returns true if the failure came from the ledger rather than from
    /// the invocation itself. Only these are worth resubmitting.
    #[must_use]
    pub fn is_store_fault(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

/// Serializable failure classification returned to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    AlreadyApproved,
    UserNotApproved,
    OwnerNotApproved,
    InvalidPrice,
    InvalidTransaction,
    Unauthorized,
    NotForSale,
    BuyerNotApproved,
    InsufficientFunds,
    SellerNotFound,
    InvalidPurchase,
    InvalidArgument,
    CorruptRecord,
    InvariantViolated,
    UnknownContract,
    UnknownFunction,
    StoreUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// TESTS
// =============================================================================
