//! # RegNet Chaincode - Property Registration Network
//!
//! Ledger-backed registry of users and land properties with an internal
//! coin balance used to settle property purchases.
//!
//! ## Purpose
//!
//! Users ask to be registered; a registrar approves them. Approved users
//! top up their coin balance from a fixed table of recharge tiers, register
//! properties (approved by the registrar), list them for sale and buy each
//! other's listed properties. Every operation is a single ledger
//! transaction that either commits all of its writes or none.
//!
//! ## Record Layout
//!
//! | Record | Composite key object type | Key part |
//! |--------|---------------------------|----------|
//! | `UserRequest` | `<prefix>.users` | `<name>-<aadhar>` |
//! | `ApprovedUser` | `<prefix>.approvedUsers` | `<name>-<aadhar>` |
//! | `PropertyRequest` | `<prefix>.property` | `<propertyId>` |
//! | `ApprovedProperty` | `<prefix>.approvedProperty` | `<propertyId>` |
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Coins conserved by a purchase | `domain/invariants.rs` - `check_conservation_invariant()` |
//! | INVARIANT-2 | Buyer debited exactly the price | `domain/invariants.rs` - `check_debit_invariant()` |
//! | INVARIANT-3 | Seller credited exactly the price | `domain/invariants.rs` - `check_credit_invariant()` |
//! | INVARIANT-4 | Ownership moves to buyer, status Registered | `domain/invariants.rs` - `check_transfer_invariant()` |
//! | INVARIANT-5 | Only listed properties of another owner sell | `domain/invariants.rs` - `check_listing_invariant()` |
//! | INVARIANT-6 | Nothing written on failure | `context.rs` write set, `service.rs` - `finish()` |
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `KeyStore` | Read state, apply a transaction's write batch atomically |
//!
//! ## Usage Example
//!
//! ```ignore
//! use regnet_chaincode::prelude::*;
//!
//! let config = RegistryConfig::from_env();
//! let service = RegistryService::new(InMemoryLedger::new(), config.clone())?;
//! let dispatcher = Dispatcher::new(service, &config);
//!
//! let response = dispatcher
//!     .invoke(Invocation::new(
//!         DEFAULT_USERS_CONTRACT,
//!         "viewProperty",
//!         &["P1"],
//!         "alice",
//!     ))
//!     .await;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod invocation;
pub mod ports;
pub mod registry;
pub mod service;
pub mod telemetry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        ApprovedProperty, ApprovedUser, PropertyRequest, PurchaseReceipt, RecordType,
        UserRequest,
    };

    // Value objects
    pub use crate::domain::value_objects::{
        parse_price, Coins, PropertyStatus, RechargeTier, UserId,
    };

    // Keys
    pub use crate::domain::keys::{
        composite_key, describe_key, split_composite_key, KeySpace, Namespace,
    };

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation, SettlementInputs,
    };

    // Ports
    pub use crate::ports::inbound::{
        PropertyRegistryApi, PurchaseApi, RegistryApi, UserRegistryApi,
    };
    pub use crate::ports::outbound::{KeyStore, WriteBatch};

    // Errors
    pub use crate::errors::{ErrorKind, RegistryError, StoreError};

    // Adapters
    pub use crate::adapters::InMemoryLedger;

    // Service
    pub use crate::config::{
        ConfigError, RegistryConfig, DEFAULT_REGISTRAR_CONTRACT, DEFAULT_USERS_CONTRACT,
    };
    pub use crate::context::TxContext;
    pub use crate::dispatch::Dispatcher;
    pub use crate::invocation::{Invocation, InvocationResponse};
    pub use crate::service::{create_test_service, RegistryService, RegistryStats};
    pub use crate::telemetry::{init_tracing, TelemetryConfig, TelemetryError};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
