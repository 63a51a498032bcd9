//! # Registry Service
//!
//! Runs each operation as one ledger transaction:
//!
//! ```text
//! begin ─→ registry operation (reads + buffered writes) ─→ finish
//!                                                            │
//!            Ok + writes ─→ KeyStore::commit(batch)          │
//!            Ok, no writes / dry run ─→ nothing written ←────┤
//!            Err ─→ write set dropped ←──────────────────────┘
//! ```
//!
//! The store is injected at construction; there is no global ledger handle.

use crate::adapters::InMemoryLedger;
use crate::config::{ConfigError, RegistryConfig};
use crate::context::TxContext;
use crate::domain::entities::{
    ApprovedProperty, ApprovedUser, PropertyRequest, PurchaseReceipt, UserRequest,
};
use crate::domain::keys::KeySpace;
use crate::domain::value_objects::{Coins, PropertyStatus, UserId};
use crate::errors::RegistryError;
use crate::ports::inbound::{PropertyRegistryApi, PurchaseApi, UserRegistryApi};
use crate::ports::outbound::KeyStore;
use crate::registry::{properties, purchase, users};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn, Span};

/// Statistics for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Total operations run.
    pub invocations: u64,
    /// Operations whose writes were committed.
    pub committed: u64,
    /// Successful operations with nothing to write.
    pub read_only: u64,
    /// Successful operations whose writes were discarded by dry-run mode.
    pub dry_runs: u64,
    /// Operations that returned an error.
    pub failed: u64,
    /// Failures caused by the ledger itself.
    pub store_faults: u64,
    /// Keys written across all commits.
    pub keys_written: u64,
}

/// The property registration service.
pub struct RegistryService<S: KeyStore> {
    /// Service configuration.
    config: RegistryConfig,
    /// Key derivation for `config.namespace_prefix`.
    keys: KeySpace,
    /// Ledger adapter.
    store: Arc<S>,
    /// Service statistics.
    stats: Arc<RwLock<RegistryStats>>,
}

impl<S: KeyStore> RegistryService<S> {
    /// Create a service over `store`.
    pub fn new(store: S, config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            keys: KeySpace::new(config.namespace_prefix.clone()),
            config,
            store: Arc::new(store),
            stats: Arc::new(RwLock::new(RegistryStats::default())),
        })
    }

    /// Service configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Key derivation used by this service.
    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }

    /// The underlying ledger.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> RegistryStats {
        self.stats.read().await.clone()
    }

    fn begin(&self, caller: &str) -> TxContext<'_, S> {
        let ctx = TxContext::new(self.store.as_ref(), &self.keys, caller);
        Span::current().record("tx_id", tracing::field::display(ctx.tx_id()));
        ctx
    }

    /// Commits the context's writes if `result` is Ok, then records stats.
    async fn finish<T>(
        &self,
        operation: &'static str,
        ctx: TxContext<'_, S>,
        result: Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let tx_id = ctx.tx_id();
        let batch = ctx.into_batch();
        let writes = batch.len() as u64;

        let outcome = match result {
            Ok(value) if batch.is_empty() => Ok((value, Outcome::ReadOnly)),
            Ok(value) if self.config.dry_run => Ok((value, Outcome::DryRun)),
            Ok(value) => match self.store.commit(batch).await {
                Ok(()) => Ok((value, Outcome::Committed)),
                Err(e) => Err(RegistryError::from(e)),
            },
            Err(e) => Err(e),
        };

        let mut stats = self.stats.write().await;
        stats.invocations += 1;
        match outcome {
            Ok((value, kind)) => {
                match kind {
                    Outcome::Committed => {
                        stats.committed += 1;
                        stats.keys_written += writes;
                        info!(operation, %tx_id, writes, "committed");
                    }
                    Outcome::ReadOnly => {
                        stats.read_only += 1;
                        debug!(operation, %tx_id, "read-only");
                    }
                    Outcome::DryRun => {
                        stats.dry_runs += 1;
                        info!(operation, %tx_id, writes, "dry run, writes discarded");
                    }
                }
                Ok(value)
            }
            Err(e) => {
                stats.failed += 1;
                if e.is_store_fault() {
                    stats.store_faults += 1;
                    error!(operation, %tx_id, error = %e, "ledger failure");
                } else {
                    warn!(operation, %tx_id, kind = %e.kind(), error = %e, "rejected");
                }
                Err(e)
            }
        }
    }
}

enum Outcome {
    Committed,
    ReadOnly,
    DryRun,
}

#[async_trait]
impl<S: KeyStore + 'static> UserRegistryApi for RegistryService<S> {
    #[instrument(skip(self, email, phone_number, created_at), fields(tx_id = tracing::field::Empty))]
    async fn request_new_user(
        &self,
        caller: &str,
        name: &str,
        email: &str,
        phone_number: &str,
        aadhar_number: &str,
        created_at: &str,
    ) -> Result<UserRequest, RegistryError> {
        let mut ctx = self.begin(caller);
        let result = users::request_new_user(
            &mut ctx,
            name,
            email,
            phone_number,
            aadhar_number,
            created_at,
        )
        .await;
        self.finish("requestNewUser", ctx, result).await
    }

    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn approve_new_user(
        &self,
        caller: &str,
        name: &str,
        aadhar_number: &str,
    ) -> Result<ApprovedUser, RegistryError> {
        let mut ctx = self.begin(caller);
        let result = users::approve_new_user(&mut ctx, name, aadhar_number).await;
        self.finish("approveNewUser", ctx, result).await
    }

    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn view_user(
        &self,
        caller: &str,
        name: &str,
        aadhar_number: &str,
    ) -> Result<ApprovedUser, RegistryError> {
        let mut ctx = self.begin(caller);
        let result = users::view_user(&mut ctx, name, aadhar_number).await;
        self.finish("viewUser", ctx, result).await
    }

    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn recharge_account(
        &self,
        caller: &str,
        name: &str,
        aadhar_number: &str,
        bank_transaction_id: &str,
    ) -> Result<ApprovedUser, RegistryError> {
        let mut ctx = self.begin(caller);
        let result =
            users::recharge_account(&mut ctx, name, aadhar_number, bank_transaction_id).await;
        self.finish("rechargeAccount", ctx, result).await
    }
}

#[async_trait]
impl<S: KeyStore + 'static> PropertyRegistryApi for RegistryService<S> {
    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn property_registration_request(
        &self,
        caller: &str,
        property_id: &str,
        owner_key: &str,
        price: Coins,
        status: PropertyStatus,
    ) -> Result<PropertyRequest, RegistryError> {
        let mut ctx = self.begin(caller);
        let result =
            properties::property_registration_request(&mut ctx, property_id, owner_key, price, status)
                .await;
        self.finish("propertyRegistrationRequest", ctx, result).await
    }

    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn approve_property_registration(
        &self,
        caller: &str,
        property_id: &str,
    ) -> Result<ApprovedProperty, RegistryError> {
        let mut ctx = self.begin(caller);
        let result = properties::approve_property_registration(&mut ctx, property_id).await;
        self.finish("approvePropertyRegistration", ctx, result).await
    }

    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn view_property(
        &self,
        caller: &str,
        property_id: &str,
    ) -> Result<ApprovedProperty, RegistryError> {
        let mut ctx = self.begin(caller);
        let result = properties::view_property(&mut ctx, property_id).await;
        self.finish("viewProperty", ctx, result).await
    }

    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn update_property_status(
        &self,
        caller: &str,
        property_id: &str,
        status: PropertyStatus,
    ) -> Result<ApprovedProperty, RegistryError> {
        let mut ctx = self.begin(caller);
        let result = properties::update_property_status(&mut ctx, property_id, status).await;
        self.finish("updatePropertyStatus", ctx, result).await
    }

    fn owner_key(&self, name: &str, aadhar_number: &str) -> Result<String, RegistryError> {
        self.keys.approved_user_key(&UserId::new(name, aadhar_number)?)
    }
}

#[async_trait]
impl<S: KeyStore + 'static> PurchaseApi for RegistryService<S> {
    #[instrument(skip(self), fields(tx_id = tracing::field::Empty))]
    async fn purchase_property(
        &self,
        caller: &str,
        property_id: &str,
        buyer_name: &str,
        buyer_aadhar_number: &str,
    ) -> Result<PurchaseReceipt, RegistryError> {
        let mut ctx = self.begin(caller);
        let result =
            purchase::purchase_property(&mut ctx, property_id, buyer_name, buyer_aadhar_number)
                .await;
        self.finish("purchaseProperty", ctx, result).await
    }
}

/// Create a service over an empty in-memory ledger with default settings.
pub fn create_test_service() -> RegistryService<InMemoryLedger> {
    RegistryService {
        config: RegistryConfig::default(),
        keys: KeySpace::default(),
        store: Arc::new(InMemoryLedger::new()),
        stats: Arc::new(RwLock::new(RegistryStats::default())),
    }
}

// =============================================================================
// TESTS
// =============================================================================
