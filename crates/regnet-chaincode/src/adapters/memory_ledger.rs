//! # In-Memory Ledger
//!
//! `KeyStore` implementation for tests and local runs. A batch is applied
//! under a single write lock, so concurrent readers see either none or all
//! of it. Every committed batch is kept in a commit log.
//!
//! Read and commit failures can be switched on to exercise the
//! `StoreUnavailable` path.

use crate::errors::StoreError;
use crate::ports::outbound::{KeyStore, WriteBatch};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory key-value ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    commits: RwLock<Vec<WriteBatch>>,
    fail_reads: AtomicBool,
    fail_commits: AtomicBool,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the commit log.
    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        self.state.write().insert(key.to_string(), value);
    }

    /// Raw value at `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().get(key).cloned()
    }

    /// Copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.state.read().clone()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Committed batches, oldest first.
    #[must_use]
    pub fn commit_log(&self) -> Vec<WriteBatch> {
        self.commits.read().clone()
    }

    /// Make every `get` fail with `StoreError::Unavailable`.
    pub fn set_read_failure(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every `commit` fail with `StoreError::CommitRejected`.
    pub fn set_commit_failure(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyStore for InMemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".to_string()));
        }
        Ok(self.state.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.state.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::CommitRejected(format!(
                "injected commit failure for tx {}",
                batch.tx_id
            )));
        }
        {
            let mut state = self.state.write();
            for (key, value) in &batch.writes {
                state.insert(key.clone(), value.clone());
            }
        }
        self.commits.write().push(batch);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
