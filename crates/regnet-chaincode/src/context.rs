//! # Transaction Context
//!
//! One [`TxContext`] per invocation. Reads go to the committed ledger state
//! and are recorded in the read set; writes are buffered in the write set
//! and only reach the ledger when the service commits the resulting
//! [`WriteBatch`]. Dropping a context discards its writes.

use crate::domain::keys::{describe_key, KeySpace};
use crate::errors::RegistryError;
use crate::ports::outbound::{KeyStore, WriteBatch};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;
use uuid::Uuid;

/// Per-invocation view of the ledger.
pub struct TxContext<'a, S: KeyStore> {
    store: &'a S,
    keys: &'a KeySpace,
    tx_id: Uuid,
    caller: String,
    read_set: BTreeSet<String>,
    write_set: BTreeMap<String, Vec<u8>>,
}

impl<'a, S: KeyStore> TxContext<'a, S> {
    /// Opens a context for one invocation by `caller`.
    pub fn new(store: &'a S, keys: &'a KeySpace, caller: &str) -> Self {
        Self {
            store,
            keys,
            tx_id: Uuid::new_v4(),
            caller: caller.to_string(),
            read_set: BTreeSet::new(),
            write_set: BTreeMap::new(),
        }
    }

    /// Transaction id of this invocation.
    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    /// Invoking identity.
    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Key derivation for this ledger.
    pub fn keys(&self) -> &'a KeySpace {
        self.keys
    }

    /// Number of buffered writes.
    pub fn pending_writes(&self) -> usize {
        self.write_set.len()
    }

    /// Reads the committed value of `key`.
    ///
    /// Buffered writes are not visible. An empty value is reported as
    /// absent, since ledgers return empty values for deleted keys.
    pub async fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, RegistryError> {
        self.read_set.insert(key.to_string());
        let value = self.store.get(key).await?;
        trace!(tx_id = %self.tx_id, key = %describe_key(key), found = value.is_some(), "get_state");
        Ok(value.filter(|bytes| !bytes.is_empty()))
    }

    /// Buffers a write. A later write to the same key replaces it.
    pub fn put_state(&mut self, key: String, value: Vec<u8>) {
        trace!(tx_id = %self.tx_id, key = %describe_key(&key), bytes = value.len(), "put_state");
        self.write_set.insert(key, value);
    }

    /// Reads and decodes a JSON record.
    pub async fn get_record<T: DeserializeOwned>(
        &mut self,
        key: &str,
    ) -> Result<Option<T>, RegistryError> {
        match self.get_state(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                RegistryError::CorruptRecord {
                    key: describe_key(key),
                    reason: e.to_string(),
                }
            }),
            None => Ok(None),
        }
    }

    /// Encodes a record as JSON and buffers the write.
    pub fn put_record<T: Serialize>(&mut self, key: String, record: &T) -> Result<(), RegistryError> {
        let bytes = serde_json::to_vec(record).map_err(|e| RegistryError::CorruptRecord {
            key: describe_key(&key),
            reason: e.to_string(),
        })?;
        self.put_state(key, bytes);
        Ok(())
    }

    /// Closes the context and returns its read and write sets.
    pub fn into_batch(self) -> WriteBatch {
        WriteBatch {
            tx_id: self.tx_id,
            reads: self.read_set.into_iter().collect(),
            writes: self.write_set.into_iter().collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
