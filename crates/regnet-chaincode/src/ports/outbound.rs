//! # Driven Ports (SPI - Outbound)
//!
//! The ledger this chaincode runs on. Adapters implement [`KeyStore`] for
//! the in-memory test ledger or for a real peer shim.
//!
//! The ledger owns replication, ordering and MVCC validation. The chaincode
//! only promises to read every key it conditions on and to hand over its
//! writes as one [`WriteBatch`].

use crate::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

// =============================================================================
// WRITE BATCH
// =============================================================================

/// Read set and write set of one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteBatch {
    /// Invocation transaction id.
    pub tx_id: Uuid,
    /// Keys read by the invocation, sorted.
    pub reads: Vec<String>,
    /// Keys and values to write, sorted by key.
    pub writes: Vec<(String, Vec<u8>)>,
}

impl WriteBatch {
    /// Returns true if the batch writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Number of keys written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }
}

// =============================================================================
// KEY STORE (Ledger Dependency)
// =============================================================================

/// Byte-addressable key-value ledger.
///
/// `get` distinguishes three outcomes: `Ok(Some(bytes))` when the key holds a
/// value, `Ok(None)` when it does not, and `Err(_)` when the ledger could not
/// answer. Callers must never treat an error as absence.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Read the committed value of `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` at `key`.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Apply a whole write set as one unit: all writes land or none do.
    ///
    /// The default forwards each write to [`put`](Self::put), which is only
    /// correct for ledgers whose `put` already buffers into the enclosing
    /// ledger transaction. Stores with immediately durable writes must
    /// override this.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        for (key, value) in batch.writes {
            self.put(&key, value).await?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    // Shim-style store: `put` is buffered by the enclosing ledger transaction.
    #[derive(Default)]
    struct RecordingShim {
        puts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl KeyStore for RecordingShim {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Ok(None)
        }

        async fn put(&self, key: &str, _value: Vec<u8>) -> Result<(), StoreError> {
            self.puts.lock().push(key.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_default_commit_forwards_writes_in_order() {
        let shim = RecordingShim::default();
        let batch = WriteBatch {
            tx_id: Uuid::new_v4(),
            reads: vec!["a".to_string()],
            writes: vec![("a".to_string(), vec![1]), ("b".to_string(), vec![2])],
        };
        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());

        shim.commit(batch).await.unwrap();
        assert_eq!(*shim.puts.lock(), vec!["a".to_string(), "b".to_string()]);
    }
}
