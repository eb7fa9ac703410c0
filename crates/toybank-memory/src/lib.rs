//! In-memory transaction log backend for toybank.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        RwLock,
    },
};

use toybank_core::{AccountId, NewTransaction, StoreError, TransactionLog, TransactionRecord};

/// A `TransactionLog` that keeps records in a map keyed by record id.
///
/// Ids are handed out like SQLite AUTOINCREMENT: monotonically, never reused
/// after a delete.
pub struct InMemoryLog {
    records: RwLock<BTreeMap<i64, TransactionRecord>>,
    next_id: AtomicI64,
}

impl Default for InMemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Other("in-memory log lock poisoned".to_string())
    }
}

impl TransactionLog for InMemoryLog {
    fn ensure_schema(&self) -> Result<(), StoreError> {
        tracing::debug!("in-memory log needs no schema");
        Ok(())
    }

    fn append(&self, txn: &NewTransaction) -> Result<i64, StoreError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        records.insert(
            id,
            TransactionRecord {
                id,
                account_id: txn.account_id,
                amount: txn.amount,
                kind: txn.kind.as_str().to_string(),
            },
        );
        tracing::debug!(id, account_id = txn.account_id, kind = %txn.kind, "Transaction appended");
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.values().cloned().collect())
    }

    fn delete_by_account(&self, account_id: AccountId) -> Result<usize, StoreError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let before = records.len();
        records.retain(|_, r| r.account_id != account_id);
        let removed = before - records.len();
        tracing::debug!(account_id, removed, "Transactions deleted");
        Ok(removed)
    }
}
