use crate::models::{AccountId, NewTransaction, TransactionRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open store: {0}")]
    Open(String),
    #[error("{0}")]
    Other(String),
}

/// Append-only log of deposits and withdrawals, keyed by account id.
///
/// Records are never updated. The only way to remove them is
/// `delete_by_account`, which purges every record for one account.
pub trait TransactionLog {
    /// Creates the backing table if it is missing. Safe to call repeatedly.
    fn ensure_schema(&self) -> Result<(), StoreError>;
    /// Appends one record and returns the id the store assigned to it.
    fn append(&self, txn: &NewTransaction) -> Result<i64, StoreError>;
    /// All records in ascending id order.
    fn list_all(&self) -> Result<Vec<TransactionRecord>, StoreError>;
    /// Removes every record for `account_id`, returning how many were removed.
    fn delete_by_account(&self, account_id: AccountId) -> Result<usize, StoreError>;
}
