//! A console banking ledger: accounts live in memory for the session, and
//! every deposit and withdrawal is appended to a SQLite transaction log.

pub mod config;
pub mod ledger;
pub mod logging;
pub mod menu;
pub mod report;

pub use ledger::{Deletion, IdGenerator, Ledger, LedgerError, RandomIds, Receipt};

use toybank_core::{StoreError, TransactionLog};
use toybank_sqlite::SqliteLog;

/// Opens the transaction log and makes sure its table exists.
///
/// Only a failed open is an error. A schema failure is reported and the log
/// is still returned; later store calls report their own errors.
pub fn open_store(config: &config::StoreConfig) -> Result<SqliteLog, StoreError> {
    let log = SqliteLog::open(&config.path).map_err(|e| {
        tracing::error!(path = %config.path, error = %e, "Failed to open store");
        e
    })?;

    if let Err(e) = log.ensure_schema() {
        tracing::warn!(error = %e, "Failed to create Transactions table");
        eprintln!("SQL error: {}", e);
    }

    Ok(log)
}
