//! SQLite transaction log backend for toybank.

use rusqlite::{params, Connection};

use toybank_core::{AccountId, NewTransaction, StoreError, TransactionLog, TransactionRecord};

/// A `TransactionLog` backed by the `Transactions` table of a SQLite database.
pub struct SqliteLog {
    conn: Connection,
}

impl SqliteLog {
    /// Opens (or creates) the database at `path`. `":memory:"` opens a
    /// private in-memory database.
    ///
    /// The schema is not touched here; call `ensure_schema` once after opening.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| StoreError::Open(e.to_string()))?;

        tracing::debug!(path, "SQLite store opened");
        Ok(Self { conn })
    }

    /// Closes the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn
            .close()
            .map_err(|(_, e)| StoreError::Other(e.to_string()))?;
        tracing::debug!("SQLite store closed");
        Ok(())
    }
}

impl TransactionLog for SqliteLog {
    fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS Transactions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    account_id INTEGER,
                    amount REAL,
                    type TEXT
                );
                ",
            )
            .map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(())
    }

    fn append(&self, txn: &NewTransaction) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO Transactions (account_id, amount, type) VALUES (?1, ?2, ?3)",
                params![txn.account_id, txn.amount, txn.kind.as_str()],
            )
            .map_err(|e| StoreError::Other(e.to_string()))?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, account_id = txn.account_id, kind = %txn.kind, "Transaction appended");
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, account_id, amount, type FROM Transactions ORDER BY id ASC")
            .map_err(|e| StoreError::Other(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(TransactionRecord {
                    id: row.get(0)?,
                    account_id: row.get::<_, Option<AccountId>>(1)?.unwrap_or_default(),
                    amount: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
                    kind: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })
            .map_err(|e| StoreError::Other(e.to_string()))?;

        let records = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(records)
    }

    fn delete_by_account(&self, account_id: AccountId) -> Result<usize, StoreError> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM Transactions WHERE account_id = ?1",
                params![account_id],
            )
            .map_err(|e| StoreError::Other(e.to_string()))?;
        tracing::debug!(account_id, removed, "Transactions deleted");
        Ok(removed)
    }
}
