use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use toybank_core::{Account, AccountId, NewTransaction, StoreError, TransactionKind, TransactionLog, TransactionRecord};

pub const MIN_ACCOUNT_ID: AccountId = 1_000_000;
pub const MAX_ACCOUNT_ID: AccountId = 9_999_999;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Source of ids for new accounts.
pub trait IdGenerator {
    fn next_id(&mut self) -> AccountId;
}

/// Pseudo-random ids in `MIN_ACCOUNT_ID..=MAX_ACCOUNT_ID`, with no uniqueness
/// guarantee.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> AccountId {
        let span = (MAX_ACCOUNT_ID - MIN_ACCOUNT_ID + 1) as u128;
        MIN_ACCOUNT_ID + (Uuid::new_v4().as_u128() % span) as AccountId
    }
}

/// Outcome of a deposit or withdrawal that changed the balance.
///
/// The log append is best effort: if it failed, the balance change still
/// stands and the store error is carried in `log_error`.
#[derive(Debug)]
pub struct Receipt {
    pub account_id: AccountId,
    pub amount: f64,
    pub balance: f64,
    pub record_id: Option<i64>,
    pub log_error: Option<StoreError>,
}

/// Outcome of deleting an account.
#[derive(Debug)]
pub struct Deletion {
    pub account_id: AccountId,
    /// Number of in-memory accounts removed (more than one on an id collision).
    pub accounts_removed: usize,
    /// Number of log records purged, or the store error raised while purging.
    pub records_purged: Result<usize, StoreError>,
}

/// The accounts of the current session plus the log their mutations append to.
pub struct Ledger<L: TransactionLog, G: IdGenerator = RandomIds> {
    accounts: Vec<Account>,
    log: L,
    ids: G,
}

impl<L: TransactionLog> Ledger<L, RandomIds> {
    pub fn new(log: L) -> Self {
        Self::with_id_generator(log, RandomIds)
    }
}

impl<L: TransactionLog, G: IdGenerator> Ledger<L, G> {
    pub fn with_id_generator(log: L, ids: G) -> Self {
        Self {
            accounts: Vec::new(),
            log,
            ids,
        }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    /// Opens a new savings account with a zero balance.
    ///
    /// The generated id is not checked against existing accounts. A collision
    /// leaves two accounts sharing an id, and lookups return the older one.
    pub fn create(&mut self, name: &str, contact: &str, age: i64) -> &Account {
        let id = self.ids.next_id();
        if self.accounts.iter().any(|a| a.id == id) {
            tracing::warn!(id, "Generated account id collides with an existing account");
        }

        self.accounts.push(Account::new(id, name, contact, age));
        tracing::info!(id, "Account created");
        &self.accounts[self.accounts.len() - 1]
    }

    pub fn find(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Accounts in creation order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn deposit(&mut self, id: AccountId, amount: f64) -> Result<Receipt, LedgerError> {
        validate_amount(amount)?;
        let account = self.find_mut(id)?;

        let balance = account.balance + amount;
        if !balance.is_finite() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        account.balance = balance;
        account
            .transaction_history
            .push(history_entry("Deposited", amount));
        tracing::info!(id, amount, balance, "Deposit applied");

        Ok(self.record(id, amount, balance, TransactionKind::Deposit))
    }

    pub fn withdraw(&mut self, id: AccountId, amount: f64) -> Result<Receipt, LedgerError> {
        validate_amount(amount)?;
        let account = self.find_mut(id)?;

        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: account.balance,
            });
        }

        account.balance -= amount;
        account
            .transaction_history
            .push(history_entry("Withdrawn", amount));
        let balance = account.balance;
        tracing::info!(id, amount, balance, "Withdrawal applied");

        Ok(self.record(id, amount, balance, TransactionKind::Withdraw))
    }

    /// Removes every account with `id`, then purges its log records.
    ///
    /// A failed purge does not bring the accounts back; it is reported in
    /// `Deletion::records_purged`.
    pub fn delete(&mut self, id: AccountId) -> Result<Deletion, LedgerError> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        let accounts_removed = before - self.accounts.len();
        if accounts_removed == 0 {
            return Err(LedgerError::AccountNotFound(id));
        }
        tracing::info!(id, accounts_removed, "Account deleted");

        let records_purged = self.log.delete_by_account(id);
        if let Err(ref e) = records_purged {
            tracing::warn!(id, error = %e, "Failed to purge transactions for deleted account");
        }

        Ok(Deletion {
            account_id: id,
            accounts_removed,
            records_purged,
        })
    }

    /// Every persisted transaction, including those of accounts from earlier
    /// sessions.
    pub fn transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.log.list_all()?)
    }

    fn find_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(LedgerError::AccountNotFound(id))
    }

    fn record(&self, account_id: AccountId, amount: f64, balance: f64, kind: TransactionKind) -> Receipt {
        let txn = NewTransaction {
            account_id,
            amount,
            kind,
        };

        let (record_id, log_error) = match self.log.append(&txn) {
            Ok(record_id) => (Some(record_id), None),
            Err(e) => {
                tracing::warn!(account_id, %kind, error = %e, "Transaction applied but not logged");
                (None, Some(e))
            }
        };

        Receipt {
            account_id,
            amount,
            balance,
            record_id,
            log_error,
        }
    }
}

// Non-finite amounts would poison the balance comparisons, so only finite
// non-negative values pass.
fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

fn history_entry(verb: &str, amount: f64) -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{} {:02}:{:02}:{:02} {}: {:.2}",
        now.date(),
        now.hour(),
        now.minute(),
        now.second(),
        verb,
        amount
    )
}
