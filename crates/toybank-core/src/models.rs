use std::{fmt::Display, str::FromStr, sync::Arc};

pub type AccountId = i64;

/// Kind of account. Savings is the only kind the bank offers today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccountKind {
    #[default]
    Savings,
}

impl Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKind::Savings => f.write_str("Savings"),
        }
    }
}

/// An account held in memory for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub kind: AccountKind,
    pub name: Arc<str>,
    pub contact: Arc<str>,
    pub age: i64,
    pub balance: f64,
    pub transaction_history: Vec<String>,
}

impl Account {
    pub fn new(id: AccountId, name: &str, contact: &str, age: i64) -> Self {
        Self {
            id,
            kind: AccountKind::Savings,
            name: Arc::from(name),
            contact: Arc::from(contact),
            age,
            balance: 0.0,
            transaction_history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    /// The text stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Deposit" => Ok(TransactionKind::Deposit),
            "Withdraw" => Ok(TransactionKind::Withdraw),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

/// A transaction about to be appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub amount: f64,
    pub kind: TransactionKind,
}

/// A transaction as read back from the log.
///
/// `kind` is kept as the raw stored text since the store does not constrain it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: i64,
    pub account_id: AccountId,
    pub amount: f64,
    pub kind: String,
}

impl TransactionRecord {
    pub fn transaction_kind(&self) -> Option<TransactionKind> {
        self.kind.parse().ok()
    }
}
