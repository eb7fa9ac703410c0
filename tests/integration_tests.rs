use toybank::config::StoreConfig;
use toybank::menu::Session;
use toybank::{IdGenerator, Ledger, LedgerError};
use toybank_core::{AccountId, NewTransaction, StoreError, TransactionLog, TransactionRecord};
use toybank_memory::InMemoryLog;
use toybank_sqlite::SqliteLog;

struct FixedIds(Vec<AccountId>);

impl IdGenerator for FixedIds {
    fn next_id(&mut self) -> AccountId {
        self.0.remove(0)
    }
}

/// A log whose every call fails, standing in for a store that went away.
struct BrokenLog;

impl TransactionLog for BrokenLog {
    fn ensure_schema(&self) -> Result<(), StoreError> {
        Err(StoreError::Other("disk I/O error".to_string()))
    }

    fn append(&self, _txn: &NewTransaction) -> Result<i64, StoreError> {
        Err(StoreError::Other("disk I/O error".to_string()))
    }

    fn list_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        Err(StoreError::Other("disk I/O error".to_string()))
    }

    fn delete_by_account(&self, _account_id: AccountId) -> Result<usize, StoreError> {
        Err(StoreError::Other("disk I/O error".to_string()))
    }
}

fn sqlite_ledger(ids: &[AccountId]) -> Ledger<SqliteLog, FixedIds> {
    let log = SqliteLog::open(":memory:").expect("Failed to open in-memory database");
    log.ensure_schema().expect("Failed to create schema");
    Ledger::with_id_generator(log, FixedIds(ids.to_vec()))
}

fn records_for(ledger: &Ledger<SqliteLog, FixedIds>, id: AccountId) -> Vec<TransactionRecord> {
    ledger
        .transactions()
        .unwrap()
        .into_iter()
        .filter(|r| r.account_id == id)
        .collect()
}

#[test]
fn test_deposit_then_withdraw() {
    let mut ledger = sqlite_ledger(&[1234567]);
    let id = ledger.create("Alice", "555-0100", 30).id;

    assert_eq!(ledger.deposit(id, 100.0).unwrap().balance, 100.0);
    assert_eq!(ledger.withdraw(id, 30.0).unwrap().balance, 70.0);
    assert_eq!(ledger.find(id).unwrap().balance, 70.0);

    let records = records_for(&ledger, id);
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].amount, records[0].kind.as_str()), (100.0, "Deposit"));
    assert_eq!((records[1].amount, records[1].kind.as_str()), (30.0, "Withdraw"));
    assert!(records[0].id < records[1].id);
}

#[test]
fn test_withdraw_from_empty_account() {
    let mut ledger = sqlite_ledger(&[1234567]);
    let id = ledger.create("Alice", "555-0100", 30).id;

    let err = ledger.withdraw(id, 1.0).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
    assert_eq!(ledger.find(id).unwrap().balance, 0.0);
    assert!(records_for(&ledger, id).is_empty());
}

#[test]
fn test_negative_amounts_change_nothing() {
    let mut ledger = sqlite_ledger(&[1234567]);
    let id = ledger.create("Alice", "555-0100", 30).id;
    ledger.deposit(id, 20.0).unwrap();

    assert!(matches!(ledger.deposit(id, -5.0), Err(LedgerError::InvalidAmount(_))));
    assert!(matches!(ledger.withdraw(id, -5.0), Err(LedgerError::InvalidAmount(_))));
    assert_eq!(ledger.find(id).unwrap().balance, 20.0);
    assert_eq!(ledger.transactions().unwrap().len(), 1);
}

#[test]
fn test_unknown_account_changes_nothing() {
    let mut ledger = sqlite_ledger(&[1234567]);
    let id = ledger.create("Alice", "555-0100", 30).id;

    assert!(matches!(ledger.deposit(7654321, 10.0), Err(LedgerError::AccountNotFound(7654321))));
    assert!(matches!(ledger.withdraw(7654321, 10.0), Err(LedgerError::AccountNotFound(7654321))));
    assert_eq!(ledger.find(id).unwrap().balance, 0.0);
    assert!(ledger.transactions().unwrap().is_empty());
}

#[test]
fn test_delete_first_of_two_accounts() {
    let mut ledger = sqlite_ledger(&[1111111, 2222222]);
    let first = ledger.create("Alice", "555-0100", 30).id;
    let second = ledger.create("Bob", "555-0199", 52).id;
    ledger.deposit(first, 10.0).unwrap();
    ledger.deposit(second, 25.0).unwrap();
    ledger.withdraw(second, 5.0).unwrap();

    let deletion = ledger.delete(first).unwrap();
    assert_eq!(deletion.accounts_removed, 1);
    assert_eq!(deletion.records_purged.unwrap(), 1);

    let ids: Vec<AccountId> = ledger.accounts().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![second]);
    assert_eq!(ledger.find(second).unwrap().balance, 20.0);

    let records = ledger.transactions().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.account_id == second));
}

#[test]
fn test_accounts_listed_in_creation_order() {
    let mut ledger = Ledger::with_id_generator(InMemoryLog::new(), FixedIds(vec![9000000, 1000000, 5000000]));
    ledger.create("C", "c", 1);
    ledger.create("A", "a", 2);
    ledger.create("B", "b", 3);

    let names: Vec<&str> = ledger.accounts().iter().map(|a| a.name.as_ref()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn test_store_failure_keeps_balance_change() {
    let mut ledger = Ledger::with_id_generator(BrokenLog, FixedIds(vec![1234567]));
    let id = ledger.create("Alice", "555-0100", 30).id;

    let receipt = ledger.deposit(id, 50.0).unwrap();
    assert_eq!(receipt.balance, 50.0);
    assert!(receipt.record_id.is_none());
    assert!(matches!(receipt.log_error, Some(StoreError::Other(_))));
    assert_eq!(ledger.find(id).unwrap().balance, 50.0);
    assert_eq!(ledger.find(id).unwrap().transaction_history.len(), 1);

    assert!(matches!(ledger.transactions(), Err(LedgerError::Store(_))));
}

#[test]
fn test_store_failure_does_not_fail_delete() {
    let mut ledger = Ledger::with_id_generator(BrokenLog, FixedIds(vec![1234567]));
    let id = ledger.create("Alice", "555-0100", 30).id;

    let deletion = ledger.delete(id).unwrap();
    assert!(deletion.records_purged.is_err());
    assert!(ledger.accounts().is_empty());
}

#[test]
fn test_menu_session_end_to_end() {
    let mut ledger = sqlite_ledger(&[1111111, 2222222]);
    let script = "\
1\nAlice\n555-0100\n30\n\
1\nBob\n555-0199\n52\n\
2\n1111111\n100\n\
3\n1111111\n30\n\
3\n2222222\n1\n\
2\n2222222\n-4\n\
6\n1111111\n\
5\n\
4\n\
6\n1111111\n\
7\n";

    let mut output = Vec::new();
    Session::new(&mut ledger, script.as_bytes(), &mut output).run().unwrap();
    let out = String::from_utf8(output).unwrap();

    assert!(out.contains("Account ID: 1111111"));
    assert!(out.contains("Account ID: 2222222"));
    assert!(out.contains("Withdrawn: 30, New Balance: 70"));
    assert!(out.contains("Insufficient funds!"));
    assert!(out.contains("Please enter a positive amount."));
    assert!(out.contains("Transactions for account ID 1111111 deleted."));
    assert!(out.contains("Account ID not found."));
    assert!(out.ends_with("Exiting the application.\n"));

    assert_eq!(ledger.accounts().len(), 1);
    assert!(ledger.transactions().unwrap().is_empty());
}

#[test]
fn test_menu_reports_unlogged_transaction() {
    let mut ledger = Ledger::with_id_generator(BrokenLog, FixedIds(vec![1234567]));
    let script = "1\nAlice\n555-0100\n30\n2\n1234567\n10\n4\n7\n";

    let mut output = Vec::new();
    Session::new(&mut ledger, script.as_bytes(), &mut output).run().unwrap();
    let out = String::from_utf8(output).unwrap();

    assert!(out.contains("Deposited: 10, New Balance: 10"));
    assert!(out.contains("Warning: transaction was not logged: disk I/O error"));
    assert!(out.contains("Error: disk I/O error"));
}

#[test]
fn test_open_store_in_missing_directory_is_fatal() {
    let config = StoreConfig {
        path: "/nonexistent-dir/toybank/banking.db".to_string(),
    };
    assert!(matches!(toybank::open_store(&config), Err(StoreError::Open(_))));
}

#[test]
fn test_open_store_creates_schema() {
    let config = StoreConfig {
        path: ":memory:".to_string(),
    };
    let log = toybank::open_store(&config).unwrap();
    assert!(log.list_all().unwrap().is_empty());
}
