use prettytable::{row, Table};

use toybank_core::{Account, TransactionRecord};

pub fn transactions_table(records: &[TransactionRecord]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["ID", "Account ID", "Amount", "Type"]);
    table.add_empty_row();

    for record in records {
        table.add_row(row![record.id, record.account_id, record.amount, record.kind]);
    }

    table
}

pub fn accounts_table(accounts: &[Account]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["ID", "Name", "Contact", "Age", "Balance", "Kind"]);
    table.add_empty_row();

    for account in accounts {
        table.add_row(row![
            account.id,
            account.name,
            account.contact,
            account.age,
            account.balance,
            account.kind
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactions_table_lists_every_record() {
        let records = vec![
            TransactionRecord {
                id: 1,
                account_id: 1234567,
                amount: 100.0,
                kind: "Deposit".to_string(),
            },
            TransactionRecord {
                id: 2,
                account_id: 1234567,
                amount: 30.5,
                kind: "Withdraw".to_string(),
            },
        ];

        let rendered = transactions_table(&records).to_string();
        assert!(rendered.contains("Account ID"));
        assert!(rendered.contains("1234567"));
        assert!(rendered.contains("30.5"));
        assert!(rendered.contains("Withdraw"));
    }

    #[test]
    fn accounts_table_shows_holder_details() {
        let mut account = Account::new(7654321, "Bob", "555-0199", 52);
        account.balance = 12.25;

        let rendered = accounts_table(&[account]).to_string();
        assert!(rendered.contains("7654321"));
        assert!(rendered.contains("Bob"));
        assert!(rendered.contains("555-0199"));
        assert!(rendered.contains("12.25"));
        assert!(rendered.contains("Savings"));
    }
}
