//! The interactive menu loop.
//!
//! Generic over the input and output streams so it can be driven by stdin and
//! stdout in the binary and by in-memory buffers in tests.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use toybank_core::{AccountId, TransactionLog};

use crate::ledger::{IdGenerator, Ledger, LedgerError, Receipt};
use crate::report;

const MENU: &str = "
1. Create Account
2. Deposit
3. Withdraw
4. View Transactions
5. Display All Accounts
6. Delete Account
7. Exit
8. Account History
Choose an option: ";

pub struct Session<'a, L: TransactionLog, G: IdGenerator, R, W> {
    ledger: &'a mut Ledger<L, G>,
    input: R,
    output: W,
}

impl<'a, L, G, R, W> Session<'a, L, G, R, W>
where
    L: TransactionLog,
    G: IdGenerator,
    R: BufRead,
    W: Write,
{
    pub fn new(ledger: &'a mut Ledger<L, G>, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
        }
    }

    /// Runs until the user picks Exit or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let choice = match line.parse::<i64>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Invalid input! Please enter a number.")?;
                    continue;
                }
            };

            let keep_going = match choice {
                1 => self.create_account()?,
                2 => self.deposit()?,
                3 => self.withdraw()?,
                4 => self.view_transactions()?,
                5 => self.display_accounts()?,
                6 => self.delete_account()?,
                7 => break,
                8 => self.account_history()?,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        writeln!(self.output, "Exiting the application.")?;
        self.output.flush()
    }

    // Each action returns Ok(false) when the input ran out mid-prompt.

    fn create_account(&mut self) -> io::Result<bool> {
        let Some(name) = self.prompt("Enter account holder's name: ")? else {
            return Ok(false);
        };
        let Some(contact) = self.prompt("Enter account holder's contact number: ")? else {
            return Ok(false);
        };
        let Some(age) = self.prompt_parsed::<i64>("Enter account holder's age: ", "age")? else {
            return Ok(false);
        };
        let Some(age) = age else {
            return Ok(true);
        };

        let id = self.ledger.create(&name, &contact, age).id;
        writeln!(self.output, "Account created successfully! Account ID: {}", id)?;
        Ok(true)
    }

    fn deposit(&mut self) -> io::Result<bool> {
        self.move_funds(
            "Enter account ID to deposit: ",
            "Enter amount to deposit: ",
            "Deposited",
            |ledger, id, amount| ledger.deposit(id, amount),
        )
    }

    fn withdraw(&mut self) -> io::Result<bool> {
        self.move_funds(
            "Enter account ID to withdraw: ",
            "Enter amount to withdraw: ",
            "Withdrawn",
            |ledger, id, amount| ledger.withdraw(id, amount),
        )
    }

    fn move_funds<F>(&mut self, id_prompt: &str, amount_prompt: &str, verb: &str, apply: F) -> io::Result<bool>
    where
        F: FnOnce(&mut Ledger<L, G>, AccountId, f64) -> Result<Receipt, LedgerError>,
    {
        let Some(id) = self.prompt_parsed::<AccountId>(id_prompt, "account ID")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };

        // The account is looked up before asking for an amount.
        if self.ledger.find(id).is_none() {
            writeln!(self.output, "Account ID not found.")?;
            return Ok(true);
        }

        let Some(amount) = self.prompt_parsed::<f64>(amount_prompt, "amount")? else {
            return Ok(false);
        };
        let Some(amount) = amount else {
            return Ok(true);
        };

        match apply(&mut *self.ledger, id, amount) {
            Ok(receipt) => {
                writeln!(
                    self.output,
                    "{}: {}, New Balance: {}",
                    verb, receipt.amount, receipt.balance
                )?;
                if let Some(e) = receipt.log_error {
                    writeln!(self.output, "Warning: transaction was not logged: {}", e)?;
                }
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(true)
    }

    fn view_transactions(&mut self) -> io::Result<bool> {
        match self.ledger.transactions() {
            Ok(records) if records.is_empty() => {
                writeln!(self.output, "\nNo transactions recorded.")?;
            }
            Ok(records) => {
                writeln!(self.output, "\nTransactions:")?;
                write!(self.output, "{}", report::transactions_table(&records))?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(true)
    }

    fn display_accounts(&mut self) -> io::Result<bool> {
        if self.ledger.accounts().is_empty() {
            writeln!(self.output, "\nNo accounts.")?;
        } else {
            writeln!(self.output, "\nAll Accounts:")?;
            write!(self.output, "{}", report::accounts_table(self.ledger.accounts()))?;
        }
        Ok(true)
    }

    fn delete_account(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt_parsed::<AccountId>("Enter Account ID to delete: ", "account ID")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };

        match self.ledger.delete(id) {
            Ok(deletion) => {
                writeln!(self.output, "Account deleted successfully!")?;
                match deletion.records_purged {
                    Ok(_) => writeln!(self.output, "Transactions for account ID {} deleted.", id)?,
                    Err(e) => writeln!(self.output, "Error: failed to delete transactions: {}", e)?,
                }
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(true)
    }

    fn account_history(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt_parsed::<AccountId>("Enter account ID: ", "account ID")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };

        match self.ledger.find(id) {
            Some(account) => {
                writeln!(
                    self.output,
                    "Transaction History for {} (Account ID: {}):",
                    account.name, account.id
                )?;
                for entry in &account.transaction_history {
                    writeln!(self.output, "{}", entry)?;
                }
            }
            None => writeln!(self.output, "Account ID not found.")?,
        }
        Ok(true)
    }

    fn report_error(&mut self, error: &LedgerError) -> io::Result<()> {
        match error {
            LedgerError::InvalidAmount(_) => writeln!(self.output, "Please enter a positive amount."),
            LedgerError::AccountNotFound(_) => writeln!(self.output, "Account ID not found."),
            LedgerError::InsufficientFunds { .. } => writeln!(self.output, "Insufficient funds!"),
            LedgerError::Store(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    /// Reads one trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompts for a value. The outer `None` is end of input; the inner
    /// `None` means the value did not parse and the user was told so.
    fn prompt_parsed<T: FromStr>(&mut self, text: &str, what: &str) -> io::Result<Option<Option<T>>> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        match raw.parse::<T>() {
            Ok(value) => Ok(Some(Some(value))),
            Err(_) => {
                writeln!(self.output, "Invalid {}: {:?}", what, raw)?;
                Ok(Some(None))
            }
        }
    }
}
