//! Core types and traits for toybank transaction log backends.
//!
//! This crate provides the `TransactionLog` trait and the account and
//! transaction models, so log implementations can live in separate crates.

pub mod models;
pub mod storage;

// Re-export key types at crate root for convenience
pub use models::{Account, AccountId, AccountKind, NewTransaction, TransactionKind, TransactionRecord};
pub use storage::{StoreError, TransactionLog};
