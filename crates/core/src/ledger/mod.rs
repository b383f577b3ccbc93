//! Double-entry journal.
//!
//! This module implements the core ledger functionality:
//! - Journal entry lines and transactions
//! - Business rule validation
//! - Standard operation templates
//! - Reversal of posted transactions
//! - Turnover and balance calculations

pub mod balance;
pub mod demo;
pub mod entry;
pub mod error;
pub mod journal;
pub mod reversal;
pub mod service;
pub mod template;
pub mod transaction;
pub mod types;

pub use balance::{AccountBalance, RunningBalance, Turnover, split_net};
pub use demo::demo_records;
pub use entry::JournalEntry;
pub use error::LedgerError;
pub use journal::{Journal, JournalRecord};
pub use reversal::ReversalService;
pub use service::LedgerService;
pub use transaction::Transaction;
pub use types::{
    CreateTransactionInput, DateRange, EntryInput, OperationType, TransactionFilter,
    TransactionStatus, TransactionTotals,
};
