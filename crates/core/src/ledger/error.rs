//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during journal operations:
//! validation errors, account errors and transaction state errors.

use hisob_shared::AppError;
use hisob_shared::types::{AccountCode, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{OperationType, TransactionStatus};

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transaction must have at least 2 entries.
    #[error("Transaction must have at least 2 entries")]
    InsufficientEntries,

    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedTransaction {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Transaction has only debit or only credit lines.
    #[error("Transaction must have both debit and credit entries")]
    SingleSided,

    /// Entry amount cannot be zero.
    #[error("Entry for account {0} has no amount")]
    ZeroAmount(AccountCode),

    /// Entry amount cannot be negative.
    #[error("Entry for account {0} has a negative amount")]
    NegativeAmount(AccountCode),

    /// Entry must specify either debit or credit, not both.
    #[error("Entry for account {0} must specify either debit or credit, not both")]
    BothSides(AccountCode),

    /// Transaction description is empty.
    #[error("Transaction description cannot be empty")]
    EmptyDescription,

    /// Amounts are too large to add up safely.
    #[error("Amounts exceed the journal limit of {}", super::journal::TURNOVER_LIMIT)]
    AmountOverflow,

    /// No entry template exists for this operation.
    #[error("No entry template for {0} operations")]
    NoTemplate(OperationType),

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountCode),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountCode),

    /// Off-balance accounts cannot take part in double entries.
    #[error("Account {0} is off-balance and cannot be used in a double entry")]
    OffBalanceAccount(AccountCode),

    // ========== Transaction State Errors ==========
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// The transaction is not in a state that allows the operation.
    #[error("Cannot {action} a {status} transaction")]
    InvalidState {
        /// The attempted action.
        action: &'static str,
        /// The transaction's current status.
        status: TransactionStatus,
    },

    /// The transaction was already reversed.
    #[error("Transaction {0} has already been reversed")]
    AlreadyReversed(TransactionId),

    // ========== Import Errors ==========
    /// A record of an imported journal was rejected.
    #[error("Journal record {index}: {source}")]
    InvalidRecord {
        /// Zero-based position of the record.
        index: usize,
        /// Why the record was rejected.
        #[source]
        source: Box<LedgerError>,
    },
}

impl LedgerError {
    /// Returns the error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientEntries => "INSUFFICIENT_ENTRIES",
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::SingleSided => "SINGLE_SIDED_TRANSACTION",
            Self::ZeroAmount(_) => "ZERO_AMOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::BothSides(_) => "INVALID_ENTRY_TYPE",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::NoTemplate(_) => "NO_TEMPLATE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::OffBalanceAccount(_) => "OFF_BALANCE_ACCOUNT",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_TRANSACTION_STATE",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::InvalidRecord { .. } => "INVALID_JOURNAL_RECORD",
        }
    }

    /// Returns true if the error comes from malformed input rather than
    /// from the state of the journal.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InsufficientEntries
                | Self::UnbalancedTransaction { .. }
                | Self::SingleSided
                | Self::ZeroAmount(_)
                | Self::NegativeAmount(_)
                | Self::BothSides(_)
                | Self::EmptyDescription
                | Self::AmountOverflow
                | Self::NoTemplate(_)
        )
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(_) | LedgerError::TransactionNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LedgerError::InvalidState { .. } | LedgerError::AlreadyReversed(_) => {
                Self::Conflict(err.to_string())
            }
            LedgerError::AccountInactive(_) | LedgerError::OffBalanceAccount(_) => {
                Self::BusinessRule(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
