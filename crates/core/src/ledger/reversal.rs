//! Reversing entries for cancelling posted transactions.
//!
//! A posted transaction is never edited. It is cancelled by a new
//! correction transaction whose lines swap debit and credit.

use chrono::NaiveDate;

use super::error::LedgerError;
use super::service::LedgerService;
use super::transaction::Transaction;
use super::types::{CreateTransactionInput, EntryInput, OperationType, TransactionTotals};

/// Stateless service for creating reversing entries.
pub struct ReversalService;

impl ReversalService {
    /// Builds the correction input that cancels `original`.
    ///
    /// For each original line:
    /// - Debits become credits
    /// - Credits become debits
    /// - Account and amount are preserved
    /// - Description is prefixed with "Storno: "
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnbalancedTransaction` if the original lines do
    /// not balance, or `LedgerError::AmountOverflow` if they cannot be summed.
    pub fn reversing_input(
        original: &Transaction,
        date: NaiveDate,
        reason: &str,
    ) -> Result<CreateTransactionInput, LedgerError> {
        Self::validate_original(original)?;

        let entries = original
            .entries
            .iter()
            .map(|entry| EntryInput {
                account: entry.account.clone(),
                debit: entry.credit,
                credit: entry.debit,
                description: Some(format!(
                    "Storno: {}",
                    entry.description.clone().unwrap_or_default()
                )),
            })
            .collect();

        let description = if reason.trim().is_empty() {
            format!("{}-sonli tranzaksiya stornosi", original.number)
        } else {
            format!(
                "{}-sonli tranzaksiya stornosi. Sabab: {}",
                original.number,
                reason.trim()
            )
        };

        Ok(CreateTransactionInput {
            date,
            description,
            operation: OperationType::Correction,
            entries,
        })
    }

    /// Validate that original entries are balanced.
    ///
    /// This should always be true for stored transactions.
    fn validate_original(original: &Transaction) -> Result<(), LedgerError> {
        let TransactionTotals {
            debit,
            credit,
            is_balanced,
        } = LedgerService::calculate_totals(&original.entries)?;
        if is_balanced {
            Ok(())
        } else {
            Err(LedgerError::UnbalancedTransaction { debit, credit })
        }
    }
}
