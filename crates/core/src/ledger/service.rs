//! Ledger service for transaction validation.
//!
//! This module provides the core business rules applied to a transaction
//! before it is stored in the journal.

use hisob_shared::types::LedgerEntryId;
use rust_decimal::Decimal;

use super::entry::JournalEntry;
use super::error::LedgerError;
use super::types::{CreateTransactionInput, EntryInput, TransactionStatus, TransactionTotals};
use crate::accounts::ChartOfAccounts;

/// Ledger service for transaction validation.
///
/// This service contains pure business logic with no storage dependencies.
pub struct LedgerService;

impl LedgerService {
    /// Validate a transaction input against the chart of accounts.
    ///
    /// This function performs all validation steps:
    /// 1. Validates the description is not blank
    /// 2. Validates minimum entries (at least 2)
    /// 3. Validates each entry's amounts (one positive side, no negatives)
    /// 4. Validates accounts (exist, active, on-balance)
    /// 5. Validates both sides are present
    /// 6. Validates the sides add up without overflow
    /// 7. Validates transaction balance (debits = credits)
    ///
    /// # Returns
    ///
    /// The validated entry lines and the transaction totals.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn validate(
        input: &CreateTransactionInput,
        chart: &ChartOfAccounts,
    ) -> Result<(Vec<JournalEntry>, TransactionTotals), LedgerError> {
        if input.description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }

        if input.entries.len() < 2 {
            return Err(LedgerError::InsufficientEntries);
        }

        let entries = input
            .entries
            .iter()
            .map(|entry| Self::validate_entry(entry, chart))
            .collect::<Result<Vec<_>, _>>()?;

        let has_debit = entries.iter().any(|e| e.debit > Decimal::ZERO);
        let has_credit = entries.iter().any(|e| e.credit > Decimal::ZERO);
        if !has_debit || !has_credit {
            return Err(LedgerError::SingleSided);
        }

        let totals = Self::calculate_totals(&entries)?;
        if !totals.is_balanced {
            return Err(LedgerError::UnbalancedTransaction {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        Ok((entries, totals))
    }

    /// Validate a single line and assign it an id.
    fn validate_entry(
        entry: &EntryInput,
        chart: &ChartOfAccounts,
    ) -> Result<JournalEntry, LedgerError> {
        if entry.debit < Decimal::ZERO || entry.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(entry.account.clone()));
        }
        match (entry.debit.is_zero(), entry.credit.is_zero()) {
            (true, true) => return Err(LedgerError::ZeroAmount(entry.account.clone())),
            (false, false) => return Err(LedgerError::BothSides(entry.account.clone())),
            _ => {}
        }

        let account = chart
            .get(&entry.account)
            .ok_or_else(|| LedgerError::AccountNotFound(entry.account.clone()))?;
        if !account.is_active {
            return Err(LedgerError::AccountInactive(entry.account.clone()));
        }
        if !account.kind.is_on_balance() {
            return Err(LedgerError::OffBalanceAccount(entry.account.clone()));
        }

        Ok(JournalEntry {
            id: LedgerEntryId::new(),
            account: entry.account.clone(),
            debit: entry.debit,
            credit: entry.credit,
            description: entry.description.clone(),
        })
    }

    /// Calculate transaction totals from entry lines.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if either side cannot be summed.
    pub fn calculate_totals(entries: &[JournalEntry]) -> Result<TransactionTotals, LedgerError> {
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for entry in entries {
            debit = debit
                .checked_add(entry.debit)
                .ok_or(LedgerError::AmountOverflow)?;
            credit = credit
                .checked_add(entry.credit)
                .ok_or(LedgerError::AmountOverflow)?;
        }

        Ok(TransactionTotals::new(debit, credit))
    }

    /// Validate that a transaction can be modified or deleted.
    ///
    /// # Errors
    ///
    /// Returns error if the transaction is not a draft.
    pub fn validate_can_modify(
        status: TransactionStatus,
        action: &'static str,
    ) -> Result<(), LedgerError> {
        if status.is_editable() {
            Ok(())
        } else {
            Err(LedgerError::InvalidState { action, status })
        }
    }

    /// Validate that a transaction can be posted.
    ///
    /// # Errors
    ///
    /// Returns error unless the transaction is a draft.
    pub fn validate_can_post(status: TransactionStatus) -> Result<(), LedgerError> {
        Self::validate_can_modify(status, "post")
    }

    /// Validate that a transaction can be reversed.
    ///
    /// # Errors
    ///
    /// Returns error unless the transaction is posted.
    pub fn validate_can_reverse(status: TransactionStatus) -> Result<(), LedgerError> {
        match status {
            TransactionStatus::Posted => Ok(()),
            status => Err(LedgerError::InvalidState {
                action: "reverse",
                status,
            }),
        }
    }
}
