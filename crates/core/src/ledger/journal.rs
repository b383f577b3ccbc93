//! In-memory transaction journal.
//!
//! The journal owns the chart of accounts and the ordered list of
//! transactions. Transactions are appended in number order; only drafts may
//! be edited or removed, posted ones are cancelled by reversal.

use chrono::NaiveDate;
use hisob_shared::types::{
    AccountCode, Currency, LedgerEntryId, Money, PageRequest, PageResponse, TransactionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::balance::{AccountBalance, Turnover};
use super::entry::JournalEntry;
use super::error::LedgerError;
use super::reversal::ReversalService;
use super::service::LedgerService;
use super::transaction::Transaction;
use super::types::{
    CreateTransactionInput, DateRange, OperationType, TransactionFilter, TransactionStatus,
};
use crate::accounts::ChartOfAccounts;

/// Upper bound on the summed totals of all stored transactions.
///
/// Any balance, turnover or report total is at most this sum, so report
/// arithmetic stays well inside `Decimal::MAX`.
pub const TURNOVER_LIMIT: Decimal =
    Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX >> 2, false, 0);

/// A transaction as stored in an exported journal file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// The transaction content.
    #[serde(flatten)]
    pub input: CreateTransactionInput,
    /// Status to import with; only draft and posted are accepted.
    #[serde(default = "default_record_status")]
    pub status: TransactionStatus,
}

fn default_record_status() -> TransactionStatus {
    TransactionStatus::Posted
}

/// Append-only book of transactions over a chart of accounts.
#[derive(Debug, Clone)]
pub struct Journal {
    chart: ChartOfAccounts,
    currency: Currency,
    transactions: Vec<Transaction>,
    last_sequence: u64,
    recorded: Decimal,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new(chart: ChartOfAccounts, currency: Currency) -> Self {
        Self {
            chart,
            currency,
            transactions: Vec::new(),
            last_sequence: 0,
            recorded: Decimal::ZERO,
        }
    }

    /// The chart of accounts.
    #[must_use]
    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// Mutable access to the chart, e.g. to add or deactivate accounts.
    pub fn chart_mut(&mut self) -> &mut ChartOfAccounts {
        &mut self.chart
    }

    /// Functional currency of the books.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Number of stored transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if the journal holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Validates `input` and appends it as a draft.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn create(&mut self, input: CreateTransactionInput) -> Result<&Transaction, LedgerError> {
        self.append(input, TransactionStatus::Draft)
    }

    /// Creates a draft from the standard template of `operation`.
    ///
    /// The amount is rounded to the minor units of the journal currency.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NoTemplate` for corrections, or a validation
    /// error for a non-positive amount.
    pub fn create_from_template(
        &mut self,
        operation: OperationType,
        date: NaiveDate,
        amount: Decimal,
        description: &str,
    ) -> Result<&Transaction, LedgerError> {
        let amount = Money::new(amount, self.currency).rounded().amount;
        let entries = operation.template(amount, description)?;
        self.create(CreateTransactionInput {
            date,
            description: description.to_string(),
            operation,
            entries,
        })
    }

    /// Validates `input` and appends it already posted.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn insert_posted(
        &mut self,
        input: CreateTransactionInput,
    ) -> Result<&Transaction, LedgerError> {
        self.append(input, TransactionStatus::Posted)
    }

    /// Appends every record in order.
    ///
    /// Nothing is stored unless all records are valid.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidRecord` naming the first bad record.
    pub fn import(
        &mut self,
        records: impl IntoIterator<Item = JournalRecord>,
    ) -> Result<usize, LedgerError> {
        let mut staged = self.clone();
        let mut count = 0;
        for (index, record) in records.into_iter().enumerate() {
            let status = match record.status {
                TransactionStatus::Draft | TransactionStatus::Posted => record.status,
                status => {
                    return Err(LedgerError::InvalidRecord {
                        index,
                        source: Box::new(LedgerError::InvalidState {
                            action: "import",
                            status,
                        }),
                    });
                }
            };
            staged
                .append(record.input, status)
                .map_err(|source| LedgerError::InvalidRecord {
                    index,
                    source: Box::new(source),
                })?;
            count += 1;
        }
        *self = staged;
        info!(count, "Imported journal records");
        Ok(count)
    }

    fn append(
        &mut self,
        input: CreateTransactionInput,
        status: TransactionStatus,
    ) -> Result<&Transaction, LedgerError> {
        let (entries, totals) = LedgerService::validate(&input, &self.chart)?;
        self.recorded = self.reserve(Decimal::ZERO, totals.total())?;

        self.last_sequence += 1;
        let transaction = Transaction {
            id: TransactionId::new(),
            number: Transaction::format_number(self.last_sequence),
            date: input.date,
            description: input.description,
            operation: input.operation,
            status,
            entries,
            total: totals.total(),
            reverses: None,
            reversed_by: None,
        };
        debug!(
            number = %transaction.number,
            operation = %transaction.operation,
            status = %transaction.status,
            total = %transaction.total,
            "Recorded transaction"
        );

        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    // ========================================================================
    // Draft maintenance
    // ========================================================================

    /// Replaces the content of a draft.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the transaction is unknown, not a draft, or
    /// the new content is invalid.
    pub fn update_draft(
        &mut self,
        id: TransactionId,
        input: CreateTransactionInput,
    ) -> Result<&Transaction, LedgerError> {
        let index = self.position(id)?;
        LedgerService::validate_can_modify(self.transactions[index].status, "update")?;
        let (entries, totals) = LedgerService::validate(&input, &self.chart)?;
        self.recorded = self.reserve(self.transactions[index].total, totals.total())?;

        let transaction = &mut self.transactions[index];
        transaction.date = input.date;
        transaction.description = input.description;
        transaction.operation = input.operation;
        transaction.entries = entries;
        transaction.total = totals.total();
        debug!(number = %transaction.number, "Updated draft");

        Ok(&self.transactions[index])
    }

    /// Removes a draft and returns it.
    ///
    /// Its number is not reused.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the transaction is unknown or not a draft.
    pub fn delete_draft(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let index = self.position(id)?;
        LedgerService::validate_can_modify(self.transactions[index].status, "delete")?;
        let removed = self.transactions.remove(index);
        self.recorded -= removed.total;
        debug!(number = %removed.number, "Deleted draft");
        Ok(removed)
    }

    // ========================================================================
    // Posting
    // ========================================================================

    /// Posts a draft so that it affects balances.
    ///
    /// The chart is checked again because accounts may have been
    /// deactivated since the draft was written.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the transaction is unknown, not a draft, or
    /// refers to an account that no longer accepts entries.
    pub fn post(&mut self, id: TransactionId) -> Result<&Transaction, LedgerError> {
        let index = self.position(id)?;
        let transaction = &self.transactions[index];
        LedgerService::validate_can_post(transaction.status)?;
        LedgerService::validate(&Self::as_input(transaction), &self.chart)?;

        let transaction = &mut self.transactions[index];
        transaction.status = TransactionStatus::Posted;
        debug!(number = %transaction.number, "Posted transaction");
        Ok(&self.transactions[index])
    }

    /// Cancels a posted transaction with a reversing correction.
    ///
    /// Returns the new correction transaction. The original is marked
    /// reversed and both keep counting towards balances, where they cancel.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the transaction is unknown or not posted.
    pub fn reverse(
        &mut self,
        id: TransactionId,
        date: NaiveDate,
        reason: &str,
    ) -> Result<&Transaction, LedgerError> {
        let index = self.position(id)?;
        let original = &self.transactions[index];
        if original.reversed_by.is_some() {
            return Err(LedgerError::AlreadyReversed(id));
        }
        LedgerService::validate_can_reverse(original.status)?;
        let input = ReversalService::reversing_input(original, date, reason)?;

        // Accounts deactivated after posting still accept the reversal.
        let (entries, totals) = LedgerService::validate(&input, &self.chart)
            .or_else(|err| match err {
                LedgerError::AccountInactive(_) => Self::unchecked_lines(&input),
                other => Err(other),
            })?;
        self.recorded = self.reserve(Decimal::ZERO, totals.total())?;

        self.last_sequence += 1;
        let reversal = Transaction {
            id: TransactionId::new(),
            number: Transaction::format_number(self.last_sequence),
            date: input.date,
            description: input.description,
            operation: OperationType::Correction,
            status: TransactionStatus::Posted,
            entries,
            total: totals.total(),
            reverses: Some(id),
            reversed_by: None,
        };
        let reversal_id = reversal.id;

        let original = &mut self.transactions[index];
        original.status = TransactionStatus::Reversed;
        original.reversed_by = Some(reversal_id);
        debug!(
            original = %original.number,
            reversal = %reversal.number,
            "Reversed transaction"
        );

        self.transactions.push(reversal);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    fn unchecked_lines(
        input: &CreateTransactionInput,
    ) -> Result<(Vec<JournalEntry>, super::types::TransactionTotals), LedgerError> {
        let entries: Vec<JournalEntry> = input
            .entries
            .iter()
            .map(|e| JournalEntry {
                id: LedgerEntryId::new(),
                account: e.account.clone(),
                debit: e.debit,
                credit: e.credit,
                description: e.description.clone(),
            })
            .collect();
        let totals = LedgerService::calculate_totals(&entries)?;
        Ok((entries, totals))
    }

    /// The recorded sum after swapping `released` for `added`.
    fn reserve(&self, released: Decimal, added: Decimal) -> Result<Decimal, LedgerError> {
        self.recorded
            .checked_sub(released)
            .and_then(|sum| sum.checked_add(added))
            .filter(|sum| *sum <= TURNOVER_LIMIT)
            .ok_or(LedgerError::AmountOverflow)
    }

    fn as_input(transaction: &Transaction) -> CreateTransactionInput {
        CreateTransactionInput {
            date: transaction.date,
            description: transaction.description.clone(),
            operation: transaction.operation,
            entries: transaction
                .entries
                .iter()
                .map(|e| super::types::EntryInput {
                    account: e.account.clone(),
                    debit: e.debit,
                    credit: e.credit,
                    description: e.description.clone(),
                })
                .collect(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn position(&self, id: TransactionId) -> Result<usize, LedgerError> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))
    }

    /// Looks up a transaction by id.
    #[must_use]
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Looks up a transaction by its journal number.
    ///
    /// Accepts unpadded numbers, so `7` finds `000007`.
    #[must_use]
    pub fn get_by_number(&self, number: &str) -> Option<&Transaction> {
        let wanted = number.trim().trim_start_matches('0');
        self.transactions
            .iter()
            .find(|t| t.number.trim_start_matches('0') == wanted)
    }

    /// Iterates all transactions in number order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Transactions that affect balances (posted and reversed).
    pub fn posted(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.status.affects_balances())
    }

    /// Lists transactions matching `filter`, one page at a time.
    #[must_use]
    pub fn list(&self, filter: &TransactionFilter, page: PageRequest) -> PageResponse<Transaction> {
        let matching: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.operation.is_none_or(|o| t.operation == o))
            .filter(|t| filter.dates.contains(t.date))
            .cloned()
            .collect();
        PageResponse::paginate(matching, page)
    }

    // ========================================================================
    // Balances
    // ========================================================================

    /// Debit and credit turnover of `account` over posted entries in `dates`.
    #[must_use]
    pub fn turnover(&self, account: &AccountCode, dates: DateRange) -> Turnover {
        let mut turnover = Turnover::default();
        for entry in self
            .posted()
            .filter(|t| dates.contains(t.date))
            .flat_map(|t| t.entries_for(account))
        {
            turnover.record(entry.debit, entry.credit);
        }
        turnover
    }

    /// Balance of `account` at the end of `as_of`, signed by its normal side.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` for an unknown code.
    pub fn account_balance(
        &self,
        account: &AccountCode,
        as_of: NaiveDate,
    ) -> Result<AccountBalance, LedgerError> {
        let info = self
            .chart
            .get(account)
            .ok_or_else(|| LedgerError::AccountNotFound(account.clone()))?;
        let turnover = self.turnover(account, DateRange::until(as_of));
        Ok(AccountBalance::from_turnover(
            account.clone(),
            turnover,
            info.normal_balance,
        ))
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
