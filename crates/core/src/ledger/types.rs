//! Ledger domain types for transaction creation and validation.
//!
//! This module defines the input types accepted by the journal and the small
//! enums that classify transactions.

use chrono::NaiveDate;
use hisob_shared::types::AccountCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business operation a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
    /// Money moved between own accounts.
    Transfer,
    /// Manual correction, including reversals.
    Correction,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
            Self::Correction => "correction",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            "correction" => Ok(Self::Correction),
            _ => Err(format!("Unknown operation type: {s}")),
        }
    }
}

/// Transaction status.
///
/// Draft -> Posted -> Reversed. Only drafts may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Recorded but not yet affecting balances.
    Draft,
    /// Posted to the ledger (immutable).
    Posted,
    /// Posted and later cancelled by a reversing transaction (immutable).
    Reversed,
}

impl TransactionStatus {
    /// Returns true if the transaction can be modified or deleted.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the transaction counts towards balances.
    #[must_use]
    pub fn affects_balances(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "posted" => Ok(Self::Posted),
            "reversed" => Ok(Self::Reversed),
            _ => Err(format!("Unknown transaction status: {s}")),
        }
    }
}

/// Input for a single journal line.
///
/// Exactly one of `debit` and `credit` must be positive; the other is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInput {
    /// The account to post to.
    pub account: AccountCode,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
    /// Optional line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntryInput {
    /// A debit line.
    #[must_use]
    pub fn debit(account: AccountCode, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account,
            debit: amount,
            credit: Decimal::ZERO,
            description,
        }
    }

    /// A credit line.
    #[must_use]
    pub fn credit(account: AccountCode, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account,
            debit: Decimal::ZERO,
            credit: amount,
            description,
        }
    }
}

/// Input for creating a new transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTransactionInput {
    /// The date of the transaction.
    pub date: NaiveDate,
    /// A description of the transaction.
    pub description: String,
    /// The business operation.
    #[serde(rename = "type")]
    pub operation: OperationType,
    /// The journal lines (must have at least 2).
    pub entries: Vec<EntryInput>,
}

/// Debit and credit sums of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the transaction is balanced (debits == credits).
    pub is_balanced: bool,
}

impl TransactionTotals {
    /// Creates new transaction totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// The transaction total: the larger of the two sides.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.debit.max(self.credit)
    }
}

/// Inclusive date range with optionally open ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included, unbounded when `None`.
    pub from: Option<NaiveDate>,
    /// Last day included, unbounded when `None`.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Every date.
    #[must_use]
    pub const fn all() -> Self {
        Self { from: None, to: None }
    }

    /// `from..=to`.
    #[must_use]
    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Every date up to and including `date`.
    #[must_use]
    pub const fn until(date: NaiveDate) -> Self {
        Self {
            from: None,
            to: Some(date),
        }
    }

    /// Every date strictly before `date`.
    #[must_use]
    pub fn before(date: NaiveDate) -> Self {
        match date.pred_opt() {
            Some(previous) => Self::until(previous),
            // Nothing precedes the minimum date.
            None => Self::between(NaiveDate::MAX, NaiveDate::MIN),
        }
    }

    /// Returns true if `date` falls in the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Criteria for listing journal transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only transactions with this status.
    pub status: Option<TransactionStatus>,
    /// Only transactions of this operation type.
    pub operation: Option<OperationType>,
    /// Only transactions dated within this range.
    pub dates: DateRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_status_editable() {
        assert!(TransactionStatus::Draft.is_editable());
        assert!(!TransactionStatus::Posted.is_editable());
        assert!(!TransactionStatus::Reversed.is_editable());
    }

    #[test]
    fn test_transaction_status_affects_balances() {
        assert!(!TransactionStatus::Draft.affects_balances());
        assert!(TransactionStatus::Posted.affects_balances());
        assert!(TransactionStatus::Reversed.affects_balances());
    }

    #[test]
    fn test_transaction_totals() {
        let totals = TransactionTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.total(), dec!(100.00));

        let totals = TransactionTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.total(), dec!(100.00));
    }

    #[test]
    fn test_operation_type_parse() {
        assert_eq!("Income".parse::<OperationType>().unwrap(), OperationType::Income);
        assert_eq!("transfer".parse::<OperationType>().unwrap(), OperationType::Transfer);
        assert!("refund".parse::<OperationType>().is_err());
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert!(!range.contains(date(2023, 12, 31)));

        assert!(DateRange::all().contains(date(1999, 5, 5)));
        assert!(DateRange::until(date(2024, 1, 2)).contains(date(2024, 1, 2)));
    }

    #[test]
    fn test_date_range_before_is_exclusive() {
        let range = DateRange::before(date(2024, 1, 2));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(!range.contains(date(2024, 1, 2)));

        let range = DateRange::before(NaiveDate::MIN);
        assert!(!range.contains(NaiveDate::MIN));
    }

    #[test]
    fn test_input_json_shape() {
        let json = r#"{
            "date": "2024-01-01",
            "description": "Kirim - Mijozdan tolov",
            "type": "income",
            "entries": [
                {"account": "1200", "debit": "1000", "description": "Bank hisobiga kirim"},
                {"account": "6000", "credit": 1000}
            ]
        }"#;
        let input: CreateTransactionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.operation, OperationType::Income);
        assert_eq!(input.entries[0].debit, dec!(1000));
        assert_eq!(input.entries[0].credit, Decimal::ZERO);
        assert_eq!(input.entries[1].credit, dec!(1000));
        assert!(input.entries[1].description.is_none());
    }
}
