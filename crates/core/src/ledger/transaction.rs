//! Transaction aggregate.

use chrono::NaiveDate;
use hisob_shared::types::{AccountCode, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;
use super::types::{OperationType, TransactionStatus};

/// A journal transaction consisting of balanced entry lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Six-digit journal number, e.g. `000001`.
    pub number: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction description.
    pub description: String,
    /// Business operation.
    #[serde(rename = "type")]
    pub operation: OperationType,
    /// Current status.
    pub status: TransactionStatus,
    /// Entry lines.
    pub entries: Vec<JournalEntry>,
    /// Total amount (sum of debits, equal to sum of credits).
    pub total: Decimal,
    /// The transaction this one reverses, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverses: Option<TransactionId>,
    /// The transaction that reversed this one, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversed_by: Option<TransactionId>,
}

impl Transaction {
    /// Formats a journal sequence number.
    #[must_use]
    pub fn format_number(sequence: u64) -> String {
        format!("{sequence:06}")
    }

    /// Lines posted to `account`.
    pub fn entries_for<'a>(
        &'a self,
        account: &'a AccountCode,
    ) -> impl Iterator<Item = &'a JournalEntry> {
        self.entries.iter().filter(move |e| &e.account == account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hisob_shared::types::LedgerEntryId;
    use rust_decimal_macros::dec;

    fn code(raw: &str) -> AccountCode {
        AccountCode::parse(raw).unwrap()
    }

    fn sample(status: TransactionStatus) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            number: Transaction::format_number(1),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            description: "Kirim".to_string(),
            operation: OperationType::Income,
            status,
            entries: vec![
                JournalEntry {
                    id: LedgerEntryId::new(),
                    account: code("1200"),
                    debit: dec!(1000),
                    credit: Decimal::ZERO,
                    description: None,
                },
                JournalEntry {
                    id: LedgerEntryId::new(),
                    account: code("6000"),
                    debit: Decimal::ZERO,
                    credit: dec!(1000),
                    description: None,
                },
            ],
            total: dec!(1000),
            reverses: None,
            reversed_by: None,
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(Transaction::format_number(1), "000001");
        assert_eq!(Transaction::format_number(123_456), "123456");
        assert_eq!(Transaction::format_number(1_234_567), "1234567");
    }

    #[test]
    fn test_entries_for() {
        let tx = sample(TransactionStatus::Posted);
        let bank = code("1200");
        let lines: Vec<_> = tx.entries_for(&bank).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].debit, dec!(1000));
        assert_eq!(tx.entries_for(&code("7000")).count(), 0);
    }

    #[test]
    fn test_serializes_operation_as_type() {
        let json = serde_json::to_value(sample(TransactionStatus::Posted)).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["status"], "posted");
        assert_eq!(json["number"], "000001");
        assert!(json.get("reverses").is_none());
    }
}
