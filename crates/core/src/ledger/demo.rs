//! Demo journal used when no journal file is configured.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::journal::JournalRecord;
use super::template::template_code;
use super::types::{CreateTransactionInput, EntryInput, OperationType, TransactionStatus};

/// One income and one expense, both posted, at the start of 2024.
///
/// Lines use the operation's template accounts with their own descriptions.
///
/// # Errors
///
/// Returns `LedgerError::NoTemplate` only if the standard templates change.
pub fn demo_records() -> Result<Vec<JournalRecord>, LedgerError> {
    let data = [
        (
            (2024, 1, 1),
            "Kirim - Mijozdan tolov",
            OperationType::Income,
            Decimal::new(1000, 0),
            ["Bank hisobiga kirim", "Daromadlar hisobiga"],
        ),
        (
            (2024, 1, 2),
            "Chiqim - Xarajatlar",
            OperationType::Expense,
            Decimal::new(500, 0),
            ["Xarajatlar", "Bank hisobidan chiqim"],
        ),
    ];

    data.into_iter()
        .filter_map(|((y, m, d), description, operation, amount, lines)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .map(|date| (date, description, operation, amount, lines))
        })
        .map(|(date, description, operation, amount, [debit_line, credit_line])| {
            let (debit, credit) = operation
                .template_accounts()
                .ok_or(LedgerError::NoTemplate(operation))?;
            Ok(JournalRecord {
                input: CreateTransactionInput {
                    date,
                    description: description.to_string(),
                    operation,
                    entries: vec![
                        EntryInput::debit(
                            template_code(debit, operation)?,
                            amount,
                            Some(debit_line.to_string()),
                        ),
                        EntryInput::credit(
                            template_code(credit, operation)?,
                            amount,
                            Some(credit_line.to_string()),
                        ),
                    ],
                },
                status: TransactionStatus::Posted,
            })
        })
        .collect()
}
