//! Builds the in-memory journal the commands work on.

use std::path::Path;

use hisob_core::accounts::ChartOfAccounts;
use hisob_core::ledger::{Journal, JournalRecord, demo_records};
use hisob_shared::config::LedgerConfig;
use hisob_shared::{AppError, AppResult};
use tracing::info;

/// Where the journal's transactions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalSource {
    /// A JSON file.
    File,
    /// The built-in demo transactions.
    Demo,
    /// Nothing; the journal starts empty.
    Empty,
}

/// Loads the journal configured in `config`.
///
/// A configured file wins over the demo journal.
pub fn load_journal(config: &LedgerConfig) -> AppResult<(Journal, JournalSource)> {
    let mut journal = Journal::new(ChartOfAccounts::standard(), config.currency);

    let source = match &config.journal_path {
        Some(path) => {
            journal.import(read_records(path)?)?;
            JournalSource::File
        }
        None if config.seed_demo => {
            journal.import(demo_records()?)?;
            JournalSource::Demo
        }
        None => JournalSource::Empty,
    };

    info!(
        source = ?source,
        transactions = journal.len(),
        currency = %journal.currency(),
        "Journal loaded"
    );
    Ok((journal, source))
}

fn read_records(path: &Path) -> AppResult<Vec<JournalRecord>> {
    let raw = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&raw)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hisob_shared::types::Currency;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn config(journal_path: Option<&Path>, seed_demo: bool) -> LedgerConfig {
        LedgerConfig {
            currency: Currency::Usd,
            journal_path: journal_path.map(Path::to_path_buf),
            seed_demo,
        }
    }

    fn journal_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_demo_journal() {
        let (journal, source) = load_journal(&config(None, true)).unwrap();
        assert_eq!(source, JournalSource::Demo);
        assert_eq!(journal.posted().count(), 2);
        assert_eq!(journal.currency(), Currency::Usd);
    }

    #[test]
    fn test_empty_journal() {
        let (journal, source) = load_journal(&config(None, false)).unwrap();
        assert_eq!(source, JournalSource::Empty);
        assert!(journal.is_empty());
    }

    #[test]
    fn test_file_journal() {
        let file = journal_file(
            r#"[
                {
                    "date": "2024-03-01",
                    "description": "Naqd pul",
                    "type": "transfer",
                    "entries": [
                        {"account": "1000", "debit": "250.00"},
                        {"account": "1200", "credit": "250.00"}
                    ]
                },
                {
                    "date": "2024-03-02",
                    "description": "Qoralama",
                    "type": "expense",
                    "status": "draft",
                    "entries": [
                        {"account": "7000", "debit": "10"},
                        {"account": "1200", "credit": "10"}
                    ]
                }
            ]"#,
        );

        let (journal, source) = load_journal(&config(Some(file.path()), true)).unwrap();

        assert_eq!(source, JournalSource::File);
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.posted().count(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_journal(&config(Some(&path), false)).unwrap_err();
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let file = journal_file(
            r#"[{"date": "2024-03-01", "description": "x", "type": "income",
                 "entries": [{"account": "1200", "debit": "5"}, {"account": "6000", "credit": "4"}]}]"#,
        );
        let err = load_journal(&config(Some(file.path()), false)).unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("Journal record 0"));
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let file = journal_file(
            r#"[
                {
                    "date": "2024-03-01",
                    "description": "Kirim",
                    "type": "income",
                    "entries": [
                        {"account": "1200", "debit": "100"},
                        {"account": "6000", "credit": "100"}
                    ]
                },
                {
                    "date": "2024-03-02",
                    "description": "Katta summa",
                    "type": "income",
                    "entries": [
                        {"account": "1200", "debit": "79228162514264337593543950335"},
                        {"account": "1200", "debit": "79228162514264337593543950335"},
                        {"account": "6000", "credit": "79228162514264337593543950335"},
                        {"account": "6000", "credit": "79228162514264337593543950335"}
                    ]
                }
            ]"#,
        );
        let err = load_journal(&config(Some(file.path()), false)).unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.exit_code(), 65);
        assert!(err.to_string().contains("Journal record 1"));
    }

    #[test]
    fn test_malformed_file() {
        let file = journal_file("{ not json");
        let err = load_journal(&config(Some(file.path()), false)).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_DATA");
    }
}
