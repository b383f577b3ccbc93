//! Journal entry lines.

use hisob_shared::types::{AccountCode, LedgerEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A validated line of a journal transaction.
///
/// One of `debit` and `credit` is positive, the other is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier for this line.
    pub id: LedgerEntryId,
    /// The account affected by this line.
    pub account: AccountCode,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional description for this line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_json_shape() {
        let entry = JournalEntry {
            id: LedgerEntryId::new(),
            account: AccountCode::parse("1200").unwrap(),
            debit: dec!(250.50),
            credit: Decimal::ZERO,
            description: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["account"], "1200");
        assert_eq!(json["debit"], "250.50");
        assert_eq!(json["credit"], "0");
        assert!(json.get("description").is_none());
    }
}
