//! Chart of accounts codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a valid account code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountCodeError {
    /// The code is empty.
    #[error("Account code cannot be empty")]
    Empty,
    /// The code contains a character other than an ASCII digit.
    #[error("Account code must contain only digits: {0}")]
    NonDigit(String),
}

/// A numeric account code such as `1200`.
///
/// Codes compare as strings, so `1000 < 1200 < 6000` and sub-accounts
/// (`1210`) sort right after their parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountCode(String);

impl AccountCode {
    /// Parses and validates an account code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or contains non-digit characters.
    pub fn parse(code: impl Into<String>) -> Result<Self, AccountCodeError> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(AccountCodeError::Empty);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AccountCodeError::NonDigit(code));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code starts with the given prefix.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AccountCode {
    type Err = AccountCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountCode {
    type Error = AccountCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AccountCode> for String {
    fn from(code: AccountCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1000")]
    #[case("1210")]
    #[case(" 6000 ")]
    fn test_valid_codes(#[case] raw: &str) {
        let code = AccountCode::parse(raw).unwrap();
        assert_eq!(code.as_str(), raw.trim());
    }

    #[rstest]
    #[case("", AccountCodeError::Empty)]
    #[case("   ", AccountCodeError::Empty)]
    #[case("12a0", AccountCodeError::NonDigit("12a0".to_string()))]
    #[case("-100", AccountCodeError::NonDigit("-100".to_string()))]
    fn test_invalid_codes(#[case] raw: &str, #[case] expected: AccountCodeError) {
        assert_eq!(AccountCode::parse(raw).unwrap_err(), expected);
    }

    #[test]
    fn test_prefix_and_ordering() {
        let bank = AccountCode::parse("1200").unwrap();
        let sub = AccountCode::parse("1210").unwrap();
        let income = AccountCode::parse("6000").unwrap();
        assert!(bank.has_prefix("1"));
        assert!(!bank.has_prefix("6"));
        assert!(bank < sub);
        assert!(sub < income);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let code: AccountCode = serde_json::from_str("\"1200\"").unwrap();
        assert_eq!(code.as_str(), "1200");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"1200\"");
        assert!(serde_json::from_str::<AccountCode>("\"abc\"").is_err());
    }
}
