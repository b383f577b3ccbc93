//! Chart of accounts errors.

use hisob_shared::types::{AccountCode, AccountCodeError};
use thiserror::Error;

/// Errors raised by chart of accounts operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    /// No account with this code exists.
    #[error("Account not found: {0}")]
    NotFound(AccountCode),

    /// An account with this code already exists.
    #[error("Duplicate account code: {0}")]
    DuplicateCode(AccountCode),

    /// The code is not a valid account code.
    #[error(transparent)]
    InvalidCode(#[from] AccountCodeError),
}

impl AccountError {
    /// Returns the error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::InvalidCode(_) => "INVALID_ACCOUNT_CODE",
        }
    }
}

impl From<AccountError> for hisob_shared::AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => Self::NotFound(err.to_string()),
            AccountError::DuplicateCode(_) => Self::Conflict(err.to_string()),
            AccountError::InvalidCode(_) => Self::Validation(err.to_string()),
        }
    }
}
