//! Standard entry templates for common operations.
//!
//! | operation | debit | credit |
//! |-----------|-------|--------|
//! | income    | 1200  | 6000   |
//! | expense   | 7000  | 1200   |
//! | transfer  | 1000  | 1200   |
//!
//! Corrections are always entered line by line.

use hisob_shared::types::AccountCode;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryInput, OperationType};

impl OperationType {
    /// Debit and credit account codes used by the template, if any.
    #[must_use]
    pub const fn template_accounts(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Income => Some(("1200", "6000")),
            Self::Expense => Some(("7000", "1200")),
            Self::Transfer => Some(("1000", "1200")),
            Self::Correction => None,
        }
    }

    /// Generates the two entry lines for `amount`.
    ///
    /// Both lines carry `description`. The amount is not validated here;
    /// the journal validates the resulting transaction as usual.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NoTemplate` for corrections.
    pub fn template(
        self,
        amount: Decimal,
        description: &str,
    ) -> Result<Vec<EntryInput>, LedgerError> {
        let (debit, credit) = self
            .template_accounts()
            .ok_or(LedgerError::NoTemplate(self))?;
        let description = Some(description.to_string()).filter(|d| !d.is_empty());

        Ok(vec![
            EntryInput::debit(template_code(debit, self)?, amount, description.clone()),
            EntryInput::credit(template_code(credit, self)?, amount, description),
        ])
    }
}

pub(super) fn template_code(
    raw: &str,
    operation: OperationType,
) -> Result<AccountCode, LedgerError> {
    AccountCode::parse(raw).map_err(|_| LedgerError::NoTemplate(operation))
}
