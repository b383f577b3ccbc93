//! Account classification types.

use hisob_shared::types::AccountCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account kind in the 1C sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountKind {
    /// Resources of the business (cash, goods, fixed assets, expenses).
    Active,
    /// Sources of resources (loans, income, profit).
    Passive,
    /// Settlement accounts that may carry a balance on either side.
    ActivePassive,
    /// Memorandum accounts kept outside the double-entry balance.
    OffBalance,
}

impl AccountKind {
    /// Returns the side on which the balance of this kind is normally kept.
    #[must_use]
    pub const fn default_normal_balance(self) -> NormalBalance {
        match self {
            Self::Active | Self::ActivePassive | Self::OffBalance => NormalBalance::Debit,
            Self::Passive => NormalBalance::Credit,
        }
    }

    /// Returns true if entries to accounts of this kind take part in the
    /// double-entry balance.
    #[must_use]
    pub const fn is_on_balance(self) -> bool {
        !matches!(self, Self::OffBalance)
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Passive => "passive",
            Self::ActivePassive => "active-passive",
            Self::OffBalance => "off-balance",
        };
        f.write_str(label)
    }
}

/// Side on which an account's balance normally sits.
///
/// - Debit-normal: balance = debit - credit
/// - Credit-normal: balance = credit - debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal account.
    Debit,
    /// Credit-normal account.
    Credit,
}

impl NormalBalance {
    /// Signs a debit/credit pair according to this side.
    #[must_use]
    pub fn signed(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// An entry in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account code.
    pub code: AccountCode,
    /// Display name.
    pub name: String,
    /// Account kind.
    pub kind: AccountKind,
    /// Side on which the balance is normally kept.
    pub normal_balance: NormalBalance,
    /// Whether the account accepts new entries.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Account {
    /// Creates an active account whose normal side follows its kind.
    #[must_use]
    pub fn new(code: AccountCode, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            code,
            name: name.into(),
            kind,
            normal_balance: kind.default_normal_balance(),
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(AccountKind::Active, NormalBalance::Debit)]
    #[case(AccountKind::Passive, NormalBalance::Credit)]
    #[case(AccountKind::ActivePassive, NormalBalance::Debit)]
    #[case(AccountKind::OffBalance, NormalBalance::Debit)]
    fn test_default_normal_balance(#[case] kind: AccountKind, #[case] expected: NormalBalance) {
        assert_eq!(kind.default_normal_balance(), expected);
    }

    #[test]
    fn test_signed_balance() {
        assert_eq!(NormalBalance::Debit.signed(dec!(100), dec!(30)), dec!(70));
        assert_eq!(NormalBalance::Credit.signed(dec!(100), dec!(30)), dec!(-70));
        assert_eq!(NormalBalance::Credit.signed(dec!(0), dec!(1000)), dec!(1000));
    }

    #[rstest]
    #[case(AccountKind::Active, true)]
    #[case(AccountKind::Passive, true)]
    #[case(AccountKind::ActivePassive, true)]
    #[case(AccountKind::OffBalance, false)]
    fn test_is_on_balance(#[case] kind: AccountKind, #[case] expected: bool) {
        assert_eq!(kind.is_on_balance(), expected);
    }

    #[test]
    fn test_kind_serde_uses_kebab_case() {
        let json = serde_json::to_string(&AccountKind::ActivePassive).unwrap();
        assert_eq!(json, "\"active-passive\"");
        assert_eq!(AccountKind::OffBalance.to_string(), "off-balance");
    }
}
