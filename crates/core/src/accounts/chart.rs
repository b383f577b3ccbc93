//! The chart of accounts container.

use std::collections::BTreeMap;

use hisob_shared::types::AccountCode;
use serde::{Deserialize, Serialize};

use super::error::AccountError;
use super::types::{Account, AccountKind};

/// Standard chart: code, name, kind.
const STANDARD_ACCOUNTS: [(&str, &str, AccountKind); 10] = [
    ("1000", "Kassa", AccountKind::Active),
    ("1200", "Bank hisoblari", AccountKind::Active),
    ("2000", "Tovarlar", AccountKind::Active),
    ("3000", "Asosiy vositalar", AccountKind::Active),
    ("4000", "Soliqlar", AccountKind::Active),
    ("5000", "Kreditlar", AccountKind::Passive),
    ("6000", "Daromadlar", AccountKind::Passive),
    ("7000", "Xarajatlar", AccountKind::Active),
    ("8000", "Foyda", AccountKind::Passive),
    ("9000", "Zarar", AccountKind::Active),
];

/// Ordered set of accounts keyed by code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Account>", into = "Vec<Account>")]
pub struct ChartOfAccounts {
    accounts: BTreeMap<AccountCode, Account>,
}

impl ChartOfAccounts {
    /// Builds a chart from a list of accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::DuplicateCode` if two accounts share a code.
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Result<Self, AccountError> {
        let mut chart = Self::default();
        for account in accounts {
            chart.add(account)?;
        }
        Ok(chart)
    }

    /// The standard ten-account chart used by the demo books.
    #[must_use]
    pub fn standard() -> Self {
        let accounts = STANDARD_ACCOUNTS
            .iter()
            .filter_map(|(code, name, kind)| {
                AccountCode::parse(*code)
                    .ok()
                    .map(|code| (code.clone(), Account::new(code, *name, *kind)))
            })
            .collect();
        Self { accounts }
    }

    /// Adds an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::DuplicateCode` if the code is taken.
    pub fn add(&mut self, account: Account) -> Result<(), AccountError> {
        if self.accounts.contains_key(&account.code) {
            return Err(AccountError::DuplicateCode(account.code));
        }
        self.accounts.insert(account.code.clone(), account);
        Ok(())
    }

    /// Marks an account inactive so it no longer accepts entries.
    ///
    /// Existing entries keep counting towards balances.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` for an unknown code.
    pub fn deactivate(&mut self, code: &AccountCode) -> Result<(), AccountError> {
        let account = self
            .accounts
            .get_mut(code)
            .ok_or_else(|| AccountError::NotFound(code.clone()))?;
        account.is_active = false;
        Ok(())
    }

    /// Looks up an account.
    #[must_use]
    pub fn get(&self, code: &AccountCode) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// Looks up an account, failing when it is unknown.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` for an unknown code.
    pub fn require(&self, code: &AccountCode) -> Result<&Account, AccountError> {
        self.get(code)
            .ok_or_else(|| AccountError::NotFound(code.clone()))
    }

    /// Iterates accounts in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts of one kind, in code order.
    pub fn by_kind(&self, kind: AccountKind) -> impl Iterator<Item = &Account> {
        self.iter().filter(move |a| a.kind == kind)
    }

    /// Accounts whose code starts with `prefix`, in code order.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Account> {
        self.iter().filter(move |a| a.code.has_prefix(prefix))
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl TryFrom<Vec<Account>> for ChartOfAccounts {
    type Error = AccountError;

    fn try_from(accounts: Vec<Account>) -> Result<Self, Self::Error> {
        Self::new(accounts)
    }
}

impl From<ChartOfAccounts> for Vec<Account> {
    fn from(chart: ChartOfAccounts) -> Self {
        chart.accounts.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::NormalBalance;

    fn code(raw: &str) -> AccountCode {
        AccountCode::parse(raw).unwrap()
    }

    #[test]
    fn test_standard_chart() {
        let chart = ChartOfAccounts::standard();
        assert_eq!(chart.len(), 10);

        let bank = chart.require(&code("1200")).unwrap();
        assert_eq!(bank.name, "Bank hisoblari");
        assert_eq!(bank.kind, AccountKind::Active);
        assert_eq!(bank.normal_balance, NormalBalance::Debit);

        let income = chart.require(&code("6000")).unwrap();
        assert_eq!(income.kind, AccountKind::Passive);
        assert_eq!(income.normal_balance, NormalBalance::Credit);
    }

    #[test]
    fn test_iteration_is_ordered_by_code() {
        let chart = ChartOfAccounts::new([
            Account::new(code("7000"), "Xarajatlar", AccountKind::Active),
            Account::new(code("1000"), "Kassa", AccountKind::Active),
            Account::new(code("5000"), "Kreditlar", AccountKind::Passive),
        ])
        .unwrap();
        let codes: Vec<&str> = chart.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "5000", "7000"]);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let result = ChartOfAccounts::new([
            Account::new(code("1000"), "Kassa", AccountKind::Active),
            Account::new(code("1000"), "Kassa 2", AccountKind::Active),
        ]);
        assert_eq!(result.unwrap_err(), AccountError::DuplicateCode(code("1000")));
    }

    #[test]
    fn test_by_kind_and_prefix() {
        let chart = ChartOfAccounts::standard();
        let passive: Vec<&str> = chart
            .by_kind(AccountKind::Passive)
            .map(|a| a.code.as_str())
            .collect();
        assert_eq!(passive, vec!["5000", "6000", "8000"]);

        let income: Vec<&str> = chart.with_prefix("6").map(|a| a.code.as_str()).collect();
        assert_eq!(income, vec!["6000"]);
    }

    #[test]
    fn test_require_unknown() {
        let chart = ChartOfAccounts::standard();
        assert_eq!(
            chart.require(&code("1111")).unwrap_err(),
            AccountError::NotFound(code("1111"))
        );
    }

    #[test]
    fn test_deactivate() {
        let mut chart = ChartOfAccounts::standard();
        chart.deactivate(&code("3000")).unwrap();
        assert!(!chart.require(&code("3000")).unwrap().is_active);
        assert!(chart.deactivate(&code("3999")).is_err());
    }

    #[test]
    fn test_serde_round_trip_rejects_duplicates() {
        let json = r#"[
            {"code": "1000", "name": "Kassa", "kind": "active", "normal_balance": "debit"},
            {"code": "1000", "name": "Kassa", "kind": "active", "normal_balance": "debit"}
        ]"#;
        assert!(serde_json::from_str::<ChartOfAccounts>(json).is_err());

        let json = r#"[
            {"code": "6000", "name": "Daromadlar", "kind": "passive", "normal_balance": "credit"}
        ]"#;
        let chart: ChartOfAccounts = serde_json::from_str(json).unwrap();
        assert!(chart.require(&code("6000")).unwrap().is_active);
    }
}
