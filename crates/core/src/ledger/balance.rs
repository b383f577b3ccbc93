//! Account balance calculations.
//!
//! - Debit-normal accounts: balance = debit - credit
//! - Credit-normal accounts: balance = credit - debit

use hisob_shared::types::AccountCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::NormalBalance;

/// Debit and credit turnover of an account over some range of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turnover {
    /// Sum of debit amounts.
    pub debit: Decimal,
    /// Sum of credit amounts.
    pub credit: Decimal,
}

impl Turnover {
    /// Adds one line's amounts.
    pub fn record(&mut self, debit: Decimal, credit: Decimal) {
        self.debit += debit;
        self.credit += credit;
    }

    /// Net movement on the debit side (debit - credit).
    #[must_use]
    pub fn net_debit(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Net movement signed by the account's normal side.
    #[must_use]
    pub fn balance(&self, normal: NormalBalance) -> Decimal {
        normal.signed(self.debit, self.credit)
    }
}

impl std::ops::Add for Turnover {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            debit: self.debit + rhs.debit,
            credit: self.credit + rhs.credit,
        }
    }
}

/// Splits a net debit amount into (debit column, credit column).
///
/// Positive amounts go to the debit column, negative ones to the credit
/// column as a positive number.
#[must_use]
pub fn split_net(net_debit: Decimal) -> (Decimal, Decimal) {
    if net_debit > Decimal::ZERO {
        (net_debit, Decimal::ZERO)
    } else if net_debit < Decimal::ZERO {
        (Decimal::ZERO, -net_debit)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    }
}

/// Account balance at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account code.
    pub account: AccountCode,
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
    /// Net balance signed by the account's normal side.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Builds a balance from accumulated turnover.
    #[must_use]
    pub fn from_turnover(account: AccountCode, turnover: Turnover, normal: NormalBalance) -> Self {
        Self {
            account,
            debit_total: turnover.debit,
            credit_total: turnover.credit,
            balance: turnover.balance(normal),
        }
    }
}

/// Running balance information for a ledger entry.
///
/// - account_version: monotonically increasing counter
/// - previous_balance: balance before this entry
/// - current_balance: balance after this entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Account version (monotonically increasing).
    pub account_version: i64,
    /// Balance before this entry.
    pub previous_balance: Decimal,
    /// Balance after this entry.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// The state before any entry, starting from `opening` balance.
    #[must_use]
    pub fn opening(opening: Decimal) -> Self {
        Self {
            account_version: 0,
            previous_balance: opening,
            current_balance: opening,
        }
    }

    /// Creates a new running balance based on the previous entry.
    ///
    /// - current_balance[N] = previous_balance[N] + balance_change
    /// - previous_balance[N] = current_balance[N-1]
    #[must_use]
    pub fn next_entry(previous: &Self, balance_change: Decimal) -> Self {
        Self {
            account_version: previous.account_version + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + balance_change,
        }
    }
}
