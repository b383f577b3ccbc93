//! Report data types.

use chrono::NaiveDate;
use hisob_shared::types::{AccountCode, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::accounts::AccountKind;
use crate::ledger::DateRange;

/// Inclusive reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period, rejecting a start after the end.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The period as a date filter.
    #[must_use]
    pub fn range(&self) -> DateRange {
        DateRange::between(self.start, self.end)
    }

    /// Everything strictly before the period.
    #[must_use]
    pub fn before(&self) -> DateRange {
        DateRange::before(self.start)
    }
}

/// One line of the trial balance.
///
/// Net amounts are shown in the debit column when debit exceeds credit,
/// otherwise in the credit column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: AccountCode,
    /// Account name.
    pub name: String,
    /// Account kind.
    pub kind: AccountKind,
    /// Opening balance, debit column.
    pub opening_debit: Decimal,
    /// Opening balance, credit column.
    pub opening_credit: Decimal,
    /// Debit turnover in the period.
    pub debit_turnover: Decimal,
    /// Credit turnover in the period.
    pub credit_turnover: Decimal,
    /// Closing balance, debit column.
    pub closing_debit: Decimal,
    /// Closing balance, credit column.
    pub closing_credit: Decimal,
}

/// Column totals of the trial balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of opening debit.
    pub opening_debit: Decimal,
    /// Sum of opening credit.
    pub opening_credit: Decimal,
    /// Sum of debit turnover.
    pub debit_turnover: Decimal,
    /// Sum of credit turnover.
    pub credit_turnover: Decimal,
    /// Sum of closing debit.
    pub closing_debit: Decimal,
    /// Sum of closing credit.
    pub closing_credit: Decimal,
    /// Whether each debit column equals its credit column.
    pub is_balanced: bool,
}

impl TrialBalanceTotals {
    /// Sums the rows and checks the three column pairs.
    #[must_use]
    pub fn from_rows(rows: &[TrialBalanceRow]) -> Self {
        let mut totals = rows.iter().fold(Self::default(), |mut acc, row| {
            acc.opening_debit += row.opening_debit;
            acc.opening_credit += row.opening_credit;
            acc.debit_turnover += row.debit_turnover;
            acc.credit_turnover += row.credit_turnover;
            acc.closing_debit += row.closing_debit;
            acc.closing_credit += row.closing_credit;
            acc
        });
        totals.is_balanced = totals.opening_debit == totals.opening_credit
            && totals.debit_turnover == totals.credit_turnover
            && totals.closing_debit == totals.closing_credit;
        totals
    }
}

/// Trial balance (turnover sheet) for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Reporting period.
    pub period: ReportPeriod,
    /// Currency of all amounts.
    pub currency: Currency,
    /// Accounts with any balance or movement, by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// An account line in a balance sheet or income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Account code.
    pub code: AccountCode,
    /// Account name.
    pub name: String,
    /// Amount shown for the account.
    pub balance: Decimal,
}

/// A titled group of report lines with their total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Lines in code order.
    pub accounts: Vec<ReportLine>,
    /// Sum of the line balances.
    pub total: Decimal,
}

impl ReportSection {
    pub(crate) fn push(&mut self, line: ReportLine) {
        self.total += line.balance;
        self.accounts.push(line);
    }
}

/// Balance sheet at a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Balances include every posted entry up to this date.
    pub as_of: NaiveDate,
    /// Currency of all amounts.
    pub currency: Currency,
    /// Active accounts and debit balances of active-passive accounts.
    pub assets: ReportSection,
    /// Passive accounts and credit balances of active-passive accounts.
    pub liabilities: ReportSection,
    /// Whether total assets equal total liabilities.
    pub is_balanced: bool,
}

/// Income statement for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Reporting period.
    pub period: ReportPeriod,
    /// Currency of all amounts.
    pub currency: Currency,
    /// Income accounts (credit minus debit in the period).
    pub income: ReportSection,
    /// Expense accounts (debit minus credit in the period).
    pub expenses: ReportSection,
    /// Income total minus expense total.
    pub net_profit: Decimal,
}

/// One posted line on an account card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCardLine {
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction number.
    pub number: String,
    /// Line description, falling back to the transaction's.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this line, signed by the account's normal side.
    pub balance: Decimal,
}

/// Movements of a single account over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCardReport {
    /// Account code.
    pub code: AccountCode,
    /// Account name.
    pub name: String,
    /// Reporting period.
    pub period: ReportPeriod,
    /// Balance before the period.
    pub opening_balance: Decimal,
    /// Posted lines in date then number order.
    pub lines: Vec<AccountCardLine>,
    /// Balance at the end of the period.
    pub closing_balance: Decimal,
}
