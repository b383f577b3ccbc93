//! Report generation service.

use chrono::NaiveDate;
use hisob_shared::types::AccountCode;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::ReportError;
use super::types::{
    AccountCardLine, AccountCardReport, BalanceSheetReport, IncomeStatementReport, ReportLine,
    ReportPeriod, ReportSection, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::accounts::{Account, AccountKind, NormalBalance};
use crate::ledger::{DateRange, Journal, RunningBalance, Turnover, split_net};

/// Account code prefix of income accounts.
pub const INCOME_PREFIX: &str = "6";
/// Account code prefix of expense accounts.
pub const EXPENSE_PREFIX: &str = "7";

/// Service for generating financial reports from a journal.
pub struct ReportService;

impl ReportService {
    /// Builds the trial balance for `period`.
    ///
    /// Opening balances cover posted entries strictly before the period
    /// start. Accounts with no balance and no movement are left out.
    #[must_use]
    pub fn trial_balance(journal: &Journal, period: ReportPeriod) -> TrialBalanceReport {
        let rows: Vec<TrialBalanceRow> = journal
            .chart()
            .iter()
            .filter_map(|account| Self::trial_balance_row(journal, account, period))
            .collect();
        let totals = TrialBalanceTotals::from_rows(&rows);
        debug!(
            start = %period.start,
            end = %period.end,
            rows = rows.len(),
            balanced = totals.is_balanced,
            "Built trial balance"
        );

        TrialBalanceReport {
            period,
            currency: journal.currency(),
            rows,
            totals,
        }
    }

    fn trial_balance_row(
        journal: &Journal,
        account: &Account,
        period: ReportPeriod,
    ) -> Option<TrialBalanceRow> {
        let opening = journal.turnover(&account.code, period.before());
        let movement = journal.turnover(&account.code, period.range());
        if opening == Turnover::default() && movement == Turnover::default() {
            return None;
        }

        let (opening_debit, opening_credit) = split_net(opening.net_debit());
        let (closing_debit, closing_credit) = split_net((opening + movement).net_debit());

        Some(TrialBalanceRow {
            code: account.code.clone(),
            name: account.name.clone(),
            kind: account.kind,
            opening_debit,
            opening_credit,
            debit_turnover: movement.debit,
            credit_turnover: movement.credit,
            closing_debit,
            closing_credit,
        })
    }

    /// Builds the balance sheet at the end of `as_of`.
    ///
    /// Active accounts are assets and passive accounts are liabilities.
    /// Active-passive accounts go to the side their balance falls on.
    #[must_use]
    pub fn balance_sheet(journal: &Journal, as_of: NaiveDate) -> BalanceSheetReport {
        let mut assets = ReportSection::default();
        let mut liabilities = ReportSection::default();

        for account in journal.chart().iter() {
            let net_debit = journal
                .turnover(&account.code, DateRange::until(as_of))
                .net_debit();
            if net_debit.is_zero() {
                continue;
            }

            match account.kind {
                AccountKind::Active => assets.push(Self::line(account, net_debit)),
                AccountKind::Passive => liabilities.push(Self::line(account, -net_debit)),
                AccountKind::ActivePassive if net_debit > Decimal::ZERO => {
                    assets.push(Self::line(account, net_debit));
                }
                AccountKind::ActivePassive => liabilities.push(Self::line(account, -net_debit)),
                AccountKind::OffBalance => {}
            }
        }

        let is_balanced = assets.total == liabilities.total;
        debug!(%as_of, balanced = is_balanced, "Built balance sheet");

        BalanceSheetReport {
            as_of,
            currency: journal.currency(),
            assets,
            liabilities,
            is_balanced,
        }
    }

    /// Builds the income statement for `period`.
    ///
    /// Income comes from accounts starting with `6`, expenses from accounts
    /// starting with `7`.
    #[must_use]
    pub fn income_statement(journal: &Journal, period: ReportPeriod) -> IncomeStatementReport {
        let section = |prefix: &str, normal: NormalBalance| {
            let mut section = ReportSection::default();
            for account in journal.chart().with_prefix(prefix) {
                let turnover = journal.turnover(&account.code, period.range());
                if turnover != Turnover::default() {
                    section.push(Self::line(account, turnover.balance(normal)));
                }
            }
            section
        };

        let income = section(INCOME_PREFIX, NormalBalance::Credit);
        let expenses = section(EXPENSE_PREFIX, NormalBalance::Debit);
        let net_profit = income.total - expenses.total;
        debug!(
            start = %period.start,
            end = %period.end,
            %net_profit,
            "Built income statement"
        );

        IncomeStatementReport {
            period,
            currency: journal.currency(),
            income,
            expenses,
            net_profit,
        }
    }

    /// Lists the posted movements of one account over `period`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::AccountNotFound` for an unknown code.
    pub fn account_card(
        journal: &Journal,
        code: &AccountCode,
        period: ReportPeriod,
    ) -> Result<AccountCardReport, ReportError> {
        let account = journal
            .chart()
            .get(code)
            .ok_or_else(|| ReportError::AccountNotFound(code.clone()))?;
        let normal = account.normal_balance;
        let opening_balance = journal.turnover(code, period.before()).balance(normal);

        let mut postings: Vec<_> = journal
            .posted()
            .filter(|t| period.range().contains(t.date))
            .flat_map(|t| t.entries_for(code).map(move |entry| (t, entry)))
            .collect();
        postings.sort_by(|(a, _), (b, _)| a.date.cmp(&b.date).then_with(|| a.number.cmp(&b.number)));

        let mut running = RunningBalance::opening(opening_balance);
        let lines = postings
            .into_iter()
            .map(|(transaction, entry)| {
                running =
                    RunningBalance::next_entry(&running, normal.signed(entry.debit, entry.credit));
                AccountCardLine {
                    date: transaction.date,
                    number: transaction.number.clone(),
                    description: entry
                        .description
                        .clone()
                        .filter(|d| !d.is_empty())
                        .unwrap_or_else(|| transaction.description.clone()),
                    debit: entry.debit,
                    credit: entry.credit,
                    balance: running.current_balance,
                }
            })
            .collect::<Vec<_>>();
        debug!(account = %code, lines = lines.len(), "Built account card");

        Ok(AccountCardReport {
            code: code.clone(),
            name: account.name.clone(),
            period,
            opening_balance,
            lines,
            closing_balance: running.current_balance,
        })
    }

    fn line(account: &Account, balance: Decimal) -> ReportLine {
        ReportLine {
            code: account.code.clone(),
            name: account.name.clone(),
            balance,
        }
    }
}
