//! Hisob command line.
//!
//! Loads the configured journal into memory and prints the chart, the
//! journal or a report as JSON.

mod source;

use std::process::ExitCode;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use hisob_core::ledger::{
    DateRange, Journal, OperationType, TransactionFilter, TransactionStatus,
};
use hisob_core::reports::{ReportPeriod, ReportService};
use hisob_shared::config::LogFormat;
use hisob_shared::types::{AccountCode, PageRequest};
use hisob_shared::{AppConfig, AppError};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::source::load_journal;

#[derive(Debug, Parser)]
#[command(name = "hisob")]
#[command(about = "Double-entry bookkeeping with 1C-style reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the chart of accounts
    Accounts,
    /// List journal transactions
    Transactions {
        /// Only this status (draft, posted, reversed)
        #[arg(long)]
        status: Option<TransactionStatus>,
        /// Only this operation type
        #[arg(long)]
        operation: Option<OperationType>,
        /// First date included
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date included
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Transactions per page
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
    /// Opening balance, turnover and closing balance per account
    TrialBalance {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Assets and liabilities at a date
    BalanceSheet {
        /// Balance date (default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Income and expenses for a period
    IncomeStatement {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Movements of one account
    AccountCard {
        /// Account code, e.g. 1200
        code: AccountCode,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Record a templated transaction in the loaded journal
    Record {
        /// Operation template
        kind: RecordKind,
        /// Amount in the ledger currency
        amount: Decimal,
        /// Transaction description
        description: String,
        /// Transaction date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Post the transaction instead of leaving a draft
        #[arg(long)]
        post: bool,
    },
}

/// Operations that have an entry template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RecordKind {
    Income,
    Expense,
    Transfer,
}

impl From<RecordKind> for OperationType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Income => Self::Income,
            RecordKind::Expense => Self::Expense,
            RecordKind::Transfer => Self::Transfer,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::Args)]
struct PeriodArgs {
    /// First day (default: January 1 of the end date's year)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day (default: today)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl PeriodArgs {
    fn resolve(self, today: NaiveDate) -> Result<ReportPeriod, AppError> {
        let end = self.to.unwrap_or(today);
        let start = self.from.unwrap_or_else(|| start_of_year(end));
        Ok(ReportPeriod::new(start, end)?)
    }
}

fn start_of_year(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;
    init_tracing(&config);

    let (mut journal, source) =
        load_journal(&config.ledger).context("Failed to load journal")?;
    debug!(?source, "Running command");

    execute(cli.command, &mut journal, today())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn execute(command: Commands, journal: &mut Journal, today: NaiveDate) -> anyhow::Result<()> {
    match command {
        Commands::Accounts => print_json(&journal.chart().iter().collect::<Vec<_>>()),
        Commands::Transactions {
            status,
            operation,
            from,
            to,
            page,
            per_page,
        } => {
            let filter = TransactionFilter {
                status,
                operation,
                dates: DateRange { from, to },
            };
            print_json(&journal.list(&filter, PageRequest::new(page, per_page)))
        }
        Commands::TrialBalance { period } => {
            let period = period.resolve(today)?;
            print_json(&ReportService::trial_balance(journal, period))
        }
        Commands::BalanceSheet { as_of } => print_json(&ReportService::balance_sheet(
            journal,
            as_of.unwrap_or(today),
        )),
        Commands::IncomeStatement { period } => {
            let period = period.resolve(today)?;
            print_json(&ReportService::income_statement(journal, period))
        }
        Commands::AccountCard { code, period } => {
            let period = period.resolve(today)?;
            let card = ReportService::account_card(journal, &code, period).map_err(AppError::from)?;
            print_json(&card)
        }
        Commands::Record {
            kind,
            amount,
            description,
            date,
            post,
        } => {
            let record = record(journal, kind.into(), amount, &description, date.unwrap_or(today), post)?;
            print_json(&record)
        }
    }
}

/// Output of the `record` command.
#[derive(Debug, Serialize)]
struct Recorded {
    transaction: hisob_core::ledger::Transaction,
    trial_balance: hisob_core::reports::TrialBalanceReport,
}

fn record(
    journal: &mut Journal,
    operation: OperationType,
    amount: Decimal,
    description: &str,
    date: NaiveDate,
    post: bool,
) -> Result<Recorded, AppError> {
    let id = journal
        .create_from_template(operation, date, amount, description)?
        .id;
    if post {
        journal.post(id)?;
    }
    let transaction = journal
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("transaction {id} vanished")))?;
    info!(number = %transaction.number, status = %transaction.status, "Recorded");

    let period = ReportPeriod::new(start_of_year(date), date)?;
    Ok(Recorded {
        transaction,
        trial_balance: ReportService::trial_balance(journal, period),
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, value).context("Failed to write output")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hisob_core::accounts::ChartOfAccounts;
    use hisob_core::ledger::demo_records;
    use hisob_shared::types::Currency;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn demo_journal() -> Journal {
        let mut journal = Journal::new(ChartOfAccounts::standard(), Currency::Uzs);
        journal.import(demo_records().unwrap()).unwrap();
        journal
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["hisob", "accounts"])]
    #[case(&["hisob", "transactions", "--status", "posted", "--operation", "income", "--page", "2"])]
    #[case(&["hisob", "trial-balance", "--from", "2024-01-01", "--to", "2024-01-31"])]
    #[case(&["hisob", "balance-sheet", "--as-of", "2024-01-31"])]
    #[case(&["hisob", "income-statement"])]
    #[case(&["hisob", "account-card", "1200", "--to", "2024-12-31"])]
    #[case(&["hisob", "record", "expense", "150.50", "Ijara", "--date", "2024-02-01", "--post"])]
    fn test_parses(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_ok());
    }

    #[rstest]
    #[case(&["hisob", "record", "correction", "10", "x"])]
    #[case(&["hisob", "account-card", "12a0"])]
    #[case(&["hisob", "trial-balance", "--from", "2024-13-01"])]
    #[case(&["hisob", "record", "income", "ten", "x"])]
    fn test_rejects(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_period_defaults() {
        let today = date(2024, 5, 17);
        let period = PeriodArgs { from: None, to: None }.resolve(today).unwrap();
        assert_eq!(period.start, date(2024, 1, 1));
        assert_eq!(period.end, today);

        let period = PeriodArgs {
            from: None,
            to: Some(date(2023, 3, 1)),
        }
        .resolve(today)
        .unwrap();
        assert_eq!(period.start, date(2023, 1, 1));
    }

    #[test]
    fn test_period_start_after_end() {
        let err = PeriodArgs {
            from: Some(date(2024, 6, 1)),
            to: Some(date(2024, 5, 1)),
        }
        .resolve(date(2024, 6, 1))
        .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_record_posted_updates_trial_balance() {
        let mut journal = demo_journal();
        let recorded = record(
            &mut journal,
            OperationType::Transfer,
            dec!(200),
            "Kassaga",
            date(2024, 1, 3),
            true,
        )
        .unwrap();

        assert_eq!(recorded.transaction.number, "000003");
        assert_eq!(recorded.transaction.status, TransactionStatus::Posted);
        assert!(recorded.trial_balance.totals.is_balanced);
        let cash = recorded
            .trial_balance
            .rows
            .iter()
            .find(|r| r.code.as_str() == "1000")
            .unwrap();
        assert_eq!(cash.closing_debit, dec!(200));
    }

    #[test]
    fn test_record_draft_leaves_balances() {
        let mut journal = demo_journal();
        let recorded = record(
            &mut journal,
            OperationType::Income,
            dec!(50),
            "Avans",
            date(2024, 1, 3),
            false,
        )
        .unwrap();
        assert_eq!(recorded.transaction.status, TransactionStatus::Draft);
        assert_eq!(recorded.trial_balance.totals.debit_turnover, dec!(1500));
    }

    #[test]
    fn test_record_rejects_non_positive_amount() {
        let mut journal = demo_journal();
        let err = record(
            &mut journal,
            OperationType::Expense,
            dec!(-5),
            "x",
            date(2024, 1, 3),
            false,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 65);
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_execute_reports_unknown_account() {
        let mut journal = demo_journal();
        let err = execute(
            Commands::AccountCard {
                code: AccountCode::parse("1300").unwrap(),
                period: PeriodArgs { from: None, to: None },
            },
            &mut journal,
            date(2024, 1, 31),
        )
        .unwrap_err();
        assert_eq!(err.downcast_ref::<AppError>().map(AppError::exit_code), Some(65));
    }
}
