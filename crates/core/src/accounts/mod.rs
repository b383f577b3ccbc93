//! Chart of accounts.
//!
//! Accounts are keyed by numeric code and classified the way 1C classifies
//! them: active, passive, active-passive and off-balance.

pub mod chart;
pub mod error;
pub mod types;

pub use chart::ChartOfAccounts;
pub use error::AccountError;
pub use types::{Account, AccountKind, NormalBalance};
