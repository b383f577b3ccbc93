//! Financial report generation.
//!
//! Reports are computed on demand from the posted entries of a journal:
//! - Trial balance (opening balance, turnover, closing balance)
//! - Balance sheet
//! - Income statement
//! - Account card

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
