//! Core bookkeeping logic for Hisob.
//!
//! This crate contains pure business logic with ZERO file, network or terminal
//! dependencies. All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts
//! - `ledger` - Double-entry journal, validation and balances
//! - `reports` - Trial balance, balance sheet, income statement, account card

pub mod accounts;
pub mod ledger;
pub mod reports;
