//! Shared types, errors, and configuration for Hisob.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Typed IDs and account codes
//! - Pagination types for journal listings
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
