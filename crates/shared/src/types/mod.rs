//! Common types used across the application.

pub mod code;
pub mod id;
pub mod money;
pub mod pagination;

pub use code::{AccountCode, AccountCodeError};
pub use id::*;
pub use money::{Currency, Money};
pub use pagination::{PageMeta, PageRequest, PageResponse};
