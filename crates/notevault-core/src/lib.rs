//! # notevault-core
//!
//! Core crate for NoteVault. Contains configuration schemas, the unified
//! error system, the clock abstraction used by every time-dependent check,
//! and typed identifiers.
//!
//! This crate has **no** internal dependencies on other NoteVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, ShareLinkError, TokenError};
pub use result::AppResult;
