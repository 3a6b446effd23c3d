//! # notevault-entity
//!
//! Domain entity models for NoteVault. Every struct in this crate is either
//! a database row (deriving `sqlx::FromRow`) or a plain value object that
//! lives for the duration of one request.

pub mod share;
pub mod user;
