//! # notevault-database
//!
//! Persistence for NoteVault. [`store`] defines the contracts the
//! share-link lifecycle and the authentication gate rely on; the
//! [`repositories`] module implements them on PostgreSQL and [`memory`]
//! implements them on process-local concurrent maps.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryShareLinkStore, MemoryUserStore};
pub use repositories::{ShareLinkRepository, UserRepository};
pub use store::{ShareLinkStore, UserStore};
