//! Process-local implementations of the persistence contracts.
//!
//! Both stores are built on [`dashmap::DashMap`]; mutations of a single
//! entry happen under that entry's shard lock, which is what makes
//! [`MemoryShareLinkStore::consume_use`](crate::store::ShareLinkStore::consume_use)
//! atomic without a global mutex.

pub mod share;
pub mod user;

pub use share::MemoryShareLinkStore;
pub use user::MemoryUserStore;
