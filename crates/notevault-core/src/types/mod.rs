//! Shared value types.

pub mod id;

pub use id::{NoteId, ShareLinkId, UserId};
