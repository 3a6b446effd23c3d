//! # notevault-service
//!
//! Use cases behind the NoteVault HTTP surface: the share-link lifecycle
//! (issue, resolve-and-consume, revoke) and account registration / login.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod share;

pub use auth::AuthService;
pub use context::RequestContext;
pub use share::{LinkService, ShareLinkService, ShareOptions};
