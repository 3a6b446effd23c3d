//! Share-link lifecycle.

pub mod link;
pub mod service;

pub use link::LinkService;
pub use service::{ShareLinkService, ShareOptions};
