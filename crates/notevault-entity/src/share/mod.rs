//! Share domain entities.

pub mod model;

pub use model::{NewShareLink, ShareLink, token_hint};
