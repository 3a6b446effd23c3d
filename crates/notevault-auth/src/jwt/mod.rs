//! Bearer token encoding, verification, and signing secrets.

pub mod claims;
pub mod codec;
pub mod secret;

pub use claims::Claims;
pub use codec::{IssuedToken, TokenCodec};
pub use secret::{MIN_SECRET_BITS, generate_secret};
