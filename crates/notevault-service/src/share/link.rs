//! Share link token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Generates share link tokens.
#[derive(Debug, Clone, Default)]
pub struct LinkService;

impl LinkService {
    /// Creates a new link service.
    pub fn new() -> Self {
        Self
    }

    /// Generates a 256-bit token from the thread-local CSPRNG, URL-safe
    /// base64 without padding (43 characters).
    ///
    /// Collisions are not retried; the store reports one as a conflict.
    pub fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}
