//! The credential verification contract.

use std::fmt::Debug;

use notevault_core::result::AppResult;

/// Compares a presented password with a stored one-way hash.
///
/// Implementations must go through their hash library's own comparison
/// routine instead of re-deriving the hash and comparing strings.
pub trait CredentialVerifier: Send + Sync + Debug + 'static {
    /// `Ok(false)` for a wrong password; `Err` only when the stored hash is unusable.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> AppResult<bool>;
}
