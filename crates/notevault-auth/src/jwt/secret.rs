//! Signing secret generation and strength checks.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;

use notevault_core::error::ConfigError;

/// Minimum accepted secret size.
pub const MIN_SECRET_BITS: usize = 256;

const GENERATED_SECRET_BYTES: usize = 32;

/// Generates a fresh 256-bit secret from the OS RNG, encoded as standard base64.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; GENERATED_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Rejects secrets shorter than [`MIN_SECRET_BITS`].
///
/// The secret is used as raw HMAC key bytes, so the check is on its byte
/// length rather than on any decoded form.
pub fn ensure_strong(secret: &[u8]) -> Result<(), ConfigError> {
    let actual_bits = secret.len() * 8;
    if actual_bits < MIN_SECRET_BITS {
        return Err(ConfigError::WeakSecret { actual_bits });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secret_is_strong_and_unique() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
        assert_eq!(STANDARD.decode(&a).unwrap().len(), GENERATED_SECRET_BYTES);
        assert!(ensure_strong(a.as_bytes()).is_ok());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let err = ensure_strong(b"too-short").unwrap_err();
        assert_eq!(err, ConfigError::WeakSecret { actual_bits: 72 });
        assert!(ensure_strong(&[7u8; 32]).is_ok());
        assert!(ensure_strong(&[7u8; 31]).is_err());
    }
}
