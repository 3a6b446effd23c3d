//! HS256 bearer token issuance and verification.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use uuid::Uuid;

use notevault_core::error::{AppError, ConfigError, TokenError};
use notevault_core::result::AppResult;
use notevault_core::traits::Clock;

use super::claims::Claims;
use super::secret::ensure_strong;

/// A freshly signed bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// Compact `header.claims.signature` form.
    pub token: String,
    /// Issue instant (whole seconds).
    pub issued_at: DateTime<Utc>,
    /// Expiry instant (whole seconds).
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies bearer tokens with a symmetric secret.
///
/// Verification reads "now" from the injected clock; the library's own
/// `exp` check is disabled so that expiry is decided in one place.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("default_ttl", &self.default_ttl)
            .field("clock", &self.clock)
            .finish()
    }
}

impl TokenCodec {
    /// Builds a codec, refusing secrets under 256 bits and TTLs under one second.
    pub fn new(
        secret: &[u8],
        default_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        ensure_strong(secret)?;
        if default_ttl < Duration::seconds(1) {
            return Err(ConfigError::Invalid(
                "token TTL must be at least one second".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_ttl,
            clock,
        })
    }

    /// The TTL applied by [`TokenCodec::issue_default`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issues a token for `subject` with the configured TTL.
    pub fn issue_default(&self, subject: &str) -> AppResult<IssuedToken> {
        self.issue(subject, self.default_ttl)
    }

    /// Issues a token for `subject` valid for `ttl`.
    pub fn issue(&self, subject: &str, ttl: Duration) -> AppResult<IssuedToken> {
        if subject.is_empty() {
            return Err(AppError::validation("Token subject must not be empty"));
        }
        let ttl_seconds = ttl.num_seconds();
        if ttl_seconds < 1 {
            return Err(AppError::validation("Token TTL must be at least one second"));
        }

        let now = self.clock.now();
        let issued_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        let expires_at = issued_at
            .checked_add_signed(Duration::seconds(ttl_seconds))
            .ok_or_else(|| AppError::validation("Token TTL is out of range"))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verifies `token` and returns its subject.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Verifies `token` and returns all of its claims.
    ///
    /// Signature comparison is the HMAC backend's constant-time check.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        check_structure(token)?;

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?;
        let claims = data.claims;

        if claims.exp <= claims.iat {
            return Err(TokenError::Malformed);
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// Header and claims must be base64url JSON objects; anything else is not a
/// token at all, regardless of what the signature would say.
fn check_structure(token: &str) -> Result<(), TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    for segment in [header, payload] {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| TokenError::Malformed)?;
        serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&bytes)
            .map_err(|_| TokenError::Malformed)?;
    }
    Ok(())
}

/// Structure was already checked, so anything the library rejects other
/// than claim decoding is a signature that does not verify under our key.
fn classify(kind: &JwtErrorKind) -> TokenError {
    match kind {
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_)
        | JwtErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::InvalidSignature,
    }
}
