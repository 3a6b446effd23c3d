//! # notevault-auth
//!
//! The authentication half of the NoteVault security boundary.
//!
//! ## Modules
//!
//! - `jwt`: bearer token signing and verification (HS256)
//! - `password`: Argon2id hashing and the credential verifier contract
//! - `gate`: per-request bearer extraction, identity resolution, and the
//!   ordered public/authenticated route policy

pub mod gate;
pub mod jwt;
pub mod password;

pub use gate::{
    AccessPolicy, AccessRule, AuthenticationGate, GateOutcome, IdentityLookup, RejectReason,
    UserStoreLookup,
};
pub use jwt::{Claims, IssuedToken, TokenCodec, generate_secret};
pub use password::{CredentialVerifier, PasswordHasher, PasswordPolicy};
