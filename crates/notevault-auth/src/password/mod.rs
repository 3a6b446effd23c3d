//! Password hashing, verification, and policy.

pub mod hasher;
pub mod policy;
pub mod verifier;

pub use hasher::PasswordHasher;
pub use policy::PasswordPolicy;
pub use verifier::CredentialVerifier;
