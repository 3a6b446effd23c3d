//! Password policy for new accounts.

use notevault_core::error::AppError;
use notevault_core::result::AppResult;

/// Minimum requirements a new password must meet.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy with the given minimum length in characters.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Returns the first violated requirement, if any.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_characters() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("short").is_err());
        assert!(policy.validate("long enough").is_ok());
        assert!(policy.validate("ééééééé").is_err());
        assert!(policy.validate("        ").is_err());
    }
}
