use crate::core::domain::error::ValidationError;
use std::fmt;

/// A Proxmox password (plaintext, only held for the lifetime of the process).
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxPassword(String);

impl ProxmoxPassword {
    pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
        let password = password.into();
        validate_password(&password)?;
        Ok(Self(password))
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProxmoxPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProxmoxPassword(***)")
    }
}

/// Validates a password.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::field("password", "Password cannot be empty"));
    }
    Ok(())
}
