use crate::core::domain::error::ValidationError;

/// Header carrying the CSRF prevention token on mutating requests.
pub const CSRF_HEADER_NAME: &str = "CSRFPreventionToken";

/// A Proxmox CSRF protection token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxCSRFToken(String);

impl ProxmoxCSRFToken {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_csrf_token(&value)?;
        Ok(Self(value))
    }

    /// Creates a new CSRF token without validation.
    #[allow(dead_code)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the token value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates the format of a CSRF token string.
pub(crate) fn validate_csrf_token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::field("csrf_token", "CSRF token cannot be empty"));
    }
    let Some((token_id, value)) = token.split_once(':') else {
        return Err(ValidationError::Format(
            "CSRF token must be in format TOKENID:VALUE".to_string(),
        ));
    };
    if token_id.len() != 8 || !token_id.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::Format(
            "Token ID must be 8 hexadecimal characters".to_string(),
        ));
    }
    if value.is_empty() {
        return Err(ValidationError::Format(
            "CSRF token value cannot be empty".to_string(),
        ));
    }
    Ok(())
}
