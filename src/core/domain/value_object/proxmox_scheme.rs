use crate::core::domain::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Transport scheme for the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxmoxScheme {
    #[default]
    Https,
    /// Plaintext; TLS verification settings are ignored.
    Http,
}

impl ProxmoxScheme {
    /// Returns the URL scheme (`https` or `http`).
    #[must_use]
    pub fn as_url_scheme(&self) -> &'static str {
        match self {
            ProxmoxScheme::Https => "https",
            ProxmoxScheme::Http => "http",
        }
    }

    #[must_use]
    pub fn is_secure(&self) -> bool {
        matches!(self, ProxmoxScheme::Https)
    }
}

impl FromStr for ProxmoxScheme {
    type Err = ValidationError;

    fn from_str(scheme: &str) -> Result<Self, Self::Err> {
        match scheme.to_ascii_uppercase().as_str() {
            "HTTPS" => Ok(ProxmoxScheme::Https),
            "HTTP" => Ok(ProxmoxScheme::Http),
            _ => Err(ValidationError::ConstraintViolation(format!(
                "Invalid scheme '{scheme}'. Must be one of: HTTPS, HTTP"
            ))),
        }
    }
}

impl fmt::Display for ProxmoxScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxmoxScheme::Https => f.write_str("HTTPS"),
            ProxmoxScheme::Http => f.write_str("HTTP"),
        }
    }
}
