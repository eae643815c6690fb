use crate::core::domain::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Authentication backend selector for a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxmoxRealm {
    /// Linux PAM standard authentication
    #[default]
    Pam,
    /// Proxmox VE authentication server
    Pve,
}

impl ProxmoxRealm {
    /// Returns the realm as sent to `/access/ticket`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxmoxRealm::Pam => "pam",
            ProxmoxRealm::Pve => "pve",
        }
    }
}

impl FromStr for ProxmoxRealm {
    type Err = ValidationError;

    fn from_str(realm: &str) -> Result<Self, Self::Err> {
        validate_realm(realm)?;
        match realm {
            "pam" => Ok(ProxmoxRealm::Pam),
            _ => Ok(ProxmoxRealm::Pve),
        }
    }
}

impl fmt::Display for ProxmoxRealm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a realm string.
pub(crate) fn validate_realm(realm: &str) -> Result<(), ValidationError> {
    if realm.is_empty() {
        return Err(ValidationError::field("realm", "Realm cannot be empty"));
    }
    if !matches!(realm, "pam" | "pve") {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid realm '{realm}'. Allowed realms are: pam, pve"
        )));
    }
    Ok(())
}
