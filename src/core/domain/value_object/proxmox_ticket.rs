use crate::core::domain::error::ValidationError;
use std::fmt;

/// Name of the cookie carrying the ticket on authenticated requests.
pub const AUTH_COOKIE_NAME: &str = "PVEAuthCookie";

/// A Proxmox authentication ticket.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxTicket(String);

impl ProxmoxTicket {
    /// Validates and wraps a ticket issued by `/access/ticket`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_ticket(&value)?;
        Ok(Self(value))
    }

    /// Creates a new ticket without validation.
    #[allow(dead_code)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the ticket value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats the ticket as a cookie header value.
    #[must_use]
    pub fn as_cookie_header(&self) -> String {
        format!("{}={}", AUTH_COOKIE_NAME, self.0)
    }
}

impl fmt::Debug for ProxmoxTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The signature part is a bearer credential.
        let prefix = self.0.rsplit_once(':').map_or("", |(head, _)| head);
        write!(f, "ProxmoxTicket({prefix}:***)")
    }
}

/// Validates the format of a ticket string.
pub(crate) fn validate_ticket(ticket: &str) -> Result<(), ValidationError> {
    if ticket.is_empty() {
        return Err(ValidationError::field("ticket", "Ticket cannot be empty"));
    }
    let parts: Vec<&str> = ticket.split(':').collect();
    if parts.len() < 5 || parts[0] != "PVE" {
        return Err(ValidationError::Format(
            "Invalid ticket format: must start with 'PVE:' and have at least 5 parts".to_string(),
        ));
    }
    Ok(())
}
