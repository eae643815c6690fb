use crate::core::domain::value_object::{ProxmoxCSRFToken, ProxmoxTicket};
use std::time::{Duration, SystemTime};

/// How long PVE accepts a ticket after it was issued.
pub const TICKET_LIFETIME: Duration = Duration::from_secs(2 * 60 * 60);

/// An authenticated session: ticket, CSRF token and the time it was issued.
///
/// The value never changes once built. The client replaces the whole session
/// on login and drops it on logout or expiry.
#[derive(Debug, Clone)]
pub struct ProxmoxAuth {
    ticket: ProxmoxTicket,
    csrf_token: ProxmoxCSRFToken,
    issued_at: SystemTime,
}

impl ProxmoxAuth {
    /// A session issued right now.
    pub fn new(ticket: ProxmoxTicket, csrf_token: ProxmoxCSRFToken) -> Self {
        Self::issued_at(ticket, csrf_token, SystemTime::now())
    }

    /// A session issued at the given instant.
    pub fn issued_at(
        ticket: ProxmoxTicket,
        csrf_token: ProxmoxCSRFToken,
        issued_at: SystemTime,
    ) -> Self {
        Self {
            ticket,
            csrf_token,
            issued_at,
        }
    }

    pub fn ticket(&self) -> &ProxmoxTicket {
        &self.ticket
    }

    pub fn csrf_token(&self) -> &ProxmoxCSRFToken {
        &self.csrf_token
    }

    pub fn issued(&self) -> SystemTime {
        self.issued_at
    }

    /// Returns `true` while `now < issued_at + lifetime`.
    #[must_use]
    pub fn is_valid_at(&self, now: SystemTime, lifetime: Duration) -> bool {
        match self.issued_at.checked_add(lifetime) {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }

    /// Checks validity against the current wall clock.
    #[must_use]
    pub fn is_valid(&self, lifetime: Duration) -> bool {
        self.is_valid_at(SystemTime::now(), lifetime)
    }
}
