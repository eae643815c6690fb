//! Tunables of the API client that are not part of the connection identity.

use crate::core::domain::{
    error::ValidationError, model::proxmox_auth::TICKET_LIFETIME, value_object::ProxmoxScheme,
};
use std::num::NonZeroU32;
use std::time::Duration;

/// Certificate checks applied to HTTPS connections.
///
/// Both checks default to on. They are ignored under plain HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsVerification {
    /// Check that the peer certificate chains to a trusted CA.
    pub verify_peer: bool,
    /// Check that the certificate matches the configured host.
    pub verify_host: bool,
}

impl Default for TlsVerification {
    fn default() -> Self {
        Self {
            verify_peer: true,
            verify_host: true,
        }
    }
}

impl TlsVerification {
    /// Whether the HTTP client must accept certificates it cannot verify.
    ///
    /// The rustls backend cannot skip the hostname check on its own, so
    /// turning off either check turns off certificate verification.
    #[must_use]
    pub fn accepts_invalid_certs(&self, scheme: ProxmoxScheme) -> bool {
        scheme.is_secure() && !(self.verify_peer && self.verify_host)
    }

    /// True when only the host check is off, which still turns off chain
    /// verification (see [`accepts_invalid_certs`](Self::accepts_invalid_certs)).
    #[must_use]
    pub fn disables_chain_for_host_check(&self, scheme: ProxmoxScheme) -> bool {
        scheme.is_secure() && self.verify_peer && !self.verify_host
    }
}

/// Client-side request rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub(crate) fn quota(&self) -> Result<governor::Quota, ValidationError> {
        let rate = NonZeroU32::new(self.requests_per_second).ok_or_else(|| {
            ValidationError::field("requests_per_second", "Rate limit must be greater than 0")
        })?;
        let burst = NonZeroU32::new(self.burst_size)
            .ok_or_else(|| ValidationError::field("burst_size", "Burst size must be greater than 0"))?;
        Ok(governor::Quota::per_second(rate).allow_burst(burst))
    }
}

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// How long a ticket is used before the session is considered expired.
    pub ticket_lifetime: Duration,
    pub tls: TlsVerification,
    /// Disabled by default.
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ticket_lifetime: TICKET_LIFETIME,
            tls: TlsVerification::default(),
            rate_limit: None,
        }
    }
}
