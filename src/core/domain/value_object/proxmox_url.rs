use crate::core::domain::{
    error::ValidationError,
    value_object::{ProxmoxHost, ProxmoxPort, ProxmoxScheme},
};
use std::net::Ipv6Addr;
use url::Url;

/// Path prefix of the JSON flavour of the PVE API.
pub const API_BASE_PATH: &str = "/api2/json";

/// The API base URL, `scheme://host:port/api2/json`.
///
/// Request URLs are produced by appending an API path (e.g. `/nodes`) and
/// encoding query parameters onto a copy of the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(Url);

impl ProxmoxUrl {
    pub fn new(
        scheme: ProxmoxScheme,
        host: &ProxmoxHost,
        port: ProxmoxPort,
    ) -> Result<Self, ValidationError> {
        let host = match host.as_str().parse::<Ipv6Addr>() {
            Ok(_) => format!("[{}]", host.as_str()),
            Err(_) => host.as_str().to_string(),
        };
        let raw = format!(
            "{}://{}:{}{}",
            scheme.as_url_scheme(),
            host,
            port.get(),
            API_BASE_PATH
        );
        let url = Url::parse(&raw)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
        Ok(Self(url))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Builds the URL for an API path, with optional query parameters.
    pub fn endpoint(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Url, ValidationError> {
        let mut url = self.0.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ValidationError::Format("Base URL cannot carry a path".to_string())
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}
