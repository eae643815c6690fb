//! Settings of an import source, read from the host framework's settings map.

use crate::{
    core::domain::{
        error::ValidationError,
        model::{
            client_config::{ClientConfig, TlsVerification},
            proxmox_connection::ProxmoxConnection,
        },
        value_object::{
            ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxRealm, ProxmoxScheme,
            ProxmoxUsername,
        },
    },
    inventory::application::service::vm_service::VmEnrichment,
};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which PVE objects an import fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    VirtualMachine,
    HostSystem,
    Pools,
}

impl ObjectType {
    /// The column whose value identifies a record.
    #[must_use]
    pub fn key_column(&self) -> &'static str {
        match self {
            ObjectType::VirtualMachine => "vm_name",
            ObjectType::HostSystem => "node",
            ObjectType::Pools => "poolid",
        }
    }
}

impl FromStr for ObjectType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "VirtualMachine" => Ok(ObjectType::VirtualMachine),
            "HostSystem" => Ok(ObjectType::HostSystem),
            "Pools" => Ok(ObjectType::Pools),
            other => Err(ValidationError::ConstraintViolation(format!(
                "Invalid object_type '{other}'. Must be one of: VirtualMachine, HostSystem, Pools"
            ))),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::VirtualMachine => "VirtualMachine",
            ObjectType::HostSystem => "HostSystem",
            ObjectType::Pools => "Pools",
        })
    }
}

/// Parsed and validated import settings.
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub object_type: ObjectType,
    pub enrichment: VmEnrichment,
    pub scheme: ProxmoxScheme,
    pub tls: TlsVerification,
    pub host: ProxmoxHost,
    pub port: ProxmoxPort,
    pub realm: ProxmoxRealm,
    pub username: ProxmoxUsername,
    pub password: ProxmoxPassword,
}

impl ImportSettings {
    /// Reads the recognized keys of a settings map. Unknown keys are ignored.
    ///
    /// Defaults: `scheme` HTTPS, `port` 8006, `ssl_verify_peer`/`ssl_verify_host`
    /// `y` (only read for HTTPS), the `vm_*` switches `n`.
    pub fn from_map(settings: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let get = |key: &str| setting(settings, key);

        let object_type = required(settings, "object_type")?.parse::<ObjectType>()?;
        let enrichment = VmEnrichment {
            guest_agent: yes_no("vm_guest_agent", get("vm_guest_agent"), false)?,
            description: yes_no("vm_description", get("vm_description"), false)?,
            ha_state: yes_no("vm_ha", get("vm_ha"), false)?,
        };
        let scheme = get("scheme").map_or(Ok(ProxmoxScheme::Https), str::parse::<ProxmoxScheme>)?;
        // The TLS switches only exist for HTTPS; under HTTP they are not read.
        let tls = if scheme.is_secure() {
            TlsVerification {
                verify_peer: yes_no("ssl_verify_peer", get("ssl_verify_peer"), true)?,
                verify_host: yes_no("ssl_verify_host", get("ssl_verify_host"), true)?,
            }
        } else {
            TlsVerification::default()
        };
        let port = get("port").map_or(Ok(ProxmoxPort::default()), ProxmoxPort::parse)?;

        Ok(Self {
            object_type,
            enrichment,
            scheme,
            tls,
            host: ProxmoxHost::new(required(settings, "host")?)?,
            port,
            realm: required(settings, "realm")?.parse::<ProxmoxRealm>()?,
            username: ProxmoxUsername::new(required(settings, "username")?)?,
            password: ProxmoxPassword::new(required(settings, "password")?)?,
        })
    }

    /// Connection parameters for the API client.
    pub fn connection(&self) -> Result<ProxmoxConnection, ValidationError> {
        ProxmoxConnection::new(
            self.host.clone(),
            self.port,
            self.scheme,
            self.realm,
            self.username.clone(),
            self.password.clone(),
        )
    }

    /// Client configuration carrying the TLS policy.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            tls: self.tls,
            ..ClientConfig::default()
        }
    }
}

fn setting<'a>(settings: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    settings
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn required<'a>(
    settings: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a str, ValidationError> {
    setting(settings, key)
        .ok_or_else(|| ValidationError::field(key, format!("Setting '{key}' is required")))
}

fn yes_no(key: &str, value: Option<&str>, default: bool) -> Result<bool, ValidationError> {
    match value {
        None => Ok(default),
        Some("y") => Ok(true),
        Some("n") => Ok(false),
        Some(other) => Err(ValidationError::field(
            key,
            format!("Expected 'y' or 'n', got '{other}'"),
        )),
    }
}
