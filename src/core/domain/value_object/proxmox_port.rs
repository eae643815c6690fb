use crate::core::domain::error::ValidationError;

/// A validated Proxmox API port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxmoxPort(u16);

impl ProxmoxPort {
    /// The port `pveproxy` listens on out of the box.
    pub const DEFAULT: u16 = 8006;

    pub fn new(port: u16) -> Result<Self, ValidationError> {
        validate_port(port)?;
        Ok(Self(port))
    }

    /// Parses a port from its textual form, as found in a settings map.
    pub fn parse(port: &str) -> Result<Self, ValidationError> {
        let port = port.trim().parse::<u16>().map_err(|_| {
            ValidationError::Format(format!("Port must be a number between 1 and 65535, got '{port}'"))
        })?;
        Self::new(port)
    }

    /// Returns the port number.
    #[must_use]
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for ProxmoxPort {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Validates a port number.
pub(crate) fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        return Err(ValidationError::field("port", "Port cannot be 0"));
    }
    Ok(())
}
