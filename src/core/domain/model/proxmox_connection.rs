use crate::core::domain::{
    error::ValidationError,
    value_object::{
        ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxRealm, ProxmoxScheme, ProxmoxUrl,
        ProxmoxUsername,
    },
};

/// Connection parameters, fixed for the lifetime of a client.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    host: ProxmoxHost,
    port: ProxmoxPort,
    scheme: ProxmoxScheme,
    realm: ProxmoxRealm,
    username: ProxmoxUsername,
    password: ProxmoxPassword,
    url: ProxmoxUrl,
}

impl ProxmoxConnection {
    pub fn new(
        host: ProxmoxHost,
        port: ProxmoxPort,
        scheme: ProxmoxScheme,
        realm: ProxmoxRealm,
        username: ProxmoxUsername,
        password: ProxmoxPassword,
    ) -> Result<Self, ValidationError> {
        let url = ProxmoxUrl::new(scheme, &host, port)?;
        Ok(Self {
            host,
            port,
            scheme,
            realm,
            username,
            password,
            url,
        })
    }

    pub fn host(&self) -> &ProxmoxHost {
        &self.host
    }

    pub fn port(&self) -> ProxmoxPort {
        self.port
    }

    pub fn scheme(&self) -> ProxmoxScheme {
        self.scheme
    }

    pub fn realm(&self) -> ProxmoxRealm {
        self.realm
    }

    pub fn username(&self) -> &ProxmoxUsername {
        &self.username
    }

    pub fn password(&self) -> &ProxmoxPassword {
        &self.password
    }

    /// The API base URL, `scheme://host:port/api2/json`.
    pub fn url(&self) -> &ProxmoxUrl {
        &self.url
    }
}
