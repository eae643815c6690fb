mod auth;
mod core;
mod inventory;


pub use crate::core::{
    domain::{
        error::{ProxmoxError, ProxmoxResult, ValidationError},
        model::{
            client_config::{ClientConfig, RateLimitConfig, TlsVerification},
            import_record::ImportRecord,
            node::NodeListItem,
            pool::PoolListItem,
            proxmox_auth::{ProxmoxAuth, TICKET_LIFETIME},
            proxmox_connection::ProxmoxConnection,
            vm::{GuestInfo, GuestInterface, HaInfo, VmRecord},
        },
        value_object::{
            API_BASE_PATH, AUTH_COOKIE_NAME, CSRF_HEADER_NAME, ProxmoxCSRFToken, ProxmoxHost,
            ProxmoxPassword, ProxmoxPort, ProxmoxRealm, ProxmoxScheme, ProxmoxTicket, ProxmoxUrl,
            ProxmoxUsername,
        },
    },
    infrastructure::{api_client::ApiClient, pve_api::PveApi},
};
pub use crate::inventory::application::{
    import_settings::{ImportSettings, ObjectType},
    service::{
        import_service::{DEFAULT_KEY_COLUMN, ImportSource, columns_of, ensure_unique_keys},
        vm_service::VmEnrichment,
    },
};

use crate::inventory::application::service::{
    import_service::collect_records, node_service::NodeService, pool_service::PoolService,
    vm_service::VmService,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A client for the Proxmox VE API and its inventory listings.
///
/// # Examples
///
/// ```no_run
/// use pve_import::{ProxmoxClient, ProxmoxResult, VmEnrichment};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let client = ProxmoxClient::builder()
///         .host("proxmox.example.com")?
///         .port(8006)?
///         .credentials("user", "password", "pve")?
///         .secure(true)
///         .build()?;
///
///     client.login().await?;
///     let vms = client.vms(VmEnrichment::default()).await?;
///     println!("{} virtual machines", vms.len());
///     client.logout().await;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ProxmoxClient {
    api_client: ApiClient,
}

/// Builder for ProxmoxClient configuration
#[derive(Debug, Default)]
pub struct ProxmoxClientBuilder {
    host: Option<ProxmoxHost>,
    port: Option<ProxmoxPort>,
    username: Option<ProxmoxUsername>,
    password: Option<ProxmoxPassword>,
    realm: ProxmoxRealm,
    scheme: ProxmoxScheme,
    config: ClientConfig,
}

impl ProxmoxClientBuilder {
    pub fn host(mut self, host: impl Into<String>) -> ProxmoxResult<Self> {
        self.host = Some(ProxmoxHost::new(host)?);
        Ok(self)
    }

    pub fn port(mut self, port: u16) -> ProxmoxResult<Self> {
        self.port = Some(ProxmoxPort::new(port)?);
        Ok(self)
    }

    /// Sets the credentials. The realm must be `pam` or `pve`.
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        realm: impl AsRef<str>,
    ) -> ProxmoxResult<Self> {
        self.username = Some(ProxmoxUsername::new(username)?);
        self.password = Some(ProxmoxPassword::new(password)?);
        self.realm = realm.as_ref().parse()?;
        Ok(self)
    }

    pub fn scheme(mut self, scheme: ProxmoxScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Shorthand for HTTPS (`true`) or plain HTTP (`false`).
    pub fn secure(self, secure: bool) -> Self {
        self.scheme(if secure {
            ProxmoxScheme::Https
        } else {
            ProxmoxScheme::Http
        })
    }

    /// Verify the server certificate chain (on by default).
    pub fn verify_peer(mut self, verify: bool) -> Self {
        self.config.tls.verify_peer = verify;
        self
    }

    /// Verify that the certificate matches the host name (on by default).
    pub fn verify_host(mut self, verify: bool) -> Self {
        self.config.tls.verify_host = verify;
        self
    }

    /// Overrides the local ticket lifetime (two hours by default).
    pub fn ticket_lifetime(mut self, lifetime: Duration) -> Self {
        self.config.ticket_lifetime = lifetime;
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.config.rate_limit = Some(rate_limit);
        self
    }

    pub fn build(self) -> ProxmoxResult<ProxmoxClient> {
        let host = self
            .host
            .ok_or_else(|| ValidationError::field("host", "Host is required"))?;
        let username = self
            .username
            .ok_or_else(|| ValidationError::field("username", "Username is required"))?;
        let password = self
            .password
            .ok_or_else(|| ValidationError::field("password", "Password is required"))?;

        let connection = ProxmoxConnection::new(
            host,
            self.port.unwrap_or_default(),
            self.scheme,
            self.realm,
            username,
            password,
        )?;

        Ok(ProxmoxClient {
            api_client: ApiClient::new(connection, self.config)?,
        })
    }
}

impl ProxmoxClient {
    /// Creates a new builder for ProxmoxClient configuration
    pub fn builder() -> ProxmoxClientBuilder {
        ProxmoxClientBuilder::default()
    }

    /// Builds a client from parsed import settings.
    pub fn from_settings(settings: &ImportSettings) -> ProxmoxResult<Self> {
        Ok(Self {
            api_client: ApiClient::new(settings.connection()?, settings.client_config())?,
        })
    }

    /// Authenticates with the Proxmox server.
    ///
    /// Does nothing while the current ticket is still valid.
    ///
    /// # Errors
    ///
    /// - `Authentication` if the credentials are refused or the server hands
    ///   out an unusable ticket
    /// - `Connection` if the server is unreachable
    /// - `Validation` if the server rejects the request parameters
    pub async fn login(&self) -> ProxmoxResult<()> {
        self.api_client.login().await
    }

    /// Forgets the session. Always succeeds.
    pub async fn logout(&self) {
        self.api_client.logout().await
    }

    /// Returns true if the client holds a ticket that has not expired
    pub async fn is_authenticated(&self) -> bool {
        self.api_client.is_authenticated().await
    }

    /// Returns the current authentication ticket if authenticated
    pub async fn auth_token(&self) -> Option<ProxmoxTicket> {
        self.api_client.auth().await.map(|auth| auth.ticket().clone())
    }

    /// Returns the current CSRF token if authenticated
    pub async fn csrf_token(&self) -> Option<ProxmoxCSRFToken> {
        self.api_client
            .auth()
            .await
            .map(|auth| auth.csrf_token().clone())
    }

    /// Authenticated GET below `/api2/json`, decoding the `data` payload.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ProxmoxResult<T> {
        self.api_client.get(path, query).await
    }

    /// Authenticated POST below `/api2/json` with a form-encoded body.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &[(String, String)],
    ) -> ProxmoxResult<T> {
        self.api_client.post(path, body).await
    }

    /// Lists the cluster nodes.
    pub async fn nodes(&self) -> ProxmoxResult<Vec<NodeListItem>> {
        NodeService::new(&self.api_client).list().await
    }

    /// Lists the resource pools.
    pub async fn pools(&self) -> ProxmoxResult<Vec<PoolListItem>> {
        PoolService::new(&self.api_client).list().await
    }

    /// Lists the virtual machines of every online node.
    pub async fn vms(&self, enrichment: VmEnrichment) -> ProxmoxResult<Vec<VmRecord>> {
        VmService::new(&self.api_client).list(enrichment).await
    }

    /// Lists one object type as flat import records.
    pub async fn records(
        &self,
        object_type: ObjectType,
        enrichment: VmEnrichment,
    ) -> ProxmoxResult<Vec<ImportRecord>> {
        collect_records(&self.api_client, object_type, enrichment).await
    }

    /// The underlying API client, usable wherever a [`PveApi`] is expected.
    pub fn api(&self) -> &ApiClient {
        &self.api_client
    }
}
