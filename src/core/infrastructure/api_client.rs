//! Internal HTTP client that holds the session and issues authenticated calls.

use crate::{
    auth::application::service::login_service::LoginService,
    core::{
        domain::{
            error::{ProxmoxError, ProxmoxResult},
            model::{
                client_config::ClientConfig, proxmox_auth::ProxmoxAuth,
                proxmox_connection::ProxmoxConnection,
            },
            value_object::CSRF_HEADER_NAME,
        },
        infrastructure::pve_api::PveApi,
    },
};
use async_trait::async_trait;
use governor::DefaultDirectRateLimiter;
use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::form_urlencoded;

/// The `{"data": ...}` envelope around every API payload.
#[derive(Deserialize)]
struct ApiResponse<T> {
    data: T,
}

/// HTTP client that manages the session and provides methods to call the Proxmox API.
///
/// Authenticated requests carry the `PVEAuthCookie` cookie; POST requests also
/// carry the `CSRFPreventionToken` header. Without a valid session no request
/// is sent and [`ProxmoxError::NotAuthenticated`] is returned. The session is
/// never refreshed behind the caller's back: an expired or rejected ticket is
/// dropped and the caller logs in again.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<ProxmoxConnection>,
    auth: Arc<RwLock<Option<ProxmoxAuth>>>,
    config: Arc<ClientConfig>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`. The client starts unauthenticated.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` if the HTTP client cannot be built and
    /// `ProxmoxError::Validation` for an unusable rate limit.
    pub fn new(connection: ProxmoxConnection, config: ClientConfig) -> ProxmoxResult<Self> {
        if config.tls.disables_chain_for_host_check(connection.scheme()) {
            tracing::warn!(
                host = connection.host().as_str(),
                "Host name check disabled; certificate chain verification is disabled with it"
            );
        }

        let http_client = Client::builder()
            .danger_accept_invalid_certs(config.tls.accepts_invalid_certs(connection.scheme()))
            .user_agent(concat!("pve_import/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProxmoxError::Connection(e.to_string()))?;

        let rate_limiter = match config.rate_limit {
            Some(rl) => Some(Arc::new(DefaultDirectRateLimiter::direct(rl.quota()?))),
            None => None,
        };

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            auth: Arc::new(RwLock::new(None)),
            config: Arc::new(config),
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    /// Logs in unless a valid session is already held.
    ///
    /// # Errors
    /// On failure no session is held afterwards and the error says why:
    /// `Authentication` for refused credentials or an unusable ticket,
    /// `Connection` when the server could not be reached.
    pub async fn login(&self) -> ProxmoxResult<()> {
        if self.is_authenticated().await {
            tracing::debug!("Session still valid, skipping login");
            return Ok(());
        }

        match LoginService::new()
            .execute(&self.http_client, &self.connection)
            .await
        {
            Ok(auth) => {
                self.set_auth(auth).await;
                Ok(())
            }
            Err(e) => {
                self.clear_auth().await;
                tracing::warn!(
                    host = self.connection.host().as_str(),
                    error = %e,
                    "Login failed"
                );
                Err(e)
            }
        }
    }

    /// Drops the session. Never touches the network.
    pub async fn logout(&self) {
        self.clear_auth().await;
        tracing::debug!("Logged out");
    }

    /// Replaces the session (used after a successful login).
    pub async fn set_auth(&self, auth: ProxmoxAuth) {
        let mut lock = self.auth.write().await;
        *lock = Some(auth);
    }

    async fn clear_auth(&self) {
        let mut lock = self.auth.write().await;
        *lock = None;
    }

    /// Returns the current session, if any.
    pub async fn auth(&self) -> Option<ProxmoxAuth> {
        self.auth.read().await.clone()
    }

    /// Returns `true` if there is a valid (non‑expired) ticket.
    pub async fn is_authenticated(&self) -> bool {
        let lock = self.auth.read().await;
        lock.as_ref()
            .is_some_and(|a| a.is_valid(self.config.ticket_lifetime))
    }

    /// Performs an authenticated GET request and returns the decoded `data` payload.
    ///
    /// # Errors
    /// `NotAuthenticated` without a valid session, `Connection` on transport
    /// failures, `Api` on non-success status codes and `Parse` when the body
    /// does not decode as `T`.
    pub async fn get<T>(&self, path: &str, query: &[(String, String)]) -> ProxmoxResult<T>
    where
        T: DeserializeOwned,
    {
        self.execute_request(Method::GET, path, query, None).await
    }

    /// Performs an authenticated POST request with a form-encoded body.
    ///
    /// # Errors
    /// Same as [`ApiClient::get`].
    pub async fn post<T>(&self, path: &str, body: &[(String, String)]) -> ProxmoxResult<T>
    where
        T: DeserializeOwned,
    {
        self.execute_request(Method::POST, path, &[], Some(body))
            .await
    }

    /// Returns the session if it is still valid. An expired session is dropped.
    async fn valid_session(&self) -> ProxmoxResult<ProxmoxAuth> {
        {
            let lock = self.auth.read().await;
            match lock.as_ref() {
                None => return Err(ProxmoxError::NotAuthenticated),
                Some(auth) if auth.is_valid(self.config.ticket_lifetime) => {
                    return Ok(auth.clone());
                }
                Some(_) => {}
            }
        }

        tracing::debug!("Ticket expired, dropping session");
        self.clear_auth().await;
        Err(ProxmoxError::NotAuthenticated)
    }

    async fn execute_request<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        form: Option<&[(String, String)]>,
    ) -> ProxmoxResult<T>
    where
        T: DeserializeOwned,
    {
        let auth = self.valid_session().await?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.connection.url().endpoint(path, query)?;
        tracing::debug!(%method, %url, "API request");

        let cookie = HeaderValue::from_str(&auth.ticket().as_cookie_header())
            .map_err(|e| ProxmoxError::Authentication(format!("Unusable ticket: {e}")))?;
        let mut req_builder = self
            .http_client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(COOKIE, cookie);

        if let Some(form) = form {
            let body = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(form)
                .finish();
            req_builder = req_builder
                .header(CSRF_HEADER_NAME, auth.csrf_token().as_str())
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            // The server no longer accepts this ticket.
            self.clear_auth().await;
            return Err(ProxmoxError::Authentication(format!(
                "Ticket rejected by server on {} {}",
                method, path
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&bytes).trim().to_string();
            return Err(ProxmoxError::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                } else {
                    message
                },
            });
        }

        serde_json::from_slice::<ApiResponse<T>>(&bytes)
            .map(|envelope| envelope.data)
            .map_err(|e| ProxmoxError::Parse(format!("{} {}: {}", method, path, e)))
    }
}

#[async_trait]
impl PveApi for ApiClient {
    async fn get_data(&self, path: &str, query: &[(String, String)]) -> ProxmoxResult<Value> {
        self.get(path, query).await
    }

    async fn post_data(&self, path: &str, body: &[(String, String)]) -> ProxmoxResult<Value> {
        self.post(path, body).await
    }
}
