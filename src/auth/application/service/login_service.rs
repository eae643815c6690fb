use crate::{
    auth::application::{
        request::login_request::LoginRequest,
        response::login_response::{LoginResponse, LoginResponseData},
    },
    core::domain::{
        error::{ProxmoxError, ProxmoxResult, ValidationError},
        model::{proxmox_auth::ProxmoxAuth, proxmox_connection::ProxmoxConnection},
        value_object::{ProxmoxCSRFToken, ProxmoxTicket},
    },
};

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};

/// Exchanges credentials for a session ticket.
pub struct LoginService {
    default_headers: HeaderMap,
}

impl LoginService {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self { default_headers }
    }

    /// Posts the connection's credentials to `/access/ticket` and returns the
    /// issued session.
    pub async fn execute(
        &self,
        http_client: &Client,
        connection: &ProxmoxConnection,
    ) -> ProxmoxResult<ProxmoxAuth> {
        let url = connection.url().endpoint("/access/ticket", &[])?;
        let body = LoginRequest::from_connection(connection).to_form();

        tracing::debug!(
            %url,
            username = connection.username().as_str(),
            realm = %connection.realm(),
            "Requesting ticket"
        );

        let response = http_client
            .post(url)
            .headers(self.default_headers.clone())
            .body(body)
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(e.to_string()))?;

        match response.status() {
            StatusCode::OK => self.handle_successful_login(response).await,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                ProxmoxError::Authentication("Invalid credentials provided".to_string()),
            ),
            StatusCode::BAD_REQUEST => Err(ValidationError::Field {
                field: "request".to_string(),
                message: "Invalid request format".to_string(),
            }
            .into()),
            StatusCode::NOT_FOUND => Err(ProxmoxError::Connection(
                "Login endpoint not found".to_string(),
            )),
            StatusCode::SERVICE_UNAVAILABLE => Err(ProxmoxError::Connection(
                "Proxmox service is currently unavailable".to_string(),
            )),
            status => Err(ProxmoxError::Connection(format!(
                "Unexpected response status: {}",
                status
            ))),
        }
    }

    async fn handle_successful_login(
        &self,
        response: reqwest::Response,
    ) -> ProxmoxResult<ProxmoxAuth> {
        let login_response = response.json::<LoginResponse>().await.map_err(|e| {
            ProxmoxError::Authentication(format!("Failed to parse login response: {}", e))
        })?;

        let Some(LoginResponseData {
            ticket: Some(ticket),
            csrf_token: Some(csrf_token),
            username,
        }) = login_response.data
        else {
            return Err(ProxmoxError::Authentication(
                "Login response carries no ticket".to_string(),
            ));
        };

        let ticket = ProxmoxTicket::new(ticket)
            .map_err(|e| ProxmoxError::Authentication(format!("Unusable ticket: {e}")))?;
        let csrf_token = ProxmoxCSRFToken::new(csrf_token)
            .map_err(|e| ProxmoxError::Authentication(format!("Unusable CSRF token: {e}")))?;

        tracing::info!(user = username.as_deref().unwrap_or_default(), "Logged in");
        Ok(ProxmoxAuth::new(ticket, csrf_token))
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}
