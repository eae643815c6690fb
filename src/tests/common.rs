//! Fixtures shared by the unit and wiremock tests.

use crate::{
    ProxmoxClient,
    core::{
        domain::{
            model::{
                client_config::ClientConfig, proxmox_auth::ProxmoxAuth,
                proxmox_connection::ProxmoxConnection,
            },
            value_object::{
                ProxmoxCSRFToken, ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxRealm,
                ProxmoxScheme, ProxmoxTicket, ProxmoxUsername,
            },
        },
        infrastructure::api_client::ApiClient,
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub(crate) const TEST_TICKET: &str = "PVE:testuser@pam:4EEC61E2::sig";
pub(crate) const TEST_CSRF: &str = "4EEC61E2:token";

/// Plain HTTP connection to the mock server.
pub(crate) fn create_test_connection(server: &MockServer) -> ProxmoxConnection {
    ProxmoxConnection::new(
        ProxmoxHost::new_unchecked("127.0.0.1".to_string()),
        ProxmoxPort::new(server.address().port()).unwrap(),
        ProxmoxScheme::Http,
        ProxmoxRealm::Pam,
        ProxmoxUsername::new_unchecked("testuser".to_string()),
        ProxmoxPassword::new("testpass").unwrap(),
    )
    .unwrap()
}

pub(crate) fn create_test_auth() -> ProxmoxAuth {
    ProxmoxAuth::new(
        ProxmoxTicket::new_unchecked(TEST_TICKET.to_string()),
        ProxmoxCSRFToken::new_unchecked(TEST_CSRF.to_string()),
    )
}

/// A client pointed at the mock server that already holds a session.
pub(crate) async fn create_authenticated_client(server: &MockServer) -> ProxmoxClient {
    let api_client = ApiClient::new(create_test_connection(server), ClientConfig::default()).unwrap();
    api_client.set_auth(create_test_auth()).await;
    ProxmoxClient { api_client }
}

/// Answers `times` logins with the test ticket.
pub(crate) async fn mount_login(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "username": "testuser@pam",
                "ticket": TEST_TICKET,
                "CSRFPreventionToken": TEST_CSRF
            }
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Serves `GET /api2/json{api_path}` with `data` wrapped in the envelope.
pub(crate) async fn mount_data(server: &MockServer, api_path: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api2/json{api_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })))
        .mount(server)
        .await;
}
