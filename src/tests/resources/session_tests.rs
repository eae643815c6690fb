use crate::{
    ImportSettings, ProxmoxClient, ProxmoxError, ProxmoxScheme,
    tests::common::{TEST_CSRF, TEST_TICKET, mount_data, mount_login},
};
use std::collections::HashMap;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

fn client_for(mock_server: &MockServer) -> ProxmoxClient {
    ProxmoxClient::builder()
        .host("127.0.0.1")
        .unwrap()
        .port(mock_server.address().port())
        .unwrap()
        .credentials("testuser", "testpass", "pam")
        .unwrap()
        .scheme(ProxmoxScheme::Http)
        .build()
        .unwrap()
}

#[test]
fn test_builder_requires_host_and_credentials() {
    let missing_host = ProxmoxClient::builder()
        .credentials("user", "pass", "pam")
        .unwrap()
        .build();
    assert!(matches!(missing_host, Err(ProxmoxError::Validation(_))));

    let missing_credentials = ProxmoxClient::builder().host("pve.local").unwrap().build();
    assert!(matches!(missing_credentials, Err(ProxmoxError::Validation(_))));

    let bad_realm = ProxmoxClient::builder().credentials("user", "pass", "ldap");
    assert!(bad_realm.is_err());

    let bad_port = ProxmoxClient::builder().port(0);
    assert!(bad_port.is_err());
}

#[test]
fn test_builder_defaults_to_https_8006() {
    let client = ProxmoxClient::builder()
        .host("pve.local")
        .unwrap()
        .credentials("user", "pass", "pve")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        client.api().connection().url().as_str(),
        "https://pve.local:8006/api2/json"
    );
}

#[test]
fn test_client_from_settings() {
    let settings: HashMap<String, String> = [
        ("object_type", "Pools"),
        ("host", "10.0.0.5"),
        ("realm", "pve"),
        ("username", "icinga"),
        ("password", "secret"),
        ("scheme", "http"),
        ("port", "8080"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let settings = ImportSettings::from_map(&settings).unwrap();

    let client = ProxmoxClient::from_settings(&settings).unwrap();
    assert_eq!(
        client.api().connection().url().as_str(),
        "http://10.0.0.5:8080/api2/json"
    );
}

#[tokio::test]
async fn test_login_then_listing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .and(body_string("realm=pam&username=testuser&password=testpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"ticket": TEST_TICKET, "CSRFPreventionToken": TEST_CSRF}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/pools"))
        .and(header("cookie", format!("PVEAuthCookie={TEST_TICKET}").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(!client.is_authenticated().await);
    assert!(client.auth_token().await.is_none());

    client.login().await.unwrap();
    assert!(client.is_authenticated().await);
    assert_eq!(client.auth_token().await.unwrap().as_str(), TEST_TICKET);
    assert_eq!(client.csrf_token().await.unwrap().as_str(), TEST_CSRF);

    assert!(client.pools().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_before_login_is_refused() {
    let mock_server = MockServer::start().await;
    mount_data(&mock_server, "/nodes", serde_json::json!([])).await;

    let client = client_for(&mock_server);
    let result = client.nodes().await;
    assert!(matches!(result, Err(ProxmoxError::NotAuthenticated)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_then_listing_is_refused() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_data(&mock_server, "/nodes", serde_json::json!([])).await;

    let client = client_for(&mock_server);
    client.login().await.unwrap();
    client.nodes().await.unwrap();

    client.logout().await;
    assert!(!client.is_authenticated().await);
    assert!(matches!(
        client.nodes().await,
        Err(ProxmoxError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_login_unreachable_is_connection_error() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);
    drop(mock_server);

    let result = client.login().await;
    assert!(matches!(result, Err(ProxmoxError::Connection(_))));
    assert!(!client.is_authenticated().await);
}
