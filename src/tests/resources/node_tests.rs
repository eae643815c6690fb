use crate::{
    ObjectType, ProxmoxError, VmEnrichment,
    tests::common::{create_authenticated_client, mount_data},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn test_nodes_list_success() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .and(header("cookie", "PVEAuthCookie=PVE:testuser@pam:4EEC61E2::sig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "node": "pve1",
                    "status": "online",
                    "cpu": 0.15,
                    "maxcpu": 8,
                    "mem": 4294967296_i64,
                    "maxmem": 17179869184_i64,
                    "disk": 10737418240_i64,
                    "maxdisk": 107374182400_i64,
                    "uptime": 86400,
                    "level": "",
                    "id": "node/pve1",
                    "ssl_fingerprint": "AA:BB:CC",
                    "type": "node"
                },
                {
                    "node": "pve2",
                    "status": "offline",
                    "id": "node/pve2",
                    "type": "node"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let nodes = client.nodes().await.unwrap();
    assert_eq!(nodes.len(), 2);

    let node1 = &nodes[0];
    assert_eq!(node1.node, "pve1");
    assert_eq!(node1.status, "online");
    assert_eq!(node1.maxcpu, Some(8));
    assert_eq!(node1.uptime, Some(86400));
    assert_eq!(node1.ssl_fingerprint.as_deref(), Some("AA:BB:CC"));

    let node2 = &nodes[1];
    assert_eq!(node2.status, "offline");
    assert!(node2.cpu.is_none());
    assert!(node2.maxmem.is_none());
}

#[tokio::test]
async fn test_nodes_list_empty() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_data(&mock_server, "/nodes", serde_json::json!([])).await;

    let nodes = client.nodes().await.unwrap();
    assert!(nodes.is_empty());
}

#[tokio::test]
async fn test_node_records_pass_fields_through() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_data(
        &mock_server,
        "/nodes",
        serde_json::json!([
            {"node": "pve1", "status": "online", "maxcpu": 8, "type": "node"},
            {"node": "pve2", "status": "online", "maxcpu": 16, "type": "node"}
        ]),
    )
    .await;

    let records = client
        .records(ObjectType::HostSystem, VmEnrichment::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["node"], "pve1");
    assert_eq!(records[1]["maxcpu"], 16);
    assert_eq!(records[1]["type"], "node");
    assert!(!records[0].contains_key("ssl_fingerprint"));
}

#[tokio::test]
async fn test_nodes_forbidden_is_api_error() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission check failed"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client.nodes().await;
    assert!(matches!(result, Err(ProxmoxError::Api { status: 403, .. })));
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn test_nodes_unauthorized_ends_session() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client.nodes().await;
    assert!(matches!(result, Err(ProxmoxError::Authentication(_))));
    assert!(!client.is_authenticated().await);

    // No second request goes out.
    let again = client.nodes().await;
    assert!(matches!(again, Err(ProxmoxError::NotAuthenticated)));
}
