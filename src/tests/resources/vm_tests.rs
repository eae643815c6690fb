use crate::{
    ObjectType, ProxmoxError, VmEnrichment,
    tests::common::{create_authenticated_client, mount_data},
};
use std::collections::HashSet;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_two_node_cluster(mock_server: &MockServer) {
    mount_data(
        mock_server,
        "/nodes",
        serde_json::json!([
            {"node": "pve1", "status": "online"},
            {"node": "pve2", "status": "online"}
        ]),
    )
    .await;
    mount_data(
        mock_server,
        "/nodes/pve1/qemu",
        serde_json::json!([{
            "vmid": 100,
            "name": "ubuntu-vm",
            "status": "running",
            "cpus": 4,
            "maxmem": 8589934592_i64,
            "maxdisk": 42949672960_i64,
            "uptime": 123456,
            "tags": "ubuntu;production",
            "template": 0
        }]),
    )
    .await;
    mount_data(
        mock_server,
        "/nodes/pve2/qemu",
        serde_json::json!([{
            "vmid": 200,
            "name": "windows-vm",
            "status": "stopped",
            "cpus": 2,
            "maxmem": 4294967296_i64
        }]),
    )
    .await;
}

#[tokio::test]
async fn test_vms_across_nodes() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_two_node_cluster(&mock_server).await;

    let vms = client.vms(VmEnrichment::default()).await.unwrap();
    assert_eq!(vms.len(), 2);

    let vm1 = &vms[0];
    assert_eq!(vm1.vm_name, "ubuntu-vm");
    assert_eq!(vm1.vm_id, 100);
    assert_eq!(vm1.vm_host, "pve1");
    assert_eq!(vm1.vm_status, "running");
    assert_eq!(vm1.hardware_cpu, Some(4));
    assert_eq!(vm1.hardware_memory, Some(8192));
    assert_eq!(vm1.hardware_disk, Some(42949672960));
    assert_eq!(vm1.vm_tags, vec!["ubuntu", "production"]);
    assert!(!vm1.vm_template);

    let vm2 = &vms[1];
    assert_eq!(vm2.vm_host, "pve2");
    assert_eq!(vm2.vm_status, "stopped");
    assert_eq!(vm2.hardware_memory, Some(4096));
    assert!(vm2.vm_uptime.is_none());
    assert!(vm2.vm_tags.is_empty());
}

#[tokio::test]
async fn test_vm_records_have_unique_names() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_two_node_cluster(&mock_server).await;

    let records = client
        .records(ObjectType::VirtualMachine, VmEnrichment::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        for key in ["vm_name", "vm_host", "vm_status"] {
            assert!(record.contains_key(key), "missing {key}");
        }
        assert!(!record.contains_key("guest_ip_addresses"));
        assert!(!record.contains_key("vm_description"));
        assert!(!record.contains_key("vm_ha_state"));
    }
    let names: HashSet<&str> = records
        .iter()
        .filter_map(|r| r["vm_name"].as_str())
        .collect();
    assert_eq!(names.len(), 2);
}

#[tokio::test]
async fn test_vms_empty_node() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_data(
        &mock_server,
        "/nodes",
        serde_json::json!([{"node": "pve1", "status": "online"}]),
    )
    .await;
    mount_data(&mock_server, "/nodes/pve1/qemu", serde_json::json!([])).await;

    let vms = client.vms(VmEnrichment::all()).await.unwrap();
    assert!(vms.is_empty());
}

#[tokio::test]
async fn test_vm_enrichment() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_data(
        &mock_server,
        "/nodes",
        serde_json::json!([{"node": "pve1", "status": "online"}]),
    )
    .await;
    mount_data(
        &mock_server,
        "/nodes/pve1/qemu",
        serde_json::json!([{"vmid": 100, "status": "running", "template": "1"}]),
    )
    .await;
    mount_data(
        &mock_server,
        "/nodes/pve1/qemu/100/agent/network-get-interfaces",
        serde_json::json!({"result": [
            {
                "name": "lo",
                "hardware-address": "00:00:00:00:00:00",
                "ip-addresses": [{"ip-address": "127.0.0.1", "ip-address-type": "ipv4", "prefix": 8}]
            },
            {
                "name": "eth0",
                "hardware-address": "bc:24:11:aa:bb:cc",
                "ip-addresses": [
                    {"ip-address": "192.168.1.10", "ip-address-type": "ipv4", "prefix": 24},
                    {"ip-address": "fe80::1", "ip-address-type": "ipv6", "prefix": 64}
                ]
            }
        ]}),
    )
    .await;
    mount_data(
        &mock_server,
        "/nodes/pve1/qemu/100/config",
        serde_json::json!({"description": "Build runner", "cores": 2, "memory": "2048"}),
    )
    .await;
    mount_data(
        &mock_server,
        "/cluster/ha/resources/vm:100",
        serde_json::json!({"sid": "vm:100", "state": "started", "group": "ha-a", "type": "vm"}),
    )
    .await;

    let records = client
        .records(ObjectType::VirtualMachine, VmEnrichment::all())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["vm_name"], "VM 100");
    assert_eq!(record["vm_template"], true);
    assert_eq!(
        record["guest_ip_addresses"],
        serde_json::json!(["192.168.1.10", "fe80::1"])
    );
    assert_eq!(record["guest_network"][0]["name"], "eth0");
    assert_eq!(record["guest_network"].as_array().unwrap().len(), 1);
    assert_eq!(record["vm_description"], "Build runner");
    assert_eq!(record["vm_ha_state"], "started");
    assert_eq!(record["vm_ha_group"], "ha-a");
}

#[tokio::test]
async fn test_guest_agent_failure_matches_plain_record() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_two_node_cluster(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/100/agent/network-get-interfaces"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("QEMU guest agent is not running"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve2/qemu/200/agent/network-get-interfaces"))
        .respond_with(ResponseTemplate::new(500).set_body_string("VM 200 not running"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let enrichment = VmEnrichment {
        guest_agent: true,
        ..VmEnrichment::default()
    };
    let enriched = client.vms(enrichment).await.unwrap();
    let plain = client.vms(VmEnrichment::default()).await.unwrap();

    assert_eq!(enriched, plain);
    // A failed lookup does not end the session.
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn test_vm_listing_failure_propagates() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_data(
        &mock_server,
        "/nodes",
        serde_json::json!([{"node": "pve1", "status": "online"}]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(595).set_body_string("no route to host"))
        .mount(&mock_server)
        .await;

    let result = client.vms(VmEnrichment::default()).await;
    assert!(matches!(result, Err(ProxmoxError::Api { status: 595, .. })));
}
