//! Domain models for QEMU virtual machine listings.
//!
//! The `*Item`/`*Response` types mirror what the API returns; [`VmRecord`] is
//! the flattened shape handed to the import.

use crate::core::domain::model::serde_helpers::pve_bool;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

const MIB: u64 = 1024 * 1024;

/// A virtual machine as returned by the `/nodes/{node}/qemu` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VmListItem {
    /// The VM identifier (unique per cluster).
    pub vmid: u32,
    /// Human-readable name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current status (e.g., "running", "stopped").
    pub status: String,
    /// Number of virtual CPUs.
    #[serde(default)]
    pub cpus: Option<u32>,
    /// Maximum memory in bytes.
    #[serde(default)]
    pub maxmem: Option<u64>,
    /// Maximum disk space in bytes.
    #[serde(default)]
    pub maxdisk: Option<u64>,
    /// Uptime in seconds (if running).
    #[serde(default)]
    pub uptime: Option<u64>,
    /// Tags, separated by `;` (older releases also use `,` or spaces).
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "pve_bool::deserialize")]
    pub template: Option<bool>,
}

/// Envelope of a guest agent command result.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestAgentResponse<T> {
    pub result: T,
}

/// A network interface reported by `agent/network-get-interfaces`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GuestInterfaceItem {
    pub name: String,
    #[serde(default)]
    pub hardware_address: Option<String>,
    #[serde(default)]
    pub ip_addresses: Vec<GuestIpAddressItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GuestIpAddressItem {
    pub ip_address: String,
    #[serde(default)]
    pub ip_address_type: Option<String>,
    #[serde(default)]
    pub prefix: Option<u8>,
}

/// The subset of `/nodes/{node}/qemu/{vmid}/config` the import uses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VmConfigItem {
    #[serde(default)]
    pub description: Option<String>,
}

/// An HA resource from `/cluster/ha/resources/{sid}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HaResourceItem {
    pub sid: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// A guest network interface in a [`VmRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestInterface {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_address: Option<String>,
    pub ip_addresses: Vec<String>,
}

/// Fields fetched through the QEMU guest agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestInfo {
    pub guest_network: Vec<GuestInterface>,
    /// Every non-loopback address of every non-loopback interface.
    pub guest_ip_addresses: Vec<String>,
}

impl GuestInfo {
    pub fn from_interfaces(items: Vec<GuestInterfaceItem>) -> Self {
        let guest_network: Vec<GuestInterface> = items
            .into_iter()
            .filter(|iface| iface.name != "lo")
            .map(|iface| GuestInterface {
                name: iface.name,
                hardware_address: iface.hardware_address,
                ip_addresses: iface
                    .ip_addresses
                    .into_iter()
                    .map(|addr| addr.ip_address)
                    .filter(|addr| !is_loopback(addr))
                    .collect(),
            })
            .collect();
        let guest_ip_addresses = guest_network
            .iter()
            .flat_map(|iface| iface.ip_addresses.iter().cloned())
            .collect();
        Self {
            guest_network,
            guest_ip_addresses,
        }
    }
}

fn is_loopback(addr: &str) -> bool {
    addr.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

/// HA fields of a [`VmRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_ha_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_ha_group: Option<String>,
}

impl From<HaResourceItem> for HaInfo {
    fn from(item: HaResourceItem) -> Self {
        Self {
            vm_ha_state: item.state,
            vm_ha_group: item.group,
        }
    }
}

/// One row of a `VirtualMachine` import.
///
/// Optional enrichment fields are left out of the serialized record when they
/// were not requested or their lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VmRecord {
    pub vm_name: String,
    pub vm_id: u32,
    /// The node the VM currently runs on.
    pub vm_host: String,
    pub vm_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_cpu: Option<u32>,
    /// Memory in MiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_memory: Option<u64>,
    /// Disk size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_disk: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_uptime: Option<u64>,
    pub vm_tags: Vec<String>,
    pub vm_template: bool,
    #[serde(flatten)]
    pub guest: Option<GuestInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_description: Option<String>,
    #[serde(flatten)]
    pub ha: Option<HaInfo>,
}

impl VmRecord {
    /// Builds the base record of a VM listed on `node`.
    pub fn from_listing(node: &str, item: VmListItem) -> Self {
        let vm_tags = item
            .tags
            .as_deref()
            .map(|tags| {
                tags.split([';', ',', ' '])
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            vm_name: item.name.unwrap_or_else(|| format!("VM {}", item.vmid)),
            vm_id: item.vmid,
            vm_host: node.to_string(),
            vm_status: item.status,
            hardware_cpu: item.cpus,
            hardware_memory: item.maxmem.map(|bytes| bytes / MIB),
            hardware_disk: item.maxdisk,
            vm_uptime: item.uptime,
            vm_tags,
            vm_template: item.template.unwrap_or(false),
            guest: None,
            vm_description: None,
            ha: None,
        }
    }
}
