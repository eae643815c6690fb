use crate::core::{
    domain::{
        error::ProxmoxResult,
        model::{
            node::NodeListItem,
            vm::{
                GuestAgentResponse, GuestInfo, GuestInterfaceItem, HaInfo, HaResourceItem,
                VmConfigItem, VmListItem, VmRecord,
            },
        },
    },
    infrastructure::pve_api::{PveApi, get_as},
};

/// Per-VM follow-up lookups. Each enabled lookup costs one extra request per VM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmEnrichment {
    /// Network interfaces from the QEMU guest agent (needs `VM.Monitor`).
    pub guest_agent: bool,
    /// The description from the VM configuration.
    pub description: bool,
    /// The HA resource state.
    pub ha_state: bool,
}

impl VmEnrichment {
    pub fn all() -> Self {
        Self {
            guest_agent: true,
            description: true,
            ha_state: true,
        }
    }
}

/// Lists the QEMU virtual machines of every cluster node.
pub struct VmService<'a, A: PveApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: PveApi + ?Sized> VmService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// `GET /nodes`, then `GET /nodes/{node}/qemu` per online node, then the
    /// enabled lookups per VM.
    ///
    /// Records come out grouped by node in listing order, sorted by VM id
    /// within a node. A failed lookup leaves its fields out of the record; a
    /// failed node or VM listing fails the whole call.
    pub async fn list(&self, enrichment: VmEnrichment) -> ProxmoxResult<Vec<VmRecord>> {
        let nodes: Vec<NodeListItem> = get_as(self.api, "/nodes").await?;
        let mut records = Vec::new();

        for node in &nodes {
            if node.status == "offline" {
                tracing::warn!(node = %node.node, "Skipping offline node");
                continue;
            }

            let mut vms: Vec<VmListItem> =
                get_as(self.api, &format!("/nodes/{}/qemu", node.node)).await?;
            vms.sort_by_key(|vm| vm.vmid);
            tracing::debug!(node = %node.node, count = vms.len(), "Listed VMs");

            for vm in vms {
                let mut record = VmRecord::from_listing(&node.node, vm);
                self.enrich(&mut record, enrichment).await;
                records.push(record);
            }
        }

        tracing::info!(
            nodes = nodes.len(),
            count = records.len(),
            "Listed virtual machines"
        );
        Ok(records)
    }

    async fn enrich(&self, record: &mut VmRecord, enrichment: VmEnrichment) {
        let base = format!("/nodes/{}/qemu/{}", record.vm_host, record.vm_id);

        if enrichment.guest_agent {
            let path = format!("{base}/agent/network-get-interfaces");
            match get_as::<GuestAgentResponse<Vec<GuestInterfaceItem>>, _>(self.api, &path).await
            {
                Ok(response) => record.guest = Some(GuestInfo::from_interfaces(response.result)),
                Err(e) => {
                    tracing::warn!(vmid = record.vm_id, error = %e, "Guest agent lookup failed")
                }
            }
        }

        if enrichment.description {
            match get_as::<VmConfigItem, _>(self.api, &format!("{base}/config")).await {
                Ok(config) => record.vm_description = config.description,
                Err(e) => {
                    tracing::warn!(vmid = record.vm_id, error = %e, "Config lookup failed")
                }
            }
        }

        if enrichment.ha_state {
            let path = format!("/cluster/ha/resources/vm:{}", record.vm_id);
            match get_as::<HaResourceItem, _>(self.api, &path).await {
                Ok(resource) => record.ha = Some(HaInfo::from(resource)),
                // VMs without an HA resource answer with an error as well.
                Err(e) => tracing::debug!(vmid = record.vm_id, error = %e, "No HA state"),
            }
        }
    }
}
