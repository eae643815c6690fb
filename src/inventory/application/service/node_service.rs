use crate::core::{
    domain::{
        error::ProxmoxResult,
        model::{import_record::ImportRecord, node::NodeListItem},
    },
    infrastructure::pve_api::{PveApi, get_as},
};

/// Lists the cluster nodes (`HostSystem` objects).
pub struct NodeService<'a, A: PveApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: PveApi + ?Sized> NodeService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// One `GET /nodes`.
    pub async fn list(&self) -> ProxmoxResult<Vec<NodeListItem>> {
        let nodes: Vec<NodeListItem> = get_as(self.api, "/nodes").await?;
        tracing::info!(count = nodes.len(), "Listed nodes");
        Ok(nodes)
    }

    /// The node list as import records, one per node, each row exactly as
    /// the API returned it.
    pub async fn records(&self) -> ProxmoxResult<Vec<ImportRecord>> {
        let rows: Vec<ImportRecord> = get_as(self.api, "/nodes").await?;
        tracing::info!(count = rows.len(), "Listed nodes");
        Ok(rows)
    }
}
