use crate::core::{
    domain::{
        error::ProxmoxResult,
        model::{import_record::ImportRecord, pool::PoolListItem},
    },
    infrastructure::pve_api::{PveApi, get_as},
};

/// Lists the resource pools (`Pools` objects).
pub struct PoolService<'a, A: PveApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: PveApi + ?Sized> PoolService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// One `GET /pools`.
    pub async fn list(&self) -> ProxmoxResult<Vec<PoolListItem>> {
        let pools: Vec<PoolListItem> = get_as(self.api, "/pools").await?;
        tracing::info!(count = pools.len(), "Listed pools");
        Ok(pools)
    }

    /// The pool list as import records, one per pool, every field kept as
    /// the API returned it.
    pub async fn records(&self) -> ProxmoxResult<Vec<ImportRecord>> {
        let rows: Vec<ImportRecord> = get_as(self.api, "/pools").await?;
        tracing::info!(count = rows.len(), "Listed pools");
        Ok(rows)
    }
}
