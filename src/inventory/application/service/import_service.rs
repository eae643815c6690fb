use crate::{
    core::{
        domain::{
            error::{ProxmoxError, ProxmoxResult},
            model::import_record::{ImportRecord, to_record},
        },
        infrastructure::{api_client::ApiClient, pve_api::PveApi},
    },
    inventory::application::{
        import_settings::{ImportSettings, ObjectType},
        service::{
            node_service::NodeService, pool_service::PoolService,
            vm_service::{VmEnrichment, VmService},
        },
    },
};
use std::collections::{HashMap, HashSet};

/// Key column of an import when the caller does not pick one.
pub const DEFAULT_KEY_COLUMN: &str = "vm_name";

/// Fetches the records of one object type through an authenticated API.
pub async fn collect_records<A>(
    api: &A,
    object_type: ObjectType,
    enrichment: VmEnrichment,
) -> ProxmoxResult<Vec<ImportRecord>>
where
    A: PveApi + ?Sized,
{
    match object_type {
        ObjectType::VirtualMachine => VmService::new(api)
            .list(enrichment)
            .await?
            .iter()
            .map(to_record)
            .collect(),
        ObjectType::HostSystem => NodeService::new(api).records().await,
        ObjectType::Pools => PoolService::new(api).records().await,
    }
}

/// Fails with [`ProxmoxError::DuplicateKey`] on the first repeated value of
/// `column`. Records without the column are not checked.
pub fn ensure_unique_keys(records: &[ImportRecord], column: &str) -> ProxmoxResult<()> {
    let mut seen = HashSet::new();
    for value in records.iter().filter_map(|record| record.get(column)) {
        let key = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if !seen.insert(key.clone()) {
            return Err(ProxmoxError::DuplicateKey {
                column: column.to_string(),
                value: key,
            });
        }
    }
    Ok(())
}

/// Column names over all records, in order of first appearance.
pub fn columns_of(records: &[ImportRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|record| record.keys())
        .filter(|key| seen.insert(key.as_str()))
        .cloned()
        .collect()
}

/// A PVE import source: one configured client, one object type.
///
/// Each fetch logs in, lists, and logs out again, whatever the outcome of the
/// listing.
pub struct ImportSource {
    settings: ImportSettings,
    api_client: ApiClient,
}

impl ImportSource {
    /// Display name of the source.
    pub const NAME: &'static str = "Proxmox Virtual Environment (PVE)";

    pub fn new(settings: ImportSettings) -> ProxmoxResult<Self> {
        let api_client = ApiClient::new(settings.connection()?, settings.client_config())?;
        Ok(Self {
            settings,
            api_client,
        })
    }

    /// Builds the source from the framework's settings map.
    pub fn from_settings_map(settings: &HashMap<String, String>) -> ProxmoxResult<Self> {
        Self::new(ImportSettings::from_map(settings)?)
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    pub fn default_key_column() -> &'static str {
        DEFAULT_KEY_COLUMN
    }

    /// The column identifying a record of this source's object type.
    pub fn key_column(&self) -> &'static str {
        self.settings.object_type.key_column()
    }

    /// Logs in, fetches every record of the configured object type, logs out.
    ///
    /// # Errors
    /// Login and listing errors are returned as they are; a repeated key column
    /// value yields `DuplicateKey`.
    #[tracing::instrument(skip(self), fields(object_type = %self.settings.object_type))]
    pub async fn fetch_data(&self) -> ProxmoxResult<Vec<ImportRecord>> {
        let object_type = self.settings.object_type;
        self.api_client.login().await?;
        let result = collect_records(&self.api_client, object_type, self.settings.enrichment).await;
        self.api_client.logout().await;

        let records = result?;
        ensure_unique_keys(&records, self.key_column())?;
        tracing::info!(count = records.len(), "Import data fetched");
        Ok(records)
    }

    /// Column names of a fresh fetch.
    pub async fn list_columns(&self) -> ProxmoxResult<Vec<String>> {
        Ok(columns_of(&self.fetch_data().await?))
    }
}
