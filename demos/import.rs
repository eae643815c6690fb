//! Runs one import against a live cluster and prints the records as JSON lines.
//!
//! Settings come from `PVE_*` environment variables (or a `.env` file), e.g.
//! `PVE_HOST`, `PVE_USERNAME`, `PVE_PASSWORD`, `PVE_REALM`, `PVE_OBJECT_TYPE`,
//! `PVE_VM_GUEST_AGENT=y`, `PVE_SSL_VERIFY_PEER=n`.
//!
//! ```text
//! RUST_LOG=pve_import=debug cargo run --example import
//! ```

use pve_import::{ImportSource, ProxmoxResult};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

const KEYS: &[&str] = &[
    "object_type",
    "vm_guest_agent",
    "vm_description",
    "vm_ha",
    "scheme",
    "ssl_verify_peer",
    "ssl_verify_host",
    "host",
    "port",
    "realm",
    "username",
    "password",
];

#[tokio::main]
async fn main() -> ProxmoxResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings: HashMap<String, String> = KEYS
        .iter()
        .filter_map(|key| {
            std::env::var(format!("PVE_{}", key.to_uppercase()))
                .ok()
                .map(|value| (key.to_string(), value))
        })
        .collect();

    let source = ImportSource::from_settings_map(&settings)?;
    println!("{} ({})", ImportSource::NAME, source.settings().object_type);
    println!("Key column: {}", source.key_column());

    for record in source.fetch_data().await? {
        println!("{}", serde_json::Value::Object(record));
    }

    Ok(())
}
