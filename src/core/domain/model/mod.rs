pub mod client_config;
pub mod import_record;
pub mod node;
pub mod pool;
pub mod proxmox_auth;
pub mod proxmox_connection;
pub mod serde_helpers;
pub mod vm;
