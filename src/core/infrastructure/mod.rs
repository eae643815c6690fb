pub mod api_client;
pub mod pve_api;
