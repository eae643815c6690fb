mod proxmox_csrf_token;
mod proxmox_host;
mod proxmox_password;
mod proxmox_port;
mod proxmox_realm;
mod proxmox_scheme;
mod proxmox_ticket;
mod proxmox_url;
mod proxmox_username;

pub use proxmox_csrf_token::{CSRF_HEADER_NAME, ProxmoxCSRFToken};
pub use proxmox_host::ProxmoxHost;
pub use proxmox_password::ProxmoxPassword;
pub use proxmox_port::ProxmoxPort;
pub use proxmox_realm::ProxmoxRealm;
pub use proxmox_scheme::ProxmoxScheme;
pub use proxmox_ticket::{AUTH_COOKIE_NAME, ProxmoxTicket};
pub use proxmox_url::{API_BASE_PATH, ProxmoxUrl};
pub use proxmox_username::ProxmoxUsername;
