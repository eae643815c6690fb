pub mod import_service;
pub mod node_service;
pub mod pool_service;
pub mod vm_service;
