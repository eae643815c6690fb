pub mod import_settings;
pub mod service;
