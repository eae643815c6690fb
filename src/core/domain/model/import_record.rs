//! The flat key/value rows handed to the inventory import.

use crate::core::domain::error::{ProxmoxError, ProxmoxResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// One imported object: column name to value.
pub type ImportRecord = Map<String, Value>;

/// Serializes a typed listing item into an [`ImportRecord`].
pub fn to_record<T: Serialize>(item: &T) -> ProxmoxResult<ImportRecord> {
    match serde_json::to_value(item)? {
        Value::Object(map) => Ok(map),
        other => Err(ProxmoxError::Parse(format!(
            "Expected an object for an import record, got {other}"
        ))),
    }
}
