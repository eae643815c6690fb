//! Domain model for resource pools from the `/pools` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A resource pool as listed by `/api2/json/pools`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PoolListItem {
    /// The pool identifier.
    pub poolid: String,
    /// Free-form comment (if set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Any other field of the row.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
