//! Serde helpers for the loosely typed values of the PVE API.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialization of PVE booleans, which arrive as `0`/`1`, `"0"`/`"1"`,
/// JSON booleans or not at all.
pub mod pve_bool {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Bool(b)) => Some(b),
            Some(Value::Number(n)) => Some(n.as_u64().is_some_and(|n| n != 0)),
            Some(Value::String(s)) => match s.as_str() {
                "" => None,
                "0" => Some(false),
                _ => Some(true),
            },
            _ => None,
        })
    }
}
