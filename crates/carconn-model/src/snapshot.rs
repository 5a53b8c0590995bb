//! Flat attribute snapshots for downstream publishers
//!
//! Publishers (message buses, dashboards) do not walk the typed entity
//! graph. They consume a flat list of `path → value` entries, where the path
//! joins entity and attribute names with `/`, e.g.
//! `charging/settings/battery_care_target_level`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::attribute::CONNECTOR_CUSTOM;

/// One attribute as seen by a publisher
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeEntry {
    /// Slash-separated location in the entity graph
    pub path: String,
    /// Current value, `null` when unset
    pub value: serde_json::Value,
    /// Descriptive tags (e.g. `connector_custom`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// When the value was last observed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl AttributeEntry {
    /// Entry for a structural value that is not backed by an attribute cell
    pub fn fixed(path: String, value: serde_json::Value) -> Self {
        Self {
            path,
            value,
            tags: Vec::new(),
            last_updated: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.tags.iter().any(|tag| tag == CONNECTOR_CUSTOM)
    }
}

/// Entities that can flatten their attributes into entries
pub trait Snapshot {
    /// Append this entity's entries below `prefix`
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>);

    /// All entries of this entity, rooted at the empty path
    fn snapshot(&self) -> Vec<AttributeEntry> {
        let mut out = Vec::new();
        self.collect("", &mut out);
        out
    }
}

/// Join a path prefix and a name with `/`
///
/// ```
/// # use carconn_model::snapshot::join_path;
/// assert_eq!(join_path("charging", "state"), "charging/state");
/// assert_eq!(join_path("", "vin"), "vin");
/// ```
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_nested_path() {
        assert_eq!(
            join_path(&join_path("charging", "settings"), "target_level"),
            "charging/settings/target_level"
        );
    }

    #[test]
    fn fixed_entry_is_not_custom() {
        let entry = AttributeEntry::fixed("type".to_string(), serde_json::json!("electric"));
        assert!(!entry.is_custom());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"path": "type", "value": "electric"}));
    }
}
