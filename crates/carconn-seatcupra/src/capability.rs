//! Vehicle capabilities
//!
//! The vendor reports which features a vehicle supports as a list of
//! capability records. A capability is usable when the vendor lists no
//! blocking status codes for it and it has not expired.

use std::collections::BTreeMap;

use carconn_model::{join_path, AttributeEntry, Snapshot, CONNECTOR_CUSTOM};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single capability record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    /// Capability identifier (e.g. "charging", "climatisation")
    pub id: String,
    /// Blocking status codes; empty when the capability is usable
    #[serde(default)]
    pub status: Vec<u32>,
    /// Whether the user may disable this capability
    #[serde(default)]
    pub user_disabling_allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl Capability {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Vec::new(),
            user_disabling_allowed: false,
            expiration_date: None,
        }
    }

    /// Whether the capability can be used at `now`
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_empty() && self.expiration_date.map_or(true, |expiry| expiry > now)
    }
}

/// All capabilities of a vehicle, keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    entries: BTreeMap<String, Capability>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all capabilities with the ones just reported
    pub fn update(&mut self, reported: impl IntoIterator<Item = Capability>) {
        self.entries = reported
            .into_iter()
            .map(|capability| (capability.id.clone(), capability))
            .collect();
    }

    pub fn get(&self, id: &str) -> Option<&Capability> {
        self.entries.get(id)
    }

    /// Whether `id` is reported and usable right now
    pub fn is_supported(&self, id: &str) -> bool {
        self.get(id)
            .is_some_and(|capability| capability.is_usable_at(Utc::now()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Snapshot for Capabilities {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        let prefix = join_path(prefix, "capabilities");
        for capability in self.entries.values() {
            let mut entry = AttributeEntry::fixed(
                join_path(&prefix, &capability.id),
                serde_json::to_value(capability).unwrap_or(serde_json::Value::Null),
            );
            entry.tags.push(CONNECTOR_CUSTOM.to_string());
            out.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_decode_capability_list() {
        let json = r#"[
            {"id": "charging", "status": [], "userDisablingAllowed": true},
            {"id": "climatisation", "status": [1007]},
            {"id": "honkAndFlash", "expirationDate": "2001-01-01T00:00:00Z"}
        ]"#;
        let reported: Vec<Capability> = serde_json::from_str(json).unwrap();

        let mut capabilities = Capabilities::new();
        capabilities.update(reported);
        assert_eq!(capabilities.len(), 3);
        assert!(capabilities.is_supported("charging"));
        assert!(!capabilities.is_supported("climatisation"));
        assert!(!capabilities.is_supported("honkAndFlash"));
        assert!(!capabilities.is_supported("parkingPosition"));
        assert!(capabilities.get("charging").unwrap().user_disabling_allowed);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let mut capability = Capability::new("charging");
        capability.expiration_date = Some(now + Duration::days(30));
        assert!(capability.is_usable_at(now));
        assert!(!capability.is_usable_at(now + Duration::days(31)));
    }

    #[test]
    fn test_update_replaces_previous_set() {
        let mut capabilities = Capabilities::new();
        capabilities.update([Capability::new("charging"), Capability::new("state")]);
        capabilities.update([Capability::new("state")]);
        assert_eq!(capabilities.len(), 1);
        assert!(capabilities.get("charging").is_none());
    }

    #[test]
    fn test_snapshot_entries_are_custom() {
        let mut capabilities = Capabilities::new();
        capabilities.update([Capability::new("charging")]);
        let entries = capabilities.snapshot();
        assert_eq!(entries[0].path, "capabilities/charging");
        assert!(entries[0].is_custom());
    }
}
