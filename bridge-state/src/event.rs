//! Subscription burst types
//!
//! The controller delivers zone and output changes as bursts: a tag plus
//! zero or more of a full list, a changed list, a removed-id list and a
//! seek-delta list. Every list field is tolerant of being absent
//! (`#[serde(default)]`) so a sparse or malformed burst deserializes to
//! empty lists rather than an error.

use serde::{Deserialize, Serialize};

use crate::model::{Output, OutputId, Zone, ZoneId};

/// Tag attached to every subscription burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstKind {
    /// Initial full snapshot after (re-)subscribing
    Subscribed,
    /// Incremental change
    Changed,
    /// Transport-level failure reported by the subscription channel
    NetworkError,
    /// Connection-level failure reported by the subscription channel
    ConnectionError,
}

impl BurstKind {
    /// True for the kinds that carry data rather than a transport failure
    pub fn carries_data(self) -> bool {
        matches!(self, BurstKind::Subscribed | BurstKind::Changed)
    }
}

/// Seek-position delta for a single zone
///
/// Seek position is not part of the modeled state; these entries exist so
/// a seek-only burst can be recognized (and ignored) rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekChange {
    pub zone_id: ZoneId,
    #[serde(default)]
    pub seek_position: Option<i64>,
}

/// One burst of zone changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneBurst {
    pub kind: BurstKind,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub zones_changed: Vec<Zone>,
    #[serde(default)]
    pub zones_removed: Vec<ZoneId>,
    #[serde(default)]
    pub zones_seek_changed: Vec<SeekChange>,
}

impl ZoneBurst {
    pub fn subscribed(zones: Vec<Zone>) -> Self {
        Self {
            kind: BurstKind::Subscribed,
            zones,
            zones_changed: Vec::new(),
            zones_removed: Vec::new(),
            zones_seek_changed: Vec::new(),
        }
    }

    pub fn changed(zones_changed: Vec<Zone>) -> Self {
        Self {
            kind: BurstKind::Changed,
            zones: Vec::new(),
            zones_changed,
            zones_removed: Vec::new(),
            zones_seek_changed: Vec::new(),
        }
    }

    pub fn removed(zones_removed: Vec<ZoneId>) -> Self {
        Self {
            kind: BurstKind::Changed,
            zones: Vec::new(),
            zones_changed: Vec::new(),
            zones_removed,
            zones_seek_changed: Vec::new(),
        }
    }

    pub fn transport_error(kind: BurstKind) -> Self {
        Self {
            kind,
            zones: Vec::new(),
            zones_changed: Vec::new(),
            zones_removed: Vec::new(),
            zones_seek_changed: Vec::new(),
        }
    }
}

/// One burst of output changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputBurst {
    pub kind: BurstKind,
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default)]
    pub outputs_changed: Vec<Output>,
    #[serde(default)]
    pub outputs_removed: Vec<OutputId>,
}

impl OutputBurst {
    pub fn subscribed(outputs: Vec<Output>) -> Self {
        Self {
            kind: BurstKind::Subscribed,
            outputs,
            outputs_changed: Vec::new(),
            outputs_removed: Vec::new(),
        }
    }

    pub fn changed(outputs_changed: Vec<Output>) -> Self {
        Self {
            kind: BurstKind::Changed,
            outputs: Vec::new(),
            outputs_changed,
            outputs_removed: Vec::new(),
        }
    }

    pub fn removed(outputs_removed: Vec<OutputId>) -> Self {
        Self {
            kind: BurstKind::Changed,
            outputs: Vec::new(),
            outputs_changed: Vec::new(),
            outputs_removed,
        }
    }

    pub fn transport_error(kind: BurstKind) -> Self {
        Self {
            kind,
            outputs: Vec::new(),
            outputs_changed: Vec::new(),
            outputs_removed: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_kind_carries_data() {
        assert!(BurstKind::Subscribed.carries_data());
        assert!(BurstKind::Changed.carries_data());
        assert!(!BurstKind::NetworkError.carries_data());
        assert!(!BurstKind::ConnectionError.carries_data());
    }

    #[test]
    fn test_zone_burst_missing_lists_default_to_empty() {
        let burst: ZoneBurst = serde_json::from_str(r#"{"kind":"changed"}"#).unwrap();
        assert_eq!(burst.kind, BurstKind::Changed);
        assert!(burst.zones.is_empty());
        assert!(burst.zones_changed.is_empty());
        assert!(burst.zones_removed.is_empty());
        assert!(burst.zones_seek_changed.is_empty());
    }

    #[test]
    fn test_seek_only_burst_deserializes() {
        let json = r#"{
            "kind": "changed",
            "zones_seek_changed": [{"zone_id": "z1", "seek_position": 42}]
        }"#;
        let burst: ZoneBurst = serde_json::from_str(json).unwrap();
        assert_eq!(burst.zones_seek_changed.len(), 1);
        assert_eq!(burst.zones_seek_changed[0].seek_position, Some(42));
    }

    #[test]
    fn test_output_burst_missing_lists_default_to_empty() {
        let burst: OutputBurst = serde_json::from_str(r#"{"kind":"subscribed"}"#).unwrap();
        assert!(burst.outputs.is_empty());
        assert!(burst.outputs_changed.is_empty());
        assert!(burst.outputs_removed.is_empty());
    }
}
