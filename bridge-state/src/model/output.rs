//! Output endpoint records

use serde::{Deserialize, Serialize};

use super::id_types::{OutputId, ZoneId};

/// Where an output currently stands relative to the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStatus {
    /// Actively part of a zone
    Selected,
    /// Powered but idle
    Standby,
    /// Known but not in use
    Deselected,
    /// Anything the controller reports that we do not model
    #[default]
    #[serde(other)]
    Indeterminate,
}

/// An audio endpoint, possibly bound to a zone or standing alone
///
/// Outputs only surface devices that exist but are not part of any active
/// zone; a bound output is represented through its owning zone instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub output_id: OutputId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub zone_id: Option<ZoneId>,
    #[serde(default)]
    pub status: OutputStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_deserializes_with_missing_fields() {
        let output: Output = serde_json::from_str(r#"{"output_id":"o1"}"#).unwrap();
        assert_eq!(output.output_id.as_str(), "o1");
        assert_eq!(output.display_name, "");
        assert!(output.zone_id.is_none());
        assert_eq!(output.status, OutputStatus::Indeterminate);
    }

    #[test]
    fn test_output_status_known_values() {
        let output: Output =
            serde_json::from_str(r#"{"output_id":"o1","status":"standby"}"#).unwrap();
        assert_eq!(output.status, OutputStatus::Standby);
    }

    #[test]
    fn test_output_status_unknown_value_is_indeterminate() {
        let output: Output =
            serde_json::from_str(r#"{"output_id":"o1","status":"warming_up"}"#).unwrap();
        assert_eq!(output.status, OutputStatus::Indeterminate);
    }
}
