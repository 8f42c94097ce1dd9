//! Zone records and now-playing metadata extraction

use serde::{Deserialize, Serialize};

use bridge_artwork::ImageKey;
use bridge_protocol::{PlaybackState, TrackMetadata};

use super::id_types::{OutputId, ZoneId};

/// Three-line display form: title / artist / album
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeLine {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub line3: String,
}

/// Two-line display form: title / artist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoLine {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
}

/// One-line display form: title only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneLine {
    #[serde(default)]
    pub line1: String,
}

/// Now-playing record as delivered by the controller
///
/// The display text arrives in at most one of three shapes, ordered by
/// richness. [`metadata`](Self::metadata) extracts whichever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub three_line: Option<ThreeLine>,
    pub two_line: Option<TwoLine>,
    pub one_line: Option<OneLine>,
    pub image_key: Option<ImageKey>,
}

impl NowPlaying {
    /// Extract display text, first match wins: three-line, else two-line,
    /// else one-line, else empty strings. No merging across shapes.
    pub fn metadata(&self) -> TrackMetadata {
        if let Some(three) = &self.three_line {
            TrackMetadata::new(three.line1.clone(), three.line2.clone(), three.line3.clone())
        } else if let Some(two) = &self.two_line {
            TrackMetadata::new(two.line1.clone(), two.line2.clone(), "")
        } else if let Some(one) = &self.one_line {
            TrackMetadata::new(one.line1.clone(), "", "")
        } else {
            TrackMetadata::default()
        }
    }
}

/// A playback zone as delivered by the controller
///
/// Zone records are replaced wholesale on each change event; there is no
/// partial-field merge. The raw `state` string is kept as received and
/// normalized on read so an unknown state can never fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub zone_id: ZoneId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub outputs: Vec<OutputId>,
    #[serde(default)]
    pub now_playing: Option<NowPlaying>,
}

impl Zone {
    /// Normalized playback state; missing or unknown states read as stopped
    pub fn playback_state(&self) -> PlaybackState {
        self.state
            .as_deref()
            .map(PlaybackState::from_controller_state)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_with_state(state: Option<&str>) -> Zone {
        Zone {
            zone_id: ZoneId::new("z1"),
            display_name: "Living Room".to_string(),
            state: state.map(str::to_string),
            outputs: vec![],
            now_playing: None,
        }
    }

    #[test]
    fn test_playback_state_normalization() {
        assert_eq!(
            zone_with_state(Some("playing")).playback_state(),
            PlaybackState::Playing
        );
        assert_eq!(
            zone_with_state(Some("loading")).playback_state(),
            PlaybackState::Loading
        );
        assert_eq!(
            zone_with_state(Some("buffering")).playback_state(),
            PlaybackState::Stopped
        );
        assert_eq!(zone_with_state(None).playback_state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_metadata_three_line_wins() {
        let np = NowPlaying {
            three_line: Some(ThreeLine {
                line1: "Song".to_string(),
                line2: "Artist".to_string(),
                line3: "Album".to_string(),
            }),
            two_line: Some(TwoLine {
                line1: "Other".to_string(),
                line2: "Other Artist".to_string(),
            }),
            one_line: None,
            image_key: None,
        };
        let meta = np.metadata();
        assert_eq!(meta.title, "Song");
        assert_eq!(meta.artist, "Artist");
        assert_eq!(meta.album, "Album");
    }

    #[test]
    fn test_metadata_two_line_leaves_album_empty() {
        let np = NowPlaying {
            two_line: Some(TwoLine {
                line1: "Song".to_string(),
                line2: "Artist".to_string(),
            }),
            ..Default::default()
        };
        let meta = np.metadata();
        assert_eq!(meta.title, "Song");
        assert_eq!(meta.artist, "Artist");
        assert_eq!(meta.album, "");
    }

    #[test]
    fn test_metadata_one_line_title_only() {
        let np = NowPlaying {
            one_line: Some(OneLine {
                line1: "Radio Stream".to_string(),
            }),
            ..Default::default()
        };
        let meta = np.metadata();
        assert_eq!(meta.title, "Radio Stream");
        assert_eq!(meta.artist, "");
        assert_eq!(meta.album, "");
    }

    #[test]
    fn test_metadata_empty_when_no_shape_present() {
        let meta = NowPlaying::default().metadata();
        assert_eq!(meta, TrackMetadata::default());
    }

    #[test]
    fn test_zone_deserializes_with_missing_fields() {
        let zone: Zone = serde_json::from_str(r#"{"zone_id":"z1"}"#).unwrap();
        assert_eq!(zone.zone_id.as_str(), "z1");
        assert_eq!(zone.display_name, "");
        assert!(zone.outputs.is_empty());
        assert!(zone.now_playing.is_none());
        assert_eq!(zone.playback_state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_zone_deserializes_full_record() {
        let json = r#"{
            "zone_id": "z1",
            "display_name": "Living Room",
            "state": "playing",
            "outputs": ["o1", "o2"],
            "now_playing": {
                "three_line": {"line1": "Song", "line2": "Artist", "line3": "Album"},
                "image_key": "img1"
            }
        }"#;
        let zone: Zone = serde_json::from_str(json).unwrap();
        assert_eq!(zone.playback_state(), PlaybackState::Playing);
        assert_eq!(zone.outputs.len(), 2);
        let np = zone.now_playing.unwrap();
        assert_eq!(np.image_key.as_ref().unwrap().as_str(), "img1");
        assert_eq!(np.metadata().title, "Song");
    }
}
