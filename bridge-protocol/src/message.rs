//! Message types shared with the host process

use serde::{Deserialize, Serialize};

/// Literal prefix for synthetic zone ids derived from unbound outputs
pub const INACTIVE_OUTPUT_PREFIX: &str = "output:";

/// Sentinel zone id carried by the empty now-playing message emitted when
/// pairing with the controller is lost. The host treats it as a signal to
/// drop its current-track display.
pub const DISCONNECTED_ZONE_ID: &str = "__disconnected__";

/// Playback state as it appears on the wire
///
/// This is the normalized state set. Controller-reported states outside it
/// collapse to `Stopped` via [`from_controller_state`](Self::from_controller_state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Currently playing audio
    Playing,
    /// Playback is paused
    Paused,
    /// Buffering or switching tracks
    Loading,
    /// Nothing queued or playback halted
    Stopped,
}

impl PlaybackState {
    /// Normalize a controller-reported state string
    ///
    /// Total function: `"playing"`, `"paused"` and `"loading"` map to their
    /// variants; anything else (including `"stopped"`, unknown values, or a
    /// missing state handled by the caller) maps to `Stopped`.
    pub fn from_controller_state(state: &str) -> Self {
        match state {
            "playing" => PlaybackState::Playing,
            "paused" => PlaybackState::Paused,
            "loading" => PlaybackState::Loading,
            _ => PlaybackState::Stopped,
        }
    }

    /// True for the states in which a zone has presentable now-playing data
    pub fn is_active(self) -> bool {
        matches!(self, PlaybackState::Playing | PlaybackState::Paused)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Stopped
    }
}

/// Track display text attached to a zone-list entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl TrackMetadata {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
        }
    }
}

/// One entry of the zone-list snapshot
///
/// Real zones carry their controller-assigned id; outputs not bound to any
/// zone appear as synthetic entries with an [`INACTIVE_OUTPUT_PREFIX`]ed id
/// and never carry `now_playing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zone_id: String,
    pub display_name: String,
    pub state: PlaybackState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now_playing: Option<TrackMetadata>,
}

/// Connection status as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Looking for a controller on the network
    Discovering,
    /// Controller found but the extension has not been authorized
    NotAuthorized,
    /// Paired and receiving events
    Connected,
    /// Pairing lost or transport failed
    Disconnected,
}

/// A message on its way to the host process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeMessage {
    NowPlaying {
        zone_id: String,
        title: String,
        artist: String,
        album: String,
        state: PlaybackState,
        #[serde(skip_serializing_if = "Option::is_none")]
        artwork: Option<String>,
    },
    ZoneList {
        zones: Vec<ZoneSummary>,
    },
    Status {
        state: ConnectionState,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        message: String,
    },
}

impl BridgeMessage {
    /// The empty now-playing message for a zone with nothing presentable
    pub fn stopped_now_playing(zone_id: impl Into<String>) -> Self {
        BridgeMessage::NowPlaying {
            zone_id: zone_id.into(),
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            state: PlaybackState::Stopped,
            artwork: None,
        }
    }

    /// The now-playing message emitted when pairing is lost
    pub fn disconnected_now_playing() -> Self {
        Self::stopped_now_playing(DISCONNECTED_ZONE_ID)
    }

    /// A status message with no detail text
    pub fn status(state: ConnectionState) -> Self {
        BridgeMessage::Status {
            state,
            message: None,
        }
    }

    /// A status message with a human-readable detail
    pub fn status_with_message(state: ConnectionState, message: impl Into<String>) -> Self {
        BridgeMessage::Status {
            state,
            message: Some(message.into()),
        }
    }
}
