//! Wire protocol between zonebridge and its host process
//!
//! The host consumes one JSON object per line from this process. Four
//! message shapes exist, discriminated by a `type` field:
//!
//! ```text
//! {"type":"now_playing", "zone_id":"...", "title":"...", ...}
//! {"type":"zone_list",   "zones":[...]}
//! {"type":"status",      "state":"connected", "message":"..."}
//! {"type":"error",       "message":"..."}
//! ```
//!
//! Optional fields (`artwork`, `now_playing`, `message`) are omitted
//! entirely when absent, never emitted as `null`.
//!
//! [`OutputEmitter`] owns the output channel and guarantees one
//! newline-terminated line per [`emit`](OutputEmitter::emit) call, in call
//! order, with serialization failures downgraded to an `error` message
//! rather than a crash.

pub mod emitter;
pub mod message;

pub use emitter::OutputEmitter;
pub use message::{
    BridgeMessage, ConnectionState, PlaybackState, TrackMetadata, ZoneSummary,
    DISCONNECTED_ZONE_ID, INACTIVE_OUTPUT_PREFIX,
};
