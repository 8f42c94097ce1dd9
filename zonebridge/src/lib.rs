//! # zonebridge - controller-to-host state bridge
//!
//! zonebridge sits between a callback-driven home-audio controller and an
//! unrelated host process, turning incremental zone/output events into a
//! canonical snapshot stream of line-delimited JSON:
//!
//! ```text
//! controller ─ subscription callbacks ─▶ StateReconciler ─▶ OutputEmitter ─▶ host stdin
//!                                            │
//!                                            └─ ArtworkFetcher ─ ArtworkCache
//! ```
//!
//! The pairing/discovery layer is an external collaborator: it feeds
//! [`SessionEvent`]s into the [`ConnectionSupervisor`] and supplies the
//! image-fetch capability on pairing success. Everything downstream of
//! that seam - reconciliation, artwork caching, emission - lives here.
//!
//! ```rust,ignore
//! use tokio::sync::mpsc;
//! use zonebridge::{ConnectionSupervisor, SessionEvent};
//!
//! # async fn run(pairing_layer: mpsc::Receiver<SessionEvent>) {
//! zonebridge::logging::init_logging_from_env().ok();
//!
//! let supervisor = ConnectionSupervisor::new(std::io::stdout());
//! supervisor.run(pairing_layer).await;
//! # }
//! ```
//!
//! All state is in-memory and rebuilt from the next subscription burst;
//! nothing survives a restart, and nothing in the core is fatal to the
//! process.

// Main exports
pub use error::BridgeError;
pub use session::SessionEvent;
pub use supervisor::ConnectionSupervisor;

// Re-export the capability seams and burst types the pairing layer needs
pub use bridge_artwork::{ImageKey, ImageRequest, ImageResponse, ImageScale, ImageSource, ImageSourceError};
pub use bridge_state::{
    BurstKind, Output, OutputBurst, OutputId, StateReconciler, Zone, ZoneBurst, ZoneId,
};

// Re-export the wire types for hosts embedding the crate
pub use bridge_protocol::{BridgeMessage, ConnectionState, OutputEmitter, PlaybackState, ZoneSummary};

// Logging infrastructure
pub mod logging;

// Internal modules
mod error;
mod session;
mod supervisor;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::session::SessionEvent;
    pub use crate::supervisor::ConnectionSupervisor;
    pub use bridge_artwork::{ImageKey, ImageSource};
    pub use bridge_protocol::{BridgeMessage, ConnectionState, PlaybackState};
    pub use bridge_state::{OutputBurst, StateReconciler, ZoneBurst};
}
