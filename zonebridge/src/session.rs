//! Pairing lifecycle events

use std::fmt;
use std::sync::Arc;

use bridge_artwork::ImageSource;
use bridge_state::{OutputBurst, ZoneBurst};

/// Everything the pairing layer can tell the core
///
/// The pairing/discovery handshake itself is an external collaborator;
/// its adapter translates controller callbacks into this enum and sends
/// them over a channel to the [`ConnectionSupervisor`]. The image-fetch
/// capability travels inside `Paired` because image keys are only
/// meaningful within the pairing session that issued them.
///
/// [`ConnectionSupervisor`]: crate::ConnectionSupervisor
pub enum SessionEvent {
    /// Pairing succeeded; capability handles are ready
    Paired {
        /// Human-readable controller name, for the status message
        core_name: String,
        /// Image-fetch capability scoped to this session
        images: Arc<dyn ImageSource>,
    },
    /// Pairing lost; all session-scoped state must be dropped
    Unpaired { core_name: String },
    /// One burst of zone changes from the subscription channel
    Zones(ZoneBurst),
    /// One burst of output changes from the subscription channel
    Outputs(OutputBurst),
}

impl fmt::Debug for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Paired { core_name, .. } => f
                .debug_struct("Paired")
                .field("core_name", core_name)
                .finish_non_exhaustive(),
            SessionEvent::Unpaired { core_name } => f
                .debug_struct("Unpaired")
                .field("core_name", core_name)
                .finish(),
            SessionEvent::Zones(burst) => f.debug_tuple("Zones").field(burst).finish(),
            SessionEvent::Outputs(burst) => f.debug_tuple("Outputs").field(burst).finish(),
        }
    }
}
