//! Connection supervision
//!
//! The supervisor owns the reconciler and drives it from a single stream
//! of [`SessionEvent`]s. One event is processed at a time, in delivery
//! order, on one cooperative task - the discipline that lets the
//! reconciler and the artwork cache go entirely lock-free.

use std::io::Write;

use tokio::sync::mpsc;

use bridge_artwork::ArtworkFetcher;
use bridge_protocol::{BridgeMessage, ConnectionState, OutputEmitter};
use bridge_state::StateReconciler;

use crate::session::SessionEvent;

/// Owns pairing lifecycle and wires subscription bursts into the core
pub struct ConnectionSupervisor<W: Write> {
    reconciler: StateReconciler<W>,
    paired_core: Option<String>,
}

impl<W: Write> ConnectionSupervisor<W> {
    /// Build a supervisor emitting to `sink` with default artwork bounds
    pub fn new(sink: W) -> Self {
        Self::with_reconciler(StateReconciler::new(
            OutputEmitter::new(sink),
            ArtworkFetcher::new(),
        ))
    }

    /// Build a supervisor around a pre-configured reconciler
    pub fn with_reconciler(reconciler: StateReconciler<W>) -> Self {
        Self {
            reconciler,
            paired_core: None,
        }
    }

    /// Consume session events until the channel closes
    ///
    /// Emits a `discovering` status up front so the host shows progress
    /// while the pairing layer looks for a controller. A failure while
    /// handling one event never stops the loop; the subscription must
    /// survive a malformed burst.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) {
        self.reconciler
            .emit(&BridgeMessage::status(ConnectionState::Discovering));

        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }

        tracing::info!("session event channel closed, supervisor stopping");
    }

    /// Process a single session event
    pub async fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Paired { core_name, images } => {
                tracing::info!("paired with controller {core_name}");
                self.reconciler.artwork_mut().set_source(images);
                self.reconciler.emit(&BridgeMessage::status_with_message(
                    ConnectionState::Connected,
                    format!("Paired with {core_name}"),
                ));
                self.paired_core = Some(core_name);
            }
            SessionEvent::Unpaired { core_name } => {
                tracing::info!("lost pairing with controller {core_name}");
                self.paired_core = None;
                // Image keys are scoped to the dead session; drop maps,
                // cache and capability together
                self.reconciler.clear_session();
                self.reconciler.emit(&BridgeMessage::disconnected_now_playing());
                self.reconciler.emit(&BridgeMessage::status_with_message(
                    ConnectionState::Disconnected,
                    format!("Lost pairing with {core_name}"),
                ));
            }
            SessionEvent::Zones(burst) => {
                self.reconciler.apply_zone_burst(burst).await;
            }
            SessionEvent::Outputs(burst) => {
                self.reconciler.apply_output_burst(burst).await;
            }
        }
    }

    /// Name of the currently paired controller, if any
    pub fn paired_core(&self) -> Option<&str> {
        self.paired_core.as_deref()
    }

    pub fn is_paired(&self) -> bool {
        self.paired_core.is_some()
    }

    /// Access the underlying reconciler (queries, manual emission)
    pub fn reconciler_mut(&mut self) -> &mut StateReconciler<W> {
        &mut self.reconciler
    }
}
