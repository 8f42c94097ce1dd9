//! State reconciliation engine
//!
//! The [`StateReconciler`] owns the authoritative zone and output maps,
//! applies incremental bursts, and emits derived snapshots through the
//! [`OutputEmitter`]. It is driven from a single cooperative event loop;
//! nothing here is shared or locked.
//!
//! Emission policy, per mutating burst:
//!
//! 1. exactly one `zone_list` message (skipped only when the resulting
//!    list is empty) - there is no dirty-checking or suppression;
//! 2. one `now_playing` message per upserted zone: rich (with artwork)
//!    when the zone is playing or paused, the empty stopped form
//!    otherwise. Every active zone is emitted, not just the first, so
//!    artwork is pre-warmed for any zone the host may later display.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use bridge_artwork::ArtworkFetcher;
use bridge_protocol::{
    BridgeMessage, ConnectionState, OutputEmitter, PlaybackState, ZoneSummary,
    INACTIVE_OUTPUT_PREFIX,
};

use crate::event::{OutputBurst, ZoneBurst};
use crate::model::{NowPlaying, Output, OutputId, Zone, ZoneId};

/// Merges subscription bursts into a consistent zone/output view
pub struct StateReconciler<W: Write> {
    zones: HashMap<ZoneId, Zone>,
    outputs: HashMap<OutputId, Output>,
    emitter: OutputEmitter<W>,
    artwork: ArtworkFetcher,
}

impl<W: Write> StateReconciler<W> {
    pub fn new(emitter: OutputEmitter<W>, artwork: ArtworkFetcher) -> Self {
        Self {
            zones: HashMap::new(),
            outputs: HashMap::new(),
            emitter,
            artwork,
        }
    }

    /// Apply one burst of zone changes
    ///
    /// `Subscribed`/`Changed` bursts upsert full zone records and delete
    /// removed ids; a burst carrying only seek deltas is a no-op (seek
    /// position is not modeled). Transport-error bursts surface a
    /// `disconnected` status and leave the maps untouched - whether to
    /// clear them is the supervisor's decision, made on unpairing.
    pub async fn apply_zone_burst(&mut self, burst: ZoneBurst) {
        let ZoneBurst {
            kind,
            zones,
            zones_changed,
            zones_removed,
            zones_seek_changed,
        } = burst;

        if !kind.carries_data() {
            tracing::warn!("zone subscription transport error: {kind:?}");
            self.emitter.emit(&BridgeMessage::status_with_message(
                ConnectionState::Disconnected,
                "zone subscription lost",
            ));
            return;
        }

        let upserts: Vec<Zone> = zones.into_iter().chain(zones_changed).collect();

        if upserts.is_empty() && zones_removed.is_empty() {
            tracing::debug!(
                "ignoring zone burst with no zone changes ({} seek deltas)",
                zones_seek_changed.len()
            );
            return;
        }

        for zone in &upserts {
            tracing::debug!("upserting zone {} ({})", zone.zone_id, zone.display_name);
            self.zones.insert(zone.zone_id.clone(), zone.clone());
        }
        for zone_id in &zones_removed {
            if self.zones.remove(zone_id).is_none() {
                tracing::debug!("removal of unknown zone {zone_id}");
            }
        }

        self.emit_zone_list();

        for zone in &upserts {
            self.emit_now_playing(zone).await;
        }
    }

    /// Apply one burst of output changes
    pub async fn apply_output_burst(&mut self, burst: OutputBurst) {
        let OutputBurst {
            kind,
            outputs,
            outputs_changed,
            outputs_removed,
        } = burst;

        if !kind.carries_data() {
            tracing::warn!("output subscription transport error: {kind:?}");
            self.emitter.emit(&BridgeMessage::status_with_message(
                ConnectionState::Disconnected,
                "output subscription lost",
            ));
            return;
        }

        let upserts: Vec<Output> = outputs.into_iter().chain(outputs_changed).collect();

        if upserts.is_empty() && outputs_removed.is_empty() {
            tracing::debug!("ignoring output burst with no output changes");
            return;
        }

        for output in &upserts {
            tracing::debug!(
                "upserting output {} ({})",
                output.output_id,
                output.display_name
            );
            self.outputs.insert(output.output_id.clone(), output.clone());
        }
        for output_id in &outputs_removed {
            if self.outputs.remove(output_id).is_none() {
                tracing::debug!("removal of unknown output {output_id}");
            }
        }

        self.emit_zone_list();
    }

    /// Derive the current zone-list snapshot
    ///
    /// Union of one entry per zone and one synthetic entry per output not
    /// referenced by any zone's output list. Map iteration order is
    /// arbitrary, so entries are sorted by id for a stable wire order.
    pub fn zone_list(&self) -> Vec<ZoneSummary> {
        let referenced: HashSet<&OutputId> = self
            .zones
            .values()
            .flat_map(|zone| zone.outputs.iter())
            .collect();

        let mut entries: Vec<ZoneSummary> = self.zones.values().map(summarize_zone).collect();

        for output in self.outputs.values() {
            if referenced.contains(&output.output_id) {
                continue;
            }
            entries.push(ZoneSummary {
                zone_id: format!("{INACTIVE_OUTPUT_PREFIX}{}", output.output_id),
                display_name: format!("{} (Inactive)", output.display_name),
                state: PlaybackState::Stopped,
                now_playing: None,
            });
        }

        entries.sort_by(|a, b| a.zone_id.cmp(&b.zone_id));
        entries
    }

    /// Drop all session state: zone/output maps, artwork cache, and the
    /// image capability (image keys die with the pairing session)
    pub fn clear_session(&mut self) {
        self.zones.clear();
        self.outputs.clear();
        self.artwork.clear_cache();
        self.artwork.clear_source();
    }

    /// Emit a message through the reconciler's output channel
    ///
    /// Used by the supervisor for status/error messages so everything
    /// reaches the host over the same channel, in order.
    pub fn emit(&mut self, message: &BridgeMessage) {
        self.emitter.emit(message);
    }

    /// Access the artwork fetcher (capability installation)
    pub fn artwork_mut(&mut self) -> &mut ArtworkFetcher {
        &mut self.artwork
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn contains_zone(&self, zone_id: &ZoneId) -> bool {
        self.zones.contains_key(zone_id)
    }

    fn emit_zone_list(&mut self) {
        let zones = self.zone_list();
        if zones.is_empty() {
            tracing::debug!("zone list empty, skipping emission");
            return;
        }
        self.emitter.emit(&BridgeMessage::ZoneList { zones });
    }

    async fn emit_now_playing(&mut self, zone: &Zone) {
        let state = zone.playback_state();

        let message = match (&zone.now_playing, state.is_active()) {
            (Some(now_playing), true) => {
                let meta = now_playing.metadata();
                let artwork = self.artwork.fetch(now_playing.image_key.as_ref()).await;
                BridgeMessage::NowPlaying {
                    zone_id: zone.zone_id.as_str().to_string(),
                    title: meta.title,
                    artist: meta.artist,
                    album: meta.album,
                    state,
                    artwork,
                }
            }
            _ => BridgeMessage::stopped_now_playing(zone.zone_id.as_str()),
        };

        self.emitter.emit(&message);
    }
}

/// Map a zone record to its snapshot entry
///
/// `now_playing` is attached only when the zone is playing or paused.
fn summarize_zone(zone: &Zone) -> ZoneSummary {
    let state = zone.playback_state();
    let now_playing = if state.is_active() {
        zone.now_playing.as_ref().map(NowPlaying::metadata)
    } else {
        None
    };

    ZoneSummary {
        zone_id: zone.zone_id.as_str().to_string(),
        display_name: zone.display_name.clone(),
        state,
        now_playing,
    }
}
