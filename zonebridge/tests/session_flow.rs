//! End-to-end session lifecycle tests
//!
//! Drives the supervisor the way the pairing layer would - over a channel
//! of session events - and asserts on the exact line sequence the host
//! process would read.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use zonebridge::{
    BridgeMessage, ConnectionState, ConnectionSupervisor, ImageKey, ImageRequest, ImageResponse,
    ImageSource, ImageSourceError, OutputBurst, PlaybackState, SessionEvent, Zone, ZoneBurst,
    ZoneId,
};

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedSink {
    fn take_messages(&self) -> Vec<BridgeMessage> {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

struct StaticSource;

#[async_trait]
impl ImageSource for StaticSource {
    async fn fetch_image(
        &self,
        _key: &ImageKey,
        _request: &ImageRequest,
    ) -> Result<ImageResponse, ImageSourceError> {
        Ok(ImageResponse {
            content_type: Some("image/png".to_string()),
            data: b"png".to_vec(),
        })
    }
}

fn playing_zone(id: &str, name: &str) -> Zone {
    serde_json::from_value(serde_json::json!({
        "zone_id": id,
        "display_name": name,
        "state": "playing",
        "now_playing": {
            "three_line": {"line1": "Song", "line2": "Artist", "line3": "Album"},
            "image_key": "img1"
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_run_emits_discovering_on_startup() {
    let sink = SharedSink::default();
    let supervisor = ConnectionSupervisor::new(sink.clone());

    let (tx, rx) = mpsc::channel(8);
    drop(tx);
    supervisor.run(rx).await;

    let messages = sink.take_messages();
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        BridgeMessage::Status { state, .. } => {
            assert_eq!(*state, ConnectionState::Discovering);
        }
        other => panic!("expected status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pairing_installs_capability_and_reports_connected() {
    let sink = SharedSink::default();
    let mut supervisor = ConnectionSupervisor::new(sink.clone());

    supervisor
        .handle(SessionEvent::Paired {
            core_name: "Music Room Core".to_string(),
            images: Arc::new(StaticSource),
        })
        .await;

    assert!(supervisor.is_paired());
    assert_eq!(supervisor.paired_core(), Some("Music Room Core"));

    let messages = sink.take_messages();
    match &messages[0] {
        BridgeMessage::Status { state, message } => {
            assert_eq!(*state, ConnectionState::Connected);
            assert_eq!(message.as_deref(), Some("Paired with Music Room Core"));
        }
        other => panic!("expected status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zone_burst_flows_through_to_emission() {
    let sink = SharedSink::default();
    let mut supervisor = ConnectionSupervisor::new(sink.clone());

    supervisor
        .handle(SessionEvent::Paired {
            core_name: "Core".to_string(),
            images: Arc::new(StaticSource),
        })
        .await;
    sink.take_messages();

    supervisor
        .handle(SessionEvent::Zones(ZoneBurst::subscribed(vec![
            playing_zone("z1", "Living Room"),
        ])))
        .await;

    let messages = sink.take_messages();
    assert_eq!(messages.len(), 2);
    assert!(matches!(messages[0], BridgeMessage::ZoneList { .. }));
    match &messages[1] {
        BridgeMessage::NowPlaying {
            zone_id,
            state,
            artwork,
            ..
        } => {
            assert_eq!(zone_id, "z1");
            assert_eq!(*state, PlaybackState::Playing);
            assert!(artwork.as_ref().unwrap().starts_with("data:image/png;base64,"));
        }
        other => panic!("expected now_playing, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unpairing_clears_state_and_emits_sentinel_sequence() {
    let sink = SharedSink::default();
    let mut supervisor = ConnectionSupervisor::new(sink.clone());

    supervisor
        .handle(SessionEvent::Paired {
            core_name: "Core".to_string(),
            images: Arc::new(StaticSource),
        })
        .await;
    supervisor
        .handle(SessionEvent::Zones(ZoneBurst::subscribed(vec![
            playing_zone("z1", "Living Room"),
        ])))
        .await;
    sink.take_messages();

    supervisor
        .handle(SessionEvent::Unpaired {
            core_name: "Core".to_string(),
        })
        .await;

    assert!(!supervisor.is_paired());
    assert_eq!(supervisor.reconciler_mut().zone_count(), 0);
    assert_eq!(supervisor.reconciler_mut().artwork_mut().cached_entries(), 0);

    let messages = sink.take_messages();
    assert_eq!(messages.len(), 2);
    match &messages[0] {
        BridgeMessage::NowPlaying { zone_id, state, .. } => {
            assert_eq!(zone_id, "__disconnected__");
            assert_eq!(*state, PlaybackState::Stopped);
        }
        other => panic!("expected now_playing, got {other:?}"),
    }
    match &messages[1] {
        BridgeMessage::Status { state, .. } => {
            assert_eq!(*state, ConnectionState::Disconnected);
        }
        other => panic!("expected status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_run_processes_events_in_delivery_order() {
    let sink = SharedSink::default();
    let supervisor = ConnectionSupervisor::new(sink.clone());

    let (tx, rx) = mpsc::channel(8);
    tx.send(SessionEvent::Paired {
        core_name: "Core".to_string(),
        images: Arc::new(StaticSource),
    })
    .await
    .unwrap();
    tx.send(SessionEvent::Zones(ZoneBurst::subscribed(vec![
        playing_zone("z1", "Living Room"),
    ])))
    .await
    .unwrap();
    tx.send(SessionEvent::Outputs(OutputBurst::subscribed(vec![
        serde_json::from_value(serde_json::json!({
            "output_id": "o1",
            "display_name": "Kitchen",
            "status": "standby"
        }))
        .unwrap(),
    ])))
    .await
    .unwrap();
    tx.send(SessionEvent::Unpaired {
        core_name: "Core".to_string(),
    })
    .await
    .unwrap();
    drop(tx);

    supervisor.run(rx).await;

    let kinds: Vec<&'static str> = sink
        .take_messages()
        .iter()
        .map(|m| match m {
            BridgeMessage::Status { .. } => "status",
            BridgeMessage::ZoneList { .. } => "zone_list",
            BridgeMessage::NowPlaying { .. } => "now_playing",
            BridgeMessage::Error { .. } => "error",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "status",      // discovering
            "status",      // connected
            "zone_list",   // zone subscribe
            "now_playing", // z1
            "zone_list",   // output subscribe
            "now_playing", // sentinel on unpair
            "status",      // disconnected
        ]
    );
}

#[tokio::test]
async fn test_removal_after_subscribe_omits_zone() {
    let sink = SharedSink::default();
    let mut supervisor = ConnectionSupervisor::new(sink.clone());

    supervisor
        .handle(SessionEvent::Zones(ZoneBurst::subscribed(vec![
            playing_zone("z1", "Living Room"),
            playing_zone("z2", "Kitchen"),
        ])))
        .await;
    sink.take_messages();

    supervisor
        .handle(SessionEvent::Zones(ZoneBurst::removed(vec![ZoneId::new(
            "z1",
        )])))
        .await;

    let messages = sink.take_messages();
    match &messages[0] {
        BridgeMessage::ZoneList { zones } => {
            assert_eq!(zones.len(), 1);
            assert_eq!(zones[0].zone_id, "z2");
        }
        other => panic!("expected zone_list, got {other:?}"),
    }
}
