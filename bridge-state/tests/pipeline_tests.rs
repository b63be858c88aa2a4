//! End-to-end tests for the queue -> dispatch -> store -> item pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{json, Value};

use bridge_state::{spawn_dispatch_loop, ItemBindings, ItemSink, ItemUpdate, StateStore, ZoneName};
use webhook_server::{PayloadIntake, RawPayload};

struct CapturingSink {
    updates: Mutex<Vec<ItemUpdate>>,
}

impl CapturingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            updates: Mutex::new(Vec::new()),
        })
    }

    fn updates(&self) -> Vec<ItemUpdate> {
        self.updates.lock().clone()
    }
}

impl ItemSink for CapturingSink {
    fn update(&self, update: ItemUpdate) {
        self.updates.lock().push(update);
    }
}

fn transport_state(room: &str, playback_state: &str, volume: i64) -> String {
    json!({
        "type": "transport-state",
        "data": {
            "uuid": "RINCON_7828CAEB625E01400",
            "coordinator": "RINCON_7828CAEB625E01400",
            "roomName": room,
            "state": {
                "playbackState": playback_state,
                "volume": volume,
                "currentTrack": {
                    "title": "Paranoid",
                    "artist": "Black Sabbath",
                    "duration": 125
                }
            },
            "groupState": {"volume": volume, "mute": false}
        }
    })
    .to_string()
}

async fn run_pipeline(
    bindings: ItemBindings,
    payloads: Vec<RawPayload>,
) -> StateStore {
    let (intake, queue_rx) = PayloadIntake::channel();
    let store = StateStore::new();
    let alive = Arc::new(AtomicBool::new(true));
    let worker = spawn_dispatch_loop(
        queue_rx,
        store.clone(),
        Arc::new(bindings),
        alive.clone(),
    );

    for payload in payloads {
        intake.submit(payload);
    }
    drop(intake);

    tokio::time::timeout(Duration::from_secs(2), worker)
        .await
        .expect("dispatch loop should drain and exit")
        .unwrap();
    alive.store(false, Ordering::SeqCst);
    store
}

#[tokio::test]
async fn full_snapshot_updates_store_and_items() {
    let sink = CapturingSink::new();
    let mut bindings = ItemBindings::new();
    let zone = ZoneName::new("Esszimmer");
    bindings.bind(Some(zone.clone()), "play", sink.clone() as Arc<dyn ItemSink>);
    bindings.bind(
        Some(zone.clone()),
        "current_duration_str",
        sink.clone() as Arc<dyn ItemSink>,
    );

    let store = run_pipeline(
        bindings,
        vec![RawPayload::post(transport_state("Esszimmer", "STOPPED", 10))],
    )
    .await;

    let record = store.zone(&zone).unwrap();
    assert_eq!(
        record.state.as_ref().unwrap().get("volume"),
        Some(&json!(10))
    );

    let updates = sink.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].field, "play");
    assert_eq!(updates[0].value, Value::Bool(false));
    assert_eq!(updates[1].field, "current_duration_str");
    assert_eq!(updates[1].value, json!("0:02:05"));
}

#[tokio::test]
async fn deltas_fan_out_without_touching_records() {
    let sink = CapturingSink::new();
    let mut bindings = ItemBindings::new();
    let zone = ZoneName::new("Esszimmer");
    bindings.bind(Some(zone.clone()), "volume", sink.clone() as Arc<dyn ItemSink>);
    bindings.bind(Some(zone.clone()), "mute", sink.clone() as Arc<dyn ItemSink>);
    bindings.bind(
        Some(zone.clone()),
        "togglemute",
        sink.clone() as Arc<dyn ItemSink>,
    );

    let store = run_pipeline(
        bindings,
        vec![
            RawPayload::post(
                json!({
                    "type": "volume-change",
                    "data": {"roomName": "Esszimmer", "previousVolume": 8, "newVolume": 12}
                })
                .to_string(),
            ),
            RawPayload::post(
                json!({
                    "type": "mute-change",
                    "data": {"roomName": "Esszimmer", "newMute": true}
                })
                .to_string(),
            ),
        ],
    )
    .await;

    assert!(store.zone(&zone).is_none());

    let updates = sink.updates();
    assert_eq!(updates.len(), 3);
    assert_eq!((updates[0].field.as_str(), &updates[0].value), ("volume", &json!(12)));
    assert_eq!((updates[1].field.as_str(), &updates[1].value), ("mute", &json!(true)));
    assert_eq!(
        (updates[2].field.as_str(), &updates[2].value),
        ("togglemute", &json!(false))
    );
}

#[tokio::test]
async fn topology_event_builds_index_and_groups() {
    let store = run_pipeline(
        ItemBindings::new(),
        vec![RawPayload::post(
            json!({
                "type": "topology-change",
                "data": [{
                    "uuid": "RINCON_AAA",
                    "coordinator": {
                        "uuid": "RINCON_AAA",
                        "roomName": "TV",
                        "state": {"volume": 20, "playbackState": "PLAYING"}
                    },
                    "members": [
                        {"uuid": "RINCON_AAA", "roomName": "TV"},
                        {"uuid": "RINCON_BBB", "roomName": "Küche"}
                    ]
                }]
            })
            .to_string(),
        )],
    )
    .await;

    assert_eq!(store.group_count(), 1);
    assert_eq!(
        store.device_for_zone(&ZoneName::new("Küche")).unwrap().as_str(),
        "RINCON_BBB"
    );
    // Coordinator's embedded snapshot also produced a zone record.
    assert!(store.zone(&ZoneName::new("TV")).is_some());
}

#[tokio::test]
async fn garbage_between_events_is_ignored() {
    let store = run_pipeline(
        ItemBindings::new(),
        vec![
            RawPayload::get("foo=bar"),
            RawPayload::post("{{{{ not json".to_string()),
            RawPayload::post(r#"{"type": "favorites-change", "data": []}"#.to_string()),
            RawPayload::post(transport_state("Esszimmer", "PLAYING", 15)),
        ],
    )
    .await;

    assert_eq!(store.zone_count(), 1);
    assert!(store.zone(&ZoneName::new("Esszimmer")).is_some());
}
