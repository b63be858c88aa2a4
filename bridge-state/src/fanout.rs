//! Item bindings and update fan-out.
//!
//! Consumers register interest in `(zone, field)` pairs through
//! [`ItemBindings`]; the decoders push values back out through the
//! [`ItemSink`] trait. Two delivery paths exist:
//!
//! - `deliver` for delta events: one field changed, every binding whose
//!   zone and field match exactly gets the new value.
//! - `resync` for full snapshots: every binding for the zone is
//!   re-resolved against the fresh [`ZoneRecord`], including derived
//!   fields like `play` and `current_duration_str`.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::model::{ZoneName, ZoneRecord};

/// One resolved field update for one zone, as handed to an [`ItemSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUpdate {
    pub zone: ZoneName,
    pub field: String,
    pub value: Value,
}

/// Receiving end of the fan-out. Implementations forward updates into
/// whatever item system sits behind the bridge.
pub trait ItemSink: Send + Sync {
    fn update(&self, update: ItemUpdate);
}

struct Binding {
    zone: Option<ZoneName>,
    field: String,
    sink: Arc<dyn ItemSink>,
}

/// Registry of item bindings, consulted by the decoders on every event.
///
/// Bindings are registered up front and never removed; the registry is
/// shared read-only with the dispatch loop after startup.
#[derive(Default)]
pub struct ItemBindings {
    bindings: Vec<Binding>,
}

impl ItemBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink for a `(zone, field)` pair.
    ///
    /// A binding without a zone is legal but inert: it never matches a
    /// delivery, since every update is addressed to a concrete zone.
    pub fn bind(&mut self, zone: Option<ZoneName>, field: impl Into<String>, sink: Arc<dyn ItemSink>) {
        self.bindings.push(Binding {
            zone,
            field: field.into(),
            sink,
        });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Deliver one changed field to every exactly-matching binding.
    pub fn deliver(&self, zone: &ZoneName, field: &str, value: &Value) {
        for binding in &self.bindings {
            if binding.zone.as_ref() == Some(zone) && binding.field == field {
                binding.sink.update(ItemUpdate {
                    zone: zone.clone(),
                    field: field.to_owned(),
                    value: value.clone(),
                });
            }
        }
    }

    /// Re-resolve every binding for a zone against a fresh record.
    ///
    /// Fields that cannot be resolved from this record are skipped; a
    /// sparse snapshot must not push nulls into bound items.
    pub fn resync(&self, zone: &ZoneName, record: &ZoneRecord) {
        for binding in &self.bindings {
            if binding.zone.as_ref() != Some(zone) {
                continue;
            }
            match resolve_field(&binding.field, record) {
                Some(value) => binding.sink.update(ItemUpdate {
                    zone: zone.clone(),
                    field: binding.field.clone(),
                    value,
                }),
                None => {
                    debug!(
                        zone = %zone,
                        field = %binding.field,
                        "field not resolvable from current record, skipping"
                    );
                }
            }
        }
    }
}

/// Resolve a bound field name against a zone record.
///
/// Understands three layers of indirection on top of plain lookup:
/// `current_`/`next_` track prefixes, the `_str` formatting suffix, and
/// the synthetic `play`/`playpause`/`togglemute` fields.
pub fn resolve_field(field: &str, record: &ZoneRecord) -> Option<Value> {
    if let Some(rest) = field
        .strip_prefix("current_")
        .or_else(|| field.strip_prefix("next_"))
    {
        return resolve_track_field(field, rest, record);
    }

    match field {
        "play" | "playpause" => {
            let state = record.state.as_ref()?;
            let playing = state.get("playbackState").and_then(Value::as_str) != Some("STOPPED");
            Some(Value::Bool(playing))
        }
        // `togglemute` mirrors the mute state; only its delta delivery
        // carries the inverted value.
        "togglemute" => lookup_in_record("mute", record),
        _ => lookup_in_record(field, record),
    }
}

/// Resolve a `current_*`/`next_*` track field.
///
/// `field` is the full name (selects the `currentTrack`/`nextTrack`
/// section), `rest` is the name with the prefix stripped. A trailing
/// `_str` asks for a display rendering of the base field.
fn resolve_track_field(field: &str, rest: &str, record: &ZoneRecord) -> Option<Value> {
    let section = if field.starts_with("current_") {
        "currentTrack"
    } else {
        "nextTrack"
    };
    let track = record.state.as_ref()?.get(section)?;

    if let Some(base) = rest.strip_suffix("_str") {
        let raw = track.get(base)?;
        if base == "duration" {
            let seconds = raw.as_i64()?;
            return Some(Value::String(format_duration(seconds)));
        }
        return Some(raw.clone());
    }

    track.get(rest).cloned()
}

/// Plain lookup of a field in a record: the four top-level record fields
/// first, then a depth-first search through the nested state sections.
fn lookup_in_record(field: &str, record: &ZoneRecord) -> Option<Value> {
    match field {
        "uuid" => return record.device_id.as_ref().map(|id| json_string(id.as_str())),
        "coordinator" => return record.coordinator.as_ref().map(|id| json_string(id.as_str())),
        "state" => return record.state.clone(),
        "groupState" => return record.group_state.clone(),
        _ => {}
    }
    if let Some(state) = record.state.as_ref() {
        if let Some(value) = recursive_lookup(field, state) {
            return Some(value.clone());
        }
    }
    if let Some(group_state) = record.group_state.as_ref() {
        if let Some(value) = recursive_lookup(field, group_state) {
            return Some(value.clone());
        }
    }
    None
}

fn json_string(s: &str) -> Value {
    Value::String(s.to_owned())
}

/// Depth-first, first-match search for a key anywhere in a JSON tree.
fn recursive_lookup<'a>(key: &str, value: &'a Value) -> Option<&'a Value> {
    let object = value.as_object()?;
    if let Some(found) = object.get(key) {
        return Some(found);
    }
    object.values().find_map(|nested| recursive_lookup(key, nested))
}

/// Format a duration in seconds as `H:MM:SS` (125 becomes `0:02:05`).
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;
    use serde_json::json;

    fn record_with_state(state: Value) -> ZoneRecord {
        ZoneRecord {
            state: Some(state),
            ..ZoneRecord::default()
        }
    }

    #[test]
    fn test_deliver_matches_zone_and_field_exactly() {
        let sink = RecordingSink::new();
        let other = RecordingSink::new();
        let mut bindings = ItemBindings::new();
        bindings.bind(
            Some(ZoneName::new("Esszimmer")),
            "volume",
            sink.clone() as Arc<dyn ItemSink>,
        );
        bindings.bind(
            Some(ZoneName::new("Küche")),
            "volume",
            other.clone() as Arc<dyn ItemSink>,
        );
        bindings.bind(
            Some(ZoneName::new("Esszimmer")),
            "mute",
            other.clone() as Arc<dyn ItemSink>,
        );

        bindings.deliver(&ZoneName::new("Esszimmer"), "volume", &json!(12));

        assert_eq!(
            sink.updates(),
            vec![ItemUpdate {
                zone: ZoneName::new("Esszimmer"),
                field: "volume".to_string(),
                value: json!(12),
            }]
        );
        assert!(other.updates().is_empty());
    }

    #[test]
    fn test_zoneless_binding_never_matches() {
        let sink = RecordingSink::new();
        let mut bindings = ItemBindings::new();
        bindings.bind(None, "volume", sink.clone() as Arc<dyn ItemSink>);

        bindings.deliver(&ZoneName::new("Esszimmer"), "volume", &json!(12));
        bindings.resync(&ZoneName::new("Esszimmer"), &record_with_state(json!({"volume": 12})));

        assert!(sink.updates().is_empty());
    }

    #[test]
    fn test_resync_skips_unresolvable_fields() {
        let sink = RecordingSink::new();
        let mut bindings = ItemBindings::new();
        let zone = ZoneName::new("TV");
        bindings.bind(Some(zone.clone()), "volume", sink.clone() as Arc<dyn ItemSink>);
        bindings.bind(Some(zone.clone()), "no_such_field", sink.clone() as Arc<dyn ItemSink>);

        bindings.resync(&zone, &record_with_state(json!({"volume": 7})));

        let updates = sink.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].field, "volume");
        assert_eq!(updates[0].value, json!(7));
    }

    #[test]
    fn test_resolve_nested_state_field() {
        let record = record_with_state(json!({
            "playbackState": "PLAYING",
            "equalizer": {"bass": 3, "treble": -1}
        }));
        assert_eq!(resolve_field("bass", &record), Some(json!(3)));
        assert_eq!(resolve_field("playbackState", &record), Some(json!("PLAYING")));
    }

    #[test]
    fn test_resolve_falls_back_to_group_state() {
        let record = ZoneRecord {
            state: Some(json!({"volume": 10})),
            group_state: Some(json!({"mute": true})),
            ..ZoneRecord::default()
        };
        assert_eq!(resolve_field("mute", &record), Some(json!(true)));
    }

    #[test]
    fn test_resolve_record_level_fields() {
        let record = ZoneRecord {
            device_id: Some(crate::model::DeviceId::new("RINCON_111")),
            coordinator: Some(crate::model::DeviceId::new("RINCON_222")),
            ..ZoneRecord::default()
        };
        assert_eq!(resolve_field("uuid", &record), Some(json!("RINCON_111")));
        assert_eq!(resolve_field("coordinator", &record), Some(json!("RINCON_222")));
    }

    #[test]
    fn test_resolve_play_from_playback_state() {
        let stopped = record_with_state(json!({"playbackState": "STOPPED"}));
        let playing = record_with_state(json!({"playbackState": "PLAYING"}));
        let paused = record_with_state(json!({"playbackState": "PAUSED_PLAYBACK"}));

        assert_eq!(resolve_field("play", &stopped), Some(json!(false)));
        assert_eq!(resolve_field("play", &playing), Some(json!(true)));
        assert_eq!(resolve_field("playpause", &paused), Some(json!(true)));
    }

    #[test]
    fn test_resolve_play_without_state_is_none() {
        assert_eq!(resolve_field("play", &ZoneRecord::default()), None);
    }

    #[test]
    fn test_resolve_togglemute_mirrors_mute() {
        let record = ZoneRecord {
            group_state: Some(json!({"mute": false})),
            ..ZoneRecord::default()
        };
        assert_eq!(resolve_field("togglemute", &record), Some(json!(false)));
    }

    #[test]
    fn test_resolve_current_track_fields() {
        let record = record_with_state(json!({
            "currentTrack": {"title": "Paranoid", "artist": "Black Sabbath", "duration": 125},
            "nextTrack": {"title": "Iron Man"}
        }));

        assert_eq!(resolve_field("current_title", &record), Some(json!("Paranoid")));
        assert_eq!(resolve_field("next_title", &record), Some(json!("Iron Man")));
        assert_eq!(resolve_field("current_duration", &record), Some(json!(125)));
    }

    #[test]
    fn test_resolve_current_duration_str_formats() {
        let record = record_with_state(json!({
            "currentTrack": {"duration": 125}
        }));
        assert_eq!(
            resolve_field("current_duration_str", &record),
            Some(json!("0:02:05"))
        );
    }

    #[test]
    fn test_resolve_other_str_suffix_passes_through() {
        let record = record_with_state(json!({
            "currentTrack": {"title": "Paranoid"}
        }));
        assert_eq!(
            resolve_field("current_title_str", &record),
            Some(json!("Paranoid"))
        );
    }

    #[test]
    fn test_resolve_track_field_without_section_is_none() {
        let record = record_with_state(json!({"volume": 10}));
        assert_eq!(resolve_field("current_title", &record), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(125), "0:02:05");
        assert_eq!(format_duration(3661), "1:01:01");
        assert_eq!(format_duration(-5), "0:00:00");
    }
}
