//! Decoders for single-field delta events (volume and mute changes).
//!
//! Deltas skip the zone record entirely: the new value goes straight to
//! matching item bindings. The record catches up on the next full state
//! snapshot.

use serde_json::Value;
use tracing::debug;

use crate::event::{MuteDelta, VolumeDelta};
use crate::fanout::ItemBindings;
use crate::model::ZoneName;

/// Deliver a volume delta to items bound to `(zone, "volume")`.
pub fn decode_volume_change(delta: &VolumeDelta, bindings: &ItemBindings) {
    let (Some(room), Some(volume)) = (delta.room_name.as_deref(), delta.new_volume) else {
        debug!("volume delta without roomName or newVolume, skipping");
        return;
    };
    let zone = ZoneName::new(room);
    debug!(zone = %zone, volume, "delivering volume delta");
    bindings.deliver(&zone, "volume", &Value::from(volume));
}

/// Deliver a mute delta as two updates: `mute` with the new value and
/// `togglemute` with its inverse.
pub fn decode_mute_change(delta: &MuteDelta, bindings: &ItemBindings) {
    let (Some(room), Some(mute)) = (delta.room_name.as_deref(), delta.new_mute) else {
        debug!("mute delta without roomName or newMute, skipping");
        return;
    };
    let zone = ZoneName::new(room);
    debug!(zone = %zone, mute, "delivering mute delta");
    bindings.deliver(&zone, "mute", &Value::Bool(mute));
    bindings.deliver(&zone, "togglemute", &Value::Bool(!mute));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::testing::RecordingSink;
    use crate::fanout::ItemSink;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_volume_delta_delivers_to_matching_binding() {
        let sink = RecordingSink::new();
        let mut bindings = ItemBindings::new();
        bindings.bind(
            Some(ZoneName::new("Esszimmer")),
            "volume",
            sink.clone() as Arc<dyn ItemSink>,
        );

        decode_volume_change(
            &VolumeDelta {
                room_name: Some("Esszimmer".into()),
                previous_volume: Some(8),
                new_volume: Some(12),
                ..VolumeDelta::default()
            },
            &bindings,
        );

        let updates = sink.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].field, "volume");
        assert_eq!(updates[0].value, json!(12));
    }

    #[test]
    fn test_volume_delta_without_value_is_skipped() {
        let sink = RecordingSink::new();
        let mut bindings = ItemBindings::new();
        bindings.bind(
            Some(ZoneName::new("Esszimmer")),
            "volume",
            sink.clone() as Arc<dyn ItemSink>,
        );

        decode_volume_change(
            &VolumeDelta {
                room_name: Some("Esszimmer".into()),
                ..VolumeDelta::default()
            },
            &bindings,
        );
        decode_volume_change(
            &VolumeDelta {
                new_volume: Some(12),
                ..VolumeDelta::default()
            },
            &bindings,
        );

        assert!(sink.updates().is_empty());
    }

    #[test]
    fn test_mute_delta_delivers_mute_and_inverted_togglemute() {
        let sink = RecordingSink::new();
        let mut bindings = ItemBindings::new();
        let zone = ZoneName::new("Esszimmer");
        bindings.bind(Some(zone.clone()), "mute", sink.clone() as Arc<dyn ItemSink>);
        bindings.bind(Some(zone.clone()), "togglemute", sink.clone() as Arc<dyn ItemSink>);

        decode_mute_change(
            &MuteDelta {
                room_name: Some("Esszimmer".into()),
                new_mute: Some(true),
                ..MuteDelta::default()
            },
            &bindings,
        );

        let updates = sink.updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].field, "mute");
        assert_eq!(updates[0].value, json!(true));
        assert_eq!(updates[1].field, "togglemute");
        assert_eq!(updates[1].value, json!(false));
    }
}
