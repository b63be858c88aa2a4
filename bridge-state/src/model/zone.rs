//! Zone and topology state records.

use std::collections::HashSet;

use serde_json::Value;

use crate::event::ZoneSnapshot;
use crate::model::DeviceId;

/// Last known full state of one zone, keyed by zone name in the store.
///
/// Replaced wholesale on every `transport-state` event: absent fields in
/// the incoming snapshot become `None` here, nothing is carried over from
/// the previous record. Delta events (volume/mute changes) intentionally
/// bypass this record and go straight to the bound items, so `state` can
/// briefly lag behind the latest instantaneous value until the next full
/// snapshot arrives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneRecord {
    /// Device id of the zone's own player.
    pub device_id: Option<DeviceId>,
    /// Device id of the group coordinator this zone currently follows.
    pub coordinator: Option<DeviceId>,
    /// Nested playback/track/equalizer snapshot, kept schema-light.
    pub state: Option<Value>,
    /// Group-wide volume/mute snapshot.
    pub group_state: Option<Value>,
}

impl ZoneRecord {
    /// Build a record from an incoming snapshot, dropping nothing and
    /// preserving nothing.
    pub fn from_snapshot(snapshot: &ZoneSnapshot) -> Self {
        Self {
            device_id: snapshot.uuid.as_deref().map(DeviceId::new),
            coordinator: snapshot.coordinator.as_deref().map(DeviceId::new),
            state: snapshot.state.clone(),
            group_state: snapshot.group_state.clone(),
        }
    }
}

/// One audio group: its coordinator and every member device seen so far.
///
/// Keyed by the group's coordinator device id in the store. The member set
/// only ever grows; repeated topology events merge into it rather than
/// replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyRecord {
    pub coordinator: Option<DeviceId>,
    pub members: HashSet<DeviceId>,
}
