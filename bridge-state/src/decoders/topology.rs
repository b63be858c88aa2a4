//! Decoder for topology (grouping) events.

use tracing::{debug, warn};

use crate::decoders::decode_state;
use crate::event::GroupDescriptor;
use crate::fanout::ItemBindings;
use crate::model::{DeviceId, ZoneName};
use crate::store::StateStore;

/// Fold a topology event into the store.
///
/// Two passes over the group list:
///
/// 1. Register every member's `(roomName, uuid)` pair in the zone/device
///    index. Coordinators appear in their own member lists and need no
///    separate registration.
/// 2. Merge each group into the topology table and run the coordinator's
///    embedded state snapshot through [`decode_state`], so grouping
///    changes also refresh the coordinator zone's record and items.
///
/// An empty group list is treated as a transient upstream glitch: it is
/// logged and the existing topology is left untouched.
pub fn decode_topology(groups: &[GroupDescriptor], store: &StateStore, bindings: &ItemBindings) {
    if groups.is_empty() {
        warn!("topology event with no groups, keeping existing topology");
        return;
    }

    for group in groups {
        for member in &group.members {
            register_zone_device(member, store);
        }
    }

    for group in groups {
        let Some(group_id) = group.uuid.as_deref().map(DeviceId::new) else {
            debug!("group descriptor without uuid, skipping");
            continue;
        };
        let coordinator = group.coordinator.as_deref();
        let coordinator_id = coordinator
            .and_then(|c| c.uuid.as_deref())
            .map(DeviceId::new);
        let members = group
            .members
            .iter()
            .filter_map(|m| m.uuid.as_deref())
            .map(DeviceId::new);

        store.merge_group(group_id, coordinator_id, members);

        if let Some(coordinator) = coordinator {
            decode_state(coordinator, store, bindings);
        }
    }
}

fn register_zone_device(snapshot: &crate::event::ZoneSnapshot, store: &StateStore) {
    if let (Some(room), Some(uuid)) = (snapshot.room_name.as_deref(), snapshot.uuid.as_deref()) {
        store.record_zone_device(ZoneName::new(room), DeviceId::new(uuid));
    }
}
