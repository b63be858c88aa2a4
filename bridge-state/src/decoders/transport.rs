//! Decoder for full per-zone state snapshots.

use tracing::debug;

use crate::event::ZoneSnapshot;
use crate::fanout::ItemBindings;
use crate::model::{ZoneName, ZoneRecord};
use crate::store::StateStore;

/// Fold one state snapshot into the store and resync the zone's items.
///
/// The snapshot must carry a room name to be addressable; without one it
/// is dropped quietly. Everything else may be sparse: the record replaces
/// the old one wholesale and resync skips fields it cannot resolve.
pub fn decode_state(snapshot: &ZoneSnapshot, store: &StateStore, bindings: &ItemBindings) {
    let Some(room_name) = snapshot.room_name.as_deref() else {
        debug!("state snapshot without roomName, skipping");
        return;
    };
    let zone = ZoneName::new(room_name);
    let record = ZoneRecord::from_snapshot(snapshot);

    debug!(zone = %zone, "replacing zone record from state snapshot");
    store.upsert_zone(&zone, record.clone());
    bindings.resync(&zone, &record);
}
