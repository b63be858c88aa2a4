//! In-memory state tables for zones, topology and the zone/device index.
//!
//! The store is the central repository the dispatch loop folds webhook
//! events into. Three tables:
//!
//! ```text
//! StateStore
//! ├── zones:        HashMap<ZoneName, ZoneRecord>        (full-replace snapshots)
//! ├── topology:     HashMap<DeviceId, TopologyRecord>    (merge-only groups)
//! └── zone_devices: HashSet<(ZoneName, DeviceId)>        (append-only index)
//! ```
//!
//! All mutation happens on the single dispatch-loop task; the locks exist
//! so that item consumers and outbound command paths can read a consistent
//! view from other tasks. None of the tables ever shrink: a zone or
//! device, once observed, is retained for the lifetime of the process.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::{DeviceId, TopologyRecord, ZoneName, ZoneRecord};

/// Shared state tables. Cloning shares the underlying storage.
pub struct StateStore {
    zones: Arc<RwLock<HashMap<ZoneName, ZoneRecord>>>,
    topology: Arc<RwLock<HashMap<DeviceId, TopologyRecord>>>,
    zone_devices: Arc<RwLock<HashSet<(ZoneName, DeviceId)>>>,
}

impl StateStore {
    /// Create a new empty state store
    pub fn new() -> Self {
        Self {
            zones: Arc::new(RwLock::new(HashMap::new())),
            topology: Arc::new(RwLock::new(HashMap::new())),
            zone_devices: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    // ========================================================================
    // Zone records
    // ========================================================================

    /// Replace the record for a zone wholesale.
    ///
    /// No field-by-field merging: the previous record, if any, is swapped
    /// out completely.
    pub fn upsert_zone(&self, zone: &ZoneName, record: ZoneRecord) {
        self.zones.write().insert(zone.clone(), record);
    }

    /// Current record for a zone, if one has been decoded yet.
    pub fn zone(&self, zone: &ZoneName) -> Option<ZoneRecord> {
        self.zones.read().get(zone).cloned()
    }

    /// Names of all zones seen so far.
    pub fn zone_names(&self) -> Vec<ZoneName> {
        self.zones.read().keys().cloned().collect()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.read().len()
    }

    // ========================================================================
    // Zone/device index
    // ========================================================================

    /// Remember that a zone name and a device id belong together.
    ///
    /// The index is append-only; duplicates are absorbed by the set.
    pub fn record_zone_device(&self, zone: ZoneName, device: DeviceId) {
        self.zone_devices.write().insert((zone, device));
    }

    /// Device id registered for a zone name.
    pub fn device_for_zone(&self, zone: &ZoneName) -> Option<DeviceId> {
        self.zone_devices
            .read()
            .iter()
            .find(|(z, _)| z == zone)
            .map(|(_, d)| d.clone())
    }

    /// Zone name registered for a device id.
    pub fn zone_for_device(&self, device: &DeviceId) -> Option<ZoneName> {
        self.zone_devices
            .read()
            .iter()
            .find(|(_, d)| d == device)
            .map(|(z, _)| z.clone())
    }

    /// Every (zone, device) pair observed so far.
    pub fn zone_device_pairs(&self) -> Vec<(ZoneName, DeviceId)> {
        self.zone_devices.read().iter().cloned().collect()
    }

    // ========================================================================
    // Topology
    // ========================================================================

    /// Merge one group descriptor into the topology table.
    ///
    /// The record is created on first sight; the coordinator is updated in
    /// place and the member set is a monotonic union across events. The
    /// coordinator id is always part of the member set, even when the
    /// incoming member list omits it.
    pub fn merge_group(
        &self,
        group: DeviceId,
        coordinator: Option<DeviceId>,
        members: impl IntoIterator<Item = DeviceId>,
    ) {
        let mut topology = self.topology.write();
        let record = topology.entry(group).or_default();
        if let Some(coordinator) = coordinator {
            record.members.insert(coordinator.clone());
            record.coordinator = Some(coordinator);
        }
        record.members.extend(members);
    }

    /// Topology record for a group, keyed by the group device id.
    pub fn group(&self, group: &DeviceId) -> Option<TopologyRecord> {
        self.topology.read().get(group).cloned()
    }

    pub fn group_count(&self) -> usize {
        self.topology.read().len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.zone_count() == 0 && self.group_count() == 0
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateStore {
    fn clone(&self) -> Self {
        Self {
            zones: self.zones.clone(),
            topology: self.topology.clone(),
            zone_devices: self.zone_devices.clone(),
        }
    }
}
