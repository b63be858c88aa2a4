//! Core data model: identity newtypes and state records.

mod id_types;
mod zone;

pub use id_types::{DeviceId, ZoneName};
pub use zone::{TopologyRecord, ZoneRecord};
