//! Webhook event envelope and per-type payload shapes.
//!
//! The external control API pushes JSON envelopes of the form
//! `{"type": <string>, "data": <object-or-array>}`. Dispatch happens on
//! the literal `type` value; unrecognized types are preserved as
//! [`WebhookEvent::Unknown`] so the dispatch loop can ignore them
//! forward-compatibly. The deeply nested `state`/`groupState` sections
//! stay as raw [`Value`]s because item fan-out resolves fields by name,
//! not through a fixed schema.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Full state snapshot for one device/zone, as embedded in
/// `transport-state` events and in topology group descriptors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneSnapshot {
    pub uuid: Option<String>,
    pub coordinator: Option<String>,
    pub room_name: Option<String>,
    pub state: Option<Value>,
    pub group_state: Option<Value>,
}

/// One group descriptor from a `topology-change` event: the group's
/// coordinator (with its full state snapshot) and every member.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupDescriptor {
    pub uuid: Option<String>,
    pub coordinator: Option<Box<ZoneSnapshot>>,
    pub members: Vec<ZoneSnapshot>,
}

/// `volume-change` delta payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeDelta {
    pub uuid: Option<String>,
    pub room_name: Option<String>,
    pub previous_volume: Option<i64>,
    pub new_volume: Option<i64>,
}

/// `mute-change` delta payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MuteDelta {
    pub uuid: Option<String>,
    pub room_name: Option<String>,
    pub previous_mute: Option<bool>,
    pub new_mute: Option<bool>,
}

/// A decoded webhook event envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    /// Full per-zone state snapshot.
    TransportState(ZoneSnapshot),
    /// Current grouping of devices into zones.
    TopologyChange(Vec<GroupDescriptor>),
    /// Single-field volume update for one zone.
    VolumeChange(VolumeDelta),
    /// Single-field mute update for one zone.
    MuteChange(MuteDelta),
    /// Anything else; carried for logging, otherwise a no-op.
    Unknown(String),
}

/// Why a raw payload could not be decoded into an event.
///
/// None of these are operational errors: GET-origin payloads are bare
/// query strings without envelope framing and routinely fail here.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("payload is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("payload has no string `type` field")]
    MissingType,

    #[error("`{event_type}` event carried malformed data: {source}")]
    MalformedData {
        event_type: String,
        source: serde_json::Error,
    },
}

impl WebhookEvent {
    /// Decode one raw payload.
    ///
    /// Dispatches exclusively on the literal `type` value. A
    /// `topology-change` without `data` decodes to an empty group list,
    /// which the topology decoder treats as "warn, touch nothing".
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let envelope: Value = serde_json::from_str(raw)?;
        let event_type = envelope
            .get("type")
            .and_then(Value::as_str)
            .ok_or(EnvelopeError::MissingType)?
            .to_owned();
        let data = envelope.get("data").cloned().unwrap_or(Value::Null);

        match event_type.as_str() {
            "transport-state" => Ok(Self::TransportState(decode_data(&event_type, data)?)),
            "topology-change" => {
                if data.is_null() {
                    return Ok(Self::TopologyChange(Vec::new()));
                }
                Ok(Self::TopologyChange(decode_data(&event_type, data)?))
            }
            "volume-change" => Ok(Self::VolumeChange(decode_data(&event_type, data)?)),
            "mute-change" => Ok(Self::MuteChange(decode_data(&event_type, data)?)),
            _ => Ok(Self::Unknown(event_type)),
        }
    }
}

fn decode_data<T: DeserializeOwned>(event_type: &str, data: Value) -> Result<T, EnvelopeError> {
    serde_json::from_value(data).map_err(|source| EnvelopeError::MalformedData {
        event_type: event_type.to_owned(),
        source,
    })
}
