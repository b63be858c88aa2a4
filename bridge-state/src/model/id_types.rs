//! Identity types for zones and devices

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate common ID type implementations
macro_rules! impl_id_type {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::new(s)
            }
        }
    };
}

/// Human-readable name of a room or playback group.
///
/// The primary external key: items are bound by zone name and webhook
/// events address zones by their `roomName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneName(String);

impl ZoneName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_id_type!(ZoneName);

/// Opaque stable identifier of one physical audio device.
///
/// Typically a `RINCON_...` id, stored and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_id_type!(DeviceId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_is_kept_verbatim() {
        let id = DeviceId::new("RINCON_7828CAEB625E01400");
        assert_eq!(id.as_str(), "RINCON_7828CAEB625E01400");
        assert_eq!(format!("{}", id), "RINCON_7828CAEB625E01400");
    }

    #[test]
    fn test_device_id_equality_is_exact() {
        assert_eq!(DeviceId::new("RINCON_123"), DeviceId::new("RINCON_123"));
        assert_ne!(DeviceId::new("RINCON_123"), DeviceId::new("RINCON_456"));
    }

    #[test]
    fn test_zone_name_is_kept_verbatim() {
        let zone = ZoneName::new("Esszimmer");
        assert_eq!(zone.as_str(), "Esszimmer");
        assert_eq!(format!("{}", zone), "Esszimmer");
    }
}
