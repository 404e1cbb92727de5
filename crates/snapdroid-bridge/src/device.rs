use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection state of a device as reported by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    /// Connected and ready for commands
    Device,
    /// Visible to the bridge but not responding
    Offline,
    /// Connected but the host is not authorized for debugging
    Unauthorized,
    /// Any other state string the bridge reported (recovery, sideload, ...)
    Unknown(String),
}

impl DeviceState {
    /// Map a state string from the bridge's device listing.
    pub fn parse(value: &str) -> Self {
        match value {
            "device" => DeviceState::Device,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            other => DeviceState::Unknown(other.to_string()),
        }
    }

    /// Whether frames can be requested from a device in this state.
    pub fn is_usable(&self) -> bool {
        matches!(self, DeviceState::Device)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Device => write!(f, "device"),
            DeviceState::Offline => write!(f, "offline"),
            DeviceState::Unauthorized => write!(f, "unauthorized"),
            DeviceState::Unknown(other) => write!(f, "{}", other),
        }
    }
}

/// Handle to one connected device.
///
/// The serial number is the device's identity for logging and for
/// addressing bridge commands; everything else is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Serial number assigned by the bridge
    pub serial: String,
    /// Connection state at listing time
    pub state: DeviceState,
    /// Device model, when the bridge reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_json_shape() {
        let info = DeviceInfo {
            serial: "R5CT30XXXX".to_string(),
            state: DeviceState::Device,
            model: Some("Pixel_8".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"serial":"R5CT30XXXX","state":"device","model":"Pixel_8"}"#
        );
    }

    #[test]
    fn test_device_info_json_omits_missing_model() {
        let info = DeviceInfo {
            serial: "emulator-5554".to_string(),
            state: DeviceState::Offline,
            model: None,
        };
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"serial":"emulator-5554","state":"offline"}"#
        );
    }

    #[test]
    fn test_device_state_json_round_trip() {
        for state in [
            DeviceState::Device,
            DeviceState::Unauthorized,
            DeviceState::Unknown("sideload".to_string()),
        ] {
            let json = serde_json::to_string(&state).unwrap();
            let back: DeviceState = serde_json::from_str(&json).unwrap();
            assert_eq!(back, state);
        }
        assert_eq!(
            serde_json::to_string(&DeviceState::Unknown("sideload".to_string())).unwrap(),
            r#"{"unknown":"sideload"}"#
        );
    }
}
