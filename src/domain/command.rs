//! Outbound device command message.
//!
//! The wire shape is fixed:
//!
//! ```json
//! { "deviceType": "MainLight", "state": "turn_on" }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Desired device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    /// Switch the device on.
    TurnOn,
    /// Switch the device off.
    TurnOff,
}

impl DeviceState {
    /// Wire string (`"turn_on"` / `"turn_off"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
        }
    }

    /// Human-readable label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TurnOn => "on",
            Self::TurnOff => "off",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command sent to the device server. Built and sent immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    /// Target device name.
    #[serde(rename = "deviceType")]
    pub device_type: String,
    /// Requested state.
    pub state: DeviceState,
}

impl CommandMessage {
    /// Creates a command for the given device.
    #[must_use]
    pub fn new(device_type: impl Into<String>, state: DeviceState) -> Self {
        Self {
            device_type: device_type.into(),
            state,
        }
    }

    /// Serializes the command into its JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
