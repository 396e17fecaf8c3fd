//! Observable events emitted by the bridge.
//!
//! Every selection change, outbound command, and connection transition is
//! published as a [`BridgeEvent`] through the [`super::EventBus`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ConnectionState, DeviceState};

/// Event emitted after a bridge state change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// The gaze selection changed.
    SelectionChanged {
        /// Target looked at before this frame.
        previous: Option<String>,
        /// Target looked at now.
        current: Option<String>,
        /// Time of the transition.
        timestamp: DateTime<Utc>,
    },

    /// A device command was written to the socket.
    CommandSent {
        /// Device name.
        device_type: String,
        /// Requested state.
        state: DeviceState,
        /// Send timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The connection moved to a new lifecycle state.
    ConnectionStateChanged {
        /// New state.
        state: ConnectionState,
        /// Transition timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A frame arrived from the server.
    MessageReceived {
        /// Decoded text payload.
        text: String,
        /// Whether the frame was binary on the wire.
        binary: bool,
        /// Arrival timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A keepalive ping was written.
    KeepaliveSent {
        /// Send timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl BridgeEvent {
    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::SelectionChanged { .. } => "selection_changed",
            Self::CommandSent { .. } => "command_sent",
            Self::ConnectionStateChanged { .. } => "connection_state_changed",
            Self::MessageReceived { .. } => "message_received",
            Self::KeepaliveSent { .. } => "keepalive_sent",
        }
    }

    /// Returns the event timestamp.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SelectionChanged { timestamp, .. }
            | Self::CommandSent { timestamp, .. }
            | Self::ConnectionStateChanged { timestamp, .. }
            | Self::MessageReceived { timestamp, .. }
            | Self::KeepaliveSent { timestamp } => *timestamp,
        }
    }
}
