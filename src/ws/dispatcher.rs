//! Command dispatch to the device server.

use chrono::Utc;
use tracing::info;

use super::ConnectionManager;
use crate::domain::{BridgeEvent, CommandMessage, DeviceState, EventBus};
use crate::error::BridgeError;
use crate::gaze::GazeSelection;

/// Builds device commands for the current selection and writes them to
/// the connection. Nothing is queued: a command that cannot be written
/// now is dropped.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    event_bus: EventBus,
}

impl CommandDispatcher {
    /// Creates a dispatcher that publishes [`BridgeEvent::CommandSent`].
    #[must_use]
    pub const fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    /// Sends `state` for the selected target.
    ///
    /// Returns `Ok(None)` without touching the connection when nothing is
    /// selected, and the sent message otherwise.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::ConnectionUnavailable`] if the connection is not open.
    /// - [`BridgeError::Codec`] if the message cannot be serialized.
    pub fn dispatch(
        &self,
        selection: &GazeSelection,
        state: DeviceState,
        connection: &ConnectionManager,
    ) -> Result<Option<CommandMessage>, BridgeError> {
        let Some(target) = selection.current() else {
            return Ok(None);
        };
        if !connection.is_open() {
            return Err(BridgeError::ConnectionUnavailable);
        }

        let message = CommandMessage::new(target, state);
        let json = message.to_json()?;
        connection.send_text(json.as_str())?;
        info!(message = %json, "message sent");

        let _ = self.event_bus.publish(BridgeEvent::CommandSent {
            device_type: message.device_type.clone(),
            state,
            timestamp: Utc::now(),
        });
        Ok(Some(message))
    }
}
