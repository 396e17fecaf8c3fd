//! Gesture-to-command routing.

use tracing::{info, trace};

use super::{BehaviorSystem, GestureKind};
use crate::domain::CommandMessage;
use crate::error::BridgeError;
use crate::gaze::GazeSelection;
use crate::ws::{CommandDispatcher, ConnectionManager};

/// Routes recognized gestures to device commands for the gazed-at target.
#[derive(Debug, Clone)]
pub struct GestureTriggerAdapter {
    dispatcher: CommandDispatcher,
}

impl GestureTriggerAdapter {
    /// Creates an adapter that sends through `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: CommandDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Subscribes every [`GestureKind`] to its trigger name.
    pub fn register(behavior: &mut BehaviorSystem) {
        for gesture in GestureKind::ALL {
            behavior.add_trigger_response(gesture.trigger_name(), gesture);
        }
    }

    /// Handles one gesture firing.
    ///
    /// With no active selection the firing is dropped and `Ok(None)` is
    /// returned. Otherwise the gesture's command is dispatched for the
    /// selected target.
    ///
    /// # Errors
    ///
    /// Propagates [`CommandDispatcher::dispatch`] errors, notably
    /// [`BridgeError::ConnectionUnavailable`] when the socket is not open.
    pub fn on_gesture(
        &self,
        gesture: GestureKind,
        selection: &GazeSelection,
        connection: &ConnectionManager,
    ) -> Result<Option<CommandMessage>, BridgeError> {
        let Some(target) = selection.current() else {
            trace!(trigger = gesture.trigger_name(), "gesture without gaze target");
            return Ok(None);
        };

        let state = gesture.device_state();
        info!(target_name = target, "{target} turned {}", state.label());
        self.dispatcher.dispatch(selection, state, connection)
    }
}
