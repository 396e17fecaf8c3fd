//! Subscribe-by-name gesture facility.
//!
//! [`BehaviorSystem`] is the boundary to whatever recognizes gestures. The
//! bridge subscribes trigger names once at startup; the recognizer then
//! calls [`BehaviorSystem::fire`] with a trigger name, and subscribed
//! gestures are forwarded into the bridge's input channel. Callbacks never
//! run on the recognizer's side, so selection state is only touched by
//! the coordinating loop.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::debug;

use super::GestureKind;
use crate::bridge::BridgeInput;

/// Named-trigger registry that forwards firings to the bridge.
#[derive(Debug, Clone)]
pub struct BehaviorSystem {
    responses: HashMap<String, GestureKind>,
    inputs: mpsc::UnboundedSender<BridgeInput>,
}

impl BehaviorSystem {
    /// Creates a registry with no subscriptions.
    #[must_use]
    pub fn new(inputs: mpsc::UnboundedSender<BridgeInput>) -> Self {
        Self {
            responses: HashMap::new(),
            inputs,
        }
    }

    /// Subscribes `gesture` to the trigger `name`. A later subscription to
    /// the same name replaces the earlier one.
    pub fn add_trigger_response(&mut self, name: &str, gesture: GestureKind) {
        self.responses.insert(name.to_string(), gesture);
    }

    /// Returns `true` if `name` has a subscription.
    #[must_use]
    pub fn is_subscribed(&self, name: &str) -> bool {
        self.responses.contains_key(name)
    }

    /// Number of subscribed trigger names.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.responses.len()
    }

    /// Fires a trigger by name.
    ///
    /// Returns `true` if the trigger was subscribed and forwarded. Unknown
    /// names, or a bridge that has shut down, return `false`.
    pub fn fire(&self, name: &str) -> bool {
        let Some(gesture) = self.responses.get(name).copied() else {
            debug!(trigger = name, "ignoring unsubscribed trigger");
            return false;
        };
        self.inputs.send(BridgeInput::Gesture(gesture)).is_ok()
    }
}
