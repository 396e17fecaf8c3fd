//! Observation channel for bridge activity.
//!
//! The coordinating loop is the only writer. Selection changes, sent
//! commands, connection transitions, inbound messages and keepalives are
//! all published here, so integration tests and telemetry can watch the
//! bridge without reaching into its state.

use tokio::sync::broadcast;

use super::BridgeEvent;

/// Largest ring buffer the bus will allocate.
pub const MAX_EVENT_BUS_CAPACITY: usize = 1 << 16;

/// Broadcast bus for [`BridgeEvent`]s.
///
/// Observers that fall behind lose the oldest events; the bridge itself
/// never waits on them.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    /// Creates a bus holding up to `capacity` undelivered events, clamped
    /// to `1..=MAX_EVENT_BUS_CAPACITY`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_EVENT_BUS_CAPACITY));
        Self { sender }
    }

    /// Publishes `event` and returns how many observers got it.
    ///
    /// With nobody watching the event is discarded.
    pub fn publish(&self, event: BridgeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// New observer. Sees events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    /// Number of live observers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
