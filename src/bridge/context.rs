//! The bridge context and its coordinating loop.
//!
//! [`Bridge`] owns every piece of mutable state: the gaze selection, the
//! connection, and the debug overlay. [`Bridge::run`] is the single
//! consumer of perception inputs, socket events, and keepalive ticks, so
//! none of that state is ever touched concurrently.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::BridgeInput;
use crate::config::BridgeConfig;
use crate::domain::{BridgeEvent, CommandMessage, EventBus, Target, ViewerPose};
use crate::gaze::{GazeEvaluator, GazeSelection};
use crate::gesture::{BehaviorSystem, GestureKind, GestureTriggerAdapter};
use crate::overlay::DebugOverlay;
use crate::ws::{CommandDispatcher, ConnectionManager, Keepalive, SocketEvent};

/// How long shutdown waits for the socket task's close handshake.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Owning context for the gaze-to-command bridge.
#[derive(Debug)]
pub struct Bridge {
    targets: Vec<Target>,
    gaze: GazeEvaluator,
    triggers: GestureTriggerAdapter,
    connection: ConnectionManager,
    overlay: DebugOverlay,
    behavior: BehaviorSystem,
    event_bus: EventBus,
    socket_url: Option<String>,
    keepalive_period: Duration,
    keepalive_ticks: u64,
    started: bool,
    input_tx: mpsc::UnboundedSender<BridgeInput>,
    input_rx: mpsc::UnboundedReceiver<BridgeInput>,
    socket_tx: mpsc::UnboundedSender<SocketEvent>,
    socket_rx: mpsc::UnboundedReceiver<SocketEvent>,
}

impl Bridge {
    /// Builds the bridge and registers its gesture triggers.
    ///
    /// Nothing touches the network until [`Bridge::start`] or
    /// [`Bridge::run`].
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        let event_bus = EventBus::new(config.event_bus_capacity);
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (socket_tx, socket_rx) = mpsc::unbounded_channel();

        let mut behavior = BehaviorSystem::new(input_tx.clone());
        GestureTriggerAdapter::register(&mut behavior);

        Self {
            targets: config.targets,
            gaze: GazeEvaluator::new(config.angle_threshold_deg),
            triggers: GestureTriggerAdapter::new(CommandDispatcher::new(event_bus.clone())),
            connection: ConnectionManager::new(config.greeting, event_bus.clone()),
            overlay: DebugOverlay::new(config.debug_mode),
            behavior,
            event_bus,
            socket_url: config.socket_url,
            keepalive_period: config.keepalive_interval,
            keepalive_ticks: 0,
            started: false,
            input_tx,
            input_rx,
            socket_tx,
            socket_rx,
        }
    }

    /// Event bus for observing the bridge.
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Gesture facility handle for recognizers. Cheap to clone.
    #[must_use]
    pub fn behavior(&self) -> BehaviorSystem {
        self.behavior.clone()
    }

    /// Sender for frame and gesture inputs.
    #[must_use]
    pub fn inputs(&self) -> mpsc::UnboundedSender<BridgeInput> {
        self.input_tx.clone()
    }

    /// Current gaze selection.
    #[must_use]
    pub const fn selection(&self) -> &GazeSelection {
        self.gaze.selection()
    }

    /// Connection manager.
    #[must_use]
    pub const fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    /// Debug overlay.
    #[must_use]
    pub const fn overlay(&self) -> &DebugOverlay {
        &self.overlay
    }

    /// Keepalive ticks observed by [`Bridge::run`].
    #[must_use]
    pub const fn keepalive_ticks(&self) -> u64 {
        self.keepalive_ticks
    }

    /// Starts the connection. Runs once; later calls are no-ops.
    ///
    /// Without a configured URL the connection stays uninitialized and a
    /// single warning is logged.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if let Err(e) = self
            .connection
            .start(self.socket_url.as_deref(), self.socket_tx.clone())
        {
            warn!(error = %e, "no websocket url provided");
        }
        info!(
            targets = self.targets.len(),
            threshold_deg = self.gaze.threshold_deg(),
            "bridge started"
        );
    }

    /// Applies one perception input.
    pub fn handle_input(&mut self, input: BridgeInput) {
        match input {
            BridgeInput::Frame(pose) => self.handle_frame(pose.as_ref()),
            BridgeInput::Gesture(gesture) => {
                let _ = self.handle_gesture(gesture);
            }
        }
    }

    /// Evaluates gaze for one frame.
    pub fn handle_frame(&mut self, pose: Option<&ViewerPose>) {
        match self.gaze.evaluate(pose, &self.targets) {
            Ok(Some(change)) => {
                self.overlay.show_selection(change.current.as_deref());
                let _ = self.event_bus.publish(BridgeEvent::SelectionChanged {
                    previous: change.previous,
                    current: change.current,
                    timestamp: Utc::now(),
                });
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "skipping gaze evaluation"),
        }
    }

    /// Routes a gesture to a device command. Returns the sent command.
    pub fn handle_gesture(&mut self, gesture: GestureKind) -> Option<CommandMessage> {
        match self
            .triggers
            .on_gesture(gesture, self.gaze.selection(), &self.connection)
        {
            Ok(sent) => sent,
            Err(e) if e.is_silent_drop() => {
                debug!(error = %e, "command dropped");
                None
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                None
            }
        }
    }

    /// Applies a socket event.
    pub fn handle_socket_event(&mut self, event: SocketEvent) {
        self.connection.on_socket_event(event);
    }

    /// Handles one keepalive tick. Returns `true` if a ping was sent.
    pub fn keepalive_tick(&mut self) -> bool {
        self.keepalive_ticks = self.keepalive_ticks.saturating_add(1);
        let sent = self.connection.send_keepalive();
        trace!(tick = self.keepalive_ticks, sent, "keepalive");
        sent
    }

    /// Closes the connection from this side.
    pub fn close(&mut self) {
        self.connection.close();
    }

    /// Runs the coordinating loop until `shutdown` completes, then closes
    /// the connection and waits briefly for the close frame to go out.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.start();
        let mut keepalive = Keepalive::new(self.keepalive_period);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                Some(input) = self.input_rx.recv() => self.handle_input(input),
                Some(event) = self.socket_rx.recv() => self.handle_socket_event(event),
                _ = keepalive.tick() => {
                    let _ = self.keepalive_tick();
                }
                () = &mut shutdown => {
                    info!("shutting down");
                    self.connection.shutdown(CLOSE_GRACE).await;
                    break;
                }
            }
        }
    }
}
