//! Connection state machine.
//!
//! [`ConnectionManager`] owns the single device-server connection. It is
//! driven entirely from the coordinating loop: the socket task reports
//! [`SocketEvent`]s, and the manager applies the matching
//! [`ConnectionState`] transition, logs it, and publishes it.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use super::SocketEvent;
use super::socket::spawn_socket;
use crate::domain::{BridgeEvent, ConnectionState, EventBus};
use crate::error::BridgeError;

/// Literal keepalive payload.
pub const KEEPALIVE_PAYLOAD: &str = "ping";

/// Owner of the single device-server connection.
#[derive(Debug)]
pub struct ConnectionManager {
    state: ConnectionState,
    outgoing: Option<mpsc::UnboundedSender<Message>>,
    task: Option<JoinHandle<()>>,
    greeting: String,
    event_bus: EventBus,
}

impl ConnectionManager {
    /// Creates an uninitialized manager.
    #[must_use]
    pub fn new(greeting: impl Into<String>, event_bus: EventBus) -> Self {
        Self {
            state: ConnectionState::Uninitialized,
            outgoing: None,
            task: None,
            greeting: greeting.into(),
            event_bus,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns `true` if frames can be written.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Starts connecting to `url`, reporting socket events on `events`.
    ///
    /// Only the first call from `Uninitialized` has any effect; the
    /// connection is established once per process.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigurationMissing`] when `url` is `None`;
    /// the manager then stays `Uninitialized`.
    pub fn start(
        &mut self,
        url: Option<&str>,
        events: mpsc::UnboundedSender<SocketEvent>,
    ) -> Result<(), BridgeError> {
        let Some(url) = url else {
            return Err(BridgeError::ConfigurationMissing("socket url"));
        };
        if self.state != ConnectionState::Uninitialized {
            debug!(state = %self.state, "connection already started");
            return Ok(());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.task = Some(spawn_socket(url.to_string(), rx, events));
        info!(url, "connecting");
        self.attach(tx);
        Ok(())
    }

    /// Moves to `Connecting` with `outgoing` as the frame writer.
    ///
    /// [`ConnectionManager::start`] calls this with the socket task's
    /// channel; any other writer (a test harness, a relay) works the same.
    pub fn attach(&mut self, outgoing: mpsc::UnboundedSender<Message>) {
        self.outgoing = Some(outgoing);
        self.transition(ConnectionState::Connecting);
    }

    /// Applies a socket event.
    pub fn on_socket_event(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Opened => {
                if self.state != ConnectionState::Connecting {
                    debug!(state = %self.state, "ignoring open outside connecting state");
                    return;
                }
                self.transition(ConnectionState::Open);
                info!("websocket connected");
                let greeting = self.greeting.clone();
                if let Err(e) = self.send_text(greeting) {
                    warn!(error = %e, "failed to queue greeting");
                }
            }
            SocketEvent::Message { text, binary } => {
                if binary {
                    info!(message = %text, "received binary message");
                } else {
                    info!(message = %text, "received text message");
                }
                let _ = self.event_bus.publish(BridgeEvent::MessageReceived {
                    text,
                    binary,
                    timestamp: Utc::now(),
                });
            }
            SocketEvent::Error(reason) => {
                warn!(%reason, "websocket encountered an error");
            }
            SocketEvent::Closed { clean, code } => {
                if self.state == ConnectionState::Closed {
                    debug!("socket task reported close after local close");
                    return;
                }
                if clean {
                    info!(?code, "websocket closed cleanly");
                } else {
                    warn!(?code, "websocket closed with error");
                }
                self.outgoing = None;
                self.transition(ConnectionState::Closed);
            }
        }
    }

    /// Queues a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConnectionUnavailable`] unless the connection
    /// is `Open` and its writer is still alive.
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), BridgeError> {
        if !self.is_open() {
            return Err(BridgeError::ConnectionUnavailable);
        }
        let Some(outgoing) = &self.outgoing else {
            return Err(BridgeError::ConnectionUnavailable);
        };
        outgoing
            .send(Message::text(text.into()))
            .map_err(|_| BridgeError::ConnectionUnavailable)
    }

    /// Sends the keepalive ping if the connection is open.
    ///
    /// Returns `true` if a ping was queued.
    pub fn send_keepalive(&self) -> bool {
        if self.send_text(KEEPALIVE_PAYLOAD).is_err() {
            return false;
        }
        let _ = self.event_bus.publish(BridgeEvent::KeepaliveSent {
            timestamp: Utc::now(),
        });
        true
    }

    /// Closes the connection from this side.
    ///
    /// Dropping the writer makes the socket task send a close frame and
    /// exit. No-op when uninitialized or already closed.
    pub fn close(&mut self) {
        if matches!(
            self.state,
            ConnectionState::Uninitialized | ConnectionState::Closed
        ) {
            return;
        }
        self.outgoing = None;
        info!("websocket closed locally");
        self.transition(ConnectionState::Closed);
    }

    /// Closes the connection and waits up to `grace` for the socket task
    /// to finish its close handshake.
    pub async fn shutdown(&mut self, grace: Duration) {
        self.close();
        let Some(task) = self.task.take() else {
            return;
        };
        match tokio::time::timeout(grace, task).await {
            Ok(Ok(())) => debug!("socket task drained"),
            Ok(Err(e)) => warn!(error = %e, "socket task failed"),
            Err(_) => warn!(?grace, "socket task did not finish in time"),
        }
    }

    fn transition(&mut self, next: ConnectionState) {
        if self.state == next {
            return;
        }
        debug!(from = %self.state, to = %next, "connection state change");
        self.state = next;
        let _ = self.event_bus.publish(BridgeEvent::ConnectionStateChanged {
            state: next,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn manager() -> ConnectionManager {
        ConnectionManager::new("LensStudio: Connected", EventBus::new(64))
    }

    fn text_of(msg: Result<Message, mpsc::error::TryRecvError>) -> String {
        let Ok(Message::Text(text)) = msg else {
            panic!("expected a text frame");
        };
        text.as_str().to_string()
    }

    #[test]
    fn starts_uninitialized() {
        let conn = manager();
        assert_eq!(conn.state(), ConnectionState::Uninitialized);
        assert!(!conn.is_open());
    }

    #[test]
    fn start_without_url_stays_uninitialized() {
        let mut conn = manager();
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = conn.start(None, tx);
        assert!(matches!(
            result,
            Err(BridgeError::ConfigurationMissing("socket url"))
        ));
        assert_eq!(conn.state(), ConnectionState::Uninitialized);
    }

    #[test]
    fn open_sends_greeting() {
        let mut conn = manager();
        let (tx, mut rx) = mpsc::unbounded_channel();
        conn.attach(tx);
        assert_eq!(conn.state(), ConnectionState::Connecting);

        conn.on_socket_event(SocketEvent::Opened);
        assert!(conn.is_open());
        assert_eq!(text_of(rx.try_recv()), "LensStudio: Connected");
    }

    #[test]
    fn send_rejected_while_connecting() {
        let mut conn = manager();
        let (tx, mut rx) = mpsc::unbounded_channel();
        conn.attach(tx);

        let result = conn.send_text("hello");
        assert!(matches!(result, Err(BridgeError::ConnectionUnavailable)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn keepalive_only_when_open() {
        let mut conn = manager();
        assert!(!conn.send_keepalive());

        let (tx, mut rx) = mpsc::unbounded_channel();
        conn.attach(tx);
        assert!(!conn.send_keepalive());

        conn.on_socket_event(SocketEvent::Opened);
        let _ = rx.try_recv();
        assert!(conn.send_keepalive());
        assert_eq!(text_of(rx.try_recv()), "ping");
    }

    #[test]
    fn remote_close_is_terminal() {
        let mut conn = manager();
        let (tx, _rx) = mpsc::unbounded_channel();
        conn.attach(tx);
        conn.on_socket_event(SocketEvent::Opened);

        conn.on_socket_event(SocketEvent::Closed {
            clean: false,
            code: Some(1006),
        });
        assert_eq!(conn.state(), ConnectionState::Closed);
        assert!(matches!(
            conn.send_text("x"),
            Err(BridgeError::ConnectionUnavailable)
        ));

        // A late open is not a reconnection.
        conn.on_socket_event(SocketEvent::Opened);
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[test]
    fn local_close_drops_writer() {
        let mut conn = manager();
        let (tx, mut rx) = mpsc::unbounded_channel();
        conn.attach(tx);
        conn.on_socket_event(SocketEvent::Opened);
        let _ = rx.try_recv();

        conn.close();
        assert_eq!(conn.state(), ConnectionState::Closed);
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn close_when_uninitialized_is_noop() {
        let mut conn = manager();
        conn.close();
        assert_eq!(conn.state(), ConnectionState::Uninitialized);
    }

    #[tokio::test]
    async fn shutdown_without_task_closes() {
        let mut conn = manager();
        let (tx, mut rx) = mpsc::unbounded_channel();
        conn.attach(tx);
        conn.on_socket_event(SocketEvent::Opened);
        let _ = rx.try_recv();

        conn.shutdown(Duration::from_millis(50)).await;
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_waits_for_socket_task() {
        let mut conn = manager();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        conn.attach(tx);
        conn.on_socket_event(SocketEvent::Opened);

        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        conn.task = Some(tokio::spawn(async move {
            // Drains until the writer is dropped, like the real socket task.
            while rx.recv().await.is_some() {}
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = done_tx.send(());
        }));

        conn.shutdown(Duration::from_secs(1)).await;
        assert!(done_rx.try_recv().is_ok());
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_gives_up_after_grace() {
        let mut conn = manager();
        let (tx, _rx) = mpsc::unbounded_channel();
        conn.attach(tx);
        conn.task = Some(tokio::spawn(std::future::pending::<()>()));

        let started = tokio::time::Instant::now();
        conn.shutdown(Duration::from_millis(100)).await;
        assert_eq!(started.elapsed(), Duration::from_millis(100));
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn transitions_are_published() {
        let bus = EventBus::new(64);
        let mut events = bus.subscribe();
        let mut conn = ConnectionManager::new("hi", bus);
        let (tx, _rx) = mpsc::unbounded_channel();

        conn.attach(tx);
        conn.on_socket_event(SocketEvent::Opened);
        conn.on_socket_event(SocketEvent::Message {
            text: "ack".to_string(),
            binary: true,
        });
        conn.on_socket_event(SocketEvent::Closed {
            clean: true,
            code: Some(1000),
        });

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event.event_type_str());
        }
        assert_eq!(
            seen,
            vec![
                "connection_state_changed",
                "connection_state_changed",
                "message_received",
                "connection_state_changed",
            ]
        );
    }
}
