//! Socket task: owns the WebSocket stream for the connection's lifetime.
//!
//! Outgoing frames arrive on an unbounded channel and are written in
//! order. Inbound frames and lifecycle changes are reported as
//! [`SocketEvent`]s. The task never reconnects; once the stream ends it
//! reports [`SocketEvent::Closed`] and exits.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::SocketEvent;
use crate::error::BridgeError;

/// Spawns the socket task for `url`.
pub fn spawn_socket(
    url: String,
    outgoing: mpsc::UnboundedReceiver<Message>,
    events: mpsc::UnboundedSender<SocketEvent>,
) -> JoinHandle<()> {
    tokio::spawn(run_socket(url, outgoing, events))
}

/// Connects and runs the read/write loop until the connection ends.
async fn run_socket(
    url: String,
    mut outgoing: mpsc::UnboundedReceiver<Message>,
    events: mpsc::UnboundedSender<SocketEvent>,
) {
    let ws = match connect_async(url.as_str()).await {
        Ok((ws, _response)) => ws,
        Err(e) => {
            let _ = events.send(SocketEvent::Error(BridgeError::from(e).to_string()));
            let _ = events.send(SocketEvent::Closed {
                clean: false,
                code: None,
            });
            return;
        }
    };
    let _ = events.send(SocketEvent::Opened);

    let (mut ws_tx, mut ws_rx) = ws.split();

    let closed = loop {
        tokio::select! {
            // Frame queued by the bridge
            out = outgoing.recv() => {
                let Some(msg) = out else {
                    // Writer dropped: local close.
                    let _ = ws_tx.close().await;
                    break SocketEvent::Closed { clean: true, code: None };
                };
                if let Err(e) = ws_tx.send(msg).await {
                    let _ = events.send(SocketEvent::Error(BridgeError::from(e).to_string()));
                    break SocketEvent::Closed { clean: false, code: None };
                }
            }
            // Frame from the server
            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let _ = events.send(SocketEvent::Message {
                            text: text.as_str().to_string(),
                            binary: false,
                        });
                    }
                    Some(Ok(Message::Binary(data))) => {
                        let _ = events.send(SocketEvent::Message {
                            text: String::from_utf8_lossy(&data).into_owned(),
                            binary: true,
                        });
                    }
                    Some(Ok(Message::Close(frame))) => {
                        // Flushes the close reply tungstenite queued on read.
                        let _ = ws_tx.close().await;
                        break SocketEvent::Closed {
                            clean: true,
                            code: frame.map(|f| u16::from(f.code)),
                        };
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        let _ = events.send(SocketEvent::Error(BridgeError::from(e).to_string()));
                        break SocketEvent::Closed { clean: false, code: None };
                    }
                    None => break SocketEvent::Closed { clean: false, code: None },
                }
            }
        }
    };

    let _ = events.send(closed);
    tracing::debug!("socket task finished");
}
