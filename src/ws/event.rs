//! Events reported by the socket task to the coordinating loop.

/// Socket lifecycle and inbound traffic, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// Handshake completed.
    Opened,
    /// A frame arrived. Binary payloads are already decoded to text.
    Message {
        /// Decoded payload.
        text: String,
        /// Whether the frame was binary on the wire.
        binary: bool,
    },
    /// Transport error. Always followed by [`SocketEvent::Closed`].
    Error(String),
    /// The connection ended.
    Closed {
        /// `true` when a close frame was exchanged or the close was local.
        clean: bool,
        /// Close code from the peer's close frame, if any.
        code: Option<u16>,
    },
}
