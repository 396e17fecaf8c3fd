//! Connection lifecycle states.

use std::fmt;

use serde::Serialize;

/// Lifecycle of the single device-server connection.
///
/// ```text
/// Uninitialized ──(url configured)──▶ Connecting ──(handshake)──▶ Open
///                                          │                       │
///                                          └────(close / error)────┴──▶ Closed
/// ```
///
/// `Closed` is terminal: there is no reconnection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No endpoint configured, or startup has not run yet.
    Uninitialized,
    /// Handshake in flight.
    Connecting,
    /// Handshake completed; frames may be written.
    Open,
    /// Closed cleanly, by error, or locally.
    Closed,
}

impl ConnectionState {
    /// Returns `true` if frames can be written.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Static name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
