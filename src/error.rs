//! Bridge error taxonomy.
//!
//! [`BridgeError`] is the central error type. Apart from
//! [`BridgeError::InvalidConfig`], which only occurs while loading
//! configuration at startup, every variant is local to a single operation:
//! the caller logs it and carries on. Nothing here is fatal to the loop.

use tokio_tungstenite::tungstenite;

/// Errors produced by the bridge.
///
/// # Categories
///
/// | Variant                 | Raised when                               | Handling                  |
/// |-------------------------|-------------------------------------------|---------------------------|
/// | `ConfigurationMissing`  | no viewer pose, no targets, no socket URL | logged, operation skipped |
/// | `InvalidConfig`         | malformed configuration at startup        | startup aborts            |
/// | `ConnectionUnavailable` | send attempted while socket is not open   | command dropped           |
/// | `Socket`                | transport failure                         | logged, socket closed     |
/// | `Codec`                 | JSON serialization failure                | logged, command dropped   |
/// | `Io`                    | perception feed read failure              | feed stops                |
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A required input is absent (camera pose, target list, socket URL).
    #[error("configuration missing: {0}")]
    ConfigurationMissing(&'static str),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The socket is not open, so nothing can be written to it.
    #[error("connection unavailable")]
    ConnectionUnavailable,

    /// WebSocket transport failure.
    #[error("socket error: {0}")]
    Socket(#[from] tungstenite::Error),

    /// Message serialization failure.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Failure reading the perception feed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Returns `true` for errors that drop a single operation silently
    /// rather than indicating a fault worth surfacing at `warn`.
    #[must_use]
    pub const fn is_silent_drop(&self) -> bool {
        matches!(self, Self::ConnectionUnavailable)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_missing_item() {
        let err = BridgeError::ConfigurationMissing("camera");
        assert_eq!(err.to_string(), "configuration missing: camera");
    }

    #[test]
    fn connection_unavailable_is_silent() {
        assert!(BridgeError::ConnectionUnavailable.is_silent_drop());
        assert!(!BridgeError::InvalidConfig("x".to_string()).is_silent_drop());
    }

    #[test]
    fn codec_error_converts() {
        let Err(json_err) = serde_json::from_str::<u32>("not json") else {
            panic!("expected parse failure");
        };
        let err = BridgeError::from(json_err);
        assert!(matches!(err, BridgeError::Codec(_)));
    }
}
