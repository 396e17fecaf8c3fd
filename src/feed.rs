//! JSON-lines perception feed.
//!
//! Stands in for the host camera and gesture recognizer: each line is
//! either a frame or a named trigger.
//!
//! ```text
//! {"kind":"frame","position":[0,1.6,0],"forward":[0,0,1]}
//! {"kind":"frame"}
//! {"kind":"trigger","name":"palm_open_start"}
//! ```
//!
//! A frame without both `position` and `forward` is forwarded as a frame
//! with no viewer pose.

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::bridge::BridgeInput;
use crate::domain::{Vec3, ViewerPose};
use crate::error::BridgeError;
use crate::gesture::BehaviorSystem;

/// One line of the perception feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedLine {
    /// Camera pose for one rendered frame.
    Frame {
        /// Camera world position.
        #[serde(default)]
        position: Option<Vec3>,
        /// Camera forward vector.
        #[serde(default)]
        forward: Option<Vec3>,
    },
    /// A behavior-system trigger fired.
    Trigger {
        /// Trigger name.
        name: String,
    },
}

impl FeedLine {
    /// Parses one line.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Codec`] if the line is not a valid feed entry.
    pub fn parse(line: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Reads `reader` to EOF, forwarding frames to `inputs` and triggers to
/// `behavior`. Malformed lines are skipped.
///
/// Returns the number of lines applied. Stops early if the bridge has
/// shut down.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] if reading fails.
pub async fn run_feed<R>(
    reader: R,
    inputs: mpsc::UnboundedSender<BridgeInput>,
    behavior: BehaviorSystem,
) -> Result<u64, BridgeError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut applied = 0u64;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match FeedLine::parse(line) {
            Ok(FeedLine::Frame { position, forward }) => {
                let pose = position
                    .zip(forward)
                    .map(|(position, forward)| ViewerPose::new(position, forward));
                if inputs.send(BridgeInput::Frame(pose)).is_err() {
                    debug!("bridge stopped; ending feed");
                    break;
                }
            }
            Ok(FeedLine::Trigger { name }) => {
                behavior.fire(&name);
            }
            Err(e) => {
                warn!(error = %e, line, "skipping malformed feed line");
                continue;
            }
        }
        applied = applied.saturating_add(1);
    }

    debug!(applied, "feed ended");
    Ok(applied)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::gesture::{GestureKind, GestureTriggerAdapter};

    fn behavior(inputs: &mpsc::UnboundedSender<BridgeInput>) -> BehaviorSystem {
        let mut behavior = BehaviorSystem::new(inputs.clone());
        GestureTriggerAdapter::register(&mut behavior);
        behavior
    }

    #[test]
    fn parses_frame_with_pose() {
        let Ok(line) = FeedLine::parse(r#"{"kind":"frame","position":[0,1,0],"forward":[0,0,1]}"#)
        else {
            panic!("frame should parse");
        };
        assert_eq!(
            line,
            FeedLine::Frame {
                position: Some(Vec3::new(0.0, 1.0, 0.0)),
                forward: Some(Vec3::new(0.0, 0.0, 1.0)),
            }
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(FeedLine::parse(r#"{"kind":"wave"}"#).is_err());
    }

    #[tokio::test]
    async fn forwards_frames_and_triggers_in_order() {
        let input = concat!(
            "{\"kind\":\"frame\",\"position\":[0,0,0],\"forward\":[0,0,1]}\n",
            "\n",
            "not json\n",
            "{\"kind\":\"frame\"}\n",
            "{\"kind\":\"trigger\",\"name\":\"thumbs_up_start\"}\n",
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let behavior = behavior(&tx);

        let result = run_feed(input.as_bytes(), tx, behavior).await;
        assert!(matches!(result, Ok(3)));

        let Ok(BridgeInput::Frame(Some(pose))) = rx.try_recv() else {
            panic!("expected a posed frame");
        };
        assert_eq!(pose.forward, Vec3::new(0.0, 0.0, 1.0));
        assert!(matches!(rx.try_recv(), Ok(BridgeInput::Frame(None))));
        assert!(matches!(
            rx.try_recv(),
            Ok(BridgeInput::Gesture(GestureKind::ThumbsUp))
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stops_when_bridge_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        let behavior = behavior(&tx);
        drop(rx);

        let input = "{\"kind\":\"frame\"}\n{\"kind\":\"frame\"}\n";
        let result = run_feed(input.as_bytes(), tx, behavior).await;
        assert!(matches!(result, Ok(0)));
    }
}
