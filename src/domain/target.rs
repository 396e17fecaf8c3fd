//! Gaze targets and the viewer pose they are evaluated against.

use serde::{Deserialize, Serialize};

use super::Vec3;

/// A named, positioned entity that can be looked at and switched.
///
/// The name doubles as the remote device identifier (`deviceType` on the
/// wire), so it must match what the receiving server expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Device name sent to the server.
    pub name: String,
    /// World-space position.
    pub position: Vec3,
}

impl Target {
    /// Creates a target.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Camera pose for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerPose {
    /// World-space camera position.
    pub position: Vec3,
    /// Camera forward direction, expected to be unit length.
    pub forward: Vec3,
}

impl ViewerPose {
    /// Creates a pose.
    #[must_use]
    pub const fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}
