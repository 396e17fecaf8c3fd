//! Gaze angle between the viewer's forward vector and a target.

use crate::domain::Vec3;

/// Angle in degrees used to decide whether a target is looked at.
///
/// Computed as `180 - acos(dot(forward, normalize(target - viewer)))`, so a
/// target straight ahead of the viewer yields `180` and one directly
/// behind yields `0`. A target is selected when this value is at or below
/// the threshold.
///
/// Returns `None` when the target sits on the viewer position and has no
/// direction.
#[must_use]
pub fn gaze_angle_deg(viewer: Vec3, forward: Vec3, target: Vec3) -> Option<f32> {
    let to_target = (target - viewer).normalize()?;
    let dot = forward.dot(to_target).clamp(-1.0, 1.0);
    Some(180.0 - dot.acos().to_degrees())
}
