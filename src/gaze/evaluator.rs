//! Per-frame gaze evaluation.
//!
//! [`GazeEvaluator::evaluate`] runs once per frame: it walks the target
//! list in order, picks the first target whose [`gaze_angle_deg`] is at or
//! below the threshold, and updates the [`GazeSelection`]. Transitions are
//! logged once; a selection that persists across frames logs nothing.

use tracing::info;

use super::angle::gaze_angle_deg;
use super::selection::{GazeSelection, SelectionChange};
use crate::config::clamp_threshold;
use crate::domain::{Target, ViewerPose};
use crate::error::BridgeError;

/// Owns the gaze selection and the threshold it is evaluated against.
#[derive(Debug, Clone)]
pub struct GazeEvaluator {
    threshold_deg: f32,
    selection: GazeSelection,
}

impl GazeEvaluator {
    /// Creates an evaluator. The threshold is clamped into 1-45 degrees.
    #[must_use]
    pub fn new(threshold_deg: f32) -> Self {
        Self {
            threshold_deg: clamp_threshold(threshold_deg),
            selection: GazeSelection::new(),
        }
    }

    /// Effective threshold in degrees.
    #[must_use]
    pub const fn threshold_deg(&self) -> f32 {
        self.threshold_deg
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &GazeSelection {
        &self.selection
    }

    /// Evaluates one frame.
    ///
    /// Returns the selection transition, or `None` if the selection is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigurationMissing`] if `pose` is absent or
    /// `targets` is empty. The selection keeps its previous value.
    pub fn evaluate(
        &mut self,
        pose: Option<&ViewerPose>,
        targets: &[Target],
    ) -> Result<Option<SelectionChange>, BridgeError> {
        let Some(pose) = pose else {
            return Err(BridgeError::ConfigurationMissing("viewer pose"));
        };
        if targets.is_empty() {
            return Err(BridgeError::ConfigurationMissing("targets"));
        }

        let hit = first_hit(pose, targets, self.threshold_deg);
        let change = self.selection.set(hit.map(|t| t.name.as_str()));

        if let Some(change) = &change {
            match change.current.as_deref() {
                Some(name) => info!(target_name = name, "looking at target"),
                None => info!(
                    previous = change.previous.as_deref().unwrap_or_default(),
                    "gaze left target"
                ),
            }
        }

        Ok(change)
    }
}

/// First target, in list order, within the threshold.
fn first_hit<'a>(pose: &ViewerPose, targets: &'a [Target], threshold_deg: f32) -> Option<&'a Target> {
    targets.iter().find(|target| {
        gaze_angle_deg(pose.position, pose.forward, target.position)
            .is_some_and(|angle| angle <= threshold_deg)
    })
}
