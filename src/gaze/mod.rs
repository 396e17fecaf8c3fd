//! Gaze layer: angle computation, selection state, and per-frame evaluation.

pub mod angle;
pub mod evaluator;
pub mod selection;

pub use angle::gaze_angle_deg;
pub use evaluator::GazeEvaluator;
pub use selection::{GazeSelection, SelectionChange};
