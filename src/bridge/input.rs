//! Inputs pushed into the coordinating loop by perception sources.

use crate::domain::ViewerPose;
use crate::gesture::GestureKind;

/// One unit of work for the bridge loop.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeInput {
    /// A rendered frame. `None` when the camera pose is unavailable.
    Frame(Option<ViewerPose>),
    /// A subscribed gesture fired.
    Gesture(GestureKind),
}
