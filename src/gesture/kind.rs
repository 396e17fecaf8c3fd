//! Gestures the bridge responds to.

use crate::domain::DeviceState;

/// A gesture reported by the behavior system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Open hand, palm facing forward.
    OpenHand,
    /// Thumb extended upward, other fingers curled.
    ThumbsUp,
}

impl GestureKind {
    /// All gestures, in registration order.
    pub const ALL: [Self; 2] = [Self::OpenHand, Self::ThumbsUp];

    /// Behavior-system trigger name fired when the gesture starts.
    #[must_use]
    pub const fn trigger_name(&self) -> &'static str {
        match self {
            Self::OpenHand => "palm_open_start",
            Self::ThumbsUp => "thumbs_up_start",
        }
    }

    /// Device state this gesture requests.
    #[must_use]
    pub const fn device_state(&self) -> DeviceState {
        match self {
            Self::OpenHand => DeviceState::TurnOn,
            Self::ThumbsUp => DeviceState::TurnOff,
        }
    }

    /// Looks up a gesture by trigger name (case-sensitive).
    #[must_use]
    pub fn from_trigger_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.trigger_name() == name)
    }
}
