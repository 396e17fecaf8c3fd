//! Gesture layer: gesture kinds, the named-trigger facility, and the
//! adapter that turns firings into device commands.

pub mod behavior;
pub mod kind;
pub mod trigger;

pub use behavior::BehaviorSystem;
pub use kind::GestureKind;
pub use trigger::GestureTriggerAdapter;
