//! Domain layer: geometry, targets, commands, and the event system.
//!
//! Plain data types shared by the gaze, gesture, and socket layers, plus
//! the broadcast bus used to observe bridge state changes.

pub mod bridge_event;
pub mod command;
pub mod connection_state;
pub mod event_bus;
pub mod target;
pub mod vec3;

pub use bridge_event::BridgeEvent;
pub use command::{CommandMessage, DeviceState};
pub use connection_state::ConnectionState;
pub use event_bus::{EventBus, MAX_EVENT_BUS_CAPACITY};
pub use target::{Target, ViewerPose};
pub use vec3::Vec3;
