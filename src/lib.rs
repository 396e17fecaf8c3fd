//! # gaze-bridge
//!
//! Turns gaze and hand gestures into device on/off commands sent over a
//! persistent WebSocket.
//!
//! Each frame, the viewer's forward direction is compared against a fixed
//! list of targets; the first one within the angle threshold becomes the
//! selection. When the gesture recognizer fires `palm_open_start` or
//! `thumbs_up_start`, a `turn_on` / `turn_off` command for the selected
//! target is written to the device server. A `ping` keepalive goes out
//! every half second. There is no retry and no reconnection.
//!
//! ## Architecture
//!
//! ```text
//! Perception sources (feed/, BehaviorSystem)
//!     │  BridgeInput
//!     ▼
//! Bridge::run (bridge/) ◀── SocketEvent ── socket task (ws/socket)
//!     │                                        ▲
//!     ├── GazeEvaluator (gaze/)                │ frames
//!     ├── GestureTriggerAdapter (gesture/)     │
//!     │      └── CommandDispatcher (ws/)       │
//!     ├── ConnectionManager (ws/) ─────────────┘
//!     └── EventBus (domain/)
//! ```

pub mod bridge;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod gaze;
pub mod gesture;
pub mod overlay;
pub mod ws;
