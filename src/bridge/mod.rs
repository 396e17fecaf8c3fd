//! Bridge layer: the owning context and the coordinating loop.
//!
//! All perception sources (frames, gesture triggers), socket events, and
//! keepalive ticks funnel into [`Bridge::run`], which applies them one at
//! a time.

pub mod context;
pub mod input;

pub use context::Bridge;
pub use input::BridgeInput;
