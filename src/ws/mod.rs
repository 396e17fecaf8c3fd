//! WebSocket layer: the single outbound connection, command dispatch, and
//! the keepalive timer.
//!
//! The socket itself lives in a spawned task ([`socket`]); everything that
//! mutates connection state runs on the bridge's coordinating loop.

pub mod connection;
pub mod dispatcher;
pub mod event;
pub mod keepalive;
pub mod socket;

pub use connection::{ConnectionManager, KEEPALIVE_PAYLOAD};
pub use dispatcher::CommandDispatcher;
pub use event::SocketEvent;
pub use keepalive::Keepalive;
