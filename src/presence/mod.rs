//! Push-driven chat presence
//!
//! The gateway task owns the websocket and only forwards events; the
//! listener task owns the record and only applies them. They meet at an
//! mpsc channel.

pub mod gateway;
pub mod listener;
pub mod models;

pub use gateway::Gateway;
pub use listener::PresenceListener;
pub use models::PresenceUpdate;

/// Buffered presence events between the gateway and the listener
pub const EVENT_BUFFER_SIZE: usize = 64;
