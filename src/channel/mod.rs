//! Push channel module
//!
//! This module contains the wire protocol spoken with the peer, the reconnect
//! policy and the client that keeps the connection alive.

pub mod backoff;
pub mod client;
pub mod protocol;

// Re-export main types
pub use backoff::ReconnectPolicy;
pub use client::{ChannelClient, ConnectionEvent, Liveness, StateHandler};
pub use protocol::{ClientEvent, Command, PeerError, ServerEvent};
