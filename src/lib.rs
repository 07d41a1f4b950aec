//! Countdown Ring - A real-time countdown display for a remote timer
//!
//! This library keeps a live copy of the timer state pushed by a remote peer
//! over a reconnecting WebSocket, draws it as a progress ring with a numeric
//! readout, and sends control commands back upstream.

pub mod config;
pub mod state;
pub mod channel;
pub mod present;
pub mod render;
pub mod commands;
pub mod input;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{StateStore, TimerState, TimerStatus};
pub use channel::{ChannelClient, Command};
pub use present::{map_to_visual_intent, VisualIntent};
pub use utils::signals::shutdown_signal;
