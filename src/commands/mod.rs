//! Command emission module
//!
//! This module turns user intents into commands for the peer.

pub mod emitter;
pub mod time_input;

// Re-export main types
pub use emitter::{CommandEmitter, CommandSink, Preset, ADJUST_STEP_SECONDS};
pub use time_input::{parse_custom_time, TimeInputError};
pub use crate::channel::Command;
