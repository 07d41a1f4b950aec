//! State management module
//!
//! This module contains the timer snapshot pushed by the peer and the store
//! that keeps the single live copy of it.

pub mod timer_state;
pub mod store;

// Re-export main types
pub use timer_state::{TimerState, TimerStatus};
pub use store::StateStore;
