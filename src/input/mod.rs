//! Input handling module
//!
//! Keyboard shortcuts, the custom time prompt and the focus rules between them.

pub mod controls;
pub mod keys;
pub mod prompt;

// Re-export main types
pub use controls::{Controls, Flow};
pub use keys::{Focus, Key, KeyDispatcher};
pub use prompt::TimePrompt;
