//! Long-running tasks module
//!
//! This module contains the UI loop and the tasks that run alongside it.

pub mod connection_monitor;
pub mod ui;

// Re-export main functions
pub use connection_monitor::connection_monitor_task;
pub use ui::ui_task;
