//! Timer state structure as pushed by the remote peer

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the remote countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimerStatus {
    Running,
    Paused,
    Finished,
}

/// Authoritative timer snapshot.
///
/// `display` and `progress` are dictated by the peer and must never be
/// recomputed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub remaining_seconds: u64,
    #[serde(default)]
    pub initial_seconds: u64,
    pub display: String,
    pub progress: f64,
}

impl TimerState {
    /// Create the idle state shown before the first update arrives
    pub fn new() -> Self {
        Self {
            status: TimerStatus::Paused,
            remaining_seconds: 0,
            initial_seconds: 0,
            display: "00:00".to_string(),
            progress: 0.0,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
