//! Single-slot store holding the live timer snapshot

use std::sync::Mutex;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use super::TimerState;

/// Holds exactly one `TimerState`, replaced wholesale on every update
#[derive(Debug)]
pub struct StateStore {
    /// Latest snapshot
    state_tx: watch::Sender<TimerState>,
    /// Wall-clock time of the last replace
    updated_at: Mutex<Option<DateTime<Utc>>>,
}

impl StateStore {
    /// Create a store holding the idle default state
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(TimerState::new());
        Self {
            state_tx,
            updated_at: Mutex::new(None),
        }
    }

    /// Overwrite the stored snapshot
    pub fn replace(&self, state: TimerState) {
        debug!(status = ?state.status, display = %state.display, progress = state.progress, "Replacing timer state");
        self.state_tx.send_replace(state);

        if let Ok(mut updated_at) = self.updated_at.lock() {
            *updated_at = Some(Utc::now());
        }
    }

    /// Get a copy of the latest snapshot
    pub fn current(&self) -> TimerState {
        self.state_tx.borrow().clone()
    }

    /// When the peer last pushed a state, if ever
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.lock().ok().and_then(|t| *t)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerStatus;

    fn running(remaining: u64, display: &str, progress: f64) -> TimerState {
        TimerState {
            status: TimerStatus::Running,
            remaining_seconds: remaining,
            initial_seconds: 300,
            display: display.to_string(),
            progress,
        }
    }

    #[test]
    fn test_starts_with_default() {
        let store = StateStore::new();
        assert_eq!(store.current(), TimerState::default());
        assert!(store.updated_at().is_none());
    }

    #[test]
    fn test_replace_supersedes_wholesale() {
        let store = StateStore::new();
        store.replace(running(150, "02:30", 50.0));

        let next = TimerState {
            status: TimerStatus::Paused,
            remaining_seconds: 149,
            initial_seconds: 0,
            display: "02:29".to_string(),
            progress: 49.6,
        };
        store.replace(next.clone());

        // No field of the previous snapshot survives
        assert_eq!(store.current(), next);
        assert!(store.updated_at().is_some());
    }
}
