//! Connection diagnostics background task

use std::sync::Arc;
use chrono::Utc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::{channel::ConnectionEvent, state::StateStore};

/// Log connection transitions. Reads the store but never writes it.
pub async fn connection_monitor_task(
    mut events: broadcast::Receiver<ConnectionEvent>,
    store: Arc<StateStore>,
) {
    info!("Starting connection monitor task");

    loop {
        match events.recv().await {
            Ok(ConnectionEvent::Connecting { attempt }) => {
                debug!(attempt, "Connecting to peer");
            }
            Ok(ConnectionEvent::Connected) => {
                info!("Peer connection established");
            }
            Ok(ConnectionEvent::Disconnected { reason }) => match last_update_age_ms(&store) {
                Some(age_ms) => warn!(%reason, age_ms, "Peer connection lost, showing last state"),
                None => warn!(%reason, "Peer connection lost before any state arrived"),
            },
            Ok(ConnectionEvent::Reconnecting { attempt, delay }) => {
                info!(attempt, delay_ms = delay.as_millis() as u64, "Reconnecting to peer");
            }
            Ok(ConnectionEvent::PeerError { message }) => {
                warn!(%message, "Peer error");
            }
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "Connection monitor lagged behind");
            }
            Err(RecvError::Closed) => {
                debug!("Connection event channel closed");
                break;
            }
        }
    }
}

/// Milliseconds since the peer last pushed a state
fn last_update_age_ms(store: &StateStore) -> Option<i64> {
    store
        .updated_at()
        .map(|at| (Utc::now() - at).num_milliseconds().max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TimerState, TimerStatus};

    #[test]
    fn test_age_needs_an_update() {
        let store = StateStore::new();
        assert_eq!(last_update_age_ms(&store), None);

        store.replace(TimerState::default());
        let age = last_update_age_ms(&store).unwrap();
        assert!((0..60_000).contains(&age));
    }

    #[tokio::test]
    async fn test_disconnect_leaves_state_alone() {
        let store = Arc::new(StateStore::new());
        let shown = TimerState {
            status: TimerStatus::Running,
            remaining_seconds: 42,
            initial_seconds: 60,
            display: "00:42".to_string(),
            progress: 70.0,
        };
        store.replace(shown.clone());

        let (tx, rx) = broadcast::channel(8);
        let task = tokio::spawn(connection_monitor_task(rx, Arc::clone(&store)));
        tx.send(ConnectionEvent::Disconnected { reason: "gone".to_string() }).unwrap();
        tx.send(ConnectionEvent::Reconnecting {
            attempt: 1,
            delay: std::time::Duration::from_millis(500),
        })
        .unwrap();
        drop(tx);

        // Closing the channel ends the task
        task.await.unwrap();
        assert_eq!(store.current(), shown);
    }
}
