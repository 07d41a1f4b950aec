//! Signal handling for graceful shutdown

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

/// Wait for shutdown signals (SIGTERM, SIGINT, SIGHUP).
///
/// Never resolves if the handler cannot be installed.
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGHUP,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to install signal handler: {}", e);
            return std::future::pending().await;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}
