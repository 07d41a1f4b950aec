//! Countdown Ring - A real-time countdown display for a remote timer
//!
//! This is the main entry point for the countdown-ring client.

use std::{fs::File, sync::{Arc, Mutex}};
use anyhow::Context;
use tracing::info;

use countdown_ring::{
    config::Config,
    channel::ChannelClient,
    state::StateStore,
    tasks::{connection_monitor_task, ui_task},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Log to a file so the output cannot corrupt the terminal UI
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_ring={}", config.log_level()))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let endpoint = config
        .endpoint()
        .with_context(|| format!("Invalid peer URL {}", config.url))?;

    info!("Starting countdown-ring v1.0.0");
    info!(
        "Configuration: url={}, mode={:?}, fps={}",
        endpoint,
        config.presentation_mode(),
        config.fps
    );

    // Single live timer snapshot, replaced by the channel handler
    let store = Arc::new(StateStore::new());

    let client = ChannelClient::new(endpoint, config.reconnect_policy());
    let handler_store = Arc::clone(&store);
    client.on_state_update(move |state| handler_store.replace(state));

    tokio::spawn(connection_monitor_task(client.subscribe_events(), Arc::clone(&store)));
    let channel_task = client.spawn();

    let result = ui_task(store, client, &config).await;

    channel_task.abort();
    info!("Client shutdown complete");
    result
}
