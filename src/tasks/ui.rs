//! Terminal UI task: repaint ticks and keyboard input on one loop

use std::sync::Arc;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{info, warn};

use crate::{
    channel::ChannelClient,
    commands::CommandEmitter,
    config::Config,
    input::{Controls, Flow, Key},
    render::{Renderer, RingStyle, TerminalView},
    state::StateStore,
    utils::shutdown_signal,
};

/// What woke the loop up
enum Step {
    Frame,
    Key(KeyEvent),
    Idle,
    Stop,
}

/// Run the UI until the user quits or a shutdown signal arrives.
///
/// The terminal is restored on every exit path.
pub async fn ui_task(store: Arc<StateStore>, client: ChannelClient, config: &Config) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, store, client, config).await;
    ratatui::restore();
    result
}

async fn run(
    terminal: &mut DefaultTerminal,
    store: Arc<StateStore>,
    client: ChannelClient,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Starting UI task");

    let emitter = CommandEmitter::new(client);
    let mut controls = Controls::new(config.presets());
    let mut view = TerminalView::new(config.presentation_mode());
    let mut renderer = Renderer::new(RingStyle::default(), config.fps);
    let mut events = EventStream::new();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let step = tokio::select! {
            _ = renderer.next_frame() => Step::Frame,
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => Step::Key(key),
                Some(Ok(_)) => Step::Idle,
                Some(Err(e)) => {
                    warn!("Failed to read terminal event: {}", e);
                    Step::Idle
                }
                None => Step::Stop,
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                Step::Stop
            }
        };

        match step {
            Step::Frame => {
                let footer = controls.footer_lines();
                terminal.draw(|frame| view.draw(frame, &renderer, &store, footer))?;
            }
            Step::Key(key) => {
                let status = store.current().status;
                if controls.handle_key(Key::from(key), status, &emitter) == Flow::Quit {
                    info!("Quit requested");
                    break;
                }
            }
            Step::Idle => {}
            Step::Stop => break,
        }
    }

    Ok(())
}
