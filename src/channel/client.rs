//! Reconnecting push-channel client

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Duration,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::{
    net::TcpStream,
    sync::{broadcast, mpsc},
    task::JoinHandle,
    time::{interval_at, sleep, timeout, Instant, MissedTickBehavior},
};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use anyhow::anyhow;
use tracing::{debug, info, warn};
use url::Url;

use super::{
    backoff::ReconnectPolicy,
    protocol::{ClientEvent, Command, ServerEvent},
};
use crate::state::TimerState;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Callback invoked with every snapshot the peer pushes
pub type StateHandler = Box<dyn FnMut(TimerState) + Send>;

/// Connection transitions, published for diagnostics only
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connecting { attempt: u32 },
    Connected,
    Disconnected { reason: String },
    Reconnecting { attempt: u32, delay: Duration },
    PeerError { message: String },
}

/// Timing bounds that keep a dead peer from stalling the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liveness {
    /// Upper bound on TCP connect plus the WebSocket handshake
    pub connect_timeout: Duration,
    /// How often a ping goes out on a live session
    pub ping_interval: Duration,
    /// Silence longer than this ends the session
    pub idle_timeout: Duration,
}

impl Default for Liveness {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            ping_interval: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle to the persistent connection with the peer.
///
/// Cloning is cheap; all clones share the same connection, handler and
/// outbound path.
#[derive(Clone)]
pub struct ChannelClient {
    endpoint: Url,
    policy: ReconnectPolicy,
    liveness: Liveness,
    /// The single registered update handler
    handler: Arc<Mutex<Option<StateHandler>>>,
    /// Outbound queue of the live session, `None` while disconnected
    outbound: Arc<Mutex<Option<mpsc::UnboundedSender<ClientEvent>>>>,
    events_tx: broadcast::Sender<ConnectionEvent>,
}

impl fmt::Debug for ChannelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("policy", &self.policy)
            .field("liveness", &self.liveness)
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl ChannelClient {
    pub fn new(endpoint: Url, policy: ReconnectPolicy) -> Self {
        let (events_tx, _) = broadcast::channel(64);

        Self {
            endpoint,
            policy,
            liveness: Liveness::default(),
            handler: Arc::new(Mutex::new(None)),
            outbound: Arc::new(Mutex::new(None)),
            events_tx,
        }
    }

    /// Override the connect timeout and heartbeat bounds
    pub fn with_liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = liveness;
        self
    }

    /// Register the update handler, replacing any previous one
    pub fn on_state_update<F>(&self, handler: F)
    where
        F: FnMut(TimerState) + Send + 'static,
    {
        match self.handler.lock() {
            Ok(mut slot) => *slot = Some(Box::new(handler)),
            Err(e) => warn!("Failed to lock state handler: {}", e),
        }
    }

    /// Fire-and-forget a command. Dropped silently while disconnected.
    pub fn send_command(&self, command: Command) {
        let action = command.action();
        let sender = self.outbound.lock().ok().and_then(|slot| slot.clone());

        match sender {
            Some(tx) => {
                if tx.send(ClientEvent::Command(command)).is_err() {
                    debug!(action, "Session closed, command dropped");
                } else {
                    debug!(action, "Command queued");
                }
            }
            None => debug!(action, "Not connected, command dropped"),
        }
    }

    /// Subscribe to connection transitions
    pub fn subscribe_events(&self) -> broadcast::Receiver<ConnectionEvent> {
        self.events_tx.subscribe()
    }

    /// Check whether a session is currently live
    pub fn is_connected(&self) -> bool {
        self.outbound
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Start the connection loop in the background
    pub fn spawn(&self) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move { client.run().await })
    }

    /// Connect, serve the session, and reconnect forever
    pub async fn run(self) {
        info!(endpoint = %self.endpoint, "Starting channel client");

        let mut failures: u32 = 0;
        loop {
            self.publish(ConnectionEvent::Connecting { attempt: failures + 1 });

            let connect_timeout = self.liveness.connect_timeout;
            match timeout(connect_timeout, connect_async(self.endpoint.as_str())).await {
                Ok(Ok((ws, _))) => {
                    failures = 0;
                    info!(endpoint = %self.endpoint, "Connected to peer");
                    self.publish(ConnectionEvent::Connected);

                    let reason = match self.serve(ws).await {
                        Ok(()) => "peer closed the connection".to_string(),
                        Err(e) => e.to_string(),
                    };
                    self.set_outbound(None);

                    warn!(%reason, "Disconnected from peer");
                    self.publish(ConnectionEvent::Disconnected { reason });
                }
                Ok(Err(e)) => {
                    debug!(endpoint = %self.endpoint, "Connect failed: {}", e);
                }
                Err(_) => {
                    debug!(endpoint = %self.endpoint, "Connect timed out after {:?}", connect_timeout);
                }
            }

            failures = failures.saturating_add(1);
            let delay = self.policy.delay(failures);
            self.publish(ConnectionEvent::Reconnecting { attempt: failures, delay });
            sleep(delay).await;
        }
    }

    /// Serve one live session until the transport goes away or falls silent
    async fn serve(&self, ws: WsStream) -> anyhow::Result<()> {
        let (write, mut read) = ws.split();
        let (frame_tx, frame_rx) = mpsc::unbounded_channel::<Message>();
        let mut writer = tokio::spawn(write_frames(write, frame_rx));

        let (tx, mut rx) = mpsc::unbounded_channel::<ClientEvent>();
        self.set_outbound(Some(tx));

        // Ask for a fresh snapshot on every (re)connect
        self.send_command(Command::GetStatus);

        let Liveness { ping_interval, idle_timeout, .. } = self.liveness;
        let mut heartbeat = interval_at(Instant::now() + ping_interval, ping_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_seen = Instant::now();

        let result = loop {
            tokio::select! {
                incoming = read.next() => {
                    if matches!(incoming, Some(Ok(_))) {
                        last_seen = Instant::now();
                    }
                    match incoming {
                        Some(Ok(Message::Text(text))) => self.dispatch(&text),
                        Some(Ok(Message::Close(frame))) => {
                            debug!(?frame, "Peer sent close frame");
                            break Ok(());
                        }
                        Some(Ok(Message::Binary(_))) => debug!("Ignoring binary frame"),
                        Some(Ok(_)) => {}
                        Some(Err(e)) => break Err(e.into()),
                        None => break Ok(()),
                    }
                }
                Some(event) = rx.recv() => {
                    match event.encode() {
                        Ok(frame) => {
                            if frame_tx.send(Message::Text(frame)).is_err() {
                                break Err(anyhow!("writer stopped"));
                            }
                        }
                        Err(e) => warn!("Failed to encode outbound event: {}", e),
                    }
                }
                _ = heartbeat.tick() => {
                    let silent = last_seen.elapsed();
                    if silent >= idle_timeout {
                        break Err(anyhow!("no traffic from peer for {:?}", silent));
                    }
                    if frame_tx.send(Message::Ping(Vec::new())).is_err() {
                        break Err(anyhow!("writer stopped"));
                    }
                }
                written = &mut writer => {
                    break match written {
                        Ok(Ok(())) => Err(anyhow!("writer stopped")),
                        Ok(Err(e)) => Err(e),
                        Err(e) => Err(e.into()),
                    };
                }
            }
        };

        writer.abort();
        result
    }

    /// Route one inbound text frame
    fn dispatch(&self, raw: &str) {
        match ServerEvent::decode(raw) {
            Ok(ServerEvent::TimerUpdate(state)) => match self.handler.lock() {
                Ok(mut slot) => {
                    if let Some(handler) = slot.as_mut() {
                        handler(state);
                    }
                }
                Err(e) => warn!("Failed to lock state handler: {}", e),
            },
            Ok(ServerEvent::Error(err)) => {
                warn!(message = %err.message, "Peer reported an error");
                self.publish(ConnectionEvent::PeerError { message: err.message });
            }
            Err(e) => debug!("Ignoring undecodable frame: {}", e),
        }
    }

    fn set_outbound(&self, tx: Option<mpsc::UnboundedSender<ClientEvent>>) {
        match self.outbound.lock() {
            Ok(mut slot) => *slot = tx,
            Err(e) => warn!("Failed to lock outbound slot: {}", e),
        }
    }

    fn publish(&self, event: ConnectionEvent) {
        // No subscribers is fine
        let _ = self.events_tx.send(event);
    }
}

/// Drain queued frames into the socket so a slow write never stalls reads
async fn write_frames(
    mut write: SplitSink<WsStream, Message>,
    mut frames: mpsc::UnboundedReceiver<Message>,
) -> anyhow::Result<()> {
    while let Some(frame) = frames.recv().await {
        write.send(frame).await?;
    }
    Ok(())
}
