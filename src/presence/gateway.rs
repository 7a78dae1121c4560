//! Minimal chat gateway client
//!
//! Keeps one websocket session alive: identify, heartbeat at the interval
//! announced in Hello, and forward every presence dispatch to the listener
//! channel. Session loss reconnects after a fixed delay; cancellation sends
//! a Close frame and returns.

use futures::{SinkExt, StreamExt};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, sleep};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;

use crate::presence::models::*;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);
const PRESENCE_UPDATE: &str = "PRESENCE_UPDATE";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// What to do after one inbound gateway payload
#[derive(Debug)]
pub enum Action {
    Ignore,
    Forward(PresenceUpdate),
    HeartbeatNow,
    Reconnect,
}

#[derive(Debug, PartialEq)]
enum SessionEnd {
    Shutdown,
    Reconnect,
}

pub struct Gateway {
    token: String,
    url: String,
}

impl Gateway {
    pub fn new(token: String, url: String) -> Self {
        Self { token, url }
    }

    pub fn spawn(
        self,
        events: mpsc::Sender<PresenceUpdate>,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(events, shutdown).await })
    }

    pub async fn run(self, events: mpsc::Sender<PresenceUpdate>, shutdown: CancellationToken) {
        loop {
            match self.session(&events, &shutdown).await {
                Ok(SessionEnd::Shutdown) => break,
                Ok(SessionEnd::Reconnect) => {
                    tracing::info!("Gateway session ended, reconnecting");
                }
                Err(e) => {
                    tracing::error!("Gateway session error: {}", e);
                }
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = sleep(RECONNECT_DELAY) => {}
            }
        }
        tracing::info!("Gateway connection closed");
    }

    async fn session(
        &self,
        events: &mpsc::Sender<PresenceUpdate>,
        shutdown: &CancellationToken,
    ) -> crate::Result<SessionEnd> {
        let (ws, _) = tokio::select! {
            _ = shutdown.cancelled() => return Ok(SessionEnd::Shutdown),
            conn = connect_async(self.url.as_str()) => conn?,
        };
        tracing::info!("Gateway connected to {}", self.url);

        let (mut write, mut read) = ws.split();

        let hello = tokio::select! {
            _ = shutdown.cancelled() => {
                let _ = write.send(Message::Close(None)).await;
                return Ok(SessionEnd::Shutdown);
            }
            hello = wait_hello(&mut read) => hello?,
        };

        write
            .send(Message::Text(identify_payload(&self.token).to_string()))
            .await?;
        tracing::debug!("Identify sent, heartbeat every {}ms", hello.heartbeat_interval);

        let period = Duration::from_millis(hello.heartbeat_interval.max(1));
        let mut heartbeat = interval_at(Instant::now() + period, period);
        let mut seq: Option<u64> = None;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    if let Err(e) = write.send(Message::Close(None)).await {
                        tracing::warn!("Failed to send gateway close: {}", e);
                    }
                    return Ok(SessionEnd::Shutdown);
                }
                _ = heartbeat.tick() => {
                    write.send(Message::Text(heartbeat_payload(seq).to_string())).await?;
                }
                msg = read.next() => {
                    let Some(msg) = msg else {
                        return Err("gateway stream ended".into());
                    };
                    match msg? {
                        Message::Text(text) => {
                            let payload: GatewayPayload = match serde_json::from_str(&text) {
                                Ok(payload) => payload,
                                Err(e) => {
                                    tracing::warn!("Failed to parse gateway payload: {}", e);
                                    continue;
                                }
                            };
                            match process(payload, &mut seq) {
                                Action::Ignore => {}
                                Action::Forward(update) => {
                                    if events.send(update).await.is_err() {
                                        return Err("presence listener is gone".into());
                                    }
                                }
                                Action::HeartbeatNow => {
                                    write.send(Message::Text(heartbeat_payload(seq).to_string())).await?;
                                }
                                Action::Reconnect => return Ok(SessionEnd::Reconnect),
                            }
                        }
                        Message::Close(frame) => {
                            tracing::warn!("Gateway closed by server: {:?}", frame);
                            return Ok(SessionEnd::Reconnect);
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

async fn wait_hello(read: &mut futures::stream::SplitStream<WsStream>) -> crate::Result<Hello> {
    while let Some(msg) = read.next().await {
        if let Message::Text(text) = msg? {
            let payload: GatewayPayload = serde_json::from_str(&text)?;
            if payload.op == OP_HELLO {
                let d = payload.d.ok_or("hello without data")?;
                return Ok(serde_json::from_value(d)?);
            }
            tracing::debug!("Skipping op {} before hello", payload.op);
        }
    }
    Err("gateway closed before hello".into())
}

/// Decides how to react to one payload and tracks the sequence number
pub fn process(payload: GatewayPayload, seq: &mut Option<u64>) -> Action {
    if let Some(s) = payload.s {
        *seq = Some(s);
    }

    match payload.op {
        OP_DISPATCH => match payload.t.as_deref() {
            Some(PRESENCE_UPDATE) => {
                let Some(d) = payload.d else {
                    return Action::Ignore;
                };
                match serde_json::from_value::<PresenceUpdate>(d) {
                    Ok(update) => Action::Forward(update),
                    Err(e) => {
                        tracing::warn!("Malformed presence update: {}", e);
                        Action::Ignore
                    }
                }
            }
            Some("READY") => {
                tracing::info!("Gateway session ready");
                Action::Ignore
            }
            _ => Action::Ignore,
        },
        OP_HEARTBEAT => Action::HeartbeatNow,
        OP_RECONNECT | OP_INVALID_SESSION => Action::Reconnect,
        OP_HEARTBEAT_ACK => {
            tracing::debug!("Heartbeat acknowledged");
            Action::Ignore
        }
        op => {
            tracing::debug!("Unhandled gateway op {}", op);
            Action::Ignore
        }
    }
}

pub fn identify_payload(token: &str) -> serde_json::Value {
    json!({
        "op": OP_IDENTIFY,
        "d": {
            "token": token,
            "intents": INTENT_GUILDS | INTENT_GUILD_MEMBERS | INTENT_GUILD_PRESENCES,
            "properties": {
                "os": std::env::consts::OS,
                "browser": "statusboard",
                "device": "statusboard",
            },
        },
    })
}

pub fn heartbeat_payload(seq: Option<u64>) -> serde_json::Value {
    json!({ "op": OP_HEARTBEAT, "d": seq })
}
