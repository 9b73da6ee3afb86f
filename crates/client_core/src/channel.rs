//! Session channel: the single duplex WebSocket link to the game server.
//!
//! Inbound frames are decoded into [`ServerEvent`]s and delivered in arrival
//! order on an unbounded queue. Frames that fail to decode never reach the
//! queue. The channel does not reconnect; once it reports
//! [`Connection::Closed`] it stays closed.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use shared::protocol::{ClientRequest, ServerEvent};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ChannelError;

pub const WS_PATH: &str = "/ws";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    #[default]
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Opened,
    Message(ServerEvent),
    Closed,
}

/// Outbound half of a session, as seen by [`crate::GameSession`].
pub trait MessageSink {
    fn connection(&self) -> Connection;
    /// Fire-and-forget. Fails without sending when the connection is not open.
    fn send(&self, request: &ClientRequest) -> Result<(), ChannelError>;
    fn close(&self);
}

/// Maps a page origin to the game endpoint on the same host and port.
pub fn endpoint_url(origin: &Url) -> Result<Url, ChannelError> {
    let scheme = match origin.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(ChannelError::UnsupportedScheme(other.to_string())),
    };
    let mut endpoint = origin.clone();
    endpoint
        .set_scheme(scheme)
        .map_err(|_| ChannelError::UnsupportedScheme(origin.scheme().to_string()))?;
    endpoint.set_path(WS_PATH);
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    Ok(endpoint)
}

pub struct SessionChannel {
    endpoint: Url,
    connection: Arc<watch::Sender<Connection>>,
    outbound: mpsc::UnboundedSender<Message>,
    reader_task: JoinHandle<()>,
}

impl SessionChannel {
    pub async fn open(
        origin: &Url,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ChannelEvent>), ChannelError> {
        let endpoint = endpoint_url(origin)?;
        let (connection, _) = watch::channel(Connection::Connecting);
        let connection = Arc::new(connection);
        info!(%endpoint, "channel: connecting");

        let ws_stream = match connect_async(endpoint.as_str()).await {
            Ok((ws_stream, _)) => ws_stream,
            Err(source) => {
                connection.send_replace(Connection::Closed);
                warn!(%endpoint, error = %source, "channel: connect failed");
                return Err(ChannelError::Connect {
                    url: endpoint.to_string(),
                    source,
                });
            }
        };
        let (mut writer, mut reader) = ws_stream.split();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

        connection.send_replace(Connection::Open);
        let _ = events_tx.send(ChannelEvent::Opened);
        info!(%endpoint, "channel: open");

        tokio::spawn(async move {
            while let Some(frame) = outbound_rx.recv().await {
                let closing = matches!(frame, Message::Close(_));
                if let Err(error) = writer.send(frame).await {
                    warn!(%error, "channel: websocket send failed");
                    break;
                }
                if closing {
                    break;
                }
            }
        });

        let reader_connection = Arc::clone(&connection);
        let reader_task = tokio::spawn(async move {
            while let Some(frame) = reader.next().await {
                match frame {
                    Ok(Message::Text(text)) => match ServerEvent::parse(&text) {
                        Some(event) => {
                            if events_tx.send(ChannelEvent::Message(event)).is_err() {
                                break;
                            }
                        }
                        None => debug!(len = text.len(), "channel: dropping malformed frame"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(error) => {
                        warn!(%error, "channel: websocket receive failed");
                        break;
                    }
                }
            }
            reader_connection.send_replace(Connection::Closed);
            let _ = events_tx.send(ChannelEvent::Closed);
            info!("channel: closed");
        });

        Ok((
            Self {
                endpoint,
                connection,
                outbound: outbound_tx,
                reader_task,
            },
            events_rx,
        ))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn subscribe_connection(&self) -> watch::Receiver<Connection> {
        self.connection.subscribe()
    }
}

impl MessageSink for SessionChannel {
    fn connection(&self) -> Connection {
        *self.connection.borrow()
    }

    fn send(&self, request: &ClientRequest) -> Result<(), ChannelError> {
        let state = self.connection();
        if state != Connection::Open {
            return Err(ChannelError::NotOpen(state));
        }
        let text = serde_json::to_string(request)?;
        debug!(frame = %text, "channel: sending");
        self.outbound
            .send(Message::Text(text))
            .map_err(|_| ChannelError::NotOpen(Connection::Closed))
    }

    fn close(&self) {
        if self.connection.send_replace(Connection::Closed) != Connection::Closed {
            let _ = self.outbound.send(Message::Close(None));
            info!(endpoint = %self.endpoint, "channel: closing");
        }
    }
}

impl Drop for SessionChannel {
    fn drop(&mut self) {
        // The writer drains queued frames on its own once `outbound` drops.
        self.reader_task.abort();
    }
}

#[cfg(test)]
#[path = "tests/channel_tests.rs"]
mod tests;
