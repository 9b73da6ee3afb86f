use shared::error::ProtocolError;
use thiserror::Error;

use crate::channel::Connection;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("session channel is not open (connection: {0:?})")]
    NotOpen(Connection),
    #[error("origin scheme must be http, https, ws or wss, got {0:?}")]
    UnsupportedScheme(String),
    #[error("invalid origin url: {0}")]
    InvalidOrigin(#[from] url::ParseError),
    #[error("failed to connect websocket {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
