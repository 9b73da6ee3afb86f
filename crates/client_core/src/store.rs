//! Game state store: the last authoritative view pushed by the server.
//!
//! [`GameState::apply`] is the only mutator. Local gestures never touch it;
//! a proposed move shows up here only once the server sends the next
//! `state` snapshot.

use shared::{
    domain::{Board, PlayerColor, RoomCode, Side},
    protocol::ServerEvent,
};
use tracing::{debug, info, warn};

const UNKNOWN_ERROR_TEXT: &str = "unknown error";

/// What a single inbound event changed, for the projection layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUpdate {
    RoomAssigned,
    BoardReplaced,
    GameReady,
    ServerError(String),
    OpponentJoined,
    OpponentLeft,
    Pong,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Option<Board>,
    white_to_move: bool,
    player_color: PlayerColor,
    room_code: Option<RoomCode>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: None,
            white_to_move: true,
            player_color: PlayerColor::Unknown,
            room_code: None,
        }
    }
}

impl GameState {
    /// `None` until the first `state` message arrives.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    pub fn side_to_move(&self) -> Side {
        if self.white_to_move {
            Side::White
        } else {
            Side::Black
        }
    }

    pub fn player_color(&self) -> PlayerColor {
        self.player_color
    }

    pub fn room_code(&self) -> Option<&RoomCode> {
        self.room_code.as_ref()
    }

    /// Turn guard: false while the color is still unknown.
    pub fn is_local_turn(&self) -> bool {
        self.player_color.side() == Some(self.side_to_move())
    }

    pub fn apply(&mut self, event: &ServerEvent) -> StoreUpdate {
        match event {
            ServerEvent::Created { code, color } | ServerEvent::Joined { code, color } => {
                self.room_code = Some(code.clone());
                if let Some(side) = color {
                    self.assign_color(*side);
                }
                info!(
                    room = %code,
                    color = self.player_color.label(),
                    "store: room assigned"
                );
                StoreUpdate::RoomAssigned
            }
            ServerEvent::State {
                code,
                board,
                white_to_move,
            } => {
                if let Some(code) = code.as_ref().filter(|code| !code.is_empty()) {
                    self.room_code = Some(code.clone());
                }
                self.board = Some(board.clone());
                self.white_to_move = *white_to_move;
                debug!(white_to_move, "store: board snapshot replaced");
                StoreUpdate::BoardReplaced
            }
            ServerEvent::Start { .. } => StoreUpdate::GameReady,
            ServerEvent::Error { message } => {
                let text = message
                    .as_deref()
                    .filter(|text| !text.is_empty())
                    .unwrap_or(UNKNOWN_ERROR_TEXT);
                debug!(error_text = text, "store: server reported error");
                StoreUpdate::ServerError(text.to_string())
            }
            ServerEvent::OpponentJoined => StoreUpdate::OpponentJoined,
            ServerEvent::OpponentLeft => StoreUpdate::OpponentLeft,
            ServerEvent::Pong => StoreUpdate::Pong,
            ServerEvent::Unknown => StoreUpdate::Ignored,
        }
    }

    fn assign_color(&mut self, side: Side) {
        let incoming = PlayerColor::from(side);
        if self.player_color != PlayerColor::Unknown && self.player_color != incoming {
            warn!(
                current = self.player_color.label(),
                incoming = incoming.label(),
                "store: server reassigned player color, overriding"
            );
        }
        self.player_color = incoming;
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
