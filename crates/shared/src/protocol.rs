use serde::{Deserialize, Serialize};

use crate::domain::{Board, Coord, RoomCode, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveProposal {
    pub from: Coord,
    pub to: Coord,
}

/// Messages sent from the client to the game server.
///
/// Room management uses an `action` discriminator while in-game traffic
/// uses `type`, so the wire form goes through [`WireRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireRequest", from = "WireRequest")]
pub enum ClientRequest {
    Create,
    Join { code: RoomCode },
    Move(MoveProposal),
    Ping,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum RoomAction {
    Create,
    Join { code: RoomCode },
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum GameAction {
    Move {
        #[serde(rename = "move")]
        proposal: MoveProposal,
    },
    Ping,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireRequest {
    Room(RoomAction),
    Game(GameAction),
}

impl From<ClientRequest> for WireRequest {
    fn from(value: ClientRequest) -> Self {
        match value {
            ClientRequest::Create => WireRequest::Room(RoomAction::Create),
            ClientRequest::Join { code } => WireRequest::Room(RoomAction::Join { code }),
            ClientRequest::Move(proposal) => WireRequest::Game(GameAction::Move { proposal }),
            ClientRequest::Ping => WireRequest::Game(GameAction::Ping),
        }
    }
}

impl From<WireRequest> for ClientRequest {
    fn from(value: WireRequest) -> Self {
        match value {
            WireRequest::Room(RoomAction::Create) => ClientRequest::Create,
            WireRequest::Room(RoomAction::Join { code }) => ClientRequest::Join { code },
            WireRequest::Game(GameAction::Move { proposal }) => ClientRequest::Move(proposal),
            WireRequest::Game(GameAction::Ping) => ClientRequest::Ping,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Created {
        code: RoomCode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Side>,
    },
    Joined {
        code: RoomCode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Side>,
    },
    Start {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Side>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opponent: Option<Side>,
    },
    State {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<RoomCode>,
        board: Board,
        #[serde(default)]
        white_to_move: bool,
    },
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    OpponentJoined,
    OpponentLeft,
    Pong,
    #[serde(other)]
    Unknown,
}

impl ServerEvent {
    /// Decodes one text frame. Anything that is not a well-formed event
    /// yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
