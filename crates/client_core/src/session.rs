//! Owned session context tying the channel, store and controller together.
//!
//! Every reaction (a tap, a room action, an inbound channel event) runs to
//! completion on `&mut self`, so no locking is involved.

use shared::{
    domain::{Coord, RoomCode},
    protocol::ClientRequest,
};
use tracing::{debug, info};

use crate::{
    channel::{ChannelEvent, Connection, MessageSink},
    controller::{Controller, GestureOutcome},
    error::SessionError,
    projection::Projection,
    store::{GameState, StoreUpdate},
};

pub const STATUS_CONNECTED: &str = "Connected";
pub const STATUS_DISCONNECTED: &str = "Disconnected";

pub struct GameSession<S: MessageSink> {
    sink: S,
    state: GameState,
    controller: Controller,
    status: String,
}

impl<S: MessageSink> GameSession<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: GameState::default(),
            controller: Controller::default(),
            status: String::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn selection(&self) -> Option<Coord> {
        self.controller.selection()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn connection(&self) -> Connection {
        self.sink.connection()
    }

    pub fn create_room(&mut self) -> Result<(), SessionError> {
        self.sink.send(&ClientRequest::Create)?;
        info!("session: requested new room");
        Ok(())
    }

    pub fn join_room(&mut self, input: &str) -> Result<(), SessionError> {
        let code = RoomCode::from_user_input(input)?;
        self.sink.send(&ClientRequest::Join { code: code.clone() })?;
        info!(room = %code, "session: requested to join room");
        Ok(())
    }

    pub fn ping(&mut self) -> Result<(), SessionError> {
        self.sink.send(&ClientRequest::Ping)?;
        Ok(())
    }

    pub fn tap(&mut self, square: Coord) -> GestureOutcome {
        let outcome = self.controller.gesture(square, &self.state);
        match outcome {
            GestureOutcome::Proposed(proposal) => {
                // A closed channel swallows the proposal; selection is already clear.
                match self.sink.send(&ClientRequest::Move(proposal)) {
                    Ok(()) => info!(
                        from = %proposal.from,
                        to = %proposal.to,
                        "session: move proposed"
                    ),
                    Err(error) => debug!(%error, "session: move proposal not sent"),
                }
            }
            GestureOutcome::Discarded(reason) => {
                debug!(?reason, %square, "session: gesture discarded");
            }
            GestureOutcome::Selected(_) | GestureOutcome::Deselected => {}
        }
        outcome
    }

    pub fn handle_event(&mut self, event: ChannelEvent) -> Option<StoreUpdate> {
        match event {
            ChannelEvent::Opened => {
                self.status = STATUS_CONNECTED.to_string();
                None
            }
            ChannelEvent::Closed => {
                self.status = STATUS_DISCONNECTED.to_string();
                None
            }
            ChannelEvent::Message(message) => {
                let update = self.state.apply(&message);
                match &update {
                    StoreUpdate::ServerError(text) => self.status = format!("Error: {text}"),
                    StoreUpdate::GameReady => self.status = "Both players connected".to_string(),
                    StoreUpdate::OpponentJoined => self.status = "Opponent joined".to_string(),
                    StoreUpdate::OpponentLeft => self.status = "Opponent left".to_string(),
                    StoreUpdate::RoomAssigned
                    | StoreUpdate::BoardReplaced
                    | StoreUpdate::Pong
                    | StoreUpdate::Ignored => {}
                }
                Some(update)
            }
        }
    }

    pub fn projection(&self) -> Projection {
        Projection::derive(
            &self.state,
            self.controller.selection(),
            self.sink.connection(),
            &self.status,
        )
    }

    pub fn close(&mut self) {
        self.sink.close();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
