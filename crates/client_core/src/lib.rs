//! Client side of a networked two-player chess game.
//!
//! The server owns the rules and the board. This crate keeps the last state
//! it pushed ([`store`]), turns square taps into move proposals
//! ([`controller`]), and carries both directions of traffic over one
//! WebSocket ([`channel`]). [`GameSession`] owns all three for the lifetime
//! of a connection.

pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod projection;
pub mod session;
pub mod store;

pub use channel::{endpoint_url, ChannelEvent, Connection, MessageSink, SessionChannel};
pub use controller::{Controller, DiscardReason, GestureOutcome};
pub use error::{ChannelError, SessionError};
pub use projection::Projection;
pub use session::GameSession;
pub use store::{GameState, StoreUpdate};
