use shared::{domain::Coord, protocol::MoveProposal};

use crate::store::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    NotYourTurn,
    BoardUnpopulated,
    EmptySquare,
    NotYourPiece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Discarded(DiscardReason),
    Selected(Coord),
    /// Second tap on the selected square.
    Deselected,
    Proposed(MoveProposal),
}

/// Turns square taps into move proposals.
///
/// The only state is the pending selection. Legality beyond the turn guard,
/// piece ownership and the same-square check is left to the server, and
/// nothing is tracked once a proposal has been emitted.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    selection: Option<Coord>,
}

impl Controller {
    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    pub fn gesture(&mut self, square: Coord, state: &GameState) -> GestureOutcome {
        if !state.is_local_turn() {
            return GestureOutcome::Discarded(DiscardReason::NotYourTurn);
        }

        // Selection is cleared before the outcome of the proposal is known.
        let Some(from) = self.selection.take() else {
            return self.select(square, state);
        };
        if from == square {
            return GestureOutcome::Deselected;
        }
        GestureOutcome::Proposed(MoveProposal { from, to: square })
    }

    fn select(&mut self, square: Coord, state: &GameState) -> GestureOutcome {
        let Some(board) = state.board() else {
            return GestureOutcome::Discarded(DiscardReason::BoardUnpopulated);
        };
        let occupant = board.get(square);
        if occupant.is_empty() {
            return GestureOutcome::Discarded(DiscardReason::EmptySquare);
        }
        if !state.player_color().owns(occupant) {
            return GestureOutcome::Discarded(DiscardReason::NotYourPiece);
        }
        self.selection = Some(square);
        GestureOutcome::Selected(square)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
