use shared::domain::{Coord, Square, BOARD_SIZE};

use crate::{channel::Connection, store::GameState};

const NO_VALUE: &str = "—";

/// Plain view of the session for a display layer to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Always 8x8; `None` for empty squares and before the first snapshot.
    pub cells: Vec<Vec<Option<String>>>,
    pub populated: bool,
    pub selected: Option<Coord>,
    pub turn_label: String,
    pub color_label: String,
    pub room_label: String,
    pub connection: Connection,
    pub status: String,
}

impl Projection {
    pub fn derive(
        state: &GameState,
        selected: Option<Coord>,
        connection: Connection,
        status: &str,
    ) -> Self {
        let cells: Vec<Vec<Option<String>>> = match state.board() {
            Some(board) => board
                .rows()
                .map(|row| row.iter().copied().map(occupant_code).collect::<Vec<_>>())
                .collect(),
            None => vec![vec![None; BOARD_SIZE]; BOARD_SIZE],
        };

        Self {
            cells,
            populated: state.board().is_some(),
            selected,
            turn_label: state.side_to_move().label().to_string(),
            color_label: state.player_color().label().to_string(),
            room_label: state
                .room_code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| NO_VALUE.to_string()),
            connection,
            status: status.to_string(),
        }
    }

    pub fn cell(&self, at: Coord) -> Option<&str> {
        self.cells[at.row()][at.col()].as_deref()
    }

    pub fn is_selected(&self, at: Coord) -> bool {
        self.selected == Some(at)
    }
}

fn occupant_code(square: Square) -> Option<String> {
    (!square.is_empty()).then(|| square.code())
}
