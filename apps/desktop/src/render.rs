//! Text rendering of a [`Projection`] for the terminal.

use std::fmt::Write as _;

use client_core::{Connection, Projection};
use shared::domain::{Coord, BOARD_SIZE};

const FILES: &str = "   a  b  c  d  e  f  g  h";

pub fn render(projection: &Projection) -> String {
    let mut out = String::new();

    if projection.populated {
        let _ = writeln!(out, "{FILES}");
        for row in 0..BOARD_SIZE {
            let rank = BOARD_SIZE - row;
            let _ = write!(out, "{rank} ");
            for col in 0..BOARD_SIZE {
                let Ok(at) = Coord::new(row as i64, col as i64) else {
                    continue;
                };
                let marker = if projection.is_selected(at) { '>' } else { ' ' };
                let cell = match projection.cell(at) {
                    Some(code) => code,
                    None if (row + col) % 2 == 0 => "..",
                    None => "::",
                };
                let _ = write!(out, "{marker}{cell}");
            }
            let _ = writeln!(out, "  {rank}");
        }
        let _ = writeln!(out, "{FILES}");
    } else {
        let _ = writeln!(out, "(no board yet)");
    }

    let connection = match projection.connection {
        Connection::Connecting => "connecting",
        Connection::Open => "open",
        Connection::Closed => "closed",
    };
    let _ = writeln!(
        out,
        "turn: {}  you: {}  room: {}  channel: {connection}",
        projection.turn_label, projection.color_label, projection.room_label
    );
    if !projection.status.is_empty() {
        let _ = writeln!(out, "{}", projection.status);
    }
    out
}
