use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

pub const BOARD_SIZE: usize = 8;

/// Wire sentinel for an unoccupied square.
pub const EMPTY_SQUARE: &str = "--";

const STANDARD_SETUP: [[&str; BOARD_SIZE]; BOARD_SIZE] = [
    ["bR", "bN", "bB", "bQ", "bK", "bB", "bN", "bR"],
    ["bP", "bP", "bP", "bP", "bP", "bP", "bP", "bP"],
    ["--", "--", "--", "--", "--", "--", "--", "--"],
    ["--", "--", "--", "--", "--", "--", "--", "--"],
    ["--", "--", "--", "--", "--", "--", "--", "--"],
    ["--", "--", "--", "--", "--", "--", "--", "--"],
    ["wP", "wP", "wP", "wP", "wP", "wP", "wP", "wP"],
    ["wR", "wN", "wB", "wQ", "wK", "wB", "wN", "wR"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Side {
    pub fn code(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Occupant of a single board cell.
///
/// On the wire a square is a two character code such as `"wP"`; the
/// [`EMPTY_SQUARE`] sentinel, an empty string and `null` all decode to
/// [`Square::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "String")]
pub enum Square {
    #[default]
    Empty,
    Occupied {
        side: Side,
        kind: PieceKind,
    },
}

impl Square {
    pub fn parse(code: &str) -> Result<Self, ProtocolError> {
        if code.is_empty() || code == EMPTY_SQUARE {
            return Ok(Square::Empty);
        }

        let mut chars = code.chars();
        let (Some(side), Some(kind), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ProtocolError::InvalidSquareCode(code.to_string()));
        };
        match (Side::from_code(side), PieceKind::from_letter(kind)) {
            (Some(side), Some(kind)) => Ok(Square::Occupied { side, kind }),
            _ => Err(ProtocolError::InvalidSquareCode(code.to_string())),
        }
    }

    pub fn code(self) -> String {
        match self {
            Square::Empty => EMPTY_SQUARE.to_string(),
            Square::Occupied { side, kind } => format!("{}{}", side.code(), kind.letter()),
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Square::Empty => None,
            Square::Occupied { side, .. } => Some(side),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }
}

impl TryFrom<Option<String>> for Square {
    type Error = ProtocolError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(code) => Square::parse(&code),
            None => Ok(Square::Empty),
        }
    }
}

impl From<Square> for String {
    fn from(value: Square) -> Self {
        value.code()
    }
}

/// Board cell address. Row 0 is black's back rank, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(u8, u8)")]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub fn new(row: i64, col: i64) -> Result<Self, ProtocolError> {
        let in_range = |v: i64| (0..BOARD_SIZE as i64).contains(&v);
        if !in_range(row) || !in_range(col) {
            return Err(ProtocolError::CoordOutOfRange { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Accepts algebraic notation (`e2`) or a `row,col` / `row col` pair.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let input = input.trim();
        let invalid = || ProtocolError::InvalidSquareRef(input.to_string());

        let numbers: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        if let [row, col] = numbers.as_slice() {
            let row = row.parse::<i64>().map_err(|_| invalid())?;
            let col = col.parse::<i64>().map_err(|_| invalid())?;
            return Coord::new(row, col);
        }

        let mut chars = input.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(invalid());
        }
        let rank = rank.to_digit(10).filter(|r| (1..=8).contains(r)).ok_or_else(invalid)?;
        Coord::new(
            BOARD_SIZE as i64 - i64::from(rank),
            i64::from(file as u8 - b'a'),
        )
    }
}

impl TryFrom<(i64, i64)> for Coord {
    type Error = ProtocolError;

    fn try_from((row, col): (i64, i64)) -> Result<Self, Self::Error> {
        Coord::new(row, col)
    }
}

impl From<Coord> for (u8, u8) {
    fn from(value: Coord) -> Self {
        (value.row, value.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        write!(f, "{file}{}", BOARD_SIZE - self.row as usize)
    }
}

/// Full 8x8 snapshot as carried by a `state` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Square>>", into = "Vec<Vec<Square>>")]
pub struct Board([[Square; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    pub fn empty() -> Self {
        Self([[Square::Empty; BOARD_SIZE]; BOARD_SIZE])
    }

    /// Initial chess position, white on rows 6 and 7.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (row, codes) in STANDARD_SETUP.iter().enumerate() {
            for (col, code) in codes.iter().enumerate() {
                // STANDARD_SETUP only holds well-formed codes.
                board.0[row][col] = Square::parse(code).unwrap_or_default();
            }
        }
        board
    }

    pub fn get(&self, at: Coord) -> Square {
        self.0[at.row()][at.col()]
    }

    pub fn set(&mut self, at: Coord, square: Square) {
        self.0[at.row()][at.col()] = square;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Square; BOARD_SIZE]> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Vec<Square>>> for Board {
    type Error = ProtocolError;

    fn try_from(rows: Vec<Vec<Square>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(ProtocolError::BoardRows { rows: rows.len() });
        }
        let mut board = Board::empty();
        for (row, squares) in rows.into_iter().enumerate() {
            if squares.len() != BOARD_SIZE {
                return Err(ProtocolError::BoardColumns {
                    row,
                    cols: squares.len(),
                });
            }
            for (col, square) in squares.into_iter().enumerate() {
                board.0[row][col] = square;
            }
        }
        Ok(board)
    }
}

impl From<Board> for Vec<Vec<Square>> {
    fn from(value: Board) -> Self {
        value.0.iter().map(|row| row.to_vec()).collect()
    }
}

/// Color assigned to this client by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerColor {
    White,
    Black,
    #[default]
    Unknown,
}

impl PlayerColor {
    pub fn side(self) -> Option<Side> {
        match self {
            PlayerColor::White => Some(Side::White),
            PlayerColor::Black => Some(Side::Black),
            PlayerColor::Unknown => None,
        }
    }

    pub fn owns(self, square: Square) -> bool {
        match (self.side(), square.side()) {
            (Some(mine), Some(occupant)) => mine == occupant,
            _ => false,
        }
    }

    pub fn label(self) -> &'static str {
        self.side().map(Side::label).unwrap_or("—")
    }
}

impl From<Side> for PlayerColor {
    fn from(value: Side) -> Self {
        match value {
            Side::White => PlayerColor::White,
            Side::Black => PlayerColor::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Normalizes a code typed by the user: trimmed, upper-cased, non-empty.
    pub fn from_user_input(input: &str) -> Result<Self, ProtocolError> {
        let code = input.trim().to_uppercase();
        if code.is_empty() {
            return Err(ProtocolError::EmptyRoomCode);
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
