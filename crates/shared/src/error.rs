use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("invalid square code: {0:?}")]
    InvalidSquareCode(String),
    #[error("coordinate out of range: ({row}, {col})")]
    CoordOutOfRange { row: i64, col: i64 },
    #[error("invalid square reference: {0:?}")]
    InvalidSquareRef(String),
    #[error("board must have 8 rows, got {rows}")]
    BoardRows { rows: usize },
    #[error("board row {row} must have 8 columns, got {cols}")]
    BoardColumns { row: usize, cols: usize },
    #[error("room code must not be empty")]
    EmptyRoomCode,
}
