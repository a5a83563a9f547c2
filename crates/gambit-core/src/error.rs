//! Error types for FEN parsing, board validation, and move submission.

use thiserror::Error;

use crate::game::GameStatus;
use crate::piece::Color;

/// A FEN string could not be decoded into a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// `rank` counts from the top of the placement field, so 0 is rank 8.
    #[error("placement rank {rank} describes {length} squares, expected 8")]
    BadRankLength { rank: usize, length: usize },

    #[error("invalid piece character '{character}'")]
    InvalidPieceChar { character: char },

    #[error("invalid active color \"{found}\"")]
    InvalidColor { found: String },

    #[error("invalid castling field \"{found}\"")]
    InvalidCastling { found: String },

    #[error("invalid en passant field \"{found}\"")]
    InvalidEnPassant { found: String },

    #[error("invalid {field} \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },

    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}

/// A piece placement that no legal game can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected exactly one {color} king, found {count}")]
    InvalidKingCount { color: Color, count: u32 },

    #[error("pawns found on the first or eighth rank")]
    PawnsOnBackRank,

    #[error("the side not to move is in check")]
    OpponentInCheck,

    #[error("castling right {right} has no king and rook on their home squares")]
    CastlingWithoutPieces { right: char },
}

/// A move request was refused. The game is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The move is not among the legal moves of the current position.
    #[error("illegal move {mv}")]
    Illegal { mv: String },

    #[error("game is over: {status}")]
    GameOver { status: GameStatus },

    #[error("malformed move notation \"{text}\"")]
    InvalidNotation { text: String },
}
