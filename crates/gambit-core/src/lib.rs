//! Chess rules: board representation, legal move generation, move
//! application, game result detection, and FEN.

pub mod attacks;

mod apply;
mod bitboard;
mod castling;
mod chess_move;
mod error;
mod fen;
mod game;
mod movegen;
mod perft;
mod piece;
mod position;
mod square;
mod views;
mod zobrist;

pub use bitboard::Bitboard;
pub use castling::{Castling, CastlingRights};
pub use chess_move::{Move, MoveKind, PromotionPiece};
pub use error::{BoardError, FenError, MoveError};
pub use fen::STARTING_FEN;
pub use game::{GameState, GameStatus};
pub use movegen::{MoveList, generate_legal_moves};
pub use perft::{divide, perft};
pub use piece::{Color, Piece, PieceKind};
pub use position::{Position, PrettyPosition};
pub use square::{File, Rank, Square};
pub use views::Planes;
