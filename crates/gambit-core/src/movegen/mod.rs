//! Legal move generation.
//!
//! Checkers and pinned pieces are computed once per position. Non-king moves
//! are then confined to the check mask (the checker plus the squares between
//! it and the king) and, for pinned pieces, to the pin line. King moves are
//! tested against attacks computed with the king lifted off the board. The
//! result is exactly the set of pseudo-legal moves that do not leave the
//! mover's king in check.

mod king;
mod pawns;
mod pieces;
mod pins;

use std::fmt;
use std::ops::Deref;

use crate::attacks::{between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::chess_move::Move;
use crate::piece::{Color, PieceKind};
use crate::position::Position;
use crate::square::Square;

/// Upper bound on legal moves in any position (the known maximum is 218).
const CAPACITY: usize = 256;

/// A fixed-capacity, stack-allocated list of moves.
///
/// Dereferences to `[Move]`, so slice methods such as `iter`, `len` and
/// `contains` are available directly.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; CAPACITY],
    len: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::normal(Square::A1, Square::A1, false); CAPACITY],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < CAPACITY);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    /// Return `true` if `mv` is in the list.
    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> MoveList {
        MoveList::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    #[inline]
    fn deref(&self) -> &[Move] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Pieces of `by` attacking `sq`, with sliders blocked by `occupied`.
pub(crate) fn attackers_to(position: &Position, sq: Square, by: Color, occupied: Bitboard) -> Bitboard {
    let queens = position.pieces(PieceKind::Queen);
    let diagonal = position.pieces(PieceKind::Bishop) | queens;
    let orthogonal = position.pieces(PieceKind::Rook) | queens;
    let candidates = (knight_attacks(sq) & position.pieces(PieceKind::Knight))
        | (king_attacks(sq) & position.pieces(PieceKind::King))
        | (pawn_attacks(!by, sq) & position.pieces(PieceKind::Pawn))
        | (bishop_attacks(sq, occupied) & diagonal)
        | (rook_attacks(sq, occupied) & orthogonal);
    candidates & position.side(by)
}

impl Position {
    /// Return `true` if any piece of `by` attacks `sq`. Pawns attack diagonally only.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        attackers_to(self, sq, by, self.occupied()).is_nonempty()
    }

    /// Return `true` if the side to move is in check.
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move();
        self.is_square_attacked(self.king_square(us), !us)
    }

    /// Legal moves of the piece on `from`; empty when the square holds no piece of the side to move.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        if self.color_at(from) != Some(self.side_to_move()) {
            return Vec::new();
        }
        generate_legal_moves(self)
            .iter()
            .copied()
            .filter(|mv| mv.source() == from)
            .collect()
    }
}

/// Shared state for generating the moves of one position.
struct Generator<'a> {
    position: &'a Position,
    us: Color,
    them: Color,
    king: Square,
    checkers: Bitboard,
    pinned: Bitboard,
    /// Destinations that resolve a single check; everything when not in check.
    check_mask: Bitboard,
    moves: MoveList,
}

impl<'a> Generator<'a> {
    fn new(position: &'a Position) -> Generator<'a> {
        let us = position.side_to_move();
        let king = position.king_square(us);
        let (checkers, pinned) = pins::checkers_and_pinned(position, us, king);
        let check_mask = match checkers.lsb() {
            None => Bitboard::FULL,
            Some(checker) => between(king, checker) | checkers,
        };
        Generator {
            position,
            us,
            them: !us,
            king,
            checkers,
            pinned,
            check_mask,
            moves: MoveList::new(),
        }
    }

    fn run(mut self) -> MoveList {
        if !self.checkers.has_many() {
            self.pawn_moves();
            self.knight_moves();
            self.slider_moves();
        }
        self.king_moves();
        self.moves
    }

    /// Destinations a piece on `from` may use without exposing the king.
    #[inline]
    fn allowed_from(&self, from: Square) -> Bitboard {
        if self.pinned.contains(from) {
            self.check_mask & crate::attacks::line(self.king, from)
        } else {
            self.check_mask
        }
    }

    #[inline]
    fn is_enemy(&self, sq: Square) -> bool {
        self.position.side(self.them).contains(sq)
    }
}

/// Every legal move for the side to move.
pub fn generate_legal_moves(position: &Position) -> MoveList {
    Generator::new(position).run()
}
