//! The position: piece placement plus everything else a FEN records.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::castling::{Castling, CastlingRights};
use crate::error::BoardError;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::{File, Rank, Square};
use crate::zobrist;

/// A complete, immutable chess position.
///
/// Positions are small `Copy` values. They come from [`Position::starting`],
/// from FEN via [`str::parse`], or from [`Position::apply`]; none of these
/// can produce a position with a missing king or with the side not to move
/// left in check.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    kinds: [Bitboard; PieceKind::COUNT],
    sides: [Bitboard; Color::COUNT],
    occupied: Bitboard,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// An empty board, White to move, no rights, move 1.
    pub(crate) const fn empty() -> Position {
        Position {
            kinds: [Bitboard::EMPTY; PieceKind::COUNT],
            sides: [Bitboard::EMPTY; Color::COUNT],
            occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /// The standard starting position.
    pub fn starting() -> Position {
        let mut position = Position::empty();
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            position.toggle(Square::new(Rank::R1, file), Piece::new(kind, Color::White));
            position.toggle(Square::new(Rank::R2, file), Piece::new(PieceKind::Pawn, Color::White));
            position.toggle(Square::new(Rank::R7, file), Piece::new(PieceKind::Pawn, Color::Black));
            position.toggle(Square::new(Rank::R8, file), Piece::new(kind, Color::Black));
        }
        position.set_castling(CastlingRights::ALL);
        position
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        Some(Piece::new(self.kind_at(sq)?, self.color_at(sq)?))
    }

    pub fn kind_at(&self, sq: Square) -> Option<PieceKind> {
        if !self.occupied.contains(sq) {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.kinds[kind.index()].contains(sq))
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.sides[Color::White.index()].contains(sq) {
            Some(Color::White)
        } else if self.sides[Color::Black.index()].contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Squares holding `kind`, either color.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.kinds[kind.index()]
    }

    /// Squares holding `kind` of `color`.
    #[inline]
    pub fn colored(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.kinds[kind.index()] & self.sides[color.index()]
    }

    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// The square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        let kings = self.colored(PieceKind::King, color);
        debug_assert_eq!(kings.count(), 1, "{color} must have exactly one king");
        Square::from_index_unchecked(kings.inner().trailing_zeros() as u8)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// The square a pawn may capture onto en passant, set only right after a double push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist key over placement, side to move, castling rights and en passant file.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Same placement, side to move, castling rights and en passant square.
    /// Move counters are ignored.
    pub fn is_repetition_of(&self, other: &Position) -> bool {
        self.hash == other.hash
            && self.kinds == other.kinds
            && self.sides == other.sides
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }

    /// Add `piece` on an empty `sq`, or remove it from `sq`.
    #[inline]
    pub(crate) fn toggle(&mut self, sq: Square, piece: Piece) {
        let bb = sq.bitboard();
        self.kinds[piece.kind.index()] ^= bb;
        self.sides[piece.color.index()] ^= bb;
        self.occupied ^= bb;
        self.hash ^= zobrist::piece_square(piece, sq);
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastlingRights) {
        self.hash ^= zobrist::castling(self.castling) ^ zobrist::castling(rights);
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, target: Option<Square>) {
        self.hash ^= zobrist::en_passant(self.en_passant) ^ zobrist::en_passant(target);
        self.en_passant = target;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        if color != self.side_to_move {
            self.hash ^= zobrist::black_to_move();
            self.side_to_move = color;
        }
    }

    #[inline]
    pub(crate) fn set_counters(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Check the structural rules every reachable position obeys.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self.colored(PieceKind::King, color).count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }

        if (self.pieces(PieceKind::Pawn) & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_nonempty() {
            return Err(BoardError::PawnsOnBackRank);
        }

        for castling in self.castling.iter() {
            let color = castling.color();
            let king_home = self.colored(PieceKind::King, color).contains(castling.king_from());
            let rook_home = self.colored(PieceKind::Rook, color).contains(castling.rook_from());
            if !king_home || !rook_home {
                return Err(BoardError::CastlingWithoutPieces {
                    right: castling.fen_char(),
                });
            }
        }

        let them = !self.side_to_move;
        if self.is_square_attacked(self.king_square(them), self.side_to_move) {
            return Err(BoardError::OpponentInCheck);
        }

        debug_assert_eq!(self.hash, zobrist::hash_from_scratch(self));
        Ok(())
    }

    /// Castling moves the side to move still holds the right for.
    pub(crate) fn castling_for(&self, color: Color) -> impl Iterator<Item = Castling> + '_ {
        Castling::for_color(color)
            .into_iter()
            .filter(|&castling| self.castling.contains(castling))
    }

    /// A printable 8x8 grid, rank 8 at the top.
    pub fn pretty(&self) -> PrettyPosition<'_> {
        PrettyPosition(self)
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::starting()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// Display adapter returned by [`Position::pretty`].
pub struct PrettyPosition<'a>(&'a Position);

impl fmt::Display for PrettyPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.0;
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{rank} |")?;
            for file in File::ALL {
                let c = position
                    .piece_at(Square::new(rank, file))
                    .map_or('.', Piece::fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  +----------------")?;
        write!(f, "    a b c d e f g h")
    }
}
