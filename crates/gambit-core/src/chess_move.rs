//! Moves as produced by the move generator.

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

const SRC_MASK: u32 = 0x3F;
const DST_SHIFT: u32 = 6;
const PROMO_SHIFT: u32 = 12;
const KIND_SHIFT: u32 = 14;
const CAPTURE_BIT: u32 = 1 << 16;

/// What special handling, if any, applying the move needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castle = 3,
}

/// A piece a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotionPiece {
    Queen = 0,
    Rook = 1,
    Bishop = 2,
    Knight = 3,
}

impl PromotionPiece {
    /// Strongest first; the generator emits promotions in this order.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }

    pub const fn letter(self) -> char {
        self.kind().letter()
    }

    /// Parse the trailing letter of coordinate notation (`q`, `r`, `b`, `n`).
    pub fn from_letter(c: char) -> Option<PromotionPiece> {
        PromotionPiece::ALL.into_iter().find(|p| p.letter() == c)
    }
}

impl fmt::Display for PromotionPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// A move, packed into a `u32`:
///
/// ```text
/// bits  0-5   source square
/// bits  6-11  destination square
/// bits 12-13  promotion piece (Queen, Rook, Bishop, Knight)
/// bits 14-15  kind (Normal, Promotion, EnPassant, Castle)
/// bit  16     capture flag
/// ```
///
/// Moves cannot be built outside this crate; obtain them from
/// [`generate_legal_moves`](crate::generate_legal_moves) or
/// [`Position::find_move`](crate::Position::find_move).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    const fn pack(source: Square, dest: Square, kind: MoveKind, promo: u32, capture: bool) -> Move {
        let mut bits = source.index() as u32
            | (dest.index() as u32) << DST_SHIFT
            | promo << PROMO_SHIFT
            | (kind as u32) << KIND_SHIFT;
        if capture {
            bits |= CAPTURE_BIT;
        }
        Move(bits)
    }

    /// A quiet move or ordinary capture, including double pawn pushes.
    pub(crate) const fn normal(source: Square, dest: Square, capture: bool) -> Move {
        Move::pack(source, dest, MoveKind::Normal, 0, capture)
    }

    pub(crate) const fn promote(source: Square, dest: Square, piece: PromotionPiece, capture: bool) -> Move {
        Move::pack(source, dest, MoveKind::Promotion, piece as u32, capture)
    }

    pub(crate) const fn en_passant(source: Square, dest: Square) -> Move {
        Move::pack(source, dest, MoveKind::EnPassant, 0, true)
    }

    /// A castling move, given as the king's source and destination.
    pub(crate) const fn castle(king_from: Square, king_to: Square) -> Move {
        Move::pack(king_from, king_to, MoveKind::Castle, 0, false)
    }

    #[inline]
    pub const fn source(self) -> Square {
        Square::from_index_unchecked((self.0 & SRC_MASK) as u8)
    }

    #[inline]
    pub const fn dest(self) -> Square {
        Square::from_index_unchecked((self.0 >> DST_SHIFT & SRC_MASK) as u8)
    }

    pub const fn kind(self) -> MoveKind {
        match self.0 >> KIND_SHIFT & 0b11 {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castle,
        }
    }

    pub const fn promotion(self) -> Option<PromotionPiece> {
        if !matches!(self.kind(), MoveKind::Promotion) {
            return None;
        }
        Some(match self.0 >> PROMO_SHIFT & 0b11 {
            0 => PromotionPiece::Queen,
            1 => PromotionPiece::Rook,
            2 => PromotionPiece::Bishop,
            _ => PromotionPiece::Knight,
        })
    }

    /// True for every move that removes an enemy piece, en passant included.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_BIT != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind(), MoveKind::Castle)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind(), MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind(), MoveKind::Promotion)
    }
}

/// Coordinate notation: `e2e4`, `e1g1`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.dest())?;
        if let Some(piece) = self.promotion() {
            write!(f, "{}", piece.letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {:?}", self.kind())?;
        if self.is_capture() {
            f.write_str(" capture")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveKind, PromotionPiece};
    use crate::square::Square;

    #[test]
    fn fits_in_four_bytes() {
        assert_eq!(std::mem::size_of::<Move>(), 4);
    }

    #[test]
    fn fields_survive_packing_on_every_square_pair() {
        for src in Square::all() {
            for dst in Square::all() {
                let mv = Move::normal(src, dst, src.index() % 2 == 0);
                assert_eq!(mv.source(), src);
                assert_eq!(mv.dest(), dst);
                assert_eq!(mv.kind(), MoveKind::Normal);
                assert_eq!(mv.is_capture(), src.index() % 2 == 0);
                assert_eq!(mv.promotion(), None);
            }
        }
    }

    #[test]
    fn promotions() {
        for piece in PromotionPiece::ALL {
            let mv = Move::promote(Square::B7, Square::A8, piece, true);
            assert_eq!(mv.promotion(), Some(piece));
            assert!(mv.is_promotion());
            assert!(mv.is_capture());
            assert_eq!(mv.to_string(), format!("b7a8{}", piece.letter()));
        }
    }

    #[test]
    fn special_moves() {
        let ep = Move::en_passant(Square::E5, Square::D6);
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
        assert!(!ep.is_castle());

        let castle = Move::castle(Square::E8, Square::C8);
        assert!(castle.is_castle());
        assert!(!castle.is_capture());
        assert_eq!(castle.to_string(), "e8c8");
    }

    #[test]
    fn capture_flag_distinguishes_moves() {
        assert_ne!(
            Move::normal(Square::E4, Square::D5, true),
            Move::normal(Square::E4, Square::D5, false)
        );
    }

    #[test]
    fn promotion_letters_parse() {
        assert_eq!(PromotionPiece::from_letter('q'), Some(PromotionPiece::Queen));
        assert_eq!(PromotionPiece::from_letter('n'), Some(PromotionPiece::Knight));
        assert_eq!(PromotionPiece::from_letter('k'), None);
        assert_eq!(PromotionPiece::from_letter('Q'), None);
    }

    #[test]
    fn debug_mentions_kind() {
        let dbg = format!("{:?}", Move::normal(Square::D2, Square::D4, false));
        assert_eq!(dbg, "Move(d2d4 Normal)");
    }
}
