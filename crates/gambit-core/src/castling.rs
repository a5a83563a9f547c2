//! Castling rights and the fixed geometry of the four castling moves.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::error::FenError;
use crate::piece::Color;
use crate::square::Square;

/// One of the four castling moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Castling {
    WhiteKingside = 0,
    WhiteQueenside = 1,
    BlackKingside = 2,
    BlackQueenside = 3,
}

impl Castling {
    /// FEN order: `K Q k q`.
    pub const ALL: [Castling; 4] = [
        Castling::WhiteKingside,
        Castling::WhiteQueenside,
        Castling::BlackKingside,
        Castling::BlackQueenside,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub const fn color(self) -> Color {
        match self {
            Castling::WhiteKingside | Castling::WhiteQueenside => Color::White,
            Castling::BlackKingside | Castling::BlackQueenside => Color::Black,
        }
    }

    pub const fn for_color(color: Color) -> [Castling; 2] {
        match color {
            Color::White => [Castling::WhiteKingside, Castling::WhiteQueenside],
            Color::Black => [Castling::BlackKingside, Castling::BlackQueenside],
        }
    }

    pub const fn fen_char(self) -> char {
        match self {
            Castling::WhiteKingside => 'K',
            Castling::WhiteQueenside => 'Q',
            Castling::BlackKingside => 'k',
            Castling::BlackQueenside => 'q',
        }
    }

    pub const fn king_from(self) -> Square {
        match self.color() {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    pub const fn king_to(self) -> Square {
        match self {
            Castling::WhiteKingside => Square::G1,
            Castling::WhiteQueenside => Square::C1,
            Castling::BlackKingside => Square::G8,
            Castling::BlackQueenside => Square::C8,
        }
    }

    pub const fn rook_from(self) -> Square {
        match self {
            Castling::WhiteKingside => Square::H1,
            Castling::WhiteQueenside => Square::A1,
            Castling::BlackKingside => Square::H8,
            Castling::BlackQueenside => Square::A8,
        }
    }

    pub const fn rook_to(self) -> Square {
        match self {
            Castling::WhiteKingside => Square::F1,
            Castling::WhiteQueenside => Square::D1,
            Castling::BlackKingside => Square::F8,
            Castling::BlackQueenside => Square::D8,
        }
    }

    /// Squares that must be empty: everything between king and rook.
    pub(crate) const fn must_be_empty(self) -> Bitboard {
        match self {
            Castling::WhiteKingside => Bitboard::new(0x60),
            Castling::WhiteQueenside => Bitboard::new(0x0E),
            Castling::BlackKingside => Bitboard::new(0x60 << 56),
            Castling::BlackQueenside => Bitboard::new(0x0E << 56),
        }
    }

    /// Squares the king crosses or lands on; none may be attacked.
    pub(crate) const fn king_path(self) -> Bitboard {
        match self {
            Castling::WhiteKingside => Bitboard::new(0x60),
            Castling::WhiteQueenside => Bitboard::new(0x0C),
            Castling::BlackKingside => Bitboard::new(0x60 << 56),
            Castling::BlackQueenside => Bitboard::new(0x0C << 56),
        }
    }

    /// Identify a castling move from the king's destination.
    pub(crate) fn from_king_move(from: Square, to: Square) -> Option<Castling> {
        Castling::ALL
            .into_iter()
            .find(|c| c.king_from() == from && c.king_to() == to)
    }
}

/// The set of castling moves still available, one bit per [`Castling`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

/// Rights that survive a move touching each square, as a bit mask.
static KEEP_MASK: [u8; 64] = {
    let mut table = [0b1111u8; 64];
    table[Square::E1.index()] = 0b1100;
    table[Square::H1.index()] = 0b1110;
    table[Square::A1.index()] = 0b1101;
    table[Square::E8.index()] = 0b0011;
    table[Square::H8.index()] = 0b1011;
    table[Square::A8.index()] = 0b0111;
    table
};

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Raw four-bit value, used to index hashing keys.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, castling: Castling) -> bool {
        self.0 & castling.bit() != 0
    }

    #[inline]
    pub const fn with(self, castling: Castling) -> CastlingRights {
        CastlingRights(self.0 | castling.bit())
    }

    #[inline]
    pub const fn without(self, castling: Castling) -> CastlingRights {
        CastlingRights(self.0 & !castling.bit())
    }

    /// Rights left after a move from `from` to `to`. A king or rook leaving its
    /// home square, or a rook being captured on it, loses the matching rights.
    #[inline]
    pub fn after_move(self, from: Square, to: Square) -> CastlingRights {
        CastlingRights(self.0 & KEEP_MASK[from.index()] & KEEP_MASK[to.index()])
    }

    pub fn iter(self) -> impl Iterator<Item = Castling> {
        Castling::ALL.into_iter().filter(move |&c| self.contains(c))
    }

    /// Parse the FEN castling field (`KQkq`, `Kq`, `-`, ...).
    pub fn from_fen(field: &str) -> Result<CastlingRights, FenError> {
        if field == "-" {
            return Ok(CastlingRights::NONE);
        }
        let invalid = || FenError::InvalidCastling {
            found: field.to_string(),
        };
        if field.is_empty() {
            return Err(invalid());
        }
        let mut rights = CastlingRights::NONE;
        for c in field.chars() {
            let castling = Castling::ALL
                .into_iter()
                .find(|castling| castling.fen_char() == c)
                .ok_or_else(invalid)?;
            if rights.contains(castling) {
                return Err(invalid());
            }
            rights = rights.with(castling);
        }
        Ok(rights)
    }
}

impl FromIterator<Castling> for CastlingRights {
    fn from_iter<I: IntoIterator<Item = Castling>>(iter: I) -> CastlingRights {
        iter.into_iter().fold(CastlingRights::NONE, CastlingRights::with)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for castling in self.iter() {
            write!(f, "{}", castling.fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({self})")
    }
}
