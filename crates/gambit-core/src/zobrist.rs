//! Zobrist keys for incremental position hashing.
//!
//! All keys come from one splitmix64 stream evaluated at compile time, so a
//! given position hashes identically across runs and builds.

use crate::castling::CastlingRights;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

struct Keys {
    piece_square: [[u64; 64]; Piece::COUNT],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

const fn generate() -> Keys {
    let mut state = 0x6761_6D62_6974_0001;
    let mut keys = Keys {
        piece_square: [[0; 64]; Piece::COUNT],
        black_to_move: 0,
        castling: [0; 16],
        en_passant_file: [0; 8],
    };
    let mut piece = 0;
    while piece < Piece::COUNT {
        let mut sq = 0;
        while sq < 64 {
            keys.piece_square[piece][sq] = splitmix64(&mut state);
            sq += 1;
        }
        piece += 1;
    }
    keys.black_to_move = splitmix64(&mut state);
    // castling[0] stays zero: no rights, no contribution.
    let mut rights = 1;
    while rights < 16 {
        keys.castling[rights] = splitmix64(&mut state);
        rights += 1;
    }
    let mut file = 0;
    while file < 8 {
        keys.en_passant_file[file] = splitmix64(&mut state);
        file += 1;
    }
    keys
}

static KEYS: Keys = generate();

#[inline]
pub(crate) fn piece_square(piece: Piece, sq: Square) -> u64 {
    KEYS.piece_square[piece.index()][sq.index()]
}

#[inline]
pub(crate) fn black_to_move() -> u64 {
    KEYS.black_to_move
}

#[inline]
pub(crate) fn castling(rights: CastlingRights) -> u64 {
    KEYS.castling[rights.bits() as usize]
}

#[inline]
pub(crate) fn en_passant(target: Option<Square>) -> u64 {
    match target {
        Some(sq) => KEYS.en_passant_file[sq.file().index()],
        None => 0,
    }
}

/// Hash every component of `position` without using its cached key.
pub(crate) fn hash_from_scratch(position: &Position) -> u64 {
    let mut hash = 0;
    for sq in position.occupied() {
        if let Some(piece) = position.piece_at(sq) {
            hash ^= piece_square(piece, sq);
        }
    }
    if position.side_to_move() == crate::piece::Color::Black {
        hash ^= black_to_move();
    }
    hash ^ castling(position.castling()) ^ en_passant(position.en_passant())
}
