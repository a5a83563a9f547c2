//! Attack sets for every piece type.
//!
//! Leapers (knight, king, pawn) use per-square tables. Sliders use the
//! classical ray approach: for each of the eight directions a precomputed ray
//! is cut at the first blocker, found with a forward or reverse bit scan
//! depending on whether the direction increases the square index.

use crate::bitboard::Bitboard;
use crate::piece::Color;
use crate::square::Square;

/// Rank/file step per direction. Directions 0..4 increase the square index,
/// 4..8 decrease it, and `d` is opposite to `(d + 4) % 8`.
const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),   // north
    (0, 1),   // east
    (1, 1),   // north-east
    (1, -1),  // north-west
    (-1, 0),  // south
    (0, -1),  // west
    (-1, -1), // south-west
    (-1, 1),  // south-east
];

const ORTHOGONAL: [usize; 4] = [0, 1, 4, 5];
const DIAGONAL: [usize; 4] = [2, 3, 6, 7];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (1, 2), (1, -2),
    (-1, 2), (-1, -2), (-2, 1), (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, -1), (1, 0), (1, 1),
    (0, -1),         (0, 1),
    (-1, -1), (-1, 0), (-1, 1),
];

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let origin = Square::from_index_unchecked(sq as u8);
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            if let Some(target) = origin.offset(deltas[i].0, deltas[i].1) {
                bits |= 1u64 << target.index();
            }
            i += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

const fn ray_table() -> [[Bitboard; 64]; 8] {
    let mut table = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (dr, df) = DIRECTIONS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut bits = 0u64;
            let mut cursor = Square::from_index_unchecked(sq as u8).offset(dr, df);
            while let Some(next) = cursor {
                bits |= 1u64 << next.index();
                cursor = next.offset(dr, df);
            }
            table[dir][sq] = Bitboard::new(bits);
            sq += 1;
        }
        dir += 1;
    }
    table
}

/// Build either the strictly-between table or the full-line table.
const fn segment_table(full_line: bool) -> [[Bitboard; 64]; 64] {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut dir = 0;
        while dir < 8 {
            let opposite = (dir + 4) % 8;
            let mut ray = RAY_TABLE[dir][a].inner();
            while ray != 0 {
                let b = ray.trailing_zeros() as usize;
                ray &= ray - 1;
                let bits = if full_line {
                    RAY_TABLE[dir][a].inner() | RAY_TABLE[opposite][a].inner() | 1u64 << a
                } else {
                    RAY_TABLE[dir][a].inner() & RAY_TABLE[opposite][b].inner()
                };
                table[a][b] = Bitboard::new(bits);
            }
            dir += 1;
        }
        a += 1;
    }
    table
}

const RAY_TABLE: [[Bitboard; 64]; 8] = ray_table();

static RAYS: [[Bitboard; 64]; 8] = RAY_TABLE;
static KNIGHT: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);
static KING: [Bitboard; 64] = leaper_table(&KING_DELTAS);
static PAWN: [[Bitboard; 64]; 2] = [leaper_table(&[(1, -1), (1, 1)]), leaper_table(&[(-1, -1), (-1, 1)])];
static BETWEEN: [[Bitboard; 64]; 64] = segment_table(false);
static LINE: [[Bitboard; 64]; 64] = segment_table(true);

#[inline]
fn sliding(sq: Square, occupied: Bitboard, dirs: [usize; 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for dir in dirs {
        let ray = RAYS[dir][sq.index()];
        let blockers = ray & occupied;
        let first = if dir < 4 { blockers.lsb() } else { blockers.msb() };
        attacks |= match first {
            Some(blocker) => ray ^ RAYS[dir][blocker.index()],
            None => ray,
        };
    }
    attacks
}

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT[sq.index()]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING[sq.index()]
}

/// Squares a pawn of `color` standing on `sq` captures on. Pawns never attack straight ahead.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN[color.index()][sq.index()]
}

/// Rook attacks from `sq`; the first blocker on each ray is included.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding(sq, occupied, ORTHOGONAL)
}

/// Bishop attacks from `sq`; the first blocker on each ray is included.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding(sq, occupied, DIAGONAL)
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Squares strictly between two aligned squares; empty when not aligned.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index()][b.index()]
}

/// The whole rank, file, or diagonal through two aligned squares; empty when not aligned.
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    LINE[a.index()][b.index()]
}
