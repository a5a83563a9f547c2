//! Move ordering: queen promotions, then captures by MVV-LVA, then quiet moves.

use std::cmp::Reverse;

use gambit_core::{Move, MoveKind, PieceKind, Position, PromotionPiece};

/// MVV-LVA scores indexed by `[victim][attacker]`.
///
/// Weights: Pawn=1, Knight=3, Bishop=3, Rook=5, Queen=9, King=0.
/// Formula: `victim_weight * 16 - attacker_weight`.
const MVV_LVA: [[i32; 6]; 6] = [
    // victim = Pawn (weight 1)
    [15, 13, 13, 11, 7, 16],
    // victim = Knight (weight 3)
    [47, 45, 45, 43, 39, 48],
    // victim = Bishop (weight 3)
    [47, 45, 45, 43, 39, 48],
    // victim = Rook (weight 5)
    [79, 77, 77, 75, 71, 80],
    // victim = Queen (weight 9)
    [143, 141, 141, 139, 135, 144],
    // victim = King (weight 0)
    [-1, -3, -3, -5, -9, 0],
];

/// Ordering score; higher is searched first.
///
/// - Queen promotions: 30,000 (plus the capture score when capturing)
/// - Captures: 10,000 + MVV-LVA
/// - Under-promotions: 100
/// - Quiet moves: 0
pub fn score_move(position: &Position, mv: Move) -> i32 {
    let promotion = match mv.promotion() {
        Some(PromotionPiece::Queen) => 30_000,
        Some(_) => 100,
        None => 0,
    };

    let capture = match mv.kind() {
        MoveKind::EnPassant => 10_000 + MVV_LVA[PieceKind::Pawn.index()][PieceKind::Pawn.index()],
        _ => match (position.kind_at(mv.dest()), mv.is_capture()) {
            (Some(victim), true) => {
                let attacker = position.kind_at(mv.source()).unwrap_or(PieceKind::Pawn);
                10_000 + MVV_LVA[victim.index()][attacker.index()]
            }
            _ => 0,
        },
    };

    promotion + capture
}

/// Sort `moves` best-first in place. Ties keep generation order.
pub fn order_moves(position: &Position, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| Reverse(score_move(position, mv)));
}

/// Whether `mv` belongs in quiescence search.
#[inline]
pub fn is_tactical(mv: Move) -> bool {
    mv.is_capture() || mv.promotion() == Some(PromotionPiece::Queen)
}
