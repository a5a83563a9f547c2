//! Move-path enumeration for verifying the move generator.

use crate::chess_move::Move;
use crate::movegen::generate_legal_moves;
use crate::position::Position;

/// Count the leaf nodes of the legal move tree `depth` plies deep.
///
/// Depth 0 is the position itself. The last ply is bulk-counted from the
/// length of the move list.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| perft(&position.play(mv), depth - 1))
        .sum()
}

/// Per-move breakdown of [`perft`], sorted by coordinate notation.
pub fn divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    let mut split: Vec<(Move, u64)> = generate_legal_moves(position)
        .iter()
        .map(|&mv| (mv, perft(&position.play(mv), depth.saturating_sub(1))))
        .collect();
    split.sort_by_cached_key(|(mv, _)| mv.to_string());
    split
}

#[cfg(test)]
mod tests {
    use super::{divide, perft};
    use crate::position::Position;

    #[test]
    fn depth_zero_is_one() {
        assert_eq!(perft(&Position::starting(), 0), 1);
    }

    #[test]
    fn shallow_start() {
        let start = Position::starting();
        assert_eq!(perft(&start, 1), 20);
        assert_eq!(perft(&start, 2), 400);
        assert_eq!(perft(&start, 3), 8_902);
    }

    #[test]
    fn divide_sums_to_perft() {
        let start = Position::starting();
        let split = divide(&start, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8_902);
        assert_eq!(split[0].0.to_string(), "a2a3");
        let e2e4 = split.iter().find(|(mv, _)| mv.to_string() == "e2e4").map(|&(_, n)| n);
        assert_eq!(e2e4, Some(600));
    }

    #[test]
    fn divide_depth_one_counts_each_move_once() {
        assert!(divide(&Position::starting(), 1).iter().all(|&(_, n)| n == 1));
    }
}
