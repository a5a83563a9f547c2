//! Material evaluation.
//!
//! Scores are in centipawns. [`material`] is from White's point of view;
//! [`evaluate`] flips it to the side to move, which is what negamax wants.

use gambit_core::{Color, PieceKind, Position};

/// Piece values indexed by [`PieceKind::index`].
///
/// | Piece  | cp  |
/// |--------|-----|
/// | Pawn   | 100 |
/// | Knight | 320 |
/// | Bishop | 330 |
/// | Rook   | 500 |
/// | Queen  | 900 |
/// | King   |   0 |
pub const MATERIAL_VALUE: [i32; PieceKind::COUNT] = [100, 320, 330, 500, 900, 0];

const BISHOP_PAIR_BONUS: i32 = 50;

/// Material balance, positive when White is ahead.
pub fn material(position: &Position) -> i32 {
    let mut score = 0;
    for kind in PieceKind::ALL {
        let white = position.colored(kind, Color::White).count() as i32;
        let black = position.colored(kind, Color::Black).count() as i32;
        score += MATERIAL_VALUE[kind.index()] * (white - black);
    }

    if position.colored(PieceKind::Bishop, Color::White).has_many() {
        score += BISHOP_PAIR_BONUS;
    }
    if position.colored(PieceKind::Bishop, Color::Black).has_many() {
        score -= BISHOP_PAIR_BONUS;
    }
    score
}

/// Static evaluation from the side to move's perspective.
pub fn evaluate(position: &Position) -> i32 {
    match position.side_to_move() {
        Color::White => material(position),
        Color::Black => -material(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_balanced() {
        assert_eq!(evaluate(&Position::starting()), 0);
    }

    #[test]
    fn extra_queen() {
        let position: Position = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        assert_eq!(material(&position), 900);
        assert_eq!(evaluate(&position), 900);

        let position: Position = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1".parse().unwrap();
        assert_eq!(evaluate(&position), -900);
    }

    #[test]
    fn bishop_pair() {
        let position: Position = "4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1".parse().unwrap();
        assert_eq!(material(&position), 2 * 330 + BISHOP_PAIR_BONUS);
    }
}
