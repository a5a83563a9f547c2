//! Checkers and absolutely pinned pieces.

use crate::attacks::{between, bishop_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::piece::{Color, PieceKind};
use crate::position::Position;
use crate::square::Square;

/// Return `(checkers, pinned)` for the king of `us` standing on `king`.
///
/// Enemy sliders are found by casting rays from the king through our own
/// pieces. A slider with nothing between it and the king gives check; one
/// with exactly one of our pieces in between pins that piece.
pub(super) fn checkers_and_pinned(position: &Position, us: Color, king: Square) -> (Bitboard, Bitboard) {
    let them = !us;
    let enemy = position.side(them);
    let occupied = position.occupied();

    let mut checkers = (knight_attacks(king) & position.colored(PieceKind::Knight, them))
        | (pawn_attacks(us, king) & position.colored(PieceKind::Pawn, them));

    let queens = position.pieces(PieceKind::Queen);
    let snipers = (rook_attacks(king, enemy) & (position.pieces(PieceKind::Rook) | queens)
        | bishop_attacks(king, enemy) & (position.pieces(PieceKind::Bishop) | queens))
        & enemy;

    let mut pinned = Bitboard::EMPTY;
    for sniper in snipers {
        let blockers = between(king, sniper) & occupied;
        if blockers.is_empty() {
            checkers = checkers.with(sniper);
        } else if !blockers.has_many() {
            pinned |= blockers & position.side(us);
        }
    }

    (checkers, pinned)
}

#[cfg(test)]
mod tests {
    use super::checkers_and_pinned;
    use crate::bitboard::Bitboard;
    use crate::position::Position;
    use crate::square::Square;

    fn run(fen: &str) -> (Bitboard, Bitboard) {
        let position: Position = fen.parse().unwrap();
        let us = position.side_to_move();
        checkers_and_pinned(&position, us, position.king_square(us))
    }

    #[test]
    fn quiet_start() {
        assert_eq!(run(crate::STARTING_FEN), (Bitboard::EMPTY, Bitboard::EMPTY));
    }

    #[test]
    fn pin_through_own_piece() {
        let (checkers, pinned) = run("4k3/8/8/8/1b6/8/3N4/4K3 w - - 0 1");
        assert!(checkers.is_empty());
        assert_eq!(pinned, Square::D2.bitboard());
    }

    #[test]
    fn enemy_blocker_is_not_pinned() {
        let (checkers, pinned) = run("4k3/8/8/8/1b6/8/3n4/4K3 w - - 0 1");
        assert!(pinned.is_empty());
        assert_eq!(checkers, Bitboard::EMPTY);
    }

    #[test]
    fn two_blockers_break_the_pin() {
        let (_, pinned) = run("4r2k/8/8/8/4P3/8/4N3/4K3 w - - 0 1");
        assert!(pinned.is_empty());
    }

    #[test]
    fn knight_and_slider_check() {
        let (checkers, pinned) = run("4r2k/8/8/8/8/5n2/8/4K3 w - - 0 1");
        assert_eq!(checkers, Square::E8.bitboard() | Square::F3.bitboard());
        assert!(pinned.is_empty());
        assert!(checkers.has_many());
    }
}
