//! King steps and castling.

use crate::attacks::king_attacks;
use crate::chess_move::Move;

use super::{Generator, attackers_to};

impl Generator<'_> {
    pub(super) fn king_moves(&mut self) {
        let position = self.position;
        // Lift the king so a slider's ray continues through the square it vacates.
        let without_king = position.occupied().without(self.king);

        let targets = king_attacks(self.king) & !position.side(self.us);
        for to in targets {
            if attackers_to(position, to, self.them, without_king).is_empty() {
                let capture = self.is_enemy(to);
                self.moves.push(Move::normal(self.king, to, capture));
            }
        }

        if self.checkers.is_nonempty() {
            return;
        }
        let occupied = position.occupied();
        for castling in position.castling_for(self.us) {
            if (castling.must_be_empty() & occupied).is_nonempty() {
                continue;
            }
            let safe = castling
                .king_path()
                .into_iter()
                .all(|sq| attackers_to(position, sq, self.them, occupied).is_empty());
            if safe {
                self.moves.push(Move::castle(castling.king_from(), castling.king_to()));
            }
        }
    }
}
