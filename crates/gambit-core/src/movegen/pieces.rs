//! Knight, bishop, rook and queen moves.

use crate::attacks::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::chess_move::Move;
use crate::piece::PieceKind;
use crate::square::Square;

use super::Generator;

impl Generator<'_> {
    pub(super) fn knight_moves(&mut self) {
        // A pinned knight can never stay on its pin line.
        let knights = self.position.colored(PieceKind::Knight, self.us) & !self.pinned;
        for from in knights {
            self.push_targets(from, knight_attacks(from));
        }
    }

    pub(super) fn slider_moves(&mut self) {
        let occupied = self.position.occupied();
        for from in self.position.colored(PieceKind::Bishop, self.us) {
            self.push_targets(from, bishop_attacks(from, occupied));
        }
        for from in self.position.colored(PieceKind::Rook, self.us) {
            self.push_targets(from, rook_attacks(from, occupied));
        }
        for from in self.position.colored(PieceKind::Queen, self.us) {
            self.push_targets(from, queen_attacks(from, occupied));
        }
    }

    fn push_targets(&mut self, from: Square, attacks: Bitboard) {
        let targets = attacks & !self.position.side(self.us) & self.allowed_from(from);
        for to in targets {
            let capture = self.is_enemy(to);
            self.moves.push(Move::normal(from, to, capture));
        }
    }
}
