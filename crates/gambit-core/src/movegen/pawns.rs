//! Pawn pushes, captures, promotions and en passant.

use crate::attacks::{bishop_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::chess_move::{Move, PromotionPiece};
use crate::piece::{Color, PieceKind};
use crate::square::{Rank, Square};

use super::Generator;

impl Generator<'_> {
    pub(super) fn pawn_moves(&mut self) {
        let position = self.position;
        let empty = !position.occupied();
        let (forward, start_rank, last_rank) = match self.us {
            Color::White => (1, Rank::R2, Rank::R8),
            Color::Black => (-1, Rank::R7, Rank::R1),
        };

        for from in position.colored(PieceKind::Pawn, self.us) {
            let allowed = self.allowed_from(from);

            if let Some(one) = from.offset(forward, 0).filter(|&sq| empty.contains(sq)) {
                if allowed.contains(one) {
                    self.push_pawn_move(from, one, false, last_rank);
                }
                if from.rank() == start_rank
                    && let Some(two) = one.offset(forward, 0)
                    && empty.contains(two)
                    && allowed.contains(two)
                {
                    self.moves.push(Move::normal(from, two, false));
                }
            }

            let captures = pawn_attacks(self.us, from) & position.side(self.them) & allowed;
            for to in captures {
                self.push_pawn_move(from, to, true, last_rank);
            }
        }

        if let Some(target) = position.en_passant() {
            self.en_passant_moves(target);
        }
    }

    fn push_pawn_move(&mut self, from: Square, to: Square, capture: bool, last_rank: Rank) {
        if to.rank() == last_rank {
            for piece in PromotionPiece::ALL {
                self.moves.push(Move::promote(from, to, piece, capture));
            }
        } else {
            self.moves.push(Move::normal(from, to, capture));
        }
    }

    /// En passant removes two pawns from one rank at once, so pins alone do
    /// not describe its legality. Each candidate is checked by recomputing
    /// slider attacks on the king with the board as it would stand afterwards.
    fn en_passant_moves(&mut self, target: Square) {
        let position = self.position;
        let Some(victim) = target.offset(if self.us == Color::White { -1 } else { 1 }, 0) else {
            return;
        };
        if !self.check_mask.contains(target) && !self.check_mask.contains(victim) {
            return;
        }

        let queens = position.colored(PieceKind::Queen, self.them);
        let orthogonal = position.colored(PieceKind::Rook, self.them) | queens;
        let diagonal = position.colored(PieceKind::Bishop, self.them) | queens;

        let capturers = pawn_attacks(self.them, target) & position.colored(PieceKind::Pawn, self.us);
        for from in capturers {
            let after = (position.occupied() ^ from.bitboard() ^ victim.bitboard()) | target.bitboard();
            let exposed = (rook_attacks(self.king, after) & orthogonal)
                | (bishop_attacks(self.king, after) & diagonal);
            if exposed == Bitboard::EMPTY {
                self.moves.push(Move::en_passant(from, target));
            }
        }
    }
}
