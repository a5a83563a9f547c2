//! Applying moves: copy-make on immutable positions.

use crate::castling::Castling;
use crate::chess_move::{Move, MoveKind, PromotionPiece};
use crate::error::MoveError;
use crate::movegen::generate_legal_moves;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

impl Position {
    /// Return the position after `mv`, leaving `self` untouched.
    ///
    /// # Errors
    ///
    /// [`MoveError::Illegal`] unless `mv` is one of [`generate_legal_moves`]`(self)`.
    pub fn apply(&self, mv: Move) -> Result<Position, MoveError> {
        if !generate_legal_moves(self).contains(mv) {
            return Err(MoveError::Illegal { mv: mv.to_string() });
        }
        Ok(self.play(mv))
    }

    /// Apply a move already known to be legal here, skipping the legality check.
    ///
    /// Intended for loops over [`generate_legal_moves`] such as perft and
    /// search. A move that is not legal here yields an invalid position (it
    /// may capture a king), and debug builds panic on it. Use
    /// [`Position::apply`] for moves from untrusted input.
    pub fn play(&self, mv: Move) -> Position {
        debug_assert!(
            generate_legal_moves(self).contains(mv),
            "{mv} is not legal in {self}"
        );
        let mut next = *self;
        let us = self.side_to_move();
        let them = !us;
        let from = mv.source();
        let to = mv.dest();

        let Some(kind) = self.kind_at(from) else {
            return next;
        };
        let mover = Piece::new(kind, us);

        next.set_en_passant(None);
        next.set_castling(self.castling().after_move(from, to));

        let mut reset_clock = kind == PieceKind::Pawn;
        match mv.kind() {
            MoveKind::Normal | MoveKind::Promotion => {
                if let Some(captured) = self.piece_at(to) {
                    next.toggle(to, captured);
                    reset_clock = true;
                }
                next.toggle(from, mover);
                let placed = match mv.promotion() {
                    Some(piece) => Piece::new(piece.kind(), us),
                    None => mover,
                };
                next.toggle(to, placed);

                if kind == PieceKind::Pawn && from.index().abs_diff(to.index()) == 16 {
                    next.set_en_passant(Square::from_index(((from.index() + to.index()) / 2) as u8));
                }
            }
            MoveKind::EnPassant => {
                let pawn = Piece::new(PieceKind::Pawn, us);
                next.toggle(from, pawn);
                next.toggle(to, pawn);
                if let Some(victim) = Square::from_coords(from.rank() as u8, to.file() as u8) {
                    next.toggle(victim, Piece::new(PieceKind::Pawn, them));
                }
            }
            MoveKind::Castle => {
                next.toggle(from, mover);
                next.toggle(to, mover);
                if let Some(castling) = Castling::from_king_move(from, to) {
                    let rook = Piece::new(PieceKind::Rook, us);
                    next.toggle(castling.rook_from(), rook);
                    next.toggle(castling.rook_to(), rook);
                }
            }
        }

        let halfmove_clock = if reset_clock {
            0
        } else {
            self.halfmove_clock().saturating_add(1)
        };
        let fullmove_number = match us {
            Color::White => self.fullmove_number(),
            Color::Black => self.fullmove_number().saturating_add(1),
        };
        next.set_counters(halfmove_clock, fullmove_number);
        next.set_side_to_move(them);
        next
    }

    /// Find the legal move from `from` to `to`, as a board GUI would after two clicks.
    ///
    /// A pawn reaching the last rank needs `promotion`; without it the request
    /// is refused rather than assuming a queen.
    ///
    /// # Errors
    ///
    /// [`MoveError::Illegal`] when no legal move matches.
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<PromotionPiece>) -> Result<Move, MoveError> {
        generate_legal_moves(self)
            .iter()
            .copied()
            .find(|mv| mv.source() == from && mv.dest() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveError::Illegal {
                mv: match promotion {
                    Some(piece) => format!("{from}{to}{}", piece.letter()),
                    None => format!("{from}{to}"),
                },
            })
    }

    /// Resolve coordinate notation (`e2e4`, `e7e8q`) to a legal move.
    ///
    /// # Errors
    ///
    /// [`MoveError::InvalidNotation`] for malformed text, [`MoveError::Illegal`]
    /// when the text is well formed but names no legal move.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        let invalid = || MoveError::InvalidNotation {
            text: text.to_string(),
        };
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&text[0..2]).ok_or_else(invalid)?;
        let to = Square::from_algebraic(&text[2..4]).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            Some(c) => Some(PromotionPiece::from_letter(c).ok_or_else(invalid)?),
            None => None,
        };
        self.find_move(from, to, promotion)
    }
}

#[cfg(test)]
mod tests {
    use crate::castling::CastlingRights;
    use crate::chess_move::PromotionPiece;
    use crate::error::MoveError;
    use crate::movegen::generate_legal_moves;
    use crate::piece::{Color, Piece, PieceKind};
    use crate::position::Position;
    use crate::square::Square;
    use crate::zobrist;

    fn position(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    fn after(fen: &str, mv: &str) -> Position {
        let before = position(fen);
        let mv = before.parse_move(mv).unwrap();
        before.apply(mv).unwrap()
    }

    #[test]
    fn double_push_sets_en_passant() {
        let next = after(crate::STARTING_FEN, "e2e4");
        assert_eq!(next.en_passant(), Some(Square::E3));
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn en_passant_cleared_next_ply() {
        let next = after("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1", "g8f6");
        assert_eq!(next.en_passant(), None);
        assert_eq!(next.fullmove_number(), 2);
        assert_eq!(next.halfmove_clock(), 1);
    }

    #[test]
    fn en_passant_removes_victim() {
        let next = after("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6");
        assert_eq!(next.piece_at(Square::D5), None);
        assert_eq!(next.piece_at(Square::D6), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn castling_moves_rook_and_drops_rights() {
        let next = after("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10", "e1g1");
        assert_eq!(next.piece_at(Square::G1), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(next.piece_at(Square::F1), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(next.piece_at(Square::H1), None);
        assert_eq!(next.castling().to_string(), "kq");
        assert_eq!(next.halfmove_clock(), 4);

        let next = after("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10", "e8c8");
        assert_eq!(next.piece_at(Square::D8), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(next.castling().to_string(), "KQ");
        assert_eq!(next.fullmove_number(), 11);
    }

    #[test]
    fn capturing_rook_on_home_square_drops_right() {
        let next = after("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "a1a8");
        assert_eq!(next.castling().to_string(), "Kk");
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn rights_never_come_back() {
        let next = after("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1d1");
        let back = after(&next.to_string(), "e8d8");
        let again = after(&back.to_string(), "d1e1");
        assert_eq!(again.castling(), CastlingRights::NONE);
    }

    #[test]
    fn promotion_requires_choice() {
        let before = position("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(
            before.find_move(Square::A7, Square::A8, None),
            Err(MoveError::Illegal { .. })
        ));
        let mv = before.find_move(Square::A7, Square::A8, Some(PromotionPiece::Knight)).unwrap();
        let next = before.apply(mv).unwrap();
        assert_eq!(next.piece_at(Square::A8), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert_eq!(next.colored(PieceKind::Pawn, Color::White).count(), 0);
    }

    #[test]
    fn blocked_queen_move_is_illegal() {
        let start = Position::starting();
        assert_eq!(
            start.parse_move("d1h5"),
            Err(MoveError::Illegal { mv: "d1h5".into() })
        );
    }

    #[test]
    fn malformed_notation() {
        let start = Position::starting();
        for text in ["", "e2", "e2e", "e2e4qq", "z2e4", "e2e9", "e7e8x", "é2e4"] {
            assert!(
                matches!(start.parse_move(text), Err(MoveError::InvalidNotation { .. })),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn move_from_other_position_is_rejected() {
        let start = Position::starting();
        let after_e4 = after(crate::STARTING_FEN, "e2e4");
        let e2e4 = start.parse_move("e2e4").unwrap();
        assert!(matches!(after_e4.apply(e2e4), Err(MoveError::Illegal { .. })));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not legal")]
    fn play_rejects_foreign_move_in_debug() {
        let donor = position("3qk3/8/8/8/8/8/8/K7 b - - 0 1");
        let target = position("3qk3/4p3/8/8/7K/8/8/8 b - - 0 1");
        let king_capture = donor.parse_move("d8h4").unwrap();
        let _ = target.play(king_capture);
    }

    #[test]
    fn apply_does_not_touch_original() {
        let start = Position::starting();
        let copy = start;
        let _ = start.apply(start.parse_move("g1f3").unwrap()).unwrap();
        assert_eq!(start, copy);
    }

    #[test]
    fn incremental_hash_matches_scratch() {
        let fens = [
            crate::STARTING_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            let root = position(fen);
            for mv in &generate_legal_moves(&root) {
                let child = root.play(*mv);
                assert_eq!(child.hash(), zobrist::hash_from_scratch(&child), "{fen} {mv}");
                for reply in &generate_legal_moves(&child) {
                    let grandchild = child.play(*reply);
                    assert_eq!(grandchild.hash(), zobrist::hash_from_scratch(&grandchild), "{fen} {mv} {reply}");
                }
            }
        }
    }
}
