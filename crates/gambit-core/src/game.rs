//! A game in progress: position history, legality gate, and result detection.

use std::fmt;

use tracing::{debug, warn};

use crate::bitboard::Bitboard;
use crate::chess_move::Move;
use crate::error::{FenError, MoveError};
use crate::movegen::{MoveList, generate_legal_moves};
use crate::piece::{Color, PieceKind};
use crate::position::Position;

/// Where a game stands. Everything except `InProgress` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    DrawByFiftyMove,
    DrawByRepetition,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawByFiftyMove
                | GameStatus::DrawByRepetition
                | GameStatus::DrawByInsufficientMaterial
        )
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("draw by stalemate"),
            GameStatus::DrawByFiftyMove => f.write_str("draw by the fifty-move rule"),
            GameStatus::DrawByRepetition => f.write_str("draw by threefold repetition"),
            GameStatus::DrawByInsufficientMaterial => f.write_str("draw by insufficient material"),
        }
    }
}

impl Position {
    /// Neither side can possibly deliver mate: no pawns, rooks or queens, and
    /// either at most one minor piece or only bishops all on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = self.pieces(PieceKind::Pawn) | self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Queen);
        if heavy.is_nonempty() {
            return false;
        }
        let knights = self.pieces(PieceKind::Knight);
        let bishops = self.pieces(PieceKind::Bishop);
        if (knights | bishops).count() <= 1 {
            return true;
        }
        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty() || (bishops & Bitboard::DARK_SQUARES).is_empty())
    }
}

/// One game session. The only mutable piece of state in the crate.
///
/// Moves are accepted only through [`GameState::submit_move`], which checks
/// legality against the cached move list and re-derives the status. A failed
/// submission leaves the game exactly as it was.
#[derive(Debug, Clone)]
pub struct GameState {
    history: Vec<Position>,
    moves: Vec<Move>,
    legal: MoveList,
    status: GameStatus,
    check: bool,
}

impl GameState {
    /// A new game from the standard starting position.
    pub fn new() -> GameState {
        GameState::from_position(Position::starting())
    }

    /// Start from an arbitrary position. Its status is evaluated immediately,
    /// so a mated or stalemated position yields a finished game.
    pub fn from_position(position: Position) -> GameState {
        let mut game = GameState {
            history: vec![position],
            moves: Vec::new(),
            legal: MoveList::new(),
            status: GameStatus::InProgress,
            check: false,
        };
        game.refresh();
        game
    }

    /// # Errors
    ///
    /// Any [`FenError`] from decoding `fen`.
    pub fn from_fen(fen: &str) -> Result<GameState, FenError> {
        Ok(GameState::from_position(fen.parse()?))
    }

    #[inline]
    pub fn current(&self) -> &Position {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    /// Every position of the game, oldest first; the last one is [`GameState::current`].
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Moves played so far, in order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Legal moves in the current position; empty once the game is over.
    pub fn legal_moves(&self) -> &[Move] {
        if self.status.is_over() { &[] } else { self.legal.as_slice() }
    }

    /// Number of moves played (plies), not counting the initial position.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Play `mv` and return the resulting status.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] once the game has ended, [`MoveError::Illegal`]
    /// if `mv` is not legal in the current position.
    pub fn submit_move(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            warn!(%mv, status = %self.status, "move rejected, game is over");
            return Err(MoveError::GameOver { status: self.status });
        }
        if !self.legal.contains(mv) {
            warn!(%mv, fen = %self.current(), "illegal move rejected");
            return Err(MoveError::Illegal { mv: mv.to_string() });
        }

        let next = self.current().play(mv);
        self.history.push(next);
        self.moves.push(mv);
        let before = self.status;
        self.refresh();
        debug!(%mv, ply = self.ply_count(), check = self.check, "move accepted");
        if self.status != before {
            debug!(status = %self.status, "game status changed");
        }
        Ok(self.status)
    }

    /// Play a move given in coordinate notation such as `e2e4` or `e7e8q`.
    ///
    /// # Errors
    ///
    /// As [`GameState::submit_move`], plus [`MoveError::InvalidNotation`] for malformed text.
    pub fn submit_notation(&mut self, text: &str) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            warn!(text, status = %self.status, "move rejected, game is over");
            return Err(MoveError::GameOver { status: self.status });
        }
        let mv = self.current().parse_move(text).inspect_err(|err| {
            warn!(text, error = %err, "move notation rejected");
        })?;
        self.submit_move(mv)
    }

    /// Recompute the cached move list, check flag and status for the current position.
    fn refresh(&mut self) {
        let current = *self.current();
        self.legal = generate_legal_moves(&current);
        self.check = current.in_check();
        self.status = if self.legal.is_empty() {
            if self.check {
                GameStatus::Checkmate {
                    winner: !current.side_to_move(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if current.halfmove_clock() >= 100 {
            GameStatus::DrawByFiftyMove
        } else if self.repetitions() >= 3 {
            GameStatus::DrawByRepetition
        } else if current.is_insufficient_material() {
            GameStatus::DrawByInsufficientMaterial
        } else {
            GameStatus::InProgress
        };
    }

    /// How many times the current position has occurred, itself included.
    ///
    /// Only positions since the last capture or pawn move can repeat it.
    fn repetitions(&self) -> usize {
        let current = self.current();
        let window = current.halfmove_clock() as usize + 1;
        self.history
            .iter()
            .rev()
            .take(window)
            .filter(|earlier| earlier.is_repetition_of(current))
            .count()
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{GameState, GameStatus};
    use crate::error::MoveError;
    use crate::piece::Color;
    use crate::position::Position;

    fn play(game: &mut GameState, moves: &[&str]) -> GameStatus {
        let mut status = game.status();
        for mv in moves {
            status = game.submit_notation(mv).unwrap();
        }
        status
    }

    #[test]
    fn fresh_game() {
        let game = GameState::new();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.history().len(), 1);
        assert!(!game.is_check());
    }

    #[test]
    fn fools_mate() {
        let mut game = GameState::new();
        let status = play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(status, GameStatus::Checkmate { winner: Color::Black });
        assert!(game.is_check());
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.ply_count(), 4);
    }

    #[test]
    fn finished_game_refuses_moves() {
        let mut game = GameState::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let snapshot = game.clone();
        assert_eq!(
            game.submit_notation("a2a3"),
            Err(MoveError::GameOver {
                status: GameStatus::Checkmate { winner: Color::Black }
            })
        );
        assert_eq!(game.history(), snapshot.history());
    }

    #[test]
    fn illegal_move_leaves_game_unchanged() {
        let mut game = GameState::new();
        play(&mut game, &["e2e4"]);
        let foreign = Position::starting().parse_move("d2d4").unwrap();
        assert!(matches!(game.submit_move(foreign), Err(MoveError::Illegal { .. })));
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.current().side_to_move(), Color::Black);
    }

    #[test]
    fn stalemate_at_construction() {
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(game.status().is_draw());
        assert!(!game.is_check());
    }

    #[test]
    fn checkmate_at_construction() {
        let game = GameState::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
    }

    #[test]
    fn fifty_move_rule() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/R7/4K3 w - - 99 80").unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(play(&mut game, &["a2b2"]), GameStatus::DrawByFiftyMove);
    }

    #[test]
    fn mate_beats_fifty_move_rule() {
        let mut game = GameState::from_fen("k7/8/1K6/8/8/8/8/7R w - - 99 80").unwrap();
        assert_eq!(play(&mut game, &["h1h8"]), GameStatus::Checkmate { winner: Color::White });
    }

    #[test]
    fn repetition_on_third_occurrence() {
        let mut game = GameState::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        assert_eq!(play(&mut game, &shuffle), GameStatus::InProgress);
        assert_eq!(play(&mut game, &shuffle[..3]), GameStatus::InProgress);
        assert_eq!(play(&mut game, &shuffle[3..]), GameStatus::DrawByRepetition);
    }

    #[test]
    fn insufficient_material_table() {
        let cases = [
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/4KN2 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/4KB2 w - - 0 1", true),
            ("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1", true),
            ("4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1", false),
            ("4kn2/8/8/8/8/8/8/4KB2 w - - 0 1", false),
            ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/4K2R w - - 0 1", false),
        ];
        for (fen, expected) in cases {
            let position: Position = fen.parse().unwrap();
            assert_eq!(position.is_insufficient_material(), expected, "{fen}");
        }
    }

    #[test]
    fn capture_into_bare_kings() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert_eq!(play(&mut game, &["e1e2"]), GameStatus::DrawByInsufficientMaterial);
    }
}
