//! Integration tests for move selection through the public API.
//!
//! Verifies that the searcher always answers with a legal move, finds
//! forced mates, respects its budgets, and refuses finished positions.

use std::time::Duration;

use gambit_core::{GameState, GameStatus, Position, generate_legal_moves};
use gambit_engine::{SearchError, SearchLimits, Searcher, spawn_search};

const SCHOLARS_MATE_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

const SICILIAN_FEN: &str = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";

const FOOLS_MATE_FEN: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

#[test]
fn start_position_gets_a_legal_move() {
    let position = Position::starting();
    let result = Searcher::new().choose_move(&position, &SearchLimits::default()).unwrap();
    assert!(generate_legal_moves(&position).contains(result.best_move));
    assert_eq!(result.depth, 4);
}

#[test]
fn scholars_mate_in_one() {
    let position: Position = SCHOLARS_MATE_FEN.parse().unwrap();
    let result = Searcher::new().choose_move(&position, &SearchLimits::depth(3)).unwrap();
    assert_eq!(result.best_move.to_string(), "h5f7", "should find Qxf7#");
    assert!(result.is_mate(), "score {} should indicate mate", result.score);
}

#[test]
fn mated_position_has_no_move() {
    let position: Position = FOOLS_MATE_FEN.parse().unwrap();
    let err = Searcher::new().choose_move(&position, &SearchLimits::default()).unwrap_err();
    assert!(matches!(err, SearchError::NoLegalMove { .. }));
    assert!(err.to_string().starts_with("no legal move"));
}

#[test]
fn time_budget_is_respected() {
    let position: Position = SICILIAN_FEN.parse().unwrap();
    let limits = SearchLimits {
        max_depth: 64,
        max_nodes: None,
        move_time: Some(Duration::from_millis(50)),
    };
    let result = Searcher::new().choose_move(&position, &limits).unwrap();
    assert!(generate_legal_moves(&position).contains(result.best_move));
    assert!(result.depth < 64);
}

#[test]
fn searcher_is_reusable_after_budget_stop() {
    let position = Position::starting();
    let searcher = Searcher::new();
    let limits = SearchLimits {
        max_depth: 8,
        max_nodes: Some(100),
        move_time: None,
    };
    searcher.choose_move(&position, &limits).unwrap();
    let result = searcher.choose_move(&position, &SearchLimits::depth(2)).unwrap();
    assert_eq!(result.depth, 2);
}

#[test]
fn worker_thread_returns_result() {
    let position: Position = SCHOLARS_MATE_FEN.parse().unwrap();
    let result = spawn_search(position, SearchLimits::depth(2)).wait().unwrap();
    assert_eq!(result.best_move.to_string(), "h5f7");
}

#[test]
fn search_moves_drive_a_game() {
    let mut game = GameState::new();
    let searcher = Searcher::new();
    for _ in 0..6 {
        let result = searcher.choose_move(game.current(), &SearchLimits::depth(2)).unwrap();
        assert_eq!(game.submit_move(result.best_move).unwrap(), GameStatus::InProgress);
    }
    assert_eq!(game.ply_count(), 6);
}
