//! Search algorithms and move ordering.

pub mod control;
pub mod negamax;
pub mod ordering;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gambit_core::{Move, Position, generate_legal_moves};
use tracing::{debug, trace};

use crate::SearchError;
use crate::evaluate;
use control::SearchControl;
use negamax::{MATE_THRESHOLD, SearchContext, search_root};
use ordering::order_moves;

/// Budget for one search. Any limit that runs out ends the search; the
/// deepest fully completed iteration supplies the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum iterative-deepening depth in plies.
    pub max_depth: u8,
    /// Stop after visiting this many nodes.
    pub max_nodes: Option<u64>,
    /// Stop after this much wall-clock time.
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// Depth limit only.
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_nodes: None,
            move_time: None,
        }
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found at the highest completed depth.
    pub best_move: Move,
    /// Score in centipawns from the mover's perspective.
    pub score: i32,
    /// Depth of the last completed iteration; 0 if none completed.
    pub depth: u8,
    /// Total nodes visited.
    pub nodes: u64,
}

impl SearchResult {
    /// Whether the score announces a forced mate for the mover.
    pub fn is_mate(&self) -> bool {
        self.score > MATE_THRESHOLD
    }
}

/// Iterative-deepening searcher.
///
/// Searches a snapshot of a position; it never sees or changes a game.
/// The stop flag can be shared with another thread to abort a search early.
#[derive(Debug)]
pub struct Searcher {
    stopped: Arc<AtomicBool>,
}

impl Searcher {
    pub fn new() -> Self {
        Self::with_stop_flag(Arc::new(AtomicBool::new(false)))
    }

    /// Use an externally owned stop flag.
    pub fn with_stop_flag(stopped: Arc<AtomicBool>) -> Self {
        Self { stopped }
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }

    /// Pick a move for the side to move within `limits`.
    ///
    /// The returned move is always legal in `position`. If the budget runs
    /// out before depth 1 completes, the best-ordered move is returned with
    /// the static evaluation and depth 0. Clears the stop flag before starting.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMove`] when the side to move is mated or stalemated.
    pub fn choose_move(&self, position: &Position, limits: &SearchLimits) -> Result<SearchResult, SearchError> {
        self.stopped.store(false, Ordering::Relaxed);
        let control = SearchControl::new(Arc::clone(&self.stopped), limits);
        self.search(position, limits.max_depth, &control)
    }

    /// Run iterative deepening under an explicit [`SearchControl`].
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMove`] when the side to move is mated or stalemated.
    pub fn search(
        &self,
        position: &Position,
        max_depth: u8,
        control: &SearchControl,
    ) -> Result<SearchResult, SearchError> {
        let mut moves = generate_legal_moves(position);
        if moves.is_empty() {
            return Err(SearchError::NoLegalMove {
                fen: position.to_string(),
            });
        }
        order_moves(position, moves.as_mut_slice());

        let mut result = SearchResult {
            best_move: moves[0],
            score: evaluate(position),
            depth: 0,
            nodes: 0,
        };
        let mut ctx = SearchContext { nodes: 0, control };

        for depth in 1..=max_depth.max(1) {
            let Some((best_move, score)) = search_root(position, &moves, depth, &mut ctx) else {
                trace!(depth, nodes = ctx.nodes, "iteration aborted");
                break;
            };
            result = SearchResult {
                best_move,
                score,
                depth,
                nodes: ctx.nodes,
            };
            debug!(depth, score, nodes = ctx.nodes, best = %best_move, "iteration complete");

            // Search the previous best first next time
            if let Some(index) = moves.iter().position(|&mv| mv == best_move) {
                moves.as_mut_slice()[..=index].rotate_right(1);
            }
            if result.is_mate() || control.stop_flag().load(Ordering::Relaxed) {
                break;
            }
        }

        result.nodes = ctx.nodes;
        Ok(result)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = SearchLimits::default();
        assert_eq!(limits.max_depth, 4);
        assert_eq!(limits.max_nodes, None);
        assert_eq!(limits.move_time, None);
        assert_eq!(SearchLimits::depth(2).max_depth, 2);
    }

    #[test]
    fn depth_1_returns_legal_move() {
        let position = Position::starting();
        let result = Searcher::new().choose_move(&position, &SearchLimits::depth(1)).unwrap();
        assert!(generate_legal_moves(&position).contains(result.best_move));
        assert_eq!(result.depth, 1);
        assert!(result.nodes >= 20);
    }

    #[test]
    fn finds_mate_in_one() {
        let position: Position = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
            .parse()
            .unwrap();
        let result = Searcher::new().choose_move(&position, &SearchLimits::depth(2)).unwrap();
        assert_eq!(result.best_move.to_string(), "h5f7");
        assert!(result.is_mate(), "score {} should indicate mate", result.score);
    }

    #[test]
    fn tiny_node_budget_still_answers() {
        let position = Position::starting();
        let limits = SearchLimits {
            max_depth: 10,
            max_nodes: Some(50),
            move_time: None,
        };
        let result = Searcher::new().choose_move(&position, &limits).unwrap();
        assert!(generate_legal_moves(&position).contains(result.best_move));
        assert!(result.depth < 10);
    }

    #[test]
    fn stalemate_has_no_move() {
        let position: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let err = Searcher::new().choose_move(&position, &SearchLimits::default()).unwrap_err();
        assert!(matches!(err, SearchError::NoLegalMove { .. }));
    }
}
