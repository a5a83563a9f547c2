//! Negamax alpha-beta search with quiescence.

use gambit_core::{Move, Position, generate_legal_moves};

use crate::evaluate;
use crate::search::control::SearchControl;
use crate::search::ordering::{is_tactical, order_moves};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 30_000;

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 29_000;

/// Scores above this threshold indicate a forced mate.
pub const MATE_THRESHOLD: i32 = 28_000;

/// Quiescence stops extending past this many plies from the root.
pub const MAX_PLY: u8 = 64;

/// Mutable state shared by every node of one search.
pub(super) struct SearchContext<'a> {
    pub nodes: u64,
    pub control: &'a SearchControl,
}

impl SearchContext<'_> {
    /// Count a node and report whether the search must unwind.
    fn visit(&mut self) -> bool {
        self.nodes += 1;
        self.control.should_stop(self.nodes)
    }
}

/// Score of a position with no legal moves.
fn terminal_score(position: &Position, ply: u8) -> i32 {
    if position.in_check() {
        -(MATE_SCORE - ply as i32)
    } else {
        0
    }
}

/// Search every root move to `depth` and return the best one with its score.
///
/// `moves` is searched in the given order. Returns `None` when the search
/// was stopped before the iteration finished, since a partial result is not
/// comparable to a completed one.
pub(super) fn search_root(
    position: &Position,
    moves: &[Move],
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> Option<(Move, i32)> {
    let mut alpha = -INF;
    let mut best = None;

    for &mv in moves {
        let child = position.play(mv);
        let score = -negamax(&child, depth.saturating_sub(1), 1, -INF, -alpha, ctx);
        if ctx.control.should_stop(ctx.nodes) {
            return None;
        }
        if best.is_none() || score > alpha {
            alpha = score;
            best = Some((mv, score));
        }
    }
    best
}

/// Negamax alpha-beta search.
///
/// Returns the best score for the side to move, from its own perspective.
pub(super) fn negamax(
    position: &Position,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    if depth == 0 {
        return qsearch(position, ply, alpha, beta, ctx);
    }
    if ctx.visit() {
        return 0;
    }

    let mut moves = generate_legal_moves(position);
    if moves.is_empty() {
        return terminal_score(position, ply);
    }

    // Fifty-move rule and dead positions
    if position.halfmove_clock() >= 100 || position.is_insufficient_material() {
        return 0;
    }

    order_moves(position, moves.as_mut_slice());

    let mut best_score = -INF;
    for &mv in &moves {
        let child = position.play(mv);
        let score = -negamax(&child, depth - 1, ply + 1, -beta, -alpha, ctx);

        if score > best_score {
            best_score = score;
            if score > alpha {
                alpha = score;
            }
        }
        if alpha >= beta {
            break;
        }
    }
    best_score
}

/// Quiescence search: resolve captures and queen promotions before
/// trusting the static evaluation.
fn qsearch(position: &Position, ply: u8, mut alpha: i32, beta: i32, ctx: &mut SearchContext<'_>) -> i32 {
    if ctx.visit() {
        return 0;
    }

    let moves = generate_legal_moves(position);
    if moves.is_empty() {
        return terminal_score(position, ply);
    }
    if position.halfmove_clock() >= 100 || position.is_insufficient_material() {
        return 0;
    }

    let stand_pat = evaluate(position);
    if stand_pat >= beta || ply >= MAX_PLY {
        return stand_pat;
    }
    alpha = alpha.max(stand_pat);

    let mut tactical: Vec<Move> = moves.iter().copied().filter(|&mv| is_tactical(mv)).collect();
    order_moves(position, &mut tactical);

    for mv in tactical {
        let child = position.play(mv);
        let score = -qsearch(&child, ply + 1, -beta, -alpha, ctx);
        if score >= beta {
            return score;
        }
        alpha = alpha.max(score);
    }
    alpha
}
