//! Search errors.

/// Errors returned by [`Searcher::choose_move`](crate::Searcher::choose_move)
/// and [`SearchHandle::wait`](crate::SearchHandle::wait).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The side to move is checkmated or stalemated.
    #[error("no legal move in position {fen}")]
    NoLegalMove {
        /// The position that was searched.
        fen: String,
    },

    /// The worker thread ended without reporting a result.
    #[error("search worker exited without a result")]
    WorkerLost,
}
