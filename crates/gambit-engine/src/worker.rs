//! Background search on a dedicated thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use gambit_core::Position;
use tracing::{debug, warn};

use crate::SearchError;
use crate::search::control::SearchControl;
use crate::search::{SearchLimits, SearchResult, Searcher};

/// A search running on its own thread.
///
/// The worker owns a copy of the position, so the caller's game can keep
/// being displayed (but should not accept moves for the searching side)
/// while the search runs.
#[derive(Debug)]
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    result: Receiver<Result<SearchResult, SearchError>>,
    thread: Option<JoinHandle<()>>,
}

/// Start searching `position` within `limits` on a new thread.
pub fn spawn_search(position: Position, limits: SearchLimits) -> SearchHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();

    let control = SearchControl::new(Arc::clone(&stop), &limits);
    let searcher = Searcher::with_stop_flag(Arc::clone(&stop));
    let thread = thread::spawn(move || {
        debug!(fen = %position, depth = limits.max_depth, "search worker started");
        let result = searcher.search(&position, limits.max_depth, &control);
        // The receiver may already be gone if the handle was dropped.
        let _ = tx.send(result);
    });

    SearchHandle {
        stop,
        result: rx,
        thread: Some(thread),
    }
}

impl SearchHandle {
    /// Ask the worker to finish. It still reports the deepest completed
    /// iteration, so [`SearchHandle::wait`] returns a usable move.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Whether the result is ready without blocking.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Block until the worker reports its result.
    ///
    /// # Errors
    ///
    /// The worker's own [`SearchError`], or [`SearchError::WorkerLost`] if
    /// the thread died without reporting.
    pub fn wait(mut self) -> Result<SearchResult, SearchError> {
        let received = self.result.recv();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            warn!("search worker panicked");
        }
        received.map_err(|_| SearchError::WorkerLost)?
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        // An abandoned search should not keep burning a core.
        self.stop();
    }
}
