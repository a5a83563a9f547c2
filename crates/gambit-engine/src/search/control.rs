//! Search control: stop flag plus node and time budgets.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::SearchLimits;

/// Decides when a running search must abort.
///
/// The stop flag is shared with whoever started the search and may be
/// raised from another thread. The clock is only read every 1024 nodes.
#[derive(Debug)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    max_nodes: Option<u64>,
    move_time: Option<Duration>,
}

impl SearchControl {
    /// Start the clock now, with the budgets from `limits`.
    pub fn new(stopped: Arc<AtomicBool>, limits: &SearchLimits) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            max_nodes: limits.max_nodes,
            move_time: limits.move_time,
        }
    }

    /// No budget; only the stop flag ends the search.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            max_nodes: None,
            move_time: None,
        }
    }

    /// Whether the search should abort after visiting `nodes` nodes.
    ///
    /// Once a budget runs out the stop flag is raised, so later calls
    /// return without looking at the clock again.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        let over_nodes = self.max_nodes.is_some_and(|max| nodes >= max);
        let over_time = nodes & 1023 == 0 && self.move_time.is_some_and(|time| self.elapsed() >= time);
        if over_nodes || over_time {
            self.stopped.store(true, Ordering::Release);
            return true;
        }
        false
    }

    /// Time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}
