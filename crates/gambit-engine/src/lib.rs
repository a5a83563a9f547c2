//! Move selection for gambit: material evaluation and a budgeted
//! alpha-beta search that runs on the caller's thread or a worker.

pub mod eval;
pub mod search;
pub mod worker;

mod error;

pub use error::SearchError;
pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::{SearchLimits, SearchResult, Searcher};
pub use worker::{SearchHandle, spawn_search};
