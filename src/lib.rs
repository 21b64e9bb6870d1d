//! # Sliding-tile puzzle search
//!
//! Solves the N×N sliding-tile puzzle by state-space search. The goal places
//! tile `v` at row-major index `v`, with the blank (`0`) in the top-left
//! corner.
//!
//! ## Modules
//! - `puzzle`: the validated `Board`, blank moves, Manhattan heuristic and
//!   fingerprints.
//! - `solvability`: the inversion parity test.
//! - `state`: search-tree nodes with ancestor links, the move generator and
//!   path reconstruction.
//! - `search`: depth-first, depth-limited and A* search over one shared
//!   driver, configured through `Solver`.

pub mod puzzle;
pub mod search;
pub mod solvability;
pub mod state;

pub use puzzle::{Board, Fingerprint, Move, PuzzleError};
pub use search::{SearchError, SearchLimits, SearchStats, Solution, Solver, Strategy};
pub use state::State;
