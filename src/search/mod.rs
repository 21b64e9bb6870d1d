//! The search engine: one driver loop shared by every strategy.
//!
//! A strategy is a [`Discipline`]: an open list plus a deduplication policy.
//! The driver pops a state, tests it against the goal, and otherwise expands
//! it through the move generator, letting the discipline decide which
//! children are queued. All bookkeeping lives in the call, so independent
//! searches never share state.

mod frontier;
mod strategy;
mod visited;

pub use frontier::{Frontier, PriorityQueue, Stack};
pub use strategy::{AStar, DepthFirst, DepthLimited, Discipline};
pub use visited::VisitedSet;

use log::{debug, info, warn};
use std::{
    fmt,
    rc::Rc,
    time::{Duration, Instant},
};
use thiserror::Error;

use crate::{
    puzzle::{Board, Move},
    state::{reconstruct_path, successors, State},
};

/// Expansions between progress log lines.
const PROGRESS_INTERVAL: usize = 100_000;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DepthFirst,
    DepthLimited { limit: usize },
    AStar,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::DepthFirst => write!(f, "DFS"),
            Strategy::DepthLimited { limit } => write!(f, "DLS (limit {limit})"),
            Strategy::AStar => write!(f, "A*"),
        }
    }
}

/// Caps on a single search. Both are off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States taken off the open list and expanded.
    pub expanded: usize,
    /// Children produced by the move generator, admitted or not.
    pub generated: usize,
    /// Largest open list size observed.
    pub peak_frontier: usize,
    pub elapsed: Duration,
}

/// Every way a search can end without a solution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("the puzzle cannot be solved from this arrangement")]
    Unsolvable,
    #[error("open list exhausted after expanding {} states", .stats.expanded)]
    Exhausted { stats: SearchStats },
    #[error("no solution within {limit} moves")]
    LimitExceeded { limit: usize, stats: SearchStats },
    #[error("expansion budget of {budget} states used up")]
    ExpansionBudgetExceeded { budget: usize, stats: SearchStats },
    #[error("time limit of {limit:?} exceeded")]
    TimeLimitExceeded { limit: Duration, stats: SearchStats },
}

impl SearchError {
    /// Counters at the moment the search gave up; `None` if it never ran.
    pub fn stats(&self) -> Option<&SearchStats> {
        match self {
            SearchError::Unsolvable => None,
            SearchError::Exhausted { stats }
            | SearchError::LimitExceeded { stats, .. }
            | SearchError::ExpansionBudgetExceeded { stats, .. }
            | SearchError::TimeLimitExceeded { stats, .. } => Some(stats),
        }
    }
}

/// A path from the initial board to the goal.
#[derive(Debug, Clone)]
pub struct Solution {
    path: Vec<Rc<State>>,
    stats: SearchStats,
}

impl Solution {
    fn from_goal(goal: &Rc<State>, stats: SearchStats) -> Self {
        Self {
            path: reconstruct_path(goal),
            stats,
        }
    }

    /// Root first, goal last.
    pub fn states(&self) -> &[Rc<State>] {
        &self.path
    }

    pub fn boards(&self) -> impl Iterator<Item = &Board> + '_ {
        self.path.iter().map(|state| state.board())
    }

    pub fn moves(&self) -> Vec<Move> {
        self.path.iter().filter_map(|state| state.last_move()).collect()
    }

    pub fn move_count(&self) -> usize {
        self.path.len() - 1
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Runs one search from `root` under `discipline`.
pub fn search<D: Discipline>(
    discipline: &D,
    root: State,
    limits: &SearchLimits,
) -> Result<Solution, SearchError> {
    let started = Instant::now();
    let mut visited = VisitedSet::default();
    let mut frontier = D::Frontier::default();
    let mut stats = SearchStats::default();
    let mut truncated = false;

    frontier.push(Rc::new(root));
    stats.peak_frontier = 1;

    while let Some(state) = frontier.pop() {
        if !discipline.settle(&mut visited, &state) {
            continue;
        }

        if state.is_goal() {
            stats.elapsed = started.elapsed();
            debug!(
                "Goal reached at depth {} after {} expansions",
                state.depth(),
                stats.expanded
            );
            return Ok(Solution::from_goal(&state, stats));
        }

        if let Some(limit) = discipline.depth_limit() {
            if state.depth() >= limit {
                truncated = true;
                continue;
            }
        }

        if let Some(budget) = limits.max_expansions {
            if stats.expanded >= budget {
                stats.elapsed = started.elapsed();
                return Err(SearchError::ExpansionBudgetExceeded { budget, stats });
            }
        }
        if let Some(limit) = limits.time_limit {
            let elapsed = started.elapsed();
            if elapsed > limit {
                stats.elapsed = elapsed;
                return Err(SearchError::TimeLimitExceeded { limit, stats });
            }
        }

        stats.expanded += 1;
        for child in successors(&state) {
            stats.generated += 1;
            if discipline.admit(&mut visited, &child) {
                frontier.push(Rc::new(child));
            }
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());

        if stats.expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                "{} expanded, {} queued, {} seen, depth {}",
                stats.expanded,
                frontier.len(),
                visited.len(),
                state.depth()
            );
        }
    }

    stats.elapsed = started.elapsed();
    match discipline.depth_limit() {
        Some(limit) if truncated => Err(SearchError::LimitExceeded { limit, stats }),
        _ => Err(SearchError::Exhausted { stats }),
    }
}

/// Configured entry point: picks the strategy, applies the caps and the
/// optional solvability gate.
#[derive(Debug, Clone)]
pub struct Solver {
    strategy: Strategy,
    limits: SearchLimits,
    require_solvable: bool,
}

impl Solver {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            limits: SearchLimits::default(),
            require_solvable: false,
        }
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.limits.max_expansions = Some(max_expansions);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.limits.time_limit = Some(time_limit);
        self
    }

    /// When set, an arrangement the parity check rejects fails with
    /// [`SearchError::Unsolvable`] instead of being searched anyway.
    #[must_use]
    pub fn require_solvable(mut self, require_solvable: bool) -> Self {
        self.require_solvable = require_solvable;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn solve(&self, board: Board) -> Result<Solution, SearchError> {
        if !board.is_solvable() {
            if self.require_solvable {
                return Err(SearchError::Unsolvable);
            }
            warn!("Parity check says this board is unsolvable; searching anyway");
        }

        debug!(
            "Starting {} on a {size}x{size} board",
            self.strategy,
            size = board.size()
        );
        let root = State::from_board(board);
        let result = match self.strategy {
            Strategy::DepthFirst => search(&DepthFirst, root, &self.limits),
            Strategy::DepthLimited { limit } => {
                search(&DepthLimited { limit }, root, &self.limits)
            }
            Strategy::AStar => search(&AStar, root, &self.limits),
        };

        match &result {
            Ok(solution) => info!(
                "{} found a {}-move solution ({} states expanded)",
                self.strategy,
                solution.move_count(),
                solution.stats().expanded
            ),
            Err(e) => info!("{} gave up: {}", self.strategy, e),
        }
        result
    }
}
