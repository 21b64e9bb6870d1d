use super::{
    frontier::{Frontier, PriorityQueue, Stack},
    visited::VisitedSet,
};
use crate::state::State;

/// Cost stored for configurations seen by the depth-first strategies, which
/// only track membership.
const UNSCORED: usize = 0;

/// What sets one search strategy apart from another: its open list, how it
/// marks popped states, which children it lets through, and whether it
/// stops expanding at some depth.
pub trait Discipline {
    type Frontier: Frontier;

    /// Called for every state popped from the open list. Returning `false`
    /// discards the state without goal test or expansion.
    fn settle(&self, visited: &mut VisitedSet, state: &State) -> bool;

    /// Decides whether a freshly generated child joins the open list,
    /// updating `visited` if it does.
    fn admit(&self, visited: &mut VisitedSet, child: &State) -> bool;

    /// States at or beyond this depth are never expanded.
    fn depth_limit(&self) -> Option<usize> {
        None
    }
}

/// Unbounded depth-first search. Complete over the finite state space, but
/// the paths it finds are rarely short.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl Discipline for DepthFirst {
    type Frontier = Stack;

    fn settle(&self, visited: &mut VisitedSet, state: &State) -> bool {
        visited.record(state.fingerprint(), UNSCORED);
        true
    }

    fn admit(&self, visited: &mut VisitedSet, child: &State) -> bool {
        let fingerprint = child.fingerprint();
        if visited.contains(&fingerprint) {
            return false;
        }
        visited.record(fingerprint, UNSCORED);
        true
    }
}

/// Depth-first search that refuses to expand states at `limit` moves deep.
#[derive(Debug, Clone, Copy)]
pub struct DepthLimited {
    pub limit: usize,
}

impl Discipline for DepthLimited {
    type Frontier = Stack;

    fn settle(&self, visited: &mut VisitedSet, state: &State) -> bool {
        DepthFirst.settle(visited, state)
    }

    fn admit(&self, visited: &mut VisitedSet, child: &State) -> bool {
        DepthFirst.admit(visited, child)
    }

    fn depth_limit(&self) -> Option<usize> {
        Some(self.limit)
    }
}

/// Best-first search on `depth + manhattan distance`.
///
/// A configuration already seen is queued again only when reached with a
/// strictly lower priority. The superseded queue entry is then skipped when
/// it surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl Discipline for AStar {
    type Frontier = PriorityQueue;

    fn settle(&self, visited: &mut VisitedSet, state: &State) -> bool {
        let fingerprint = state.fingerprint();
        if let Some(best) = visited.best_cost(&fingerprint) {
            if best < state.priority() {
                return false;
            }
        }
        visited.record(fingerprint, state.priority());
        true
    }

    fn admit(&self, visited: &mut VisitedSet, child: &State) -> bool {
        let fingerprint = child.fingerprint();
        match visited.best_cost(&fingerprint) {
            Some(best) if child.priority() >= best => false,
            _ => {
                visited.record(fingerprint, child.priority());
                true
            }
        }
    }
}
