use std::rc::Rc;

use crate::puzzle::{Board, Fingerprint, Move, PuzzleError};

/// A node of the search tree: a board plus how it was reached.
///
/// States are never mutated once built. Each one holds a shared link to the
/// state it was produced from, so the open list, the solution path and any
/// number of descendants can keep an ancestor alive at the same time.
#[derive(Debug)]
pub struct State {
    board: Board,
    parent: Option<Rc<State>>,
    last_move: Option<Move>,
    depth: usize,
    priority: usize,
}

impl State {
    /// Validates `tiles` as a `dimension`×`dimension` permutation and wraps it
    /// as the root of a search.
    pub fn new_root(tiles: Vec<u32>, dimension: usize) -> Result<Self, PuzzleError> {
        Board::from_flat(dimension, tiles).map(Self::from_board)
    }

    pub fn from_board(board: Board) -> Self {
        let priority = board.heuristic();
        Self {
            board,
            parent: None,
            last_move: None,
            depth: 0,
            priority,
        }
    }

    /// The state `movement` produced from `parent`. The caller has already
    /// applied the move to get `board`.
    pub fn new_successor(board: Board, movement: Move, parent: Rc<State>) -> Self {
        let depth = parent.depth + 1;
        let priority = depth + board.heuristic();
        Self {
            board,
            parent: Some(parent),
            last_move: Some(movement),
            depth,
            priority,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<&Rc<State>> {
        self.parent.as_ref()
    }

    /// The move that produced this state; `None` for the root.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `depth + heuristic`, fixed at construction.
    pub fn priority(&self) -> usize {
        self.priority
    }

    pub fn locate(&self, value: u32) -> Option<(usize, usize)> {
        self.board.locate(value)
    }

    pub fn heuristic(&self) -> usize {
        self.priority - self.depth
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_goal()
    }

    pub fn apply_move(&self, movement: Move) -> Option<Board> {
        self.board.apply_move(movement)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.board.fingerprint()
    }
}

// Deep searches build ancestor chains tens of thousands of links long.
// Unlinking them one at a time keeps the drop off the call stack.
impl Drop for State {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Rc::try_unwrap(parent) {
                Ok(mut state) => next = state.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Every state one legal slide away from `state`, in [`Move::ALL`] order.
///
/// No deduplication happens here; that is up to the search strategy.
pub fn successors(state: &Rc<State>) -> impl Iterator<Item = State> + '_ {
    Move::ALL.into_iter().filter_map(move |movement| {
        state
            .apply_move(movement)
            .map(|board| State::new_successor(board, movement, Rc::clone(state)))
    })
}

/// The chain of states from the root down to `goal`, both inclusive.
pub fn reconstruct_path(goal: &Rc<State>) -> Vec<Rc<State>> {
    let mut path = vec![Rc::clone(goal)];
    let mut current = goal;
    while let Some(parent) = current.parent() {
        path.push(Rc::clone(parent));
        current = parent;
    }
    path.reverse();
    path
}
