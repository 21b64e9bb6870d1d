#![allow(dead_code)]

use fxhash::FxHashMap;
use slider_search::{Board, Fingerprint, Move};
use std::collections::VecDeque;

/// Shortest move count from the goal to every reachable board of `size`.
/// Moves are reversible, so this is also the distance back to the goal.
pub fn distances_from_goal(size: usize) -> FxHashMap<Fingerprint, usize> {
    let goal = Board::solved(size).unwrap();
    let mut distances = FxHashMap::default();
    distances.insert(goal.fingerprint(), 0);
    let mut queue = VecDeque::from([(goal, 0)]);

    while let Some((board, distance)) = queue.pop_front() {
        for mv in Move::ALL {
            if let Some(next) = board.apply_move(mv) {
                let fingerprint = next.fingerprint();
                if !distances.contains_key(&fingerprint) {
                    distances.insert(fingerprint, distance + 1);
                    queue.push_back((next, distance + 1));
                }
            }
        }
    }
    distances
}

pub fn board(text: &str) -> Board {
    text.parse().unwrap()
}
