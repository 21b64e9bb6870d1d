use std::{cmp::Ordering, collections::BinaryHeap, rc::Rc};

use crate::state::State;

/// An open list: the states waiting to be expanded.
pub trait Frontier: Default {
    fn push(&mut self, state: Rc<State>);
    fn pop(&mut self) -> Option<Rc<State>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last-in-first-out open list for the depth-first strategies.
#[derive(Debug, Default)]
pub struct Stack(Vec<Rc<State>>);

impl Frontier for Stack {
    fn push(&mut self, state: Rc<State>) {
        self.0.push(state);
    }

    fn pop(&mut self) -> Option<Rc<State>> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Min-priority open list for A*.
///
/// Equal priorities favour the deeper state (closer to a goal by the
/// heuristic's own estimate), then the one queued first.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Queued>,
    pushed: u64,
}

#[derive(Debug)]
struct Queued {
    priority: usize,
    depth: usize,
    seq: u64,
    state: Rc<State>,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so lower priority and earlier seq compare greater.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.depth.cmp(&other.depth))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl Frontier for PriorityQueue {
    fn push(&mut self, state: Rc<State>) {
        self.pushed += 1;
        self.heap.push(Queued {
            priority: state.priority(),
            depth: state.depth(),
            seq: self.pushed,
            state,
        });
    }

    fn pop(&mut self) -> Option<Rc<State>> {
        self.heap.pop().map(|queued| queued.state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        puzzle::{Board, Move},
        state::successors,
    };

    fn root() -> Rc<State> {
        Rc::new(State::new_root(vec![1, 2, 3, 4, 0, 5, 6, 7, 8], 3).unwrap())
    }

    #[test]
    fn test_stack_is_lifo() {
        let root = root();
        let mut stack = Stack::default();
        let children: Vec<Rc<State>> = successors(&root).map(Rc::new).collect();
        for child in &children {
            stack.push(Rc::clone(child));
        }
        assert_eq!(stack.len(), 4);
        assert_eq!(stack.pop().unwrap().last_move(), Some(Move::Left));
        assert_eq!(stack.pop().unwrap().last_move(), Some(Move::Right));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_priority_queue_pops_lowest_priority() {
        let mut queue = PriorityQueue::default();
        let root = root();
        for child in successors(&root) {
            queue.push(Rc::new(child));
        }
        queue.push(Rc::new(State::from_board(Board::solved(3).unwrap())));

        let mut last = 0;
        let mut popped = 0;
        while let Some(state) = queue.pop() {
            assert!(state.priority() >= last);
            last = state.priority();
            popped += 1;
        }
        assert_eq!(popped, 5);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_priority_ties_prefer_deeper_then_older() {
        // One slide from the goal: priority 0 + 1. Its solving child is 1 + 0.
        let near = Rc::new(State::new_root(vec![1, 0, 2, 3, 4, 5, 6, 7, 8], 3).unwrap());
        let twin = Rc::new(State::new_root(vec![1, 0, 2, 3, 4, 5, 6, 7, 8], 3).unwrap());
        let solved = Rc::new(State::new_successor(
            near.apply_move(Move::Left).unwrap(),
            Move::Left,
            Rc::clone(&near),
        ));
        assert_eq!(near.priority(), solved.priority());

        let mut queue = PriorityQueue::default();
        queue.push(Rc::clone(&near));
        queue.push(Rc::clone(&twin));
        queue.push(Rc::clone(&solved));
        assert!(Rc::ptr_eq(&queue.pop().unwrap(), &solved));
        assert!(Rc::ptr_eq(&queue.pop().unwrap(), &near));
        assert!(Rc::ptr_eq(&queue.pop().unwrap(), &twin));
    }
}
