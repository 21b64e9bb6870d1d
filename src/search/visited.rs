use fxhash::FxHashMap;

use crate::puzzle::Fingerprint;

/// Best known cost per fingerprint.
///
/// Depth-first strategies only care about membership and store a placeholder
/// cost; A* stores the priority each configuration was last queued or settled
/// at.
#[derive(Debug, Default)]
pub struct VisitedSet {
    best: FxHashMap<Fingerprint, usize>,
}

impl VisitedSet {
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.best.contains_key(fingerprint)
    }

    /// Inserts or overwrites, returning the previous cost.
    pub fn record(&mut self, fingerprint: Fingerprint, cost: usize) -> Option<usize> {
        self.best.insert(fingerprint, cost)
    }

    pub fn best_cost(&self, fingerprint: &Fingerprint) -> Option<usize> {
        self.best.get(fingerprint).copied()
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Board, Move};

    #[test]
    fn test_record_and_overwrite() {
        let board = Board::solved(3).unwrap();
        let other = board.apply_move(Move::Down).unwrap();
        let mut visited = VisitedSet::default();
        assert!(visited.is_empty());

        assert_eq!(visited.record(board.fingerprint(), 7), None);
        assert!(visited.contains(&board.fingerprint()));
        assert!(!visited.contains(&other.fingerprint()));
        assert_eq!(visited.best_cost(&board.fingerprint()), Some(7));

        assert_eq!(visited.record(board.fingerprint(), 5), Some(7));
        assert_eq!(visited.best_cost(&board.fingerprint()), Some(5));
        assert_eq!(visited.best_cost(&other.fingerprint()), None);
        assert_eq!(visited.len(), 1);
    }
}
