mod common;

use common::board;
use slider_search::{Board, Move, SearchError, Solver, Strategy};

const SAMPLE: &str = "3,4,0; 1,7,6; 5,2,8";

fn all_strategies() -> [Strategy; 3] {
    [
        Strategy::DepthFirst,
        Strategy::DepthLimited { limit: 5000 },
        Strategy::AStar,
    ]
}

#[test_log::test]
fn test_sample_board_is_solved_by_a_star() {
    let initial = board(SAMPLE);
    assert!(initial.is_solvable());

    let solution = Solver::new(Strategy::AStar).solve(initial.clone()).unwrap();
    let replayed = initial.replay(&solution.moves()).unwrap();
    assert_eq!(replayed, board("0,1,2; 3,4,5; 6,7,8"));
    assert_eq!(solution.boards().last(), Some(&replayed));
}

#[test_log::test]
fn test_adjacent_swap_is_unsolvable() {
    assert!(!board("1,2,3; 4,5,6; 8,7,0").is_solvable());
}

#[test_log::test]
fn test_depth_limit_zero_on_unsolved_root() {
    for text in [SAMPLE, "1,0,2; 3,4,5; 6,7,8", "1,2,3; 4,5,6; 8,7,0"] {
        let err = Solver::new(Strategy::DepthLimited { limit: 0 })
            .solve(board(text))
            .unwrap_err();
        match err {
            SearchError::LimitExceeded { limit: 0, stats } => assert_eq!(stats.expanded, 0),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}

#[test_log::test]
fn test_goal_root_needs_no_moves() {
    for size in 1..=4 {
        for strategy in all_strategies() {
            let solution = Solver::new(strategy)
                .solve(Board::solved(size).unwrap())
                .unwrap();
            assert_eq!(solution.states().len(), 1);
            assert_eq!(solution.move_count(), 0);
            assert!(solution.moves().is_empty());
        }
    }
    let solution = Solver::new(Strategy::DepthLimited { limit: 0 })
        .solve(Board::solved(3).unwrap())
        .unwrap();
    assert_eq!(solution.move_count(), 0);
}

#[test_log::test]
fn test_every_strategy_replays_to_goal() {
    let initial = board(SAMPLE);
    for strategy in all_strategies() {
        let solution = Solver::new(strategy).solve(initial.clone()).unwrap();
        let moves = solution.moves();
        assert_eq!(moves.len(), solution.move_count());
        assert!(initial.replay(&moves).unwrap().is_goal());

        // Consecutive snapshots differ by exactly the recorded move.
        for (pair, mv) in solution.states().windows(2).zip(&moves) {
            assert_eq!(pair[0].board().apply_move(*mv).as_ref(), Some(pair[1].board()));
            assert_eq!(pair[1].depth(), pair[0].depth() + 1);
        }
    }
}

#[test_log::test]
fn test_depth_limited_respects_limit() {
    let initial = board(SAMPLE);
    // The Manhattan distance alone is 14.
    let err = Solver::new(Strategy::DepthLimited { limit: 3 })
        .solve(initial.clone())
        .unwrap_err();
    assert!(matches!(err, SearchError::LimitExceeded { limit: 3, .. }));

    let solution = Solver::new(Strategy::DepthLimited { limit: 5000 })
        .solve(initial)
        .unwrap();
    assert!(solution.move_count() <= 5000);
    assert!(solution.states().iter().all(|state| state.depth() <= 5000));
}

#[test_log::test]
fn test_unsolvable_board_exhausts_every_strategy() {
    // 2x2 keeps the unreachable half of the state space at 12 boards.
    let unsolvable = board("0,2; 1,3");
    assert!(!unsolvable.is_solvable());
    for strategy in all_strategies() {
        let err = Solver::new(strategy).solve(unsolvable.clone()).unwrap_err();
        match err {
            // Each of the 12 reachable boards is expanded exactly once.
            SearchError::Exhausted { stats } => assert_eq!(stats.expanded, 12),
            other => panic!("{strategy}: unexpected outcome {other:?}"),
        }
    }
}

#[test_log::test]
fn test_unsolvable_board_rejected_when_required() {
    let err = Solver::new(Strategy::DepthFirst)
        .require_solvable(true)
        .solve(board("1,2,3; 4,5,6; 8,7,0"))
        .unwrap_err();
    assert_eq!(err, SearchError::Unsolvable);
}

#[test_log::test]
fn test_single_slide_from_goal() {
    let initial = board("1,0,2; 3,4,5; 6,7,8");
    for strategy in [Strategy::AStar, Strategy::DepthLimited { limit: 1 }] {
        let solution = Solver::new(strategy).solve(initial.clone()).unwrap();
        assert_eq!(solution.moves(), vec![Move::Left]);
    }
}
