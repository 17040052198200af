//! End-to-end search runs driven through the orchestrator, checked against
//! hand-traced open/closed counts and known optimal path lengths.

mod common;

use common::{app_for, board, run_to_completion};
use puzzlegraph::{
    puzzle::HeuristicKind,
    search::{AlgorithmKind, STAT_CLOSED_LIST, STAT_MAX_DEPTH, STAT_OPEN_LIST},
    types::find_statistic,
};

fn statistic(app: &puzzlegraph::app::ApplicationState, name: &str) -> usize {
    find_statistic(app.statistics(), name)
        .unwrap_or_else(|| panic!("missing statistic '{name}'"))
        .value
}

#[test]
fn breadth_first_fixture_counts() {
    let mut app = app_for(
        [0, 2, 3, 1, 5, 4, 8, 6, 7],
        [1, 2, 3, 5, 0, 4, 8, 6, 7],
        AlgorithmKind::Bfs,
        None,
    );
    run_to_completion(&mut app, 100);

    assert_eq!(statistic(&app, STAT_OPEN_LIST), 5);
    assert_eq!(statistic(&app, STAT_CLOSED_LIST), 5);

    let path = app.goal_path().unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path.last().unwrap().depth(), 2);
}

#[test]
fn breadth_first_corner_blank_scenario() {
    let mut app = app_for(
        [0, 2, 3, 1, 4, 5, 8, 7, 6],
        [1, 2, 3, 4, 5, 0, 8, 7, 6],
        AlgorithmKind::Bfs,
        None,
    );
    run_to_completion(&mut app, 100);

    // Eleven boards expanded before the goal dequeues, eleven left waiting.
    assert_eq!(statistic(&app, STAT_OPEN_LIST), 11);
    assert_eq!(statistic(&app, STAT_CLOSED_LIST), 11);
    assert_eq!(app.goal_path().unwrap().last().unwrap().depth(), 3);
}

#[test]
fn depth_first_fixture_counts() {
    let mut app = app_for(
        [3, 2, 4, 5, 0, 8, 7, 6, 1],
        [3, 6, 2, 5, 0, 4, 7, 1, 8],
        AlgorithmKind::Dfs,
        None,
    );
    run_to_completion(&mut app, 100);

    assert_eq!(statistic(&app, STAT_OPEN_LIST), 6);
    assert_eq!(statistic(&app, STAT_CLOSED_LIST), 6);
    assert!(app.goal_path().is_some());
}

#[test]
fn a_star_finds_the_optimal_path_with_every_heuristic() {
    let initial = [1, 2, 3, 5, 0, 6, 4, 7, 8];
    let goal = [1, 2, 3, 4, 5, 6, 7, 8, 0];

    let mut reference = app_for(initial, goal, AlgorithmKind::Bfs, None);
    run_to_completion(&mut reference, 100_000);
    let optimal = reference.goal_path().unwrap().last().unwrap().depth();
    assert_eq!(optimal, 4);

    for heuristic in [
        HeuristicKind::Euclidean,
        HeuristicKind::Manhattan,
        HeuristicKind::TilesOutOfPlace,
    ] {
        let mut app = app_for(initial, goal, AlgorithmKind::AStar, Some(heuristic));
        run_to_completion(&mut app, 100_000);
        let path = app.goal_path().unwrap();
        assert_eq!(
            path.last().unwrap().depth(),
            optimal,
            "{heuristic:?} should preserve optimality"
        );
        assert!(path.last().unwrap().same_board(&board(goal)));
    }
}

#[test]
fn greedy_reaches_the_goal_without_an_optimality_guarantee() {
    let mut app = app_for(
        [1, 2, 3, 5, 0, 6, 4, 7, 8],
        [1, 2, 3, 4, 5, 6, 7, 8, 0],
        AlgorithmKind::Greedy,
        Some(HeuristicKind::Manhattan),
    );
    run_to_completion(&mut app, 100_000);

    let path = app.goal_path().unwrap();
    assert!(path.last().unwrap().same_board(&board([1, 2, 3, 4, 5, 6, 7, 8, 0])));
    assert!(path.last().unwrap().depth() >= 4);
}

#[test]
fn iterative_deepening_finds_a_one_move_goal_at_bound_one() {
    let mut app = app_for(
        [1, 2, 3, 4, 5, 6, 7, 0, 8],
        [1, 2, 3, 4, 5, 6, 7, 8, 0],
        AlgorithmKind::Ids,
        None,
    );
    run_to_completion(&mut app, 100);

    assert_eq!(statistic(&app, STAT_MAX_DEPTH), 1);
    let path = app.goal_path().unwrap();
    assert_eq!(path.len(), 2);
    // The restarted pass replaced the root, so the tree holds only the
    // current pass.
    let root = app.tree().root().unwrap();
    assert!(app.tree().state(root).unwrap().same_board(&board([1, 2, 3, 4, 5, 6, 7, 0, 8])));
}
