//! Common test utilities for the puzzlegraph test suite.

use puzzlegraph::{
    app::{ApplicationState, Configuration},
    puzzle::{HeuristicKind, PuzzleState},
    search::AlgorithmKind,
    tree::SearchTree,
};

pub fn board(tiles: [u8; 9]) -> PuzzleState {
    PuzzleState::from_tiles(tiles).expect("test boards are permutations of 0-8")
}

/// Build a started application for the given problem.
pub fn app_for(
    initial: [u8; 9],
    goal: [u8; 9],
    algorithm: AlgorithmKind,
    heuristic: Option<HeuristicKind>,
) -> ApplicationState {
    let mut config = Configuration::new()
        .with_initial_state(board(initial))
        .with_goal_state(board(goal))
        .with_algorithm(algorithm);
    if let Some(heuristic) = heuristic {
        config.set_heuristic(heuristic);
    }
    let mut app = ApplicationState::new(config);
    app.start().expect("configuration is valid");
    app
}

/// Step the application until it completes, returning the number of steps
/// taken. Panics when the limit is hit first.
pub fn run_to_completion(app: &mut ApplicationState, max_steps: usize) -> usize {
    let mut steps = 0;
    while app.is_running() {
        assert!(steps < max_steps, "search did not complete in {max_steps} steps");
        app.next().expect("stepping a running search succeeds");
        steps += 1;
    }
    assert!(app.is_complete());
    steps
}

/// Count tree nodes per kind, sorted by kind name for stable comparison.
pub fn kind_counts(tree: &SearchTree) -> Vec<(&'static str, usize)> {
    let mut counts: std::collections::BTreeMap<&'static str, usize> =
        std::collections::BTreeMap::new();
    for id in tree.node_ids() {
        let kind = tree.kind(id).expect("iterated ids are live");
        *counts.entry(kind.as_str()).or_default() += 1;
    }
    counts.into_iter().collect()
}
