//! Lifecycle walkthroughs of the application orchestrator: start, step,
//! pause/resume, reset, and the terminal states.

mod common;

use common::{app_for, board, run_to_completion};
use puzzlegraph::{
    app::{ApplicationState, Configuration},
    search::AlgorithmKind,
    types::{NodeKind, RunState},
};

const CORNER_BLANK: [u8; 9] = [0, 2, 3, 1, 4, 5, 8, 7, 6];
const NEARBY_GOAL: [u8; 9] = [1, 2, 3, 4, 5, 0, 8, 7, 6];

#[test]
fn a_new_application_is_stopped_and_empty() {
    let config = Configuration::new()
        .with_initial_state(board(CORNER_BLANK))
        .with_goal_state(board(NEARBY_GOAL));
    let app = ApplicationState::new(config);

    assert!(app.is_stopped());
    assert!(app.tree().is_empty());
    assert!(app.statistics().is_empty());
    assert_eq!(app.undo_count(), 0);
}

#[test]
fn start_seeds_the_root_and_begins_running() {
    let app = app_for(CORNER_BLANK, NEARBY_GOAL, AlgorithmKind::Bfs, None);

    assert!(app.is_running());
    assert_eq!(app.tree().len(), 1);
    let root = app.tree().root().unwrap();
    assert_eq!(app.tree().kind(root).unwrap(), NodeKind::Next);
    // Seeding is not part of the undoable history.
    assert_eq!(app.undo_count(), 0);
    assert_eq!(app.redo_count(), 0);
}

#[test]
fn start_is_a_no_op_while_running() {
    let mut app = app_for(CORNER_BLANK, NEARBY_GOAL, AlgorithmKind::Bfs, None);
    let revision = app.tree().revision();
    app.start().unwrap();
    assert_eq!(app.tree().revision(), revision);
}

#[test]
fn the_first_step_expands_the_root() {
    let mut app = app_for(CORNER_BLANK, NEARBY_GOAL, AlgorithmKind::Bfs, None);
    app.next().unwrap();

    // A corner blank has exactly two legal slides.
    assert_eq!(app.tree().len(), 3);
    let root = app.tree().root().unwrap();
    assert_eq!(app.tree().kind(root).unwrap(), NodeKind::Explored);
    assert_eq!(app.tree().state(root).unwrap().expansion_order(), 1);
    assert_eq!(app.tree().child_count(root).unwrap(), 2);
    assert_eq!(app.undo_count(), 1);
}

#[test]
fn pause_and_resume_are_no_ops_in_single_step_mode() {
    let mut app = app_for(CORNER_BLANK, NEARBY_GOAL, AlgorithmKind::Bfs, None);

    app.pause();
    assert_eq!(app.run_state(), RunState::Running);
    app.resume();
    assert_eq!(app.run_state(), RunState::Running);
}

#[test]
fn a_run_finishes_in_the_complete_state() {
    let mut app = app_for(CORNER_BLANK, NEARBY_GOAL, AlgorithmKind::Bfs, None);
    run_to_completion(&mut app, 1_000);

    assert!(app.is_complete());
    let path = app.goal_path().expect("the goal is reachable");
    assert!(path.last().unwrap().same_board(&board(NEARBY_GOAL)));

    // Stepping a completed run changes nothing.
    let revision = app.tree().revision();
    app.next().unwrap();
    assert_eq!(app.tree().revision(), revision);
}

#[test]
fn starting_on_the_goal_completes_immediately() {
    let app = app_for(NEARBY_GOAL, NEARBY_GOAL, AlgorithmKind::Bfs, None);

    assert!(app.is_complete());
    assert_eq!(app.tree().len(), 1);
    let path = app.goal_path().unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(app.undo_count(), 0);
}

#[test]
fn reset_returns_to_stopped_and_allows_a_fresh_run() {
    let mut app = app_for(CORNER_BLANK, NEARBY_GOAL, AlgorithmKind::Bfs, None);
    run_to_completion(&mut app, 1_000);

    app.reset();
    assert!(app.is_stopped());
    assert!(app.tree().is_empty());
    assert!(app.statistics().is_empty());
    assert_eq!(app.undo_count(), 0);
    assert_eq!(app.redo_count(), 0);

    app.start().unwrap();
    assert!(app.is_running());
    run_to_completion(&mut app, 1_000);
    assert!(app.goal_path().is_some());
}
