//! Interactive teaching engine for graph search over the 8-puzzle
//!
//! This crate provides:
//! - An immutable-intent puzzle state space with successor generation and
//!   heuristic distance measures
//! - Interchangeable search strategies (BFS, DFS, iterative deepening,
//!   greedy, A*) driven one step at a time through a shared contract
//! - An arena-backed search tree mirroring the exploration
//! - A command-pattern action log that makes every algorithmic step exactly
//!   reversible
//! - An orchestrator wiring configuration, algorithm, tree, and action log
//!   into a run/pause/step/undo/redo lifecycle

pub mod actions;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod identifiers;
pub mod puzzle;
pub mod search;
pub mod tree;
pub mod types;

pub use actions::{Action, Session};
pub use app::{ApplicationState, Configuration, RunMode};
pub use error::{Error, Result};
pub use identifiers::{BoardKey, PathId};
pub use puzzle::{HeuristicKind, PuzzleState};
pub use search::{AlgorithmKind, Discovery, SearchAlgorithm};
pub use tree::{NodeId, SearchTree};
pub use types::{NodeKind, RunState, Statistic};
