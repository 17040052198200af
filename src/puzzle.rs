//! 8-puzzle domain: board states, heuristics, and scramble generation

pub mod generator;
pub mod heuristics;
pub mod state;

pub use generator::{is_solvable, random_solvable, scramble_rng};
pub use heuristics::{HeuristicKind, euclidean_distance, manhattan_distance, tiles_out_of_place};
pub use state::{BOARD_CELLS, BOARD_SIDE, PuzzleState};
