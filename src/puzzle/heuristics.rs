//! Heuristic distance measures between two puzzle states.
//!
//! All three measures are pure functions of two boards and return integer
//! estimates. Informed searches cache the result on the state being scored.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    puzzle::state::{BOARD_CELLS, BOARD_SIDE, PuzzleState},
};

/// Registry of the available heuristics, keyed the way the configuration
/// layer selects them (`euclidean`, `manhattan`, `tiles`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    Euclidean,
    Manhattan,
    #[serde(rename = "tiles")]
    TilesOutOfPlace,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::Euclidean,
        HeuristicKind::Manhattan,
        HeuristicKind::TilesOutOfPlace,
    ];

    pub fn key(self) -> &'static str {
        match self {
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::TilesOutOfPlace => "tiles",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HeuristicKind::Euclidean => "Euclidean distance",
            HeuristicKind::Manhattan => "Manhattan distance",
            HeuristicKind::TilesOutOfPlace => "Tiles out-of-place",
        }
    }

    /// Evaluate this heuristic for state `a` measured against state `b`.
    pub fn evaluate(self, a: &PuzzleState, b: &PuzzleState) -> u32 {
        match self {
            HeuristicKind::Euclidean => euclidean_distance(a, b),
            HeuristicKind::Manhattan => manhattan_distance(a, b),
            HeuristicKind::TilesOutOfPlace => tiles_out_of_place(a, b),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for HeuristicKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "euclidean" => Ok(HeuristicKind::Euclidean),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "tiles" => Ok(HeuristicKind::TilesOutOfPlace),
            _ => Err(Error::ParseHeuristic {
                input: s.to_string(),
                expected: "euclidean, manhattan, tiles".to_string(),
            }),
        }
    }
}

/// Position of each tile value, indexed by value.
fn positions(state: &PuzzleState) -> [(i32, i32); BOARD_CELLS] {
    let mut positions = [(0, 0); BOARD_CELLS];
    for (index, &value) in state.tiles().iter().enumerate() {
        positions[value as usize] = ((index % BOARD_SIDE) as i32, (index / BOARD_SIDE) as i32);
    }
    positions
}

/// Sum over all nine tiles (blank included) of the floored straight-line
/// distance between a tile's position in `a` and its position in `b`.
pub fn euclidean_distance(a: &PuzzleState, b: &PuzzleState) -> u32 {
    let pa = positions(a);
    let pb = positions(b);
    let mut distance = 0;
    for value in 0..BOARD_CELLS {
        let dx = (pa[value].0 - pb[value].0).abs();
        let dy = (pa[value].1 - pb[value].1).abs();
        distance += f64::from(dx * dx + dy * dy).sqrt().floor() as u32;
    }
    distance
}

/// Sum over the eight non-blank tiles of `|dx| + |dy|` between a tile's
/// position in `a` and its position in `b`.
pub fn manhattan_distance(a: &PuzzleState, b: &PuzzleState) -> u32 {
    let pa = positions(a);
    let pb = positions(b);
    let mut distance = 0;
    for value in 1..BOARD_CELLS {
        distance += (pa[value].0 - pb[value].0).unsigned_abs();
        distance += (pa[value].1 - pb[value].1).unsigned_abs();
    }
    distance
}

/// Count of non-blank tiles whose position differs between `a` and `b`.
pub fn tiles_out_of_place(a: &PuzzleState, b: &PuzzleState) -> u32 {
    a.tiles()
        .iter()
        .zip(b.tiles().iter())
        .filter(|&(&ta, &tb)| ta != 0 && ta != tb)
        .count() as u32
}
