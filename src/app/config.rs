//! Run configuration: boards, strategy, heuristic, and control mode.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    puzzle::{HeuristicKind, PuzzleState},
    search::AlgorithmKind,
};

/// How the orchestrator is driven: one explicit step at a time, or a
/// self-rescheduling burst loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Single,
    Burst,
}

impl RunMode {
    pub fn key(self) -> &'static str {
        match self {
            RunMode::Single => "single",
            RunMode::Burst => "burst",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "single" => Ok(RunMode::Single),
            "burst" => Ok(RunMode::Burst),
            _ => Err(Error::ParseRunMode {
                input: s.to_string(),
                expected: "single, burst".to_string(),
            }),
        }
    }
}

/// Everything a run needs: the initial and goal boards, the selected
/// strategy, its heuristic, and the control mode.
///
/// The heuristic selection is coupled to the algorithm selection:
/// uninformed algorithms carry no heuristic, and selecting an informed
/// algorithm with none chosen falls back to the default. This keeps the
/// configuration valid through any sequence of setter calls a front-end
/// might make.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    initial: PuzzleState,
    goal: PuzzleState,
    algorithm: AlgorithmKind,
    heuristic: Option<HeuristicKind>,
    mode: RunMode,
}

impl Configuration {
    pub const DEFAULT_HEURISTIC: HeuristicKind = HeuristicKind::Euclidean;

    /// Solved boards, breadth-first search, single-step mode.
    pub fn new() -> Self {
        Self {
            initial: PuzzleState::new(),
            goal: PuzzleState::new(),
            algorithm: AlgorithmKind::Bfs,
            heuristic: None,
            mode: RunMode::Single,
        }
    }

    pub fn with_initial_state(mut self, initial: PuzzleState) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_goal_state(mut self, goal: PuzzleState) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.set_algorithm(algorithm);
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.set_heuristic(heuristic);
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn initial_state(&self) -> &PuzzleState {
        &self.initial
    }

    pub fn initial_state_mut(&mut self) -> &mut PuzzleState {
        &mut self.initial
    }

    pub fn goal_state(&self) -> &PuzzleState {
        &self.goal
    }

    pub fn goal_state_mut(&mut self) -> &mut PuzzleState {
        &mut self.goal
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    pub fn heuristic(&self) -> Option<HeuristicKind> {
        self.heuristic
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn set_initial_state(&mut self, initial: PuzzleState) {
        self.initial = initial;
    }

    pub fn set_goal_state(&mut self, goal: PuzzleState) {
        self.goal = goal;
    }

    /// Select the algorithm, reconciling the heuristic: uninformed
    /// algorithms clear it, informed ones fall back to the default when
    /// none is set.
    pub fn set_algorithm(&mut self, algorithm: AlgorithmKind) {
        self.algorithm = algorithm;
        if algorithm.uses_heuristic() {
            if self.heuristic.is_none() {
                self.heuristic = Some(Self::DEFAULT_HEURISTIC);
            }
        } else {
            self.heuristic = None;
        }
    }

    /// Select the heuristic; ignored (cleared) while an uninformed
    /// algorithm is active.
    pub fn set_heuristic(&mut self, heuristic: HeuristicKind) {
        self.heuristic = if self.algorithm.uses_heuristic() {
            Some(heuristic)
        } else {
            None
        };
    }

    pub fn set_mode(&mut self, mode: RunMode) {
        self.mode = mode;
    }

    /// A configuration is valid when it carries a heuristic exactly if the
    /// selected algorithm uses one.
    pub fn is_valid(&self) -> bool {
        self.algorithm.uses_heuristic() == self.heuristic.is_some()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = Configuration::new();
        assert_eq!(config.algorithm(), AlgorithmKind::Bfs);
        assert!(config.heuristic().is_none());
        assert_eq!(config.mode(), RunMode::Single);
        assert!(config.is_valid());
    }

    #[test]
    fn selecting_an_informed_algorithm_fills_in_the_default_heuristic() {
        let mut config = Configuration::new();
        config.set_algorithm(AlgorithmKind::AStar);
        assert_eq!(config.heuristic(), Some(Configuration::DEFAULT_HEURISTIC));
        assert!(config.is_valid());
    }

    #[test]
    fn selecting_an_uninformed_algorithm_clears_the_heuristic() {
        let mut config = Configuration::new()
            .with_algorithm(AlgorithmKind::Greedy)
            .with_heuristic(HeuristicKind::Manhattan);
        config.set_algorithm(AlgorithmKind::Dfs);
        assert!(config.heuristic().is_none());
        assert!(config.is_valid());
    }

    #[test]
    fn heuristic_selection_is_ignored_for_uninformed_algorithms() {
        let mut config = Configuration::new();
        config.set_heuristic(HeuristicKind::Manhattan);
        assert!(config.heuristic().is_none());
        assert!(config.is_valid());
    }

    #[test]
    fn an_explicit_heuristic_survives_informed_reselection() {
        let mut config = Configuration::new()
            .with_algorithm(AlgorithmKind::Greedy)
            .with_heuristic(HeuristicKind::TilesOutOfPlace);
        config.set_algorithm(AlgorithmKind::AStar);
        assert_eq!(config.heuristic(), Some(HeuristicKind::TilesOutOfPlace));
    }

    #[test]
    fn run_mode_parses_from_keys() {
        assert_eq!("burst".parse::<RunMode>().unwrap(), RunMode::Burst);
        assert!("turbo".parse::<RunMode>().is_err());
    }
}
