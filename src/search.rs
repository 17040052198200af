//! Search strategies and the iteration contract they share.
//!
//! Algorithms do not touch the tree or the action log. Each `iterate()` call
//! performs one unit of expansion work and queues [`Discovery`] batches
//! describing what happened; the orchestrator drains the queue and translates
//! every batch into reversible tree mutations. Commands and notifications are
//! plain data, so an algorithm can be driven, inspected, and replayed without
//! any callback wiring.

pub mod bfs;
pub mod dfs;
pub mod informed;
pub mod iterative_deepening;

use std::{fmt, rc::Rc, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    puzzle::{HeuristicKind, PuzzleState},
    types::{NodeKind, Statistic},
};

pub use bfs::BreadthFirstSearch;
pub use dfs::DepthFirstSearch;
pub use informed::{InformedSearch, InformedVariant};
pub use iterative_deepening::IterativeDeepeningSearch;

/// Statistic name for the frontier size.
pub const STAT_OPEN_LIST: &str = "Open list";

/// Statistic name for the number of expanded boards.
pub const STAT_CLOSED_LIST: &str = "Closed list";

/// Statistic name for the current depth bound (iterative deepening only).
pub const STAT_MAX_DEPTH: &str = "Maximum depth";

/// A state reported by a discovery batch, tagged with its classification.
#[derive(Debug, Clone)]
pub struct AugmentedState {
    pub state: Rc<PuzzleState>,
    pub kind: NodeKind,
}

impl AugmentedState {
    pub fn new(state: Rc<PuzzleState>, kind: NodeKind) -> Self {
        Self { state, kind }
    }
}

/// One batch of discovery notifications produced by a single unit of
/// algorithm work.
///
/// `states` lists newly generated or re-visited states in generation order;
/// `parent` is the state they were generated from (`None` for the initial
/// discovery and for pass restarts). `explored` lists frontier states that
/// were soft-deleted as a side effect of this step (priority-queue variants
/// only). `resets_expansion_order` marks an iterative-deepening pass restart:
/// the batch's single state replaces the tree root and expansion-order
/// counters restart.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub states: Vec<AugmentedState>,
    pub parent: Option<Rc<PuzzleState>>,
    pub explored: Vec<Rc<PuzzleState>>,
    pub resets_expansion_order: bool,
}

impl Discovery {
    /// Batch reporting the initial state, emitted at construction.
    pub fn initial(state: Rc<PuzzleState>, kind: NodeKind) -> Self {
        Self {
            states: vec![AugmentedState::new(state, kind)],
            ..Self::default()
        }
    }

    /// Batch reporting successor states generated from `parent`.
    pub fn expansion(states: Vec<AugmentedState>, parent: Rc<PuzzleState>) -> Self {
        Self {
            states,
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Batch updating the classification of a single already-known state.
    pub fn reclassification(state: Rc<PuzzleState>, kind: NodeKind) -> Self {
        Self {
            parent: state.parent().cloned(),
            states: vec![AugmentedState::new(state, kind)],
            ..Self::default()
        }
    }
}

/// Common iteration contract implemented by every search strategy.
///
/// State machine: constructed, iterating, then one of two terminal states.
/// Once a goal has been dequeued `iterate()` returns `true` without side
/// effects; once the frontier is exhausted without a goal `iterate()` returns
/// `false` without side effects and [`is_exhausted`](Self::is_exhausted)
/// reports `true`. Iterative deepening never exhausts.
pub trait SearchAlgorithm {
    /// Perform one unit of expansion work. Returns `true` once a goal has
    /// been dequeued.
    fn iterate(&mut self) -> Result<bool>;

    /// Ordered named counters describing the run so far.
    fn statistics(&self) -> Vec<Statistic>;

    /// The state the next `iterate()` call will expand, without consuming
    /// it. Soft-deleted frontier entries are lazily discarded, which is why
    /// this takes `&mut self`.
    fn peek(&mut self) -> Option<Rc<PuzzleState>>;

    fn goal_found(&self) -> bool;

    /// Whether the frontier emptied without finding a goal.
    fn is_exhausted(&self) -> bool;

    /// Take the discovery batches queued since the last drain, oldest first.
    fn drain_discoveries(&mut self) -> Vec<Discovery>;
}

/// Registry of the available search strategies, keyed the way the
/// configuration layer selects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Ids,
    Greedy,
    AStar,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Ids,
        AlgorithmKind::Greedy,
        AlgorithmKind::AStar,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dfs => "dfs",
            AlgorithmKind::Ids => "ids",
            AlgorithmKind::Greedy => "greedy",
            AlgorithmKind::AStar => "astar",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "Breadth-first search",
            AlgorithmKind::Dfs => "Depth-first search",
            AlgorithmKind::Ids => "Iterative-deepening DFS",
            AlgorithmKind::Greedy => "Greedy search",
            AlgorithmKind::AStar => "A* search",
        }
    }

    /// Whether this strategy requires a heuristic function.
    pub fn uses_heuristic(self) -> bool {
        matches!(self, AlgorithmKind::Greedy | AlgorithmKind::AStar)
    }

    /// Instantiate the strategy bound to an initial and goal state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when an informed strategy is
    /// requested without a heuristic.
    pub fn build(
        self,
        initial: Rc<PuzzleState>,
        goal: Rc<PuzzleState>,
        heuristic: Option<HeuristicKind>,
    ) -> Result<Box<dyn SearchAlgorithm>> {
        if self.uses_heuristic() && heuristic.is_none() {
            return Err(Error::InvalidConfiguration {
                message: format!("algorithm '{}' requires a heuristic", self.key()),
            });
        }
        Ok(match self {
            AlgorithmKind::Bfs => Box::new(BreadthFirstSearch::new(initial, goal)),
            AlgorithmKind::Dfs => Box::new(DepthFirstSearch::new(initial, goal)),
            AlgorithmKind::Ids => Box::new(IterativeDeepeningSearch::new(initial, goal)),
            AlgorithmKind::Greedy => Box::new(InformedSearch::new(
                initial,
                goal,
                InformedVariant::Greedy,
                heuristic.unwrap_or(HeuristicKind::Euclidean),
            )),
            AlgorithmKind::AStar => Box::new(InformedSearch::new(
                initial,
                goal,
                InformedVariant::AStar,
                heuristic.unwrap_or(HeuristicKind::Euclidean),
            )),
        })
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(AlgorithmKind::Bfs),
            "dfs" => Ok(AlgorithmKind::Dfs),
            "ids" => Ok(AlgorithmKind::Ids),
            "greedy" => Ok(AlgorithmKind::Greedy),
            "astar" => Ok(AlgorithmKind::AStar),
            _ => Err(Error::ParseAlgorithm {
                input: s.to_string(),
                expected: "bfs, dfs, ids, greedy, astar".to_string(),
            }),
        }
    }
}
