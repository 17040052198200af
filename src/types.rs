//! Small shared types used across the search engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a search-tree node, as shown by a rendering layer.
///
/// Algorithms report the first four kinds when discovering states; the
/// orchestrator additionally assigns `Explored`, `Next`, and `GoalPath` while
/// translating discoveries into tree mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A freshly discovered state sitting on the frontier.
    Normal,
    /// A state that has been expanded (or subsumed by an equal board).
    Explored,
    /// The state the algorithm will expand on its next iteration.
    Next,
    /// The goal state.
    Goal,
    /// An ancestor of the goal state, marked once the goal is found.
    GoalPath,
    /// A re-discovery of a board that was already seen.
    Repeat,
    /// A state generated beyond the current depth bound (IDDFS only).
    Culled,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Normal => "normal",
            NodeKind::Explored => "explored",
            NodeKind::Next => "next",
            NodeKind::Goal => "goal",
            NodeKind::GoalPath => "goal_path",
            NodeKind::Repeat => "repeat",
            NodeKind::Culled => "culled",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of the application orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Stopped,
    Running,
    Paused,
    Complete,
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Stopped
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// A named counter reported by a search algorithm.
///
/// Algorithms return these in a fixed order (open list, closed list, plus
/// algorithm-specific extras) so a stats panel can render them as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistic {
    pub name: &'static str,
    pub value: usize,
}

impl Statistic {
    pub fn new(name: &'static str, value: usize) -> Self {
        Self { name, value }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Find a statistic by name in a statistics snapshot.
pub fn find_statistic<'a>(statistics: &'a [Statistic], name: &str) -> Option<&'a Statistic> {
    statistics.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_round_trips_through_serde() {
        let json = serde_json::to_string(&NodeKind::GoalPath).unwrap();
        assert_eq!(json, "\"goal_path\"");
        let back: NodeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeKind::GoalPath);
    }

    #[test]
    fn find_statistic_locates_by_name() {
        let stats = vec![Statistic::new("Open list", 4), Statistic::new("Closed list", 7)];
        assert_eq!(find_statistic(&stats, "Closed list").map(|s| s.value), Some(7));
        assert!(find_statistic(&stats, "Maximum depth").is_none());
    }
}
