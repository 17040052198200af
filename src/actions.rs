//! Reversible actions over the orchestrator session.
//!
//! Every mutation the orchestrator makes to the tree or to shared
//! bookkeeping (board-to-node map, run state, cached statistics) is expressed
//! as an [`Action`]: a plain data payload interpreted by
//! [`Session::execute`], which performs the mutation and returns the action
//! that exactly reverses it. Actions identify tree nodes through stable
//! [`PathId`] keys resolved against the session's board map at execution
//! time, so a recorded action stays valid to re-execute across intervening
//! structural changes.

use std::{collections::HashMap, rc::Rc};

use crate::{
    Error, Result,
    identifiers::PathId,
    puzzle::PuzzleState,
    search::AugmentedState,
    tree::{NodeId, SearchTree},
    types::{NodeKind, RunState, Statistic},
};

/// One reversible mutation of the session.
#[derive(Debug, Clone)]
pub enum Action {
    /// Assign a state's expansion-order annotation.
    SetExpansionOrder {
        state: Rc<PuzzleState>,
        value: u32,
    },
    /// Add sibling nodes for the given states under a shared parent. With an
    /// empty tree, a single parentless state becomes the root; establishing
    /// the root is the one irreversible action.
    AddStates {
        states: Vec<AugmentedState>,
        parent: Option<Rc<PuzzleState>>,
    },
    /// Remove the leaf nodes of the given sibling states (inverse of
    /// [`Action::AddStates`]).
    RemoveStates {
        states: Vec<Rc<PuzzleState>>,
        parent: Option<Rc<PuzzleState>>,
    },
    /// Swap in a new root reference and board map (iterative-deepening pass
    /// restarts). The displaced subtree stays in the arena so the inverse
    /// can restore it.
    ReplaceRoot {
        root: Option<NodeId>,
        board_map: HashMap<PathId, NodeId>,
    },
    SetRunState(RunState),
    SetStatistics(Vec<Statistic>),
    /// Reclassify the node of an already-mapped state.
    SetNodeKind {
        state: Rc<PuzzleState>,
        kind: NodeKind,
    },
    /// Execute a list of actions back to front; the inverse is the composite
    /// of their inverses in execution order.
    Composite(Vec<Action>),
}

/// Mutable state shared by the orchestrator and the action executor: the
/// search tree, the board-to-node map, the lifecycle state, and the cached
/// statistics snapshot.
#[derive(Debug, Default)]
pub struct Session {
    pub tree: SearchTree,
    board_map: HashMap<PathId, NodeId>,
    run_state: RunState,
    statistics: Vec<Statistic>,
    stats_revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn set_run_state(&mut self, run_state: RunState) {
        self.run_state = run_state;
    }

    pub fn statistics(&self) -> &[Statistic] {
        &self.statistics
    }

    /// Replace the statistics snapshot outside the undoable history.
    pub fn set_statistics(&mut self, statistics: Vec<Statistic>) {
        self.statistics = statistics;
        self.stats_revision += 1;
    }

    /// Monotonic counter bumped whenever the statistics snapshot changes.
    pub fn statistics_revision(&self) -> u64 {
        self.stats_revision
    }

    /// Node mapped to a path identifier.
    pub fn node_for(&self, id: &PathId) -> Result<NodeId> {
        self.board_map
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownState {
                id: id.to_string(),
            })
    }

    pub fn contains_state(&self, id: &PathId) -> bool {
        self.board_map.contains_key(id)
    }

    /// Drop the tree, map, and statistics; run state becomes `Stopped`.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.board_map.clear();
        self.statistics.clear();
        self.stats_revision += 1;
        self.run_state = RunState::Stopped;
    }

    /// Perform `action` and return the action that reverses it, or `None`
    /// for the irreversible establishment of the first root.
    pub fn execute(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::SetExpansionOrder { state, value } => {
                let old = state.expansion_order();
                state.set_expansion_order(value);
                Ok(Some(Action::SetExpansionOrder { state, value: old }))
            }

            Action::AddStates { states, parent } => self.add_states(states, parent),

            Action::RemoveStates { states, parent } => self.remove_states(states, parent),

            Action::ReplaceRoot { root, board_map } => {
                let old_map = std::mem::replace(&mut self.board_map, board_map);
                let old_root = self.tree.root();
                self.tree.set_root(root)?;
                Ok(Some(Action::ReplaceRoot {
                    root: old_root,
                    board_map: old_map,
                }))
            }

            Action::SetRunState(run_state) => {
                let old = self.run_state;
                self.run_state = run_state;
                Ok(Some(Action::SetRunState(old)))
            }

            Action::SetStatistics(statistics) => {
                let old = std::mem::replace(&mut self.statistics, statistics);
                self.stats_revision += 1;
                Ok(Some(Action::SetStatistics(old)))
            }

            Action::SetNodeKind { state, kind } => {
                let id = self.node_for(&state.long_identifier())?;
                let old = self.tree.set_kind(id, kind)?;
                Ok(Some(Action::SetNodeKind { state, kind: old }))
            }

            Action::Composite(actions) => {
                let mut inverses = Vec::with_capacity(actions.len());
                for action in actions.into_iter().rev() {
                    if let Some(inverse) = self.execute(action)? {
                        inverses.push(inverse);
                    }
                }
                Ok(Some(Action::Composite(inverses)))
            }
        }
    }

    fn add_states(
        &mut self,
        states: Vec<AugmentedState>,
        parent: Option<Rc<PuzzleState>>,
    ) -> Result<Option<Action>> {
        let had_root = self.tree.root().is_some();
        let parent_node = match &parent {
            Some(state) => Some(self.node_for(&state.long_identifier())?),
            None => None,
        };

        let mut added = Vec::with_capacity(states.len());
        let mut first_node = None;
        for augmented in states {
            let id = self
                .tree
                .insert(Rc::clone(&augmented.state), augmented.kind, parent_node)?;
            self.board_map.insert(augmented.state.long_identifier(), id);
            first_node.get_or_insert(id);
            added.push(augmented.state);
        }

        if !had_root {
            if added.len() == 1 {
                self.tree.set_root(first_node)?;
                // Establishing the first root cannot be undone.
                return Ok(None);
            }
            return Err(Error::DuplicateRoot);
        }

        Ok(Some(Action::RemoveStates {
            states: added,
            parent,
        }))
    }

    fn remove_states(
        &mut self,
        states: Vec<Rc<PuzzleState>>,
        parent: Option<Rc<PuzzleState>>,
    ) -> Result<Option<Action>> {
        let parent = parent.ok_or(Error::MissingParent)?;
        self.node_for(&parent.long_identifier())?;

        let mut removed = Vec::with_capacity(states.len());
        for state in states {
            let path = state.long_identifier();
            let id = self.node_for(&path)?;
            let kind = self.tree.kind(id)?;
            self.tree.remove_leaf(id)?;
            self.board_map.remove(&path);
            removed.push(AugmentedState::new(state, kind));
        }

        Ok(Some(Action::AddStates {
            states: removed,
            parent: Some(parent),
        }))
    }
}
