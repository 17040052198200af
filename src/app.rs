//! The application orchestrator.
//!
//! [`ApplicationState`] wires a [`Configuration`], an active search
//! algorithm, the search tree, and the action log into a run, pause, step,
//! undo, redo lifecycle. Each discovery batch the algorithm queues is
//! translated into a sequence of reversible [`Action`]s applied to the
//! session, so the whole discovery history can be stepped backward and
//! forward exactly, independent of which strategy produced it.

pub mod config;

use std::rc::Rc;

use crate::{
    Error, Result,
    actions::{Action, Session},
    puzzle::PuzzleState,
    search::{Discovery, SearchAlgorithm},
    tree::SearchTree,
    types::{NodeKind, RunState, Statistic},
};

pub use config::{Configuration, RunMode};

/// Orchestrates a search run.
///
/// Lifecycle: `Stopped → Running ⇄ Paused → Complete`, with `Stopped`
/// reachable from anywhere via [`reset`](Self::reset). Calling a lifecycle
/// method outside its applicable state is a silent no-op.
pub struct ApplicationState {
    configuration: Configuration,
    session: Session,
    algorithm: Option<Box<dyn SearchAlgorithm>>,
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
    expansion_counter: u32,
}

impl ApplicationState {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            session: Session::new(),
            algorithm: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            expansion_counter: 1,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    pub fn tree(&self) -> &SearchTree {
        &self.session.tree
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn statistics(&self) -> &[Statistic] {
        self.session.statistics()
    }

    pub fn run_state(&self) -> RunState {
        self.session.run_state()
    }

    pub fn is_stopped(&self) -> bool {
        self.run_state() == RunState::Stopped
    }

    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.run_state() == RunState::Paused
    }

    pub fn is_complete(&self) -> bool {
        self.run_state() == RunState::Complete
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Build the configured algorithm, seed the tree with its initial
    /// discovery, and begin running. A no-op unless stopped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the configuration's
    /// heuristic selection does not match its algorithm.
    pub fn start(&mut self) -> Result<()> {
        if !self.is_stopped() {
            return Ok(());
        }
        if !self.configuration.is_valid() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "algorithm '{}' and heuristic selection do not agree",
                    self.configuration.algorithm().key()
                ),
            });
        }

        let initial = Rc::new(self.configuration.initial_state().fresh_copy());
        let goal = Rc::new(self.configuration.goal_state().fresh_copy());
        self.expansion_counter = 1;

        let algorithm = self.configuration.algorithm().build(
            initial,
            goal,
            self.configuration.heuristic(),
        )?;
        self.install(algorithm)
    }

    /// Seed the session from a freshly built algorithm and begin running.
    fn install(&mut self, mut algorithm: Box<dyn SearchAlgorithm>) -> Result<()> {
        let batches = algorithm.drain_discoveries();
        let count = batches.len();
        for (index, batch) in batches.into_iter().enumerate() {
            self.apply_discovery(algorithm.as_mut(), batch, index + 1 == count)?;
        }

        // Seeding the root is not part of the undoable history.
        self.undo_stack.clear();
        self.redo_stack.clear();

        self.session.set_statistics(algorithm.statistics());
        let run_state = if algorithm.goal_found() {
            RunState::Complete
        } else {
            RunState::Running
        };
        self.session.set_run_state(run_state);
        self.algorithm = Some(algorithm);
        Ok(())
    }

    /// Advance one step: replay a pending redo action if any, otherwise
    /// drive the algorithm one iteration and record its discoveries as
    /// reversible actions. A no-op unless running.
    pub fn next(&mut self) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }

        if let Some(action) = self.redo_stack.pop() {
            if let Some(inverse) = self.session.execute(action)? {
                self.undo_stack.push(inverse);
            }
            return Ok(());
        }

        let Some(mut algorithm) = self.algorithm.take() else {
            return Ok(());
        };
        let outcome = self.advance(algorithm.as_mut());
        self.algorithm = Some(algorithm);
        outcome
    }

    fn advance(&mut self, algorithm: &mut dyn SearchAlgorithm) -> Result<()> {
        algorithm.iterate()?;
        let batches = algorithm.drain_discoveries();

        if batches.is_empty() && algorithm.is_exhausted() {
            // The frontier drained without a goal; there is nothing left to
            // step through, so finish outside the undoable history.
            self.session.set_statistics(algorithm.statistics());
            self.session.set_run_state(RunState::Complete);
            return Ok(());
        }

        let count = batches.len();
        for (index, batch) in batches.into_iter().enumerate() {
            self.apply_discovery(algorithm, batch, index + 1 == count)?;
        }
        self.session.set_statistics(algorithm.statistics());
        Ok(())
    }

    /// Step backward through the recorded history. A no-op when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Result<()> {
        if let Some(action) = self.undo_stack.pop() {
            if let Some(inverse) = self.session.execute(action)? {
                self.redo_stack.push(inverse);
            }
        }
        Ok(())
    }

    /// Step forward through previously undone history. A no-op when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> Result<()> {
        if let Some(action) = self.redo_stack.pop() {
            if let Some(inverse) = self.session.execute(action)? {
                self.undo_stack.push(inverse);
            }
        }
        Ok(())
    }

    /// Suspend a burst-mode run. A no-op in single-step mode or outside
    /// `Running`.
    pub fn pause(&mut self) {
        if self.is_running() && self.configuration.mode() == RunMode::Burst {
            self.session.set_run_state(RunState::Paused);
        }
    }

    /// Resume a paused burst-mode run.
    pub fn resume(&mut self) {
        if self.is_paused() && self.configuration.mode() == RunMode::Burst {
            self.session.set_run_state(RunState::Running);
        }
    }

    /// Tear down the run: clear the history, tree, map, and statistics and
    /// return to `Stopped`. A no-op when already stopped.
    pub fn reset(&mut self) {
        if self.is_stopped() {
            return;
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.expansion_counter = 1;
        self.algorithm = None;
        self.session.clear();
        // A later run must not see this run's cached estimate.
        self.configuration.initial_state().set_heuristic_value(None);
    }

    /// The root-to-goal path, once a goal node exists in the tree.
    pub fn goal_path(&self) -> Option<Vec<Rc<PuzzleState>>> {
        let tree = &self.session.tree;
        let goal = tree
            .node_ids()
            .find(|&id| tree.kind(id).ok() == Some(NodeKind::Goal))?;
        let mut path = Vec::new();
        let mut cursor = Some(Rc::clone(tree.state(goal).ok()?));
        while let Some(state) = cursor {
            cursor = state.parent().cloned();
            path.push(state);
        }
        path.reverse();
        Some(path)
    }

    /// Translate one discovery batch into an atomic, reversible step.
    ///
    /// The executed actions' inverses are recorded in execution order and
    /// pushed as one composite, so undoing the step reverses them back to
    /// front. Whatever executed is pushed even when translation fails
    /// partway, so the history never disagrees with the tree.
    ///
    /// `mark_next` must be set only on the last batch of a drain: earlier
    /// batches can precede the one that maps the state `peek()` names (a
    /// depth-first iteration pops stale stack entries, reporting each as a
    /// repeat batch before the expansion batch).
    fn apply_discovery(
        &mut self,
        algorithm: &mut dyn SearchAlgorithm,
        batch: Discovery,
        mark_next: bool,
    ) -> Result<()> {
        let mut recorded = Vec::new();
        let outcome = self.translate_batch(algorithm, batch, mark_next, &mut recorded);
        if recorded.len() > 1 {
            self.undo_stack.push(Action::Composite(recorded));
        } else if let Some(action) = recorded.pop() {
            self.undo_stack.push(action);
        }
        outcome
    }

    fn translate_batch(
        &mut self,
        algorithm: &mut dyn SearchAlgorithm,
        batch: Discovery,
        mark_next: bool,
        recorded: &mut Vec<Action>,
    ) -> Result<()> {
        if batch.resets_expansion_order {
            // New iterative-deepening pass: expansion orders restart.
            self.expansion_counter = 1;
        }

        if let Some(parent) = &batch.parent {
            if parent.expansion_order() == 0 {
                let value = self.expansion_counter;
                self.expansion_counter += 1;
                self.record(
                    recorded,
                    Action::SetExpansionOrder {
                        state: Rc::clone(parent),
                        value,
                    },
                )?;
            }
            self.record(
                recorded,
                Action::SetNodeKind {
                    state: Rc::clone(parent),
                    kind: NodeKind::Explored,
                },
            )?;
        }

        // Already-mapped states get their node reclassified in place; the
        // rest are added to the tree below.
        let mut new_states = Vec::new();
        for augmented in &batch.states {
            if self.session.contains_state(&augmented.state.long_identifier()) {
                self.record(
                    recorded,
                    Action::SetNodeKind {
                        state: Rc::clone(&augmented.state),
                        kind: augmented.kind,
                    },
                )?;
                self.record(
                    recorded,
                    Action::SetExpansionOrder {
                        state: Rc::clone(&augmented.state),
                        value: 0,
                    },
                )?;
            } else {
                new_states.push(augmented.clone());
            }
        }

        if batch.resets_expansion_order {
            // The restarted pass gets a fresh root node and a fresh board
            // map; the displaced subtree stays behind for undo.
            let augmented = &batch.states[0];
            let root = self.session.tree.insert(
                Rc::clone(&augmented.state),
                augmented.kind,
                None,
            )?;
            let board_map =
                std::collections::HashMap::from([(augmented.state.long_identifier(), root)]);
            self.record(
                recorded,
                Action::ReplaceRoot {
                    root: Some(root),
                    board_map,
                },
            )?;
        } else {
            self.record(
                recorded,
                Action::AddStates {
                    states: new_states,
                    parent: batch.parent.clone(),
                },
            )?;
        }

        for augmented in &batch.states {
            if augmented.kind == NodeKind::Goal {
                let mut ancestor = augmented.state.parent().cloned();
                while let Some(state) = ancestor {
                    ancestor = state.parent().cloned();
                    self.record(
                        recorded,
                        Action::SetNodeKind {
                            state,
                            kind: NodeKind::GoalPath,
                        },
                    )?;
                }
                self.record(recorded, Action::SetRunState(RunState::Complete))?;
                let value = self.expansion_counter;
                self.expansion_counter += 1;
                self.record(
                    recorded,
                    Action::SetExpansionOrder {
                        state: Rc::clone(&augmented.state),
                        value,
                    },
                )?;
            } else if augmented.kind == NodeKind::Repeat {
                // A rediscovery keeps no estimate of its own.
                augmented.state.set_heuristic_value(None);
            }
        }

        self.record(
            recorded,
            Action::SetStatistics(algorithm.statistics()),
        )?;

        if mark_next {
            if let Some(next) = algorithm.peek() {
                let id = self.session.node_for(&next.long_identifier())?;
                if self.session.tree.kind(id)? != NodeKind::Culled {
                    self.record(
                        recorded,
                        Action::SetNodeKind {
                            state: next,
                            kind: NodeKind::Next,
                        },
                    )?;
                }
            }
        }

        for state in &batch.explored {
            self.record(
                recorded,
                Action::SetNodeKind {
                    state: Rc::clone(state),
                    kind: NodeKind::Explored,
                },
            )?;
        }

        Ok(())
    }

    fn record(&mut self, recorded: &mut Vec<Action>, action: Action) -> Result<()> {
        if let Some(inverse) = self.session.execute(action)? {
            recorded.push(inverse);
        }
        Ok(())
    }
}
