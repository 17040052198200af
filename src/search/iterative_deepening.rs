//! Iterative-deepening depth-first search.

use std::{collections::HashSet, rc::Rc};

use crate::{
    Result,
    identifiers::BoardKey,
    puzzle::PuzzleState,
    search::{
        AugmentedState, Discovery, STAT_CLOSED_LIST, STAT_MAX_DEPTH, STAT_OPEN_LIST,
        SearchAlgorithm,
    },
    types::{NodeKind, Statistic},
};

/// Depth-bounded DFS passes with an increasing depth cap.
///
/// The cap starts at 0. Successors deeper than the cap are generated, flagged
/// `Culled`, and not pushed. Within a pass, duplicate handling mirrors
/// [`DepthFirstSearch`](crate::search::DepthFirstSearch) (closed set
/// populated at expansion) plus a linear frontier scan for in-flight
/// duplicates. When the frontier drains without a goal the cap is
/// incremented, per-pass bookkeeping is cleared, and the frontier restarts
/// from a fresh copy of the initial state; the restart batch carries
/// `resets_expansion_order` so expansion-order counters restart per pass.
/// This strategy never exhausts.
pub struct IterativeDeepeningSearch {
    frontier: Vec<Rc<PuzzleState>>,
    closed: HashSet<BoardKey>,
    initial: Rc<PuzzleState>,
    goal: Rc<PuzzleState>,
    max_depth: u32,
    goal_found: bool,
    discoveries: Vec<Discovery>,
}

impl IterativeDeepeningSearch {
    pub fn new(initial: Rc<PuzzleState>, goal: Rc<PuzzleState>) -> Self {
        let mut search = Self {
            frontier: Vec::new(),
            closed: HashSet::new(),
            initial: Rc::clone(&initial),
            goal,
            max_depth: 0,
            goal_found: false,
            discoveries: Vec::new(),
        };

        let kind = if initial.same_board(&search.goal) {
            search.goal_found = true;
            NodeKind::Goal
        } else {
            search.frontier.push(Rc::clone(&initial));
            NodeKind::Normal
        };
        search.discoveries.push(Discovery::initial(initial, kind));
        search
    }

    /// Begin the next pass: deeper cap, cleared bookkeeping, fresh root.
    fn restart_pass(&mut self) {
        self.max_depth += 1;
        self.closed.clear();
        let root = Rc::new(self.initial.fresh_copy());
        self.frontier.push(Rc::clone(&root));
        self.discoveries.push(Discovery {
            states: vec![AugmentedState::new(root, NodeKind::Normal)],
            parent: None,
            explored: Vec::new(),
            resets_expansion_order: true,
        });
    }
}

impl SearchAlgorithm for IterativeDeepeningSearch {
    fn iterate(&mut self) -> Result<bool> {
        if self.goal_found {
            return Ok(true);
        }

        while let Some(state) = self.frontier.pop() {
            if state.same_board(&self.goal) {
                self.goal_found = true;
                self.discoveries
                    .push(Discovery::reclassification(state, NodeKind::Goal));
                return Ok(true);
            }

            if self.closed.contains(state.board_key().as_str()) {
                self.discoveries
                    .push(Discovery::reclassification(state, NodeKind::Repeat));
                continue;
            }

            self.closed.insert(state.board_key());
            let mut augmented = Vec::new();
            for successor in state.successors()? {
                if successor.depth() > self.max_depth {
                    augmented.push(AugmentedState::new(successor, NodeKind::Culled));
                } else if self.closed.contains(successor.board_key().as_str())
                    || self.frontier.iter().any(|open| open.same_board(&successor))
                {
                    augmented.push(AugmentedState::new(successor, NodeKind::Repeat));
                } else {
                    self.frontier.push(Rc::clone(&successor));
                    augmented.push(AugmentedState::new(successor, NodeKind::Normal));
                }
            }
            self.discoveries.push(Discovery::expansion(augmented, state));
            break;
        }

        // A drained frontier without a goal starts the next pass within the
        // same call, so the frontier is never left empty.
        if self.frontier.is_empty() {
            self.restart_pass();
        }
        Ok(false)
    }

    fn statistics(&self) -> Vec<Statistic> {
        vec![
            Statistic::new(STAT_MAX_DEPTH, self.max_depth as usize),
            Statistic::new(STAT_OPEN_LIST, self.frontier.len()),
            Statistic::new(STAT_CLOSED_LIST, self.closed.len()),
        ]
    }

    fn peek(&mut self) -> Option<Rc<PuzzleState>> {
        self.frontier.last().cloned()
    }

    fn goal_found(&self) -> bool {
        self.goal_found
    }

    fn is_exhausted(&self) -> bool {
        false
    }

    fn drain_discoveries(&mut self) -> Vec<Discovery> {
        std::mem::take(&mut self.discoveries)
    }
}
