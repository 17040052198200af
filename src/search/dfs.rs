//! Depth-first search.

use std::{collections::HashSet, rc::Rc};

use crate::{
    Result,
    identifiers::BoardKey,
    puzzle::PuzzleState,
    search::{
        AugmentedState, Discovery, STAT_CLOSED_LIST, STAT_OPEN_LIST, SearchAlgorithm,
    },
    types::{NodeKind, Statistic},
};

/// Uninformed search over a LIFO frontier.
///
/// This is naive depth-first search, not graph-search DFS: the closed set is
/// populated at expansion time, so a board may sit on the stack several
/// times before the first copy is expanded. A popped board that was already
/// expanded is reported `Repeat` and popping continues within the same
/// `iterate()` call; successors of an expansion whose board is already
/// closed are reported `Repeat` and not pushed. The goal test happens at
/// dequeue time.
pub struct DepthFirstSearch {
    frontier: Vec<Rc<PuzzleState>>,
    closed: HashSet<BoardKey>,
    goal: Rc<PuzzleState>,
    goal_found: bool,
    exhausted: bool,
    discoveries: Vec<Discovery>,
}

impl DepthFirstSearch {
    pub fn new(initial: Rc<PuzzleState>, goal: Rc<PuzzleState>) -> Self {
        let mut search = Self {
            frontier: Vec::new(),
            closed: HashSet::new(),
            goal,
            goal_found: false,
            exhausted: false,
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
}

impl SearchAlgorithm for DepthFirstSearch {
    fn iterate(&mut self) -> Result<bool> {
        if self.goal_found {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }

        loop {
            let Some(state) = self.frontier.pop() else {
                self.exhausted = true;
                return Ok(false);
            };

            if state.same_board(&self.goal) {
                self.goal_found = true;
                self.discoveries
                    .push(Discovery::reclassification(state, NodeKind::Goal));
                return Ok(true);
            }

            if self.closed.contains(state.board_key().as_str()) {
                // Stale stack entry; keep popping within this call.
                self.discoveries
                    .push(Discovery::reclassification(state, NodeKind::Repeat));
                continue;
            }

            self.closed.insert(state.board_key());
            let mut augmented = Vec::new();
            for successor in state.successors()? {
                if self.closed.contains(successor.board_key().as_str()) {
                    augmented.push(AugmentedState::new(successor, NodeKind::Repeat));
                } else {
                    self.frontier.push(Rc::clone(&successor));
                    augmented.push(AugmentedState::new(successor, NodeKind::Normal));
                }
            }
            self.discoveries.push(Discovery::expansion(augmented, state));
            return Ok(false);
        }
    }

    fn statistics(&self) -> Vec<Statistic> {
        vec![
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
        self.exhausted
    }

    fn drain_discoveries(&mut self) -> Vec<Discovery> {
        std::mem::take(&mut self.discoveries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::find_statistic;

    fn rc_state(tiles: [u8; 9]) -> Rc<PuzzleState> {
        Rc::new(PuzzleState::from_tiles(tiles).unwrap())
    }

    #[test]
    fn reference_problem_matches_known_counts() {
        let mut search = DepthFirstSearch::new(
            rc_state([3, 2, 4, 5, 0, 8, 7, 6, 1]),
            rc_state([3, 6, 2, 5, 0, 4, 7, 1, 8]),
        );
        let mut iterations = 0;
        while !search.iterate().unwrap() {
            iterations += 1;
            assert!(iterations < 500_000, "search failed to terminate");
        }
        let stats = search.statistics();
        assert_eq!(find_statistic(&stats, STAT_OPEN_LIST).map(|s| s.value), Some(6));
        assert_eq!(find_statistic(&stats, STAT_CLOSED_LIST).map(|s| s.value), Some(6));
    }

    #[test]
    fn last_pushed_successor_is_expanded_first() {
        let mut search = DepthFirstSearch::new(
            rc_state([0, 2, 3, 1, 4, 5, 8, 7, 6]),
            rc_state([1, 2, 3, 4, 5, 0, 8, 7, 6]),
        );
        search.drain_discoveries();
        search.iterate().unwrap();
        let batches = search.drain_discoveries();
        let last = batches[0].states.last().unwrap().state.board_key();
        assert_eq!(search.peek().unwrap().board_key(), last);
    }

    #[test]
    fn a_board_may_be_pushed_twice_but_expands_once() {
        // Run a full search and count expansions per board through the
        // discovery stream; naive DFS allows duplicate pushes but the closed
        // set admits one expansion per board.
        let mut search = DepthFirstSearch::new(
            rc_state([3, 2, 4, 5, 0, 8, 7, 6, 1]),
            rc_state([3, 6, 2, 5, 0, 4, 7, 1, 8]),
        );
        let mut expanded = HashSet::new();
        loop {
            let done = search.iterate().unwrap();
            for batch in search.drain_discoveries() {
                if !batch.states.is_empty()
                    && batch.states.iter().any(|s| s.kind == NodeKind::Normal)
                {
                    if let Some(parent) = &batch.parent {
                        assert!(expanded.insert(parent.board_key()));
                    }
                }
            }
            if done {
                break;
            }
        }
    }

    #[test]
    fn a_stale_stack_entry_is_reclassified_within_one_iterate() {
        let mut search = DepthFirstSearch::new(
            rc_state([0, 2, 3, 1, 4, 5, 8, 7, 6]),
            rc_state([1, 2, 3, 4, 5, 0, 8, 7, 6]),
        );
        search.drain_discoveries();
        search.iterate().unwrap();
        search.drain_discoveries();

        // A second discovery path can leave a board on the stack until after
        // it has been expanded; seed such an entry on top of the frontier.
        let stale = rc_state([0, 2, 3, 1, 4, 5, 8, 7, 6]);
        search.frontier.push(Rc::clone(&stale));

        search.iterate().unwrap();
        let batches = search.drain_discoveries();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].states.len(), 1);
        assert!(batches[0].states[0].state.same_board(&stale));
        assert_eq!(batches[0].states[0].kind, NodeKind::Repeat);
        // The same call kept popping and expanded the entry it uncovered.
        assert!(batches[1].parent.is_some());
        assert!(batches[1].states.iter().any(|s| s.kind == NodeKind::Normal));
    }

    #[test]
    fn iterate_is_idempotent_after_the_goal() {
        let mut search = DepthFirstSearch::new(
            rc_state([3, 2, 4, 5, 0, 8, 7, 6, 1]),
            rc_state([3, 6, 2, 5, 0, 4, 7, 1, 8]),
        );
        while !search.iterate().unwrap() {}
        search.drain_discoveries();
        let stats = search.statistics();
        assert!(search.iterate().unwrap());
        assert_eq!(search.statistics(), stats);
        assert!(search.drain_discoveries().is_empty());
    }
}
