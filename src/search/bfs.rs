//! Breadth-first search.

use std::{
    collections::{HashSet, VecDeque},
    rc::Rc,
};

use crate::{
    Result,
    identifiers::BoardKey,
    puzzle::PuzzleState,
    search::{
        AugmentedState, Discovery, STAT_CLOSED_LIST, STAT_OPEN_LIST, SearchAlgorithm,
    },
    types::{NodeKind, Statistic},
};

/// Uninformed search over a FIFO frontier.
///
/// Duplicate detection uses a discovered set keyed by board, populated at
/// discovery time, so each reachable board is enqueued at most once;
/// rediscoveries are reported `Repeat`. The goal test happens at dequeue
/// time: the dequeued goal is reported `Goal` and does not count as an
/// expansion.
pub struct BreadthFirstSearch {
    frontier: VecDeque<Rc<PuzzleState>>,
    discovered: HashSet<BoardKey>,
    goal: Rc<PuzzleState>,
    closed_count: usize,
    goal_found: bool,
    exhausted: bool,
    discoveries: Vec<Discovery>,
}

impl BreadthFirstSearch {
    pub fn new(initial: Rc<PuzzleState>, goal: Rc<PuzzleState>) -> Self {
        let mut search = Self {
            frontier: VecDeque::new(),
            discovered: HashSet::from([initial.board_key()]),
            goal,
            closed_count: 0,
            goal_found: false,
            exhausted: false,
            discoveries: Vec::new(),
        };

        let kind = if initial.same_board(&search.goal) {
            search.goal_found = true;
            NodeKind::Goal
        } else {
            search.frontier.push_back(Rc::clone(&initial));
            NodeKind::Normal
        };
        search.discoveries.push(Discovery::initial(initial, kind));
        search
    }
}

impl SearchAlgorithm for BreadthFirstSearch {
    fn iterate(&mut self) -> Result<bool> {
        if self.goal_found {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }

        let Some(state) = self.frontier.pop_front() else {
            self.exhausted = true;
            return Ok(false);
        };

        if state.same_board(&self.goal) {
            self.goal_found = true;
            self.discoveries
                .push(Discovery::reclassification(state, NodeKind::Goal));
            return Ok(true);
        }

        self.closed_count += 1;
        let mut augmented = Vec::new();
        for successor in state.successors()? {
            let key = successor.board_key();
            if self.discovered.contains(&key) {
                augmented.push(AugmentedState::new(successor, NodeKind::Repeat));
            } else {
                self.discovered.insert(key);
                self.frontier.push_back(Rc::clone(&successor));
                augmented.push(AugmentedState::new(successor, NodeKind::Normal));
            }
        }
        self.discoveries.push(Discovery::expansion(augmented, state));
        Ok(false)
    }

    fn statistics(&self) -> Vec<Statistic> {
        vec![
            Statistic::new(STAT_OPEN_LIST, self.frontier.len()),
            Statistic::new(STAT_CLOSED_LIST, self.closed_count),
        ]
    }

    fn peek(&mut self) -> Option<Rc<PuzzleState>> {
        self.frontier.front().cloned()
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

    fn run_to_goal(search: &mut BreadthFirstSearch) -> usize {
        let mut iterations = 0;
        while !search.iterate().unwrap() {
            iterations += 1;
            assert!(iterations < 500_000, "search failed to terminate");
        }
        iterations
    }

    #[test]
    fn construction_reports_the_initial_state() {
        let mut search = BreadthFirstSearch::new(
            rc_state([0, 2, 3, 1, 4, 5, 8, 7, 6]),
            rc_state([1, 2, 3, 4, 5, 0, 8, 7, 6]),
        );
        let batches = search.drain_discoveries();
        assert_eq!(batches.len(), 1);
        assert!(batches[0].parent.is_none());
        assert_eq!(batches[0].states.len(), 1);
        assert_eq!(batches[0].states[0].kind, NodeKind::Normal);
        assert!(!search.goal_found());
    }

    #[test]
    fn initial_goal_is_terminal_at_construction() {
        let board = rc_state([1, 2, 3, 4, 5, 6, 7, 8, 0]);
        let mut search = BreadthFirstSearch::new(Rc::clone(&board), board);
        assert!(search.goal_found());
        let batches = search.drain_discoveries();
        assert_eq!(batches[0].states[0].kind, NodeKind::Goal);
        assert!(search.iterate().unwrap());
        assert!(search.drain_discoveries().is_empty());
    }

    #[test]
    fn reference_problem_matches_known_counts() {
        let mut search = BreadthFirstSearch::new(
            rc_state([0, 2, 3, 1, 5, 4, 8, 6, 7]),
            rc_state([1, 2, 3, 5, 0, 4, 8, 6, 7]),
        );
        run_to_goal(&mut search);
        let stats = search.statistics();
        assert_eq!(find_statistic(&stats, STAT_OPEN_LIST).map(|s| s.value), Some(5));
        assert_eq!(find_statistic(&stats, STAT_CLOSED_LIST).map(|s| s.value), Some(5));
    }

    #[test]
    fn expansions_are_dequeued_in_non_decreasing_depth_order() {
        let mut search = BreadthFirstSearch::new(
            rc_state([0, 2, 3, 1, 4, 5, 8, 7, 6]),
            rc_state([1, 2, 3, 4, 5, 0, 8, 7, 6]),
        );
        let mut last_depth = 0;
        while !search.iterate().unwrap() {
            for batch in search.drain_discoveries() {
                if let Some(parent) = &batch.parent {
                    assert!(parent.depth() >= last_depth);
                    last_depth = parent.depth();
                }
            }
        }
    }

    #[test]
    fn each_board_is_enqueued_at_most_once() {
        let mut search = BreadthFirstSearch::new(
            rc_state([0, 2, 3, 1, 5, 4, 8, 6, 7]),
            rc_state([1, 2, 3, 5, 0, 4, 8, 6, 7]),
        );
        let mut enqueued = HashSet::new();
        loop {
            let done = search.iterate().unwrap();
            for batch in search.drain_discoveries() {
                for augmented in &batch.states {
                    if augmented.kind == NodeKind::Normal {
                        assert!(enqueued.insert(augmented.state.board_key()));
                    }
                }
            }
            if done {
                break;
            }
        }
    }

    #[test]
    fn iterate_is_idempotent_after_the_goal() {
        let mut search = BreadthFirstSearch::new(
            rc_state([0, 2, 3, 1, 5, 4, 8, 6, 7]),
            rc_state([1, 2, 3, 5, 0, 4, 8, 6, 7]),
        );
        run_to_goal(&mut search);
        search.drain_discoveries();
        let stats = search.statistics();
        assert!(search.iterate().unwrap());
        assert_eq!(search.statistics(), stats);
        assert!(search.drain_discoveries().is_empty());
    }

    #[test]
    fn disconnected_goal_exhausts_the_frontier() {
        // Swapping two non-blank tiles flips the solvability parity, so the
        // goal is unreachable and the frontier must eventually drain.
        let mut search = BreadthFirstSearch::new(
            rc_state([1, 2, 3, 4, 5, 6, 7, 8, 0]),
            rc_state([2, 1, 3, 4, 5, 6, 7, 8, 0]),
        );
        let mut iterations = 0usize;
        loop {
            let done = search.iterate().unwrap();
            search.drain_discoveries();
            assert!(!done);
            if search.is_exhausted() {
                break;
            }
            iterations += 1;
            assert!(iterations < 500_000, "frontier never drained");
        }
        assert!(!search.goal_found());
        assert!(search.peek().is_none());
        // Half the state space was expanded.
        let stats = search.statistics();
        assert_eq!(
            find_statistic(&stats, STAT_CLOSED_LIST).map(|s| s.value),
            Some(181_440)
        );
        assert_eq!(find_statistic(&stats, STAT_OPEN_LIST).map(|s| s.value), Some(0));
    }
}
