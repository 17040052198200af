//! Informed search over a priority-queue frontier, specialized as greedy
//! best-first search and A*.

use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap, HashSet},
    rc::Rc,
};

use crate::{
    Result,
    identifiers::BoardKey,
    puzzle::{HeuristicKind, PuzzleState},
    search::{
        AugmentedState, Discovery, STAT_CLOSED_LIST, STAT_OPEN_LIST, SearchAlgorithm,
    },
    types::{NodeKind, Statistic},
};

/// How the f-score of a frontier entry is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformedVariant {
    /// `f = h(state, goal)`; ignores path cost.
    Greedy,
    /// `f = depth(state) + h(state, goal)`.
    AStar,
}

impl InformedVariant {
    fn f_score(self, state: &PuzzleState, h: u32) -> u32 {
        match self {
            InformedVariant::Greedy => h,
            InformedVariant::AStar => state.depth() + h,
        }
    }
}

/// Frontier entry. Lower f-scores dequeue first; ties break on the strictly
/// increasing discovery nonce so traversal order is deterministic regardless
/// of heap internals.
struct OpenEntry {
    f: u32,
    nonce: u64,
    state: Rc<PuzzleState>,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.nonce == other.nonce
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f).then(self.nonce.cmp(&other.nonce))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shared base for the informed strategies.
///
/// A board reachable via several paths may have several live frontier
/// entries at once. When the first of them is dequeued, the others are
/// soft-deleted (retired by nonce, skipped on later dequeues) and reported
/// through the batch's `explored` list. Rediscovering a closed board is
/// reported `Repeat` and not enqueued. The goal test happens at dequeue time
/// and the goal dequeue does not count as an expansion.
pub struct InformedSearch {
    variant: InformedVariant,
    heuristic: HeuristicKind,
    heap: BinaryHeap<Reverse<OpenEntry>>,
    open_entries: HashMap<BoardKey, Vec<(u64, Rc<PuzzleState>)>>,
    retired: HashSet<u64>,
    open_len: usize,
    closed: HashSet<BoardKey>,
    goal: Rc<PuzzleState>,
    next_nonce: u64,
    goal_found: bool,
    exhausted: bool,
    discoveries: Vec<Discovery>,
}

impl InformedSearch {
    pub fn new(
        initial: Rc<PuzzleState>,
        goal: Rc<PuzzleState>,
        variant: InformedVariant,
        heuristic: HeuristicKind,
    ) -> Self {
        let mut search = Self {
            variant,
            heuristic,
            heap: BinaryHeap::new(),
            open_entries: HashMap::new(),
            retired: HashSet::new(),
            open_len: 0,
            closed: HashSet::new(),
            goal,
            next_nonce: 0,
            goal_found: false,
            exhausted: false,
            discoveries: Vec::new(),
        };

        let kind = if initial.same_board(&search.goal) {
            search.goal_found = true;
            NodeKind::Goal
        } else {
            let h = heuristic.evaluate(&initial, &search.goal);
            initial.set_heuristic_value(Some(h));
            let f = variant.f_score(&initial, h);
            search.enqueue(Rc::clone(&initial), f);
            NodeKind::Normal
        };
        search.discoveries.push(Discovery::initial(initial, kind));
        search
    }

    fn enqueue(&mut self, state: Rc<PuzzleState>, f: u32) {
        let nonce = self.next_nonce;
        self.next_nonce += 1;
        self.open_entries
            .entry(state.board_key())
            .or_default()
            .push((nonce, Rc::clone(&state)));
        self.heap.push(Reverse(OpenEntry { f, nonce, state }));
        self.open_len += 1;
    }

    /// Pop the best live entry, retiring every other open entry that shares
    /// its board. Returns the dequeued state and the retired states.
    fn dequeue(&mut self) -> Option<(Rc<PuzzleState>, Vec<Rc<PuzzleState>>)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.retired.remove(&entry.nonce) {
                continue;
            }
            self.open_len -= 1;
            let mut retired_states = Vec::new();
            if let Some(duplicates) = self.open_entries.remove(entry.state.board_key().as_str())
            {
                for (nonce, state) in duplicates {
                    if nonce == entry.nonce {
                        continue;
                    }
                    self.retired.insert(nonce);
                    self.open_len -= 1;
                    retired_states.push(state);
                }
            }
            return Some((entry.state, retired_states));
        }
        None
    }
}

impl SearchAlgorithm for InformedSearch {
    fn iterate(&mut self) -> Result<bool> {
        if self.goal_found {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }

        let Some((state, retired)) = self.dequeue() else {
            self.exhausted = true;
            return Ok(false);
        };

        if state.same_board(&self.goal) {
            self.goal_found = true;
            let mut batch = Discovery::reclassification(state, NodeKind::Goal);
            batch.explored = retired;
            self.discoveries.push(batch);
            return Ok(true);
        }

        self.closed.insert(state.board_key());
        let mut augmented = Vec::new();
        for successor in state.successors()? {
            let h = self.heuristic.evaluate(&successor, &self.goal);
            successor.set_heuristic_value(Some(h));
            if self.closed.contains(successor.board_key().as_str()) {
                augmented.push(AugmentedState::new(successor, NodeKind::Repeat));
            } else {
                let f = self.variant.f_score(&successor, h);
                self.enqueue(Rc::clone(&successor), f);
                augmented.push(AugmentedState::new(successor, NodeKind::Normal));
            }
        }
        let mut batch = Discovery::expansion(augmented, state);
        batch.explored = retired;
        self.discoveries.push(batch);
        Ok(false)
    }

    fn statistics(&self) -> Vec<Statistic> {
        vec![
            Statistic::new(STAT_OPEN_LIST, self.open_len),
            Statistic::new(STAT_CLOSED_LIST, self.closed.len()),
        ]
    }

    fn peek(&mut self) -> Option<Rc<PuzzleState>> {
        while let Some(Reverse(head)) = self.heap.peek() {
            if !self.retired.contains(&head.nonce) {
                return Some(Rc::clone(&head.state));
            }
            let nonce = head.nonce;
            self.heap.pop();
            self.retired.remove(&nonce);
        }
        None
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
