use std::collections::BinaryHeap;

use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::config::SearchConfig;
use crate::node::{Node, NodeId, NodeStatus, OpenEntry};
use crate::traits::SearchState;

/// Lifecycle of an [`AStarSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No search is set up.
    Idle,
    /// The search has work left; call [`AStarSearch::step`] again.
    Searching,
    /// The goal was reached; the solution can be read back.
    Succeeded,
    /// The open set ran dry, or the search was cancelled.
    Failed,
    /// The node budget was reached before the goal.
    OutOfMemory,
}

impl SearchStatus {
    /// Whether further steps can change the status.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::OutOfMemory)
    }
}

/// Generic, step-wise A\* search.
///
/// Nodes live in an arena keyed by state, so looking up "the same state"
/// and following parent links are both index operations. The open set is a
/// binary heap with lazy deletion: when a cheaper path to an open or closed
/// state is found the node is updated in place and a fresh heap entry is
/// pushed, and older entries are skipped when popped.
///
/// Among open nodes with equal `f`, the one with the larger `g` is expanded
/// first; remaining ties go to the node queued earliest. The order is fully
/// deterministic for a deterministic [`SearchState`].
///
/// ```
/// # use gridstar_core::{Location, SpatialMap};
/// # use gridstar_search::{AStarSearch, GridState, SearchConfig, SearchStatus};
/// let map = SpatialMap::new(5, 5);
/// let mut search = AStarSearch::new(SearchConfig::default());
/// search.set_start_and_goal(
///     GridState::new(Location::new(0, 0), &map),
///     GridState::new(Location::new(2, 2), &map),
/// );
/// while search.step() == SearchStatus::Searching {}
/// assert_eq!(search.status(), SearchStatus::Succeeded);
/// assert_eq!(search.solution_cost(), Some(4.0));
/// ```
pub struct AStarSearch<S: SearchState> {
    config: SearchConfig,
    status: SearchStatus,
    nodes: IndexMap<S, Node>,
    open: BinaryHeap<OpenEntry>,
    open_len: usize,
    closed_len: usize,
    goal: Option<S>,
    solution: Option<NodeId>,
    steps: usize,
    expansions: usize,
    next_seq: u64,
    cancel_requested: bool,
    cancelled: bool,
    // scratch buffer reused across expansions
    successors: Vec<S>,
}

impl<S: SearchState> Default for AStarSearch<S> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: SearchState> AStarSearch<S> {
    /// Create an idle engine.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            status: SearchStatus::Idle,
            nodes: IndexMap::new(),
            open: BinaryHeap::new(),
            open_len: 0,
            closed_len: 0,
            goal: None,
            solution: None,
            steps: 0,
            expansions: 0,
            next_seq: 0,
            cancel_requested: false,
            cancelled: false,
            successors: Vec::with_capacity(8),
        }
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Discard any previous search and seed the open set with `start`.
    pub fn set_start_and_goal(&mut self, start: S, goal: S) {
        self.free_nodes();

        if self.config.max_nodes == 0 {
            warn!("node budget is zero, search cannot start");
            self.goal = Some(goal);
            self.status = SearchStatus::OutOfMemory;
            return;
        }

        let h = start.goal_distance_estimate(&goal);
        let seq = self.next_seq;
        self.next_seq += 1;
        let node = Node::new(0.0, h, None, seq);
        let f = node.f;
        let (id, _) = self.nodes.insert_full(start, node);
        self.open.push(OpenEntry { id, f, g: 0.0, seq });
        self.open_len = 1;
        self.goal = Some(goal);
        self.status = SearchStatus::Searching;
        debug!("search started, initial estimate {h}");
    }

    /// Advance the search by one expansion.
    ///
    /// Calling `step` on an idle or finished search is a no-op and is not
    /// counted.
    pub fn step(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Searching {
            return self.status;
        }
        self.steps += 1;

        if self.cancel_requested {
            self.cancel_requested = false;
            self.cancelled = true;
            self.status = SearchStatus::Failed;
            debug!("search cancelled after {} steps", self.steps);
            return self.status;
        }

        let Some(current) = self.pop_open() else {
            self.status = SearchStatus::Failed;
            debug!(
                "open set exhausted after {} steps, {} nodes closed",
                self.steps, self.closed_len
            );
            return self.status;
        };

        let Some(goal) = self.goal.as_ref() else {
            self.status = SearchStatus::Failed;
            return self.status;
        };
        let Some((state, node)) = self.nodes.get_index(current) else {
            self.status = SearchStatus::Failed;
            return self.status;
        };
        let state = state.clone();
        let current_g = node.g;
        let parent = node.parent;

        self.nodes[current].status = NodeStatus::Closed;
        self.closed_len += 1;

        if state.is_goal(goal) {
            self.solution = Some(current);
            self.status = SearchStatus::Succeeded;
            debug!(
                "goal reached after {} steps, cost {current_g}",
                self.steps
            );
            return self.status;
        }
        self.expansions += 1;

        let parent_state = parent
            .and_then(|p| self.nodes.get_index(p))
            .map(|(s, _)| s.clone());

        let mut successors = std::mem::take(&mut self.successors);
        successors.clear();
        if !state.successors(parent_state.as_ref(), &mut successors) {
            warn!("successor generation failed at step {}, treating state as a dead end", self.steps);
            successors.clear();
        }
        trace!(
            "step {}: expanded node {current} (g={current_g}), {} successors",
            self.steps,
            successors.len()
        );

        for s in successors.drain(..) {
            let g = current_g + state.cost(&s);

            if let Some(id) = self.nodes.get_index_of(&s) {
                let n = &mut self.nodes[id];
                // An equal-or-better path is already known.
                if n.g <= g {
                    continue;
                }
                if n.status == NodeStatus::Closed {
                    self.closed_len -= 1;
                    self.open_len += 1;
                }
                let seq = self.next_seq;
                self.next_seq += 1;
                n.relax(g, current, seq);
                self.open.push(OpenEntry {
                    id,
                    f: n.f,
                    g: n.g,
                    seq,
                });
                continue;
            }

            if self.nodes.len() >= self.config.max_nodes {
                warn!(
                    "node budget of {} exhausted after {} steps",
                    self.config.max_nodes, self.steps
                );
                self.status = SearchStatus::OutOfMemory;
                break;
            }

            let h = s.goal_distance_estimate(goal);
            let seq = self.next_seq;
            self.next_seq += 1;
            let node = Node::new(g, h, Some(current), seq);
            let f = node.f;
            let (id, _) = self.nodes.insert_full(s, node);
            self.open.push(OpenEntry { id, f, g, seq });
            self.open_len += 1;
        }
        self.successors = successors;

        self.status
    }

    /// Pop the best live entry off the heap, skipping stale ones.
    fn pop_open(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.open.pop() {
            let Some((_, node)) = self.nodes.get_index(entry.id) else {
                continue;
            };
            if node.status == NodeStatus::Open && node.seq == entry.seq {
                self.open_len -= 1;
                return Some(entry.id);
            }
        }
        None
    }

    /// Ask the search to stop. The next [`step`](Self::step) ends it with
    /// [`SearchStatus::Failed`].
    pub fn cancel(&mut self) {
        if self.status == SearchStatus::Searching {
            self.cancel_requested = true;
        }
    }

    /// Whether the last search ended because of [`cancel`](Self::cancel).
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Release every node and return to [`SearchStatus::Idle`].
    pub fn free_nodes(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.open_len = 0;
        self.closed_len = 0;
        self.goal = None;
        self.solution = None;
        self.steps = 0;
        self.expansions = 0;
        self.next_seq = 0;
        self.cancel_requested = false;
        self.cancelled = false;
        self.status = SearchStatus::Idle;
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Counted calls to [`step`](Self::step) since the search was set up.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Number of nodes whose successors were generated.
    #[inline]
    pub fn expansion_count(&self) -> usize {
        self.expansions
    }

    /// Number of nodes allocated in the arena.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes currently in the open set.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    /// Number of nodes currently in the closed set.
    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed_len
    }

    /// The goal of the current search.
    pub fn goal(&self) -> Option<&S> {
        self.goal.as_ref()
    }

    /// States in the open set, in allocation order.
    pub fn open_states(&self) -> impl Iterator<Item = &S> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.status == NodeStatus::Open)
            .map(|(s, _)| s)
    }

    /// States in the closed set, in allocation order.
    pub fn closed_states(&self) -> impl Iterator<Item = &S> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.status == NodeStatus::Closed)
            .map(|(s, _)| s)
    }

    /// Accumulated cost from the start to `state`, if the search has
    /// reached it.
    pub fn cost_to(&self, state: &S) -> Option<f32> {
        self.nodes.get(state).map(|n| n.g)
    }

    /// Walk the solution from start to goal. `None` unless the search
    /// succeeded.
    pub fn solution(&self) -> Option<Solution<'_, S>> {
        let goal = match self.status {
            SearchStatus::Succeeded => self.solution?,
            _ => return None,
        };
        let mut ids = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            // Parent links form a tree; the bound only guards corrupt input.
            if ids.len() > self.nodes.len() {
                return None;
            }
            ids.push(id);
            cur = self.nodes.get_index(id).and_then(|(_, n)| n.parent);
        }
        ids.reverse();
        Some(Solution {
            nodes: &self.nodes,
            ids: ids.into_iter(),
        })
    }

    /// Owned copy of the solution states, start to goal.
    pub fn solution_path(&self) -> Option<Vec<S>> {
        self.solution().map(|s| s.cloned().collect())
    }

    /// Total cost of the solution.
    pub fn solution_cost(&self) -> Option<f32> {
        match self.status {
            SearchStatus::Succeeded => self
                .solution
                .and_then(|id| self.nodes.get_index(id))
                .map(|(_, n)| n.g),
            _ => None,
        }
    }
}

/// Iterator over a solution, start to goal. Iterate with
/// [`rev`](Iterator::rev) for goal to start.
pub struct Solution<'a, S> {
    nodes: &'a IndexMap<S, Node>,
    ids: std::vec::IntoIter<NodeId>,
}

impl<'a, S> Iterator for Solution<'a, S> {
    type Item = &'a S;

    fn next(&mut self) -> Option<&'a S> {
        let id = self.ids.next()?;
        self.nodes.get_index(id).map(|(s, _)| s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<S> DoubleEndedIterator for Solution<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.ids.next_back()?;
        self.nodes.get_index(id).map(|(s, _)| s)
    }
}

impl<S> ExactSizeIterator for Solution<'_, S> {}
