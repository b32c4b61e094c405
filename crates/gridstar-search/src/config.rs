/// Tunables for an [`AStarSearch`](crate::AStarSearch) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Maximum number of nodes the engine may allocate in one search.
    /// Reaching it ends the search with
    /// [`SearchStatus::OutOfMemory`](crate::SearchStatus::OutOfMemory).
    pub max_nodes: usize,
}

impl SearchConfig {
    /// Default node budget.
    pub const DEFAULT_MAX_NODES: usize = 65_536;

    /// Return a copy with a different node budget.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_nodes: Self::DEFAULT_MAX_NODES,
        }
    }
}
