use std::cmp::Ordering;

/// Handle of a node in the engine's arena.
pub(crate) type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeStatus {
    Open,
    Closed,
}

/// Per-state bookkeeping. The state itself is the arena key.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) f: f32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) status: NodeStatus,
    /// Sequence number of the newest open-set entry for this node. Older
    /// entries still sitting in the heap are stale.
    pub(crate) seq: u64,
}

impl Node {
    pub(crate) fn new(g: f32, h: f32, parent: Option<NodeId>, seq: u64) -> Self {
        Self {
            g,
            h,
            f: g + h,
            parent,
            status: NodeStatus::Open,
            seq,
        }
    }

    /// Re-parent onto a cheaper path and reopen.
    pub(crate) fn relax(&mut self, g: f32, parent: NodeId, seq: u64) {
        self.g = g;
        self.f = g + self.h;
        self.parent = Some(parent);
        self.status = NodeStatus::Open;
        self.seq = seq;
    }
}

/// Open-set entry, ordered for use in a max-`BinaryHeap`.
///
/// The entry that compares greatest is expanded first: lowest `f`, then
/// highest `g` (the node nearer the goal), then lowest `seq` (inserted
/// earliest).
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) id: NodeId,
    pub(crate) f: f32,
    pub(crate) g: f32,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}
