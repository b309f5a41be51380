use std::collections::BinaryHeap;

use voxpath_core::{Extent3, Point3};

// ---------------------------------------------------------------------------
// Internal node for A* searches
// ---------------------------------------------------------------------------

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-cell search bookkeeping. Lives in a [`SearchSpace`], never on the
/// grid, so concurrent searches cannot observe each other's costs.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Node {
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g + self.h
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Reference into the node array, ordered for use in `BinaryHeap`:
/// lowest `f` first, then lowest `h`, then earliest pushed.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the best entry first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Reusable scratch state for A* over grids of one extent.
///
/// `SearchSpace` owns the node array, open list and neighbor buffer so that
/// repeated searches incur no allocations after the first use. Each worker
/// keeps its own; a space is never shared between concurrent searches.
pub struct SearchSpace {
    pub(crate) extent: Extent3,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: BinaryHeap<NodeRef>,
    pub(crate) seq: u64,
    pub(crate) nbuf: Vec<Point3>,
    pub(crate) expanded: usize,
}

impl SearchSpace {
    /// Create a space sized for grids of `extent`.
    pub fn new(extent: Extent3) -> Self {
        Self {
            extent,
            nodes: vec![Node::default(); extent.len()],
            generation: 0,
            open: BinaryHeap::new(),
            seq: 0,
            nbuf: Vec::with_capacity(26),
            expanded: 0,
        }
    }

    /// The extent the caches are laid out for.
    #[inline]
    pub fn extent(&self) -> Extent3 {
        self.extent
    }

    /// Re-layout the caches for another extent. A no-op when unchanged.
    pub fn prepare(&mut self, extent: Extent3) {
        if extent == self.extent {
            return;
        }
        self.extent = extent;
        self.nodes.clear();
        self.nodes.resize(extent.len(), Node::default());
        self.generation = 0;
    }

    /// Number of nodes closed by the last search.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Start a new search: bump the generation to lazily invalidate every
    /// node and clear the open list.
    pub(crate) fn begin(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale nodes could now look current.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.open.clear();
        self.seq = 0;
        self.expanded = 0;
        self.generation
    }

    /// Push a node onto the open list.
    #[inline]
    pub(crate) fn push_open(&mut self, idx: usize) {
        let n = &self.nodes[idx];
        let r = NodeRef {
            idx,
            f: n.f(),
            h: n.h,
            seq: self.seq,
        };
        self.seq += 1;
        self.open.push(r);
    }

    /// Follow parent links from `goal` back to `start` and return the path,
    /// start exclusive, goal inclusive.
    pub(crate) fn retrace(&self, start: usize, goal: usize) -> Vec<Point3> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != start && ci != NO_PARENT {
            path.push(self.extent.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ref_pops_lowest_f_then_lowest_h_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 30, h: 10, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 20, h: 10, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 20, h: 5, seq: 2 });
        heap.push(NodeRef { idx: 3, f: 20, h: 5, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|r| r.idx)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn prepare_relayouts_only_on_change() {
        let mut s = SearchSpace::new(Extent3::new(2, 2, 2));
        s.begin();
        s.prepare(Extent3::new(2, 2, 2));
        assert_eq!(s.generation, 1);
        s.prepare(Extent3::new(4, 1, 4));
        assert_eq!(s.nodes.len(), 16);
        assert_eq!(s.generation, 0);
    }

    #[test]
    fn generation_wrap_resets_nodes() {
        let mut s = SearchSpace::new(Extent3::new(2, 1, 1));
        s.generation = u32::MAX;
        s.nodes[1].generation = 1;
        let g = s.begin();
        assert_eq!(g, 1);
        assert_eq!(s.nodes[1].generation, 0);
    }
}
