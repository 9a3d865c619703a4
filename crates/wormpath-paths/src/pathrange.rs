use wormpath_core::{Point, Range};

/// Sentinel cost meaning "unreachable" (an infinite route length).
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Search nodes
// ---------------------------------------------------------------------------

/// Handle of a [`Node`] inside the arena of the [`Route`] that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A search state: position, cost so far `g`, heuristic `h`, and `f = g + h`.
///
/// `parent` points at the node this one was reached from; following it
/// always ends at the search's start node, whose parent is `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub pos: Point,
    pub g: i32,
    pub h: i32,
    pub f: i32,
    pub parent: Option<NodeId>,
}

impl Node {
    /// A node at `pos` with zero costs and no parent.
    #[inline]
    pub const fn seed(pos: Point) -> Self {
        Self {
            pos,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
        }
    }
}

/// Outcome of a successful search.
///
/// Owns every node created by the search, in discovery order. Index 0 is the
/// start node; the rest were admitted while expanding the frontier.
#[derive(Clone, Debug)]
pub struct Route {
    pub(crate) nodes: Vec<Node>,
    pub(crate) last: NodeId,
}

impl Route {
    /// The node that reached the target.
    #[inline]
    pub fn last(&self) -> &Node {
        &self.nodes[self.last.0]
    }

    /// Total route cost, i.e. the final node's `f`.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.last().f
    }

    /// The seeded start node.
    #[inline]
    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    /// Look up a node by handle.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Every node admitted to the frontier during the search, in discovery
    /// order. The start node is not included.
    #[inline]
    pub fn explored(&self) -> &[Node] {
        &self.nodes[1..]
    }

    /// Walk parent links from the last node back to the start.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            route: self,
            next: Some(self.last),
        }
    }

    /// Positions from start to target, both inclusive.
    pub fn path(&self) -> Vec<Point> {
        let mut path: Vec<Point> = self.ancestors().map(|n| n.pos).collect();
        path.reverse();
        path
    }
}

/// Iterator over a [`Route`]'s nodes from the last node back to the start.
pub struct Ancestors<'a> {
    route: &'a Route,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.route.node(self.next?);
        self.next = node.parent;
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Open-set entries
// ---------------------------------------------------------------------------

/// Open-set entry, ordered by `f` then discovery order for use in
/// `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) f: i32,
    pub(crate) node: usize,
    pub(crate) cell: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and the
        // earliest-discovered node among equal f.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-cell bookkeeping, valid only when `generation` matches the current
/// search.
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: usize,
    pub(crate) closed: bool,
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for searches on a grid rectangle.
///
/// `PathRange` owns the per-cell open/closed bookkeeping so that repeated
/// queries reuse it; a generation counter invalidates the previous search's
/// entries in O(1). Each search still returns its own freshly built
/// [`Route`].
#[derive(Debug)]
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) slots: Vec<Slot>,
    pub(crate) generation: u32,
    pub(crate) searches: usize,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            slots: vec![Slot::default(); rng.len()],
            generation: 0,
            searches: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range.
    ///
    /// If the new size fits within existing capacity the slots are kept and
    /// only the generation is bumped; otherwise they are reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        if new_len <= self.slots.len() {
            self.next_generation();
            return;
        }

        self.slots.clear();
        self.slots.resize(new_len, Slot::default());
        self.generation = 0;
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of searches run since construction.
    #[inline]
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Start a new generation, never handing out 0 (the slots' default).
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.slots.fill(Slot::default());
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Route {
        let a = Point::at(0, 0);
        let b = Point::at(0, 1);
        let c = Point::at(1, 1);
        Route {
            nodes: vec![
                Node {
                    pos: a,
                    g: 0,
                    h: 2,
                    f: 2,
                    parent: None,
                },
                Node {
                    pos: b,
                    g: 1,
                    h: 1,
                    f: 2,
                    parent: Some(NodeId(0)),
                },
                Node {
                    pos: Point::at(1, 0),
                    g: 1,
                    h: 1,
                    f: 2,
                    parent: Some(NodeId(0)),
                },
                Node {
                    pos: c,
                    g: 2,
                    h: 0,
                    f: 2,
                    parent: Some(NodeId(1)),
                },
            ],
            last: NodeId(3),
        }
    }

    #[test]
    fn route_path_walks_parents() {
        let r = chain();
        assert_eq!(r.path(), vec![Point::at(0, 0), Point::at(0, 1), Point::at(1, 1)]);
        assert_eq!(r.cost(), 2);
        assert_eq!(r.explored().len(), 3);
        assert_eq!(r.start().pos, Point::at(0, 0));
        assert_eq!(r.ancestors().count(), 3);
    }

    #[test]
    fn open_entry_pops_lowest_f_then_oldest() {
        use std::collections::BinaryHeap;
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f: 5, node: 1, cell: 0 });
        heap.push(OpenEntry { f: 4, node: 3, cell: 0 });
        heap.push(OpenEntry { f: 4, node: 2, cell: 0 });
        heap.push(OpenEntry { f: 5, node: 0, cell: 0 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.node).collect();
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = PathRange::new(Range::sized(20, 20));
        let cap_before = pr.slots.len();

        let small = Range::sized(5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.slots.len(), cap_before);
        assert_eq!(pr.width, 5);
        assert!(pr.generation > 0);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = PathRange::new(Range::sized(5, 5));
        pr.set_range(Range::sized(20, 20));
        assert_eq!(pr.slots.len(), 400);
        assert_eq!(pr.generation, 0);
    }

    #[test]
    fn generation_wrap_resets_slots() {
        let mut pr = PathRange::new(Range::sized(2, 2));
        pr.slots[1] = Slot {
            generation: u32::MAX,
            node: 7,
            closed: true,
        };
        pr.generation = u32::MAX;
        assert_eq!(pr.next_generation(), 1);
        assert_eq!(pr.slots[1].generation, 0);
        assert!(!pr.slots[1].closed);
    }
}
