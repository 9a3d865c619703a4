use std::collections::BinaryHeap;

use wormpath_core::Point;

use crate::PathRange;
use crate::pathrange::{Node, NodeId, OpenEntry, Route, Slot};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute a least-cost route from `from` to `to` using A*.
    ///
    /// The start node is seeded with `g = 0` and `h = f = initial_h`, which
    /// lets callers searching one leg of a longer trip keep the bias of the
    /// whole trip. Every other node uses `pather.estimate(node, to)`.
    ///
    /// Nodes are popped by lowest `f`; among equal `f` the one discovered
    /// first wins, and improving an open node's cost does not change its
    /// discovery rank.
    ///
    /// Returns `None` if `to` cannot be reached or either endpoint lies
    /// outside the current range.
    pub fn astar<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        initial_h: i32,
    ) -> Option<Route> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        self.searches += 1;
        let cur_gen = self.next_generation();

        let mut nodes = vec![Node {
            pos: from,
            g: 0,
            h: initial_h,
            f: initial_h,
            parent: None,
        }];
        self.slots[start_idx] = Slot {
            generation: cur_gen,
            node: 0,
            closed: false,
        };

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        open.push(OpenEntry {
            f: initial_h,
            node: 0,
            cell: start_idx,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };

            let ci = current.cell;
            let cn = nodes[current.node];

            // Skip entries superseded by a cheaper update or already closed.
            if self.slots[ci].closed || cn.f != current.f {
                continue;
            }

            if ci == goal_idx {
                break 'search Some(NodeId(current.node));
            }

            self.slots[ci].closed = true;
            expanded += 1;

            nbuf.clear();
            pather.neighbors(cn.pos, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let slot = self.slots[ni];
                let known = slot.generation == cur_gen;
                if known && slot.closed {
                    continue;
                }

                let tentative_g = cn.g.saturating_add(pather.cost(cn.pos, np));
                let h = pather.estimate(np, to);

                if known {
                    let n = &mut nodes[slot.node];
                    if tentative_g >= n.g {
                        continue;
                    }
                    n.g = tentative_g;
                    n.h = h;
                    n.f = tentative_g.saturating_add(h);
                    n.parent = Some(NodeId(current.node));
                    open.push(OpenEntry {
                        f: n.f,
                        node: slot.node,
                        cell: ni,
                    });
                } else {
                    let id = nodes.len();
                    let f = tentative_g.saturating_add(h);
                    nodes.push(Node {
                        pos: np,
                        g: tentative_g,
                        h,
                        f,
                        parent: Some(NodeId(current.node)),
                    });
                    self.slots[ni] = Slot {
                        generation: cur_gen,
                        node: id,
                        closed: false,
                    };
                    open.push(OpenEntry { f, node: id, cell: ni });
                }
            }
        };

        self.nbuf = nbuf;

        log::trace!(
            "astar {from} -> {to}: expanded {expanded}, discovered {}, found {}",
            nodes.len(),
            found.is_some()
        );

        found.map(|last| Route { nodes, last })
    }
}
