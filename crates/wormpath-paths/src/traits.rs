use wormpath_core::{Point, Tile, TileGrid};

use crate::distance::manhattan;
use crate::neighbors::cardinal;
use crate::pathrange::UNREACHABLE;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with a heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    fn estimate(&self, from: Point, to: Point) -> i32;
}

// Boulders are never offered as neighbors; every other tile is entered at
// its own traversal cost.

impl Pather for TileGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(
            cardinal(p, self.bounds()).filter(|&n| self.at(n).is_some_and(Tile::is_passable)),
        );
    }
}

impl WeightedPather for TileGrid {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.at(to).and_then(Tile::cost).unwrap_or(UNREACHABLE)
    }
}

impl AstarPather for TileGrid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
