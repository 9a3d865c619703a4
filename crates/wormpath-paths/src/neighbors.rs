use wormpath_core::{Point, Range};

/// In-bounds 4-directional neighbors of `p`, in the order up, down, left,
/// right.
///
/// Only the bounds are checked; every row of the grid behind `bounds` is
/// assumed to be `bounds.width()` long.
pub fn cardinal(p: Point, bounds: Range) -> impl Iterator<Item = Point> {
    p.neighbors_4().into_iter().filter(move |&n| bounds.contains(n))
}
