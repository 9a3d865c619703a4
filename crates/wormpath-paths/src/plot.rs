use wormpath_core::{Grid, Mark, Point};

use crate::pathrange::Route;

/// Render routes onto a fresh `size` grid.
///
/// Every explored node of every route is stamped with its `f` first; then
/// each route's parent chain is overwritten with [`Mark::Route`]. Several
/// routes (e.g. the two legs of a wormhole trip) end up on one grid.
pub fn plot_routes(size: Point, routes: &[&Route]) -> Grid<Mark> {
    let mut grid = Grid::new(size.x, size.y);
    for node in routes.iter().flat_map(|r| r.explored()) {
        grid.set(node.pos, Mark::Cost(node.f));
    }
    for route in routes {
        for node in route.ancestors() {
            grid.set(node.pos, Mark::Route);
        }
    }
    grid
}
