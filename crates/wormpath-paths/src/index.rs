use wormpath_core::Grid;

use crate::pathrange::Node;

/// First cell equal to `cell` in row-major order, as a fresh search node.
pub fn find_first<T: PartialEq>(grid: &Grid<T>, cell: &T) -> Option<Node> {
    grid.iter()
        .find(|(_, c)| *c == cell)
        .map(|(p, _)| Node::seed(p))
}

/// Every cell equal to `cell`, in row-major order, as fresh search nodes.
pub fn find_all<T: PartialEq>(grid: &Grid<T>, cell: &T) -> Vec<Node> {
    grid.iter()
        .filter(|(_, c)| *c == cell)
        .map(|(p, _)| Node::seed(p))
        .collect()
}
