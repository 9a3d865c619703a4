//! Pathfinding over tile grids with wormhole shortcuts.
//!
//! This crate provides the search side of *wormpath*:
//!
//! - **Node indexing** of labelled tiles ([`find_first`], [`find_all`])
//! - **A\*** least-cost search ([`PathRange::astar`])
//! - **Route plotting** of explored nodes and paths ([`plot_routes`])
//! - **Wormhole routing**, racing teleport-assisted routes against the direct
//!   one ([`WormholeRouter`], [`best_route`])
//!
//! Searches run through [`PathRange`], which owns and reuses its per-cell
//! bookkeeping so that repeated queries on same-sized grids do not
//! reallocate it.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | heuristic estimate |
//!
//! [`TileGrid`](wormpath_core::TileGrid) implements all three.

mod astar;
mod distance;
mod index;
mod neighbors;
mod pathrange;
mod plot;
mod traits;
mod wormhole;

pub use distance::manhattan;
pub use index::{find_all, find_first};
pub use neighbors::cardinal;
pub use pathrange::{Ancestors, Node, NodeId, PathRange, Route, UNREACHABLE};
pub use plot::plot_routes;
pub use traits::{AstarPather, Pather, WeightedPather};
pub use wormhole::{
    ComputedRoute, Outcome, RouteStats, WormholeCandidate, WormholeRouter, best_route,
    wormhole_candidates,
};
