//! **wormpath-core** — Tile grid model for wormhole-aware pathfinding.
//!
//! This crate provides the foundational types shared by the *wormpath*
//! crates: geometry primitives, tile labels, a rectangular generic grid and
//! the marks written by the route plotter.

pub mod geom;
pub mod grid;
pub mod mark;
pub mod tile;

pub use geom::{Point, Range, RangeIter};
pub use grid::{Grid, GridError, TileGrid};
pub use mark::Mark;
pub use tile::{ParseTileError, Tile};
