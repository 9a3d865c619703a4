//! Random tile grid generation for wormpath.
//!
//! Produces grids that always satisfy the search's structural requirements:
//! exactly one `start` and one `target` tile.

pub mod tilegen;

pub use tilegen::{GenConfig, TileGen};
