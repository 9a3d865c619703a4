//! Random tile grid generation.
//!
//! The layout recipe scatters a random number of each feature at random
//! cells, later features overwriting earlier ones:
//!
//! 1. `r * r` boulders, then `r * r` gravel cells;
//! 2. `r` wormhole entrances, then `r` wormhole exits;
//! 3. one `start` and one `target`, on distinct cells.
//!
//! Each `r` is an independent roll in `0..side`, where `side` is the longer
//! grid dimension.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wormpath_core::{Point, Tile, TileGrid};

/// Parameters for [`TileGen`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenConfig {
    /// Columns. At least 2 are always generated.
    pub width: i32,
    /// Rows. At least 1 is always generated.
    pub height: i32,
    /// Scatter impassable boulders.
    pub boulders: bool,
    /// Scatter costly gravel.
    pub gravel: bool,
    /// Scatter wormhole entrances and exits.
    pub wormholes: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            boulders: true,
            gravel: true,
            wormholes: true,
        }
    }
}

impl GenConfig {
    /// A square `size` × `size` configuration with every feature enabled.
    pub fn square(size: i32) -> Self {
        Self {
            width: size,
            height: size,
            ..Self::default()
        }
    }
}

/// Tile grid generator driven by a caller-supplied random source.
pub struct TileGen<R: Rng> {
    pub rng: R,
    pub config: GenConfig,
}

impl TileGen<StdRng> {
    /// A generator whose output is fully determined by `seed`.
    pub fn seeded(config: GenConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TileGen<R> {
    /// Create a new generator.
    pub fn new(config: GenConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Generate a fresh grid with exactly one start and one target tile.
    pub fn generate(&mut self) -> TileGrid {
        let size = Point::new(self.config.width.max(2), self.config.height.max(1));
        let side = size.x.max(size.y);
        let mut grid = TileGrid::new(size.x, size.y);

        if self.config.boulders {
            let n = area(self.roll(side), self.roll(side));
            self.scatter(&mut grid, Tile::Boulder, n);
        }
        if self.config.gravel {
            let n = area(self.roll(side), self.roll(side));
            self.scatter(&mut grid, Tile::Gravel, n);
        }
        if self.config.wormholes {
            let n = self.roll(side) as usize;
            self.scatter(&mut grid, Tile::WormholeEntrance, n);
            let n = self.roll(side) as usize;
            self.scatter(&mut grid, Tile::WormholeExit, n);
        }

        let start = self.random_point(size);
        grid.set(start, Tile::Start);
        let target = loop {
            let p = self.random_point(size);
            if p != start {
                break p;
            }
        };
        grid.set(target, Tile::Target);

        log::debug!(
            "generated {}x{} grid: {} boulders, {} gravel, {} entrances, {} exits, start {start}, target {target}",
            size.x,
            size.y,
            grid.count(&Tile::Boulder),
            grid.count(&Tile::Gravel),
            grid.count(&Tile::WormholeEntrance),
            grid.count(&Tile::WormholeExit),
        );

        grid
    }

    fn roll(&mut self, side: i32) -> i32 {
        self.rng.random_range(0..side)
    }

    fn random_point(&mut self, size: Point) -> Point {
        let row = self.rng.random_range(0..size.y);
        let col = self.rng.random_range(0..size.x);
        Point::at(row, col)
    }

    fn scatter(&mut self, grid: &mut TileGrid, tile: Tile, count: usize) {
        let size = grid.size();
        for _ in 0..count {
            let p = self.random_point(size);
            grid.set(p, tile);
        }
    }
}

/// Product of two rolls, computed without `i32` overflow.
fn area(a: i32, b: i32) -> usize {
    a.max(0) as usize * b.max(0) as usize
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = GenConfig::square(12);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GenConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
