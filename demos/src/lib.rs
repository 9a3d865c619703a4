//! Shared code for the wormpath demo binaries.

use std::fmt::{self, Write as _};
use std::num::ParseIntError;

use crossterm::style::Stylize;
use wormpath_core::{Grid, Mark, Tile, TileGrid};
use wormpath_gen::{GenConfig, TileGen};
use wormpath_paths::{ComputedRoute, WormholeRouter};

/// Grid size used when none is given.
pub const DEFAULT_SIZE: i32 = 12;

/// Largest accepted grid size.
pub const MAX_SIZE: i32 = 512;

/// Command-line options of the `route` demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub seed: u64,
    pub size: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 0,
            size: DEFAULT_SIZE,
        }
    }
}

impl Options {
    /// Parse positional `[seed] [size]` arguments.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ArgError> {
        let mut opts = Self::default();
        if let Some(seed) = args.next() {
            opts.seed = seed.parse().map_err(|e| ArgError::Seed(seed, e))?;
        }
        if let Some(size) = args.next() {
            opts.size = size.parse().map_err(|e| ArgError::Size(size.clone(), e))?;
            if opts.size < 2 {
                return Err(ArgError::TooSmall(opts.size));
            }
            if opts.size > MAX_SIZE {
                return Err(ArgError::TooLarge(opts.size));
            }
        }
        if let Some(extra) = args.next() {
            return Err(ArgError::Unexpected(extra));
        }
        Ok(opts)
    }
}

/// Errors from [`Options::from_args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    Seed(String, ParseIntError),
    Size(String, ParseIntError),
    TooSmall(i32),
    TooLarge(i32),
    Unexpected(String),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seed(s, e) => write!(f, "invalid seed \u{201c}{s}\u{201d}: {e}"),
            Self::Size(s, e) => write!(f, "invalid size \u{201c}{s}\u{201d}: {e}"),
            Self::TooSmall(n) => write!(f, "size must be at least 2, got {n}"),
            Self::TooLarge(n) => write!(f, "size must be at most {MAX_SIZE}, got {n}"),
            Self::Unexpected(s) => write!(f, "unexpected argument \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for ArgError {}

/// Generate the grid for `opts`, route through it and render a report.
pub fn run(opts: &Options, color: bool) -> String {
    let grid = TileGen::seeded(GenConfig::square(opts.size), opts.seed).generate();
    let route = WormholeRouter::new().route(&grid);
    log::info!(
        "seed {} size {}: length {} in {:?}",
        opts.seed,
        opts.size,
        route.length,
        route.delta
    );
    report(&grid, &route, color)
}

/// Render the grid with the route overlaid, followed by a summary.
pub fn report(grid: &TileGrid, route: &ComputedRoute, color: bool) -> String {
    let mut out = render(grid, &route.path, color);
    if route.is_reachable() {
        let _ = writeln!(out, "length: {}", route.length);
    } else {
        let _ = writeln!(out, "length: unreachable");
    }
    if !route.message.is_empty() {
        let _ = writeln!(out, "{}", route.message);
    }
    let _ = writeln!(
        out,
        "searches: {}, wormhole pairs: {} ({} evaluated, {} pruned), {:?}",
        route.stats.searches,
        route.stats.candidates,
        route.stats.evaluated,
        route.stats.pruned,
        route.delta
    );
    out
}

/// Render one line per row. Route cells that sit on plain ground are shown
/// as `*`; every other cell shows its tile glyph.
pub fn render(grid: &TileGrid, plot: &Grid<Mark>, color: bool) -> String {
    let mut out = String::new();
    for (p, tile) in grid.iter() {
        let mark = plot.at(p).unwrap_or_default();
        let glyph = match (tile, mark) {
            (Tile::Empty | Tile::Gravel, Mark::Route) => '*',
            _ => tile.glyph(),
        };
        if color {
            let _ = match (tile, mark) {
                (_, Mark::Route) => write!(out, "{}", glyph.green().bold()),
                (Tile::Boulder, _) => write!(out, "{}", glyph.dark_grey()),
                (Tile::WormholeEntrance | Tile::WormholeExit, _) => {
                    write!(out, "{}", glyph.magenta())
                }
                (_, Mark::Cost(_)) => write!(out, "{}", glyph.yellow()),
                _ => write!(out, "{glyph}"),
            };
        } else {
            out.push(glyph);
        }
        if p.col() == grid.width() - 1 {
            out.push('\n');
        }
    }
    out
}
