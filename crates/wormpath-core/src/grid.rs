//! The [`Grid`] type — a rectangular, row-major 2D grid.
//!
//! Unlike a shared view, a `Grid` owns its cells: cloning copies them, and
//! search code only ever borrows a grid immutably. Rows must all have the
//! same width; [`Grid::from_rows`], [`Grid::from_cells`] and [`Grid::parse`]
//! reject ragged input instead of padding it. Deserialized grids go through
//! the same check.

use std::fmt;

use crate::geom::{Point, Range};
use crate::tile::Tile;

/// Grid of tile labels, the input to every search.
pub type TileGrid = Grid<Tile>;

/// A rectangular 2D grid of `T`, indexed `[row][col]` through [`Point`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawGrid<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a new grid filled with `T::default()`.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Create a new grid with every cell set to `cell`.
    pub fn filled(width: i32, height: i32, cell: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![cell; (width as usize).saturating_mul(height as usize)],
            width,
            height,
        }
    }

    /// A default-filled grid with the same dimensions as `other`.
    pub fn like<U>(other: &Grid<U>) -> Self {
        Self::new(other.width, other.height)
    }

    /// Build a grid from rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            cells,
            width: width as i32,
            height: height as i32,
        })
    }
}

impl<T> Grid<T> {
    /// Build a grid from row-major `cells`. The cell count must be exactly
    /// `width * height`.
    pub fn from_cells(cells: Vec<T>, width: i32, height: i32) -> Result<Self, GridError> {
        let expected = if width < 0 || height < 0 {
            None
        } else {
            (width as usize).checked_mul(height as usize)
        };
        if expected != Some(cells.len()) {
            return Err(GridError::Size {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// The bounding range of this grid, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::sized(self.width, self.height)
    }

    /// Size of the grid as a `Point` (x = columns, y = rows).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside this grid's bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Borrow the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cell: T) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Row `y` as a slice, or `None` if out of bounds.
    pub fn row(&self, y: i32) -> Option<&[T]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on zero, and a zero-width grid has no cells anyway.
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.bounds().iter().zip(self.cells.iter())
    }
}

impl<T: Copy> Grid<T> {
    /// Copy of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        self.get(p).copied()
    }
}

impl<T: PartialEq> Grid<T> {
    /// Count how many cells equal `cell`.
    pub fn count(&self, cell: &T) -> usize {
        self.cells.iter().filter(|c| *c == cell).count()
    }
}

impl<T> Grid<T> {
    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, &T) -> bool) -> usize {
        self.iter().filter(|&(p, c)| f(p, c)).count()
    }
}

impl Grid<Tile> {
    /// Parse a text grid, one line per row, one [`Tile::glyph`] per cell.
    ///
    /// Leading and trailing whitespace around the whole text is trimmed, as
    /// is indentation of individual lines.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (y, line) in s.trim().lines().enumerate() {
            let row = line
                .trim()
                .chars()
                .enumerate()
                .map(|(x, ch)| {
                    Tile::from_glyph(ch).ok_or(GridError::InvalidGlyph {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid<Tile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for t in row {
                write!(f, "{}", t.glyph())?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A text grid contained a character that is not a tile glyph.
    InvalidGlyph { ch: char, pos: Point },
    /// The cell count does not match the stated dimensions.
    Size { width: i32, height: i32, cells: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "grid contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::Size {
                width,
                height,
                cells,
            } => write!(f, "grid: {cells} cells do not fill {width}x{height}"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, GridError> {
        Self::from_cells(raw.cells, raw.width, raw.height)
    }
}
