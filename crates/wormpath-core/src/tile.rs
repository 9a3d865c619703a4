//! The [`Tile`] label carried by every grid cell.
//!
//! Traversal properties are queried via methods rather than stored, so tile
//! semantics live in one place.

use std::fmt;
use std::str::FromStr;

/// A labeled grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Tile {
    #[default]
    Empty,
    Boulder,
    Gravel,
    Start,
    Target,
    WormholeEntrance,
    WormholeExit,
}

impl Tile {
    /// Every tile variant, in declaration order.
    pub const ALL: [Tile; 7] = [
        Tile::Empty,
        Tile::Boulder,
        Tile::Gravel,
        Tile::Start,
        Tile::Target,
        Tile::WormholeEntrance,
        Tile::WormholeExit,
    ];

    /// Cost of stepping onto this tile, or `None` if it is impassable.
    #[inline]
    pub const fn cost(self) -> Option<i32> {
        match self {
            Tile::Boulder => None,
            Tile::Gravel => Some(3),
            _ => Some(1),
        }
    }

    /// Can a route occupy this tile?
    #[inline]
    pub const fn is_passable(self) -> bool {
        self.cost().is_some()
    }

    /// Textual label, e.g. `"wormholeEntrance"`.
    pub const fn label(self) -> &'static str {
        match self {
            Tile::Empty => "empty",
            Tile::Boulder => "boulder",
            Tile::Gravel => "gravel",
            Tile::Start => "start",
            Tile::Target => "target",
            Tile::WormholeEntrance => "wormholeEntrance",
            Tile::WormholeExit => "wormholeExit",
        }
    }

    /// Single-character glyph used by text grids.
    pub const fn glyph(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Boulder => '#',
            Tile::Gravel => ':',
            Tile::Start => 'S',
            Tile::Target => 'T',
            Tile::WormholeEntrance => 'O',
            Tile::WormholeExit => 'X',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub fn from_glyph(ch: char) -> Option<Tile> {
        Tile::ALL.into_iter().find(|t| t.glyph() == ch)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tile {
    type Err = ParseTileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tile::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| ParseTileError(s.to_string()))
    }
}

/// Returned when a string is not a known tile label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTileError(pub String);

impl fmt::Display for ParseTileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tile label \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseTileError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_camel_case_label() {
        let json = serde_json::to_string(&Tile::WormholeEntrance).unwrap();
        assert_eq!(json, "\"wormholeEntrance\"");
        let back: Tile = serde_json::from_str("\"gravel\"").unwrap();
        assert_eq!(back, Tile::Gravel);
    }
}
