//! Cells of a plotted route grid.

use std::fmt;

/// A cell written by the route plotter onto a fresh grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Mark {
    #[default]
    Empty,
    /// Explored node, labelled with its estimated total cost `f`.
    Cost(i32),
    /// Cell on a reconstructed route.
    Route,
}

impl Mark {
    #[inline]
    pub const fn is_route(self) -> bool {
        matches!(self, Mark::Route)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => f.write_str("empty"),
            Mark::Cost(c) => write!(f, "{c}"),
            Mark::Route => f.write_str("route"),
        }
    }
}
