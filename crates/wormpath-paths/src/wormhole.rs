//! Wormhole route optimization.
//!
//! A wormhole trip walks from the start to an entrance, teleports for free to
//! an exit, and walks on to the target. [`WormholeRouter`] first searches the
//! direct route, then tries entrance/exit pairs in ascending order of their
//! obstacle-free estimate:
//!
//! - candidates whose estimate is not below the direct route's length are
//!   never searched, and neither is anything ranked after them;
//! - the first candidate whose real two-leg cost beats the direct route is
//!   returned as is, even if a later candidate would be cheaper still.

use std::fmt;
use std::time::{Duration, Instant};

use wormpath_core::{Grid, Mark, Point, Tile, TileGrid};

use crate::distance::manhattan;
use crate::index::{find_all, find_first};
use crate::pathrange::{Node, PathRange, UNREACHABLE};
use crate::plot::plot_routes;

/// An entrance/exit pairing ranked by its obstacle-free estimate.
///
/// `entrance.h` is the distance from the entrance back to the start,
/// `exit.h` the distance from the exit on to the target, and
/// `cost = entrance.f + exit.f`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WormholeCandidate {
    pub cost: i32,
    pub entrance: Node,
    pub exit: Node,
}

/// Every entrance × exit pair of `grid`, sorted by ascending estimate.
///
/// Pairs are enumerated entrance-major in scan order and the sort is stable,
/// so equal estimates keep that order. Empty if the grid lacks either
/// entrances or exits.
pub fn wormhole_candidates(
    grid: &TileGrid,
    start: &Node,
    target: &Node,
) -> Vec<WormholeCandidate> {
    let entrances = find_all(grid, &Tile::WormholeEntrance);
    let exits = find_all(grid, &Tile::WormholeExit);

    let mut candidates: Vec<WormholeCandidate> = entrances
        .iter()
        .flat_map(|entrance| {
            let entrance = estimated(entrance, start.pos);
            exits.iter().map(move |exit| {
                let exit = estimated(exit, target.pos);
                WormholeCandidate {
                    cost: entrance.f + exit.f,
                    entrance,
                    exit,
                }
            })
        })
        .collect();
    candidates.sort_by_key(|c| c.cost);
    candidates
}

fn estimated(node: &Node, toward: Point) -> Node {
    let h = manhattan(node.pos, toward);
    Node {
        g: 0,
        h,
        f: h,
        ..*node
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// How a [`ComputedRoute`] was obtained. `Display` gives the user-facing
/// message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The plain A* route, no wormhole involved.
    Direct,
    /// A route through `entrance` and `exit`. `saved` is the straight-line
    /// start/target distance minus the pair's estimate; it is negative when
    /// the wormhole is only worth it because the direct way is blocked.
    Wormhole {
        entrance: Point,
        exit: Point,
        saved: i32,
    },
    /// Neither a direct nor a wormhole route reaches the target.
    NoRoute,
    /// The grid has no start or no target tile.
    MissingEndpoints,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Direct => Ok(()),
            Outcome::Wormhole { saved, .. } if *saved > 0 => {
                write!(f, "Wormhole saved {saved} steps!")
            }
            Outcome::Wormhole { saved, .. } => write!(
                f,
                "Wormhole costs {} more steps, but normal route is blocked",
                saved.abs()
            ),
            Outcome::NoRoute => f.write_str("No route found!"),
            Outcome::MissingEndpoints => f.write_str("Start or target tile are missing"),
        }
    }
}

/// Work done by one [`WormholeRouter::route`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStats {
    /// Full A* searches run (the direct route plus two per evaluated pair).
    pub searches: usize,
    /// Entrance/exit pairs enumerated.
    pub candidates: usize,
    /// Pairs whose legs were actually searched.
    pub evaluated: usize,
    /// Pairs skipped because their estimate could not beat the best length.
    pub pruned: usize,
}

/// The answer handed back to the caller.
#[derive(Clone, Debug)]
pub struct ComputedRoute {
    /// Time spent computing the route.
    pub delta: Duration,
    /// Explored costs and route cells, same size as the input grid.
    pub path: Grid<Mark>,
    /// Human-readable outcome, empty for a direct route.
    pub message: String,
    /// Total route cost, or [`UNREACHABLE`].
    pub length: i32,
    pub outcome: Outcome,
    pub stats: RouteStats,
}

impl ComputedRoute {
    fn new(delta: Duration, path: Grid<Mark>, length: i32, outcome: Outcome) -> Self {
        Self {
            delta,
            path,
            message: outcome.to_string(),
            length,
            outcome,
            stats: RouteStats::default(),
        }
    }

    /// Whether the target can be reached at all.
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.length != UNREACHABLE
    }
}

// ---------------------------------------------------------------------------
// WormholeRouter
// ---------------------------------------------------------------------------

/// Finds routes on tile grids, reusing its search buffers between calls.
#[derive(Debug)]
pub struct WormholeRouter {
    paths: PathRange,
}

impl Default for WormholeRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl WormholeRouter {
    pub fn new() -> Self {
        Self {
            paths: PathRange::new(Default::default()),
        }
    }

    /// Total A* searches run by this router.
    pub fn searches(&self) -> usize {
        self.paths.searches()
    }

    /// Compute the route from the grid's `start` to its `target` tile.
    ///
    /// Only the first `start` and `target` in row-major order are used.
    pub fn route(&mut self, grid: &TileGrid) -> ComputedRoute {
        let started = Instant::now();
        let blank = Grid::like(grid);

        let (Some(start), Some(target)) = (
            find_first(grid, &Tile::Start),
            find_first(grid, &Tile::Target),
        ) else {
            log::debug!("route: start or target missing");
            return ComputedRoute::new(
                Duration::ZERO,
                blank,
                UNREACHABLE,
                Outcome::MissingEndpoints,
            );
        };

        if self.paths.range() != grid.bounds() {
            self.paths.set_range(grid.bounds());
        }
        let searches_before = self.paths.searches();

        let candidates = wormhole_candidates(grid, &start, &target);
        let default_cost = manhattan(start.pos, target.pos);

        let mut best = match self.paths.astar(grid, start.pos, target.pos, default_cost) {
            Some(direct) => {
                log::debug!(
                    "route {} -> {}: direct length {}",
                    start.pos,
                    target.pos,
                    direct.cost()
                );
                ComputedRoute::new(
                    started.elapsed(),
                    plot_routes(grid.size(), &[&direct]),
                    direct.cost(),
                    Outcome::Direct,
                )
            }
            None => {
                log::debug!("route {} -> {}: no direct route", start.pos, target.pos);
                ComputedRoute::new(started.elapsed(), blank, UNREACHABLE, Outcome::NoRoute)
            }
        };

        let mut stats = RouteStats {
            candidates: candidates.len(),
            ..RouteStats::default()
        };

        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.cost >= best.length {
                stats.pruned = candidates.len() - i;
                log::debug!(
                    "route: pruned {} candidates at estimate {} (best {})",
                    stats.pruned,
                    candidate.cost,
                    best.length
                );
                break;
            }

            stats.evaluated += 1;
            let (entrance, exit) = (candidate.entrance.pos, candidate.exit.pos);
            let to_entrance = self.paths.astar(grid, start.pos, entrance, default_cost);
            let from_exit = self.paths.astar(grid, exit, target.pos, default_cost);
            let (Some(to_entrance), Some(from_exit)) = (to_entrance, from_exit) else {
                log::debug!("route: wormhole {entrance} -> {exit} unreachable");
                continue;
            };

            let length = to_entrance.cost() + from_exit.cost();
            log::debug!(
                "route: wormhole {entrance} -> {exit} estimate {} length {length}",
                candidate.cost
            );
            if length < best.length {
                stats.searches = self.paths.searches() - searches_before;
                let outcome = Outcome::Wormhole {
                    entrance,
                    exit,
                    saved: default_cost - candidate.cost,
                };
                let mut route = ComputedRoute::new(
                    started.elapsed(),
                    plot_routes(grid.size(), &[&to_entrance, &from_exit]),
                    length,
                    outcome,
                );
                route.stats = stats;
                return route;
            }
        }

        stats.searches = self.paths.searches() - searches_before;
        best.stats = stats;
        best.delta = started.elapsed();
        best
    }
}

/// One-shot convenience wrapper around [`WormholeRouter::route`].
pub fn best_route(grid: &TileGrid) -> ComputedRoute {
    WormholeRouter::new().route(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(s: &str) -> TileGrid {
        TileGrid::parse(s).unwrap()
    }

    fn route_cells(r: &ComputedRoute) -> Vec<Point> {
        r.path
            .iter()
            .filter(|(_, m)| m.is_route())
            .map(|(p, _)| p)
            .collect()
    }

    #[test]
    fn open_grid_direct_route() {
        let g = grid(
            "
            S....
            .....
            .....
            .....
            ....T
            ",
        );
        let r = best_route(&g);
        assert_eq!(r.length, 8);
        assert_eq!(r.message, "");
        assert_eq!(r.outcome, Outcome::Direct);
        let cells = route_cells(&r);
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&Point::at(0, 0)));
        assert!(cells.contains(&Point::at(4, 4)));
        for &c in &cells {
            let links = cells.iter().filter(|&&o| manhattan(o, c) == 1).count();
            assert!(links >= 1, "{c} is disconnected");
        }
        assert_eq!(r.stats.searches, 1);
        assert_eq!(r.stats.candidates, 0);
    }

    #[test]
    fn missing_start() {
        let g = grid(
            "
            .....
            .....
            ....T
            ",
        );
        let r = best_route(&g);
        assert_eq!(r.length, UNREACHABLE);
        assert!(!r.is_reachable());
        assert_eq!(r.message, "Start or target tile are missing");
        assert_eq!(r.delta, Duration::ZERO);
        assert_eq!(r.path, Grid::<Mark>::new(5, 3));
        assert_eq!(r.stats, RouteStats::default());
    }

    #[test]
    fn missing_target() {
        let r = best_route(&grid("S.."));
        assert_eq!(r.outcome, Outcome::MissingEndpoints);
    }

    #[test]
    fn unreachable_target() {
        let r = best_route(&grid("S#T"));
        assert_eq!(r.message, "No route found!");
        assert_eq!(r.length, UNREACHABLE);
        assert_eq!(r.path, Grid::<Mark>::new(3, 1));
    }

    #[test]
    fn wormhole_beats_detour() {
        // The direct route has to go down to row 3 and back up: 12 steps.
        let g = grid(
            "
            SO.#.XT
            ...#...
            ...#...
            .......
            ",
        );
        let r = best_route(&g);
        // Straight-line 6, estimate 1 + 1.
        assert_eq!(r.message, "Wormhole saved 4 steps!");
        assert_eq!(
            r.outcome,
            Outcome::Wormhole {
                entrance: Point::at(0, 1),
                exit: Point::at(0, 5),
                saved: 4
            }
        );
        assert_eq!(r.length, 2);
        assert_eq!(
            route_cells(&r),
            vec![Point::at(0, 0), Point::at(0, 1), Point::at(0, 5), Point::at(0, 6)]
        );
        assert_eq!(r.stats.searches, 3);
        assert_eq!(r.stats.evaluated, 1);
    }

    #[test]
    fn wormhole_when_direct_is_blocked() {
        let g = grid(
            "
            .S.#.X.
            ...#.T.
            O..#...
            ",
        );
        let r = best_route(&g);
        // start (0,1) -> entrance (2,0): 3; exit (0,5) -> target (1,5): 1.
        assert_eq!(r.length, 4);
        // straight-line 5 vs estimate 3 + 1.
        assert_eq!(r.message, "Wormhole saved 1 steps!");

        let g = grid(
            "
            .S#X
            ..#T
            O.#.
            ",
        );
        let r = best_route(&g);
        // straight-line 3 vs estimate 3 + 1.
        assert_eq!(
            r.message,
            "Wormhole costs 1 more steps, but normal route is blocked"
        );
        assert_eq!(r.length, 4);
        assert!(r.is_reachable());
    }

    #[test]
    fn no_wormholes_matches_direct_search() {
        let g = grid(
            "
            S.:..
            .#:#.
            ..:.T
            ",
        );
        let r = best_route(&g);
        let (s, t) = (Point::at(0, 0), Point::at(2, 4));
        let direct = PathRange::new(g.bounds())
            .astar(&g, s, t, manhattan(s, t))
            .unwrap();
        assert_eq!(r.length, direct.cost());
        assert_eq!(r.path, plot_routes(g.size(), &[&direct]));
        assert_eq!(r.outcome, Outcome::Direct);
    }

    #[test]
    fn only_entrances_means_no_candidates() {
        let g = grid("SO.#O.T");
        assert!(
            wormhole_candidates(
                &g,
                &find_first(&g, &Tile::Start).unwrap(),
                &find_first(&g, &Tile::Target).unwrap()
            )
            .is_empty()
        );
        assert_eq!(best_route(&g).message, "No route found!");
    }

    #[test]
    fn candidates_sorted_by_estimate() {
        let g = grid(
            "
            S..O
            X...
            O..X
            ...T
            ",
        );
        let s = find_first(&g, &Tile::Start).unwrap();
        let t = find_first(&g, &Tile::Target).unwrap();
        let got: Vec<_> = wormhole_candidates(&g, &s, &t)
            .into_iter()
            .map(|c| (c.entrance.pos, c.exit.pos, c.cost))
            .collect();
        // Entrances (0,3) h=3 and (2,0) h=2; exits (1,0) h=5 and (2,3) h=1.
        assert_eq!(
            got,
            vec![
                (Point::at(2, 0), Point::at(2, 3), 3),
                (Point::at(0, 3), Point::at(2, 3), 4),
                (Point::at(2, 0), Point::at(1, 0), 7),
                (Point::at(0, 3), Point::at(1, 0), 8),
            ]
        );
        let c = wormhole_candidates(&g, &s, &t)[0];
        assert_eq!((c.entrance.g, c.entrance.h, c.entrance.f), (0, 2, 2));
        assert_eq!((c.exit.g, c.exit.h, c.exit.f), (0, 1, 1));
    }

    #[test]
    fn equal_estimates_keep_enumeration_order() {
        let g = grid(
            "
            OSO
            XTX
            ",
        );
        let s = find_first(&g, &Tile::Start).unwrap();
        let t = find_first(&g, &Tile::Target).unwrap();
        let got: Vec<_> = wormhole_candidates(&g, &s, &t)
            .into_iter()
            .map(|c| (c.entrance.pos, c.exit.pos, c.cost))
            .collect();
        let (e0, e1) = (Point::at(0, 0), Point::at(0, 2));
        let (x0, x1) = (Point::at(1, 0), Point::at(1, 2));
        assert_eq!(
            got,
            vec![(e0, x0, 2), (e0, x1, 2), (e1, x0, 2), (e1, x1, 2)]
        );
    }

    #[test]
    fn first_cheap_pair_short_circuits() {
        // Direct route is 12; the pair hugging both endpoints estimates 2
        // and wins before any other pair is looked at.
        let g = grid(
            "
            SO.....X
            ........
            ........
            ........
            ........
            O.....XT
            ",
        );
        let mut router = WormholeRouter::new();
        let r = router.route(&g);
        assert_eq!(r.stats.candidates, 4);
        assert_eq!(r.stats.evaluated, 1);
        assert_eq!(r.stats.pruned, 0);
        assert_eq!(r.stats.searches, 3);
        assert_eq!(r.length, 2);
        assert_eq!(router.searches(), 3);
    }

    #[test]
    fn pruning_skips_pairs_that_cannot_win() {
        // Direct route along the top row is 4. The best-ranked pair
        // (estimate 1 + 2) has to climb through gravel and really costs
        // 1 + 4, so it does not improve; every remaining pair estimates 5
        // or more and must never be searched.
        let g = grid(
            "
            SO..T.....
            ####:#####
            ....X.....
            O........X
            ",
        );
        let mut router = WormholeRouter::new();
        let r = router.route(&g);
        assert_eq!(r.outcome, Outcome::Direct);
        assert_eq!(r.message, "");
        assert_eq!(r.length, 4);
        assert_eq!(r.stats.candidates, 4);
        assert_eq!(r.stats.evaluated, 1);
        assert_eq!(r.stats.pruned, 3);
        // direct + two legs of the single evaluated pair
        assert_eq!(r.stats.searches, 3);
        assert_eq!(router.searches(), 3);
    }

    #[test]
    fn pruning_stops_before_any_search() {
        // The only pair estimates 2 + 6, not below the direct length of 2.
        let g = grid(
            "
            S.T....
            .......
            O.....X
            ",
        );
        let r = best_route(&g);
        assert_eq!(r.outcome, Outcome::Direct);
        assert_eq!(r.length, 2);
        assert_eq!(r.stats.candidates, 1);
        assert_eq!(r.stats.pruned, 1);
        assert_eq!(r.stats.evaluated, 0);
        assert_eq!(r.stats.searches, 1);
    }

    #[test]
    fn first_improvement_wins_over_cheaper_later_pair() {
        // The wall in column 6 makes the direct route impossible.
        // Left entrance (0,0): estimate 2 + 1, but the boulder forces a
        // walk through gravel, real cost 6 + 1.
        // Right entrance (0,5): estimate 3 + 1, real cost 3 + 1.
        let g = grid(
            "
            O#S..O#XT
            ..:...#..
            ",
        );
        let mut router = WormholeRouter::new();
        let r = router.route(&g);
        assert_eq!(r.length, 7);
        assert_eq!(
            r.outcome,
            Outcome::Wormhole {
                entrance: Point::at(0, 0),
                exit: Point::at(0, 7),
                saved: 3
            }
        );
        assert_eq!(r.message, "Wormhole saved 3 steps!");
        assert_eq!(r.stats.evaluated, 1);
        assert_eq!(r.stats.candidates, 2);

        // The later pair really is cheaper.
        let start = Point::at(0, 2);
        let mut pr = PathRange::new(g.bounds());
        let right = pr.astar(&g, start, Point::at(0, 5), 6).unwrap();
        let exit = pr.astar(&g, Point::at(0, 7), Point::at(0, 8), 6).unwrap();
        assert_eq!(right.cost() + exit.cost(), 4);
    }

    #[test]
    fn router_reuses_buffers_across_grid_sizes() {
        let mut router = WormholeRouter::new();
        let small = grid("S.T");
        let big = grid(
            "
            S....
            .###.
            ....T
            ",
        );
        assert_eq!(router.route(&small).length, 2);
        assert_eq!(router.route(&big).length, 6);
        assert_eq!(router.route(&small).length, 2);
        assert_eq!(router.searches(), 3);
    }
}
