//! # room_pathfinding
//!
//! Finds shortest paths between rooms placed on a square grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is restricted to the four
//! cardinal directions at unit cost and every cell is walkable, so the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) is both the heuristic and
//! the length of every shortest path.
//!
//! ```
//! use room_pathfinding::{AstarSolver, GridSolver, Room, RoomGrid};
//!
//! let mut grid = RoomGrid::new(5).unwrap();
//! grid.place_rooms([Room::new(1, 1, 2), Room::new(2, 3, 1), Room::new(3, 2, 3)])
//!     .unwrap();
//! let path = AstarSolver::new().get_room_path(&mut grid, 1, 2).unwrap();
//! assert_eq!(path.len(), 4);
//! ```
pub mod error;
pub mod room_grid;
pub mod search_context;
pub mod solver;

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use itertools::Itertools;

pub use crate::error::GridError;
pub use crate::room_grid::{Room, RoomGrid, RoomId, EMPTY_ROOM};
pub use crate::solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Sum of the absolute coordinate differences. Grid coordinates are non-negative, so the
/// distance between two cells always fits.
pub fn manhattan_distance(p1: &Point, p2: &Point) -> u32 {
    p1.manhattan_distance(p2) as u32
}

/// Checks that every consecutive pair of rooms in `path` lies one cardinal step apart.
pub fn path_is_contiguous(path: &[Room]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| manhattan_distance(&a.position, &b.position) == 1)
}
