use grid_util::Point;
use smallvec::SmallVec;

use crate::{manhattan_distance, room_grid::RoomGrid, solver::GridSolver, solver::STEP_COST};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the Manhattan heuristic. Values above 1.0 make the heuristic inadmissible, which
    /// reduces the number of expansions but no longer guarantees a shortest path.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Point, u32); 4]>;

    fn successors(&self, grid: &RoomGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points(node)
            .into_iter()
            .map(|p| (p, STEP_COST))
            .collect()
    }

    /// Manhattan distance times the heuristic factor.
    fn heuristic(&self, p1: &Point, p2: &Point) -> u32 {
        ((manhattan_distance(p1, p2) * STEP_COST) as f32 * self.heuristic_factor) as u32
    }
}

#[cfg(test)]
mod tests {
    use crate::room_grid::Room;
    use crate::{path_is_contiguous, GridError};

    use super::*;

    fn rooms_grid() -> RoomGrid {
        let mut grid = RoomGrid::new(5).unwrap();
        grid.place_rooms([Room::new(1, 1, 2), Room::new(2, 3, 1), Room::new(3, 2, 3)])
            .unwrap();
        grid
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let mut grid = RoomGrid::new(1).unwrap();
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let path = solver.get_path_single_goal(&mut grid, start, start).unwrap();
        assert_eq!(path, vec![Room::new(0, 0, 0)]);

        let mut grid = rooms_grid();
        let path = solver.get_room_path(&mut grid, 3, 3).unwrap();
        assert_eq!(path, vec![Room::new(3, 2, 3)]);
    }

    /// Room 1 at (1, 2) to room 2 at (3, 1) takes three steps.
    #[test]
    fn solve_room_problem() {
        let mut grid = rooms_grid();
        let solver = AstarSolver::new();
        let path = solver.get_room_path(&mut grid, 1, 2).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.first().map(|r| r.id), Some(1));
        assert_eq!(path.last().map(|r| r.id), Some(2));
        assert_eq!(path[0].position, Point::new(1, 2));
        assert_eq!(path[3].position, Point::new(3, 1));
        assert!(path_is_contiguous(&path));
        assert_eq!(solver.get_path_cost(&path), 3);
    }

    /// Intermediate cells report whatever id is stored in them.
    #[test]
    fn path_carries_room_ids() {
        let mut grid = RoomGrid::new(3).unwrap();
        grid.place_room(7, 1, 0).unwrap();
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal(&mut grid, Point::new(0, 0), Point::new(2, 0))
            .unwrap();
        let ids = path.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 7, 0]);
    }

    #[test]
    fn unknown_room() {
        let mut grid = rooms_grid();
        let solver = AstarSolver::new();
        assert_eq!(
            solver.get_room_path(&mut grid, 1, 9).unwrap_err(),
            GridError::RoomNotFound(9)
        );
        assert_eq!(
            solver.get_room_path(&mut grid, 0, 1).unwrap_err(),
            GridError::RoomNotFound(0)
        );
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let mut grid = rooms_grid();
        let solver = AstarSolver::new();
        let result = solver.get_path_single_goal(&mut grid, Point::new(0, 0), Point::new(5, 0));
        assert_eq!(
            result.unwrap_err(),
            GridError::OutOfBounds { x: 5, y: 0, size: 5 }
        );
        assert!(solver
            .get_path_single_goal(&mut grid, Point::new(-1, 0), Point::new(0, 0))
            .is_err());
    }

    /// A second search through cells finalized by the first one is unaffected by it.
    #[test]
    fn repeated_searches_do_not_interfere() {
        let mut grid = RoomGrid::new(6).unwrap();
        let solver = AstarSolver::new();
        let a = Point::new(0, 0);
        let b = Point::new(5, 5);
        let first = solver.get_path_single_goal(&mut grid, a, b).unwrap();
        let back = solver.get_path_single_goal(&mut grid, b, a).unwrap();
        let again = solver.get_path_single_goal(&mut grid, a, b).unwrap();
        assert_eq!(first.len(), 11);
        assert_eq!(back.len(), 11);
        assert_eq!(first, again);
        assert_eq!(back.first().map(|r| r.position), Some(b));
        assert!(path_is_contiguous(&back));
    }

    /// Identical inputs give identical paths thanks to the fixed tie-breaking.
    #[test]
    fn deterministic_paths() {
        let solver = AstarSolver::new();
        let mut grid_1 = RoomGrid::new(8).unwrap();
        let mut grid_2 = RoomGrid::new(8).unwrap();
        let start = Point::new(1, 6);
        let goal = Point::new(6, 0);
        let p1 = solver.get_path_single_goal(&mut grid_1, start, goal).unwrap();
        let p2 = solver.get_path_single_goal(&mut grid_2, start, goal).unwrap();
        assert_eq!(p1, p2);
    }

    /// On an open grid with an admissible heuristic only cells on some shortest path get expanded.
    #[test]
    fn expands_few_nodes() {
        let mut grid = RoomGrid::new(20).unwrap();
        let solver = AstarSolver::new();
        solver
            .get_path_single_goal(&mut grid, Point::new(0, 0), Point::new(19, 0))
            .unwrap();
        assert_eq!(grid.context.expanded(), 19);
    }

    /// A huge heuristic factor saturates the estimates instead of overflowing them.
    #[test]
    fn huge_heuristic_factor() {
        let mut grid = RoomGrid::new(10).unwrap();
        let mut solver = AstarSolver::new();
        solver.heuristic_factor = 1.0e9;
        let start = Point::new(0, 0);
        let goal = Point::new(9, 9);
        assert_eq!(solver.heuristic(&start, &goal), u32::MAX);
        let path = solver.get_path_single_goal(&mut grid, start, goal).unwrap();
        assert!(!path.is_empty());
        assert_eq!(path.first().map(|r| r.position), Some(start));
        assert_eq!(path.last().map(|r| r.position), Some(goal));
        assert!(path_is_contiguous(&path));
    }

    #[test]
    fn heuristic_factor_scales() {
        let mut solver = AstarSolver::new();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(3, 4);
        assert_eq!(solver.heuristic(&p1, &p2), 7);
        solver.heuristic_factor = 2.0;
        assert_eq!(solver.heuristic(&p1, &p2), 14);
    }
}
