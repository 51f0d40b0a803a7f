use crate::error::GridError;
use crate::room_grid::{Room, RoomGrid, RoomId};
use grid_util::point::Point;
use log::info;

pub mod astar;
pub mod dijkstra;

/// Cost of moving between two 4-adjacent cells.
pub const STEP_COST: u32 = 1;

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, u32)>;

    fn heuristic(&self, p1: &Point, p2: &Point) -> u32;

    fn successors(&self, grid: &RoomGrid, node: &Point) -> Self::Successors;

    /// Number of steps taken along `path`.
    fn get_path_cost(&self, path: &[Room]) -> u32 {
        path.len().saturating_sub(1) as u32 * STEP_COST
    }

    /// Computes a shortest path from `start` to `goal`, both inclusive. Every cell on the path is
    /// returned together with the room id stored there at the time of the search. An empty path
    /// means the goal could not be reached.
    fn get_path_single_goal(
        &self,
        grid: &mut RoomGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Room>, GridError> {
        for p in [start, goal] {
            if !grid.point_in_bounds(p) {
                return Err(GridError::OutOfBounds {
                    x: p.x,
                    y: p.y,
                    size: grid.size(),
                });
            }
        }
        info!("Computing path from {} to {}", start, goal);

        // The context is taken out of the grid so the closures below can borrow the grid.
        let mut ct = std::mem::take(&mut grid.context);
        let result = {
            let grid: &RoomGrid = grid;
            let goal_ix = grid.get_ix_point(&goal);
            ct.astar(
                grid.cell_count(),
                grid.get_ix_point(&start),
                move |ix| {
                    self.successors(grid, &grid.point_from_ix(ix))
                        .into_iter()
                        .map(move |(p, c)| (grid.get_ix_point(&p), c))
                },
                |ix| self.heuristic(&grid.point_from_ix(ix), &goal),
                |ix| ix == goal_ix,
            )
        };
        grid.context = ct;

        match result {
            Some((path, cost)) => {
                info!(
                    "Found path of cost {} after {} expansions",
                    cost,
                    grid.context.expanded()
                );
                Ok(path
                    .into_iter()
                    .filter_map(|ix| grid.room_at(grid.point_from_ix(ix)))
                    .collect())
            }
            None => {
                info!("No path from {} to {}", start, goal);
                Ok(Vec::new())
            }
        }
    }

    /// Resolves both room ids to their positions and computes a path between them. Fails with
    /// [GridError::RoomNotFound] before searching if either id was never placed.
    fn get_room_path(
        &self,
        grid: &mut RoomGrid,
        start: RoomId,
        goal: RoomId,
    ) -> Result<Vec<Room>, GridError> {
        let start = grid.locate(start)?;
        let goal = grid.locate(goal)?;
        self.get_path_single_goal(grid, start, goal)
    }
}
