use grid_util::Point;
use smallvec::SmallVec;

use crate::{room_grid::RoomGrid, solver::GridSolver, solver::STEP_COST};

/// Uniform-cost search, used as a reference for the paths found by
/// [AstarSolver](crate::solver::astar::AstarSolver).
#[derive(Clone, Debug)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Point, u32); 4]>;

    fn successors(&self, grid: &RoomGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points(node)
            .into_iter()
            .map(|p| (p, STEP_COST))
            .collect()
    }

    fn heuristic(&self, _: &Point, _: &Point) -> u32 {
        0
    }
}
