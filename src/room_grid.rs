use crate::error::GridError;
use crate::search_context::SearchContext;
use crate::FxIndexMap;
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use log::warn;
use smallvec::SmallVec;

/// Identifier of a room. [EMPTY_ROOM] marks a cell without a room.
pub type RoomId = u32;

/// Sentinel stored in cells that hold no room.
pub const EMPTY_ROOM: RoomId = 0;

/// A grid cell together with the room identifier stored there. Paths are returned as sequences
/// of [Room]s; cells without a placed room carry [EMPTY_ROOM].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    pub id: RoomId,
    pub position: Point,
}

impl Room {
    pub fn new(id: RoomId, x: i32, y: i32) -> Room {
        Room {
            id,
            position: Point::new(x, y),
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Room {} at ({}, {})", self.id, self.position.x, self.position.y)
    }
}

/// [RoomGrid] is a square grid mapping every cell to a [RoomId] in addition to a registry of
/// placed rooms used to resolve identifiers to positions. Every cell is walkable. It also owns the
/// [SearchContext] used by the solvers, which is cleared at the start of every search.
#[derive(Clone, Debug)]
pub struct RoomGrid {
    size: usize,
    cells: Vec<RoomId>,
    rooms: FxIndexMap<RoomId, Point>,
    pub(crate) context: SearchContext<u32>,
}

impl RoomGrid {
    /// Creates an empty `size` x `size` grid. The size must be positive, fit the [Point]
    /// coordinate range and leave every per-cell array within the allocation limit.
    pub fn new(size: usize) -> Result<RoomGrid, GridError> {
        // Predecessor links are the widest per-cell entries kept during a search.
        let max_cells = isize::MAX as usize / std::mem::size_of::<Option<usize>>();
        let n_cells = size
            .checked_mul(size)
            .filter(|&n| size > 0 && size <= i32::MAX as usize && n <= max_cells)
            .ok_or(GridError::InvalidSize(size))?;
        Ok(RoomGrid {
            size,
            cells: vec![EMPTY_ROOM; n_cells],
            rooms: FxIndexMap::default(),
            context: SearchContext::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.index_in_bounds(point.x, point.y)
    }

    fn index_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<(), GridError> {
        if self.index_in_bounds(x, y) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                size: self.size,
            })
        }
    }

    /// Row-major cell index of an in-bounds point.
    pub(crate) fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.size + point.x as usize
    }

    pub(crate) fn point_from_ix(&self, ix: usize) -> Point {
        Point::new((ix % self.size) as i32, (ix / self.size) as i32)
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Places room `id` at `(x, y)`. The last write wins: a room already stored in that cell is
    /// evicted from the registry and an id that was placed before is moved to the new cell.
    pub fn place_room(&mut self, id: RoomId, x: i32, y: i32) -> Result<(), GridError> {
        if id == EMPTY_ROOM {
            return Err(GridError::ReservedRoomId);
        }
        self.check_bounds(x, y)?;
        let point = Point::new(x, y);
        let ix = self.get_ix_point(&point);

        let previous = self.cells[ix];
        if previous != EMPTY_ROOM && previous != id {
            warn!("Room {} at {} is replaced by room {}", previous, point, id);
            self.rooms.shift_remove(&previous);
        }
        if let Some(old_point) = self.rooms.insert(id, point) {
            if old_point != point {
                warn!("Room {} moves from {} to {}", id, old_point, point);
                let old_ix = self.get_ix_point(&old_point);
                self.cells[old_ix] = EMPTY_ROOM;
            }
        }
        self.cells[ix] = id;
        Ok(())
    }

    /// Places every room in order, stopping at the first one that cannot be placed.
    pub fn place_rooms<I>(&mut self, rooms: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = Room>,
    {
        for room in rooms {
            self.place_room(room.id, room.position.x, room.position.y)?;
        }
        Ok(())
    }

    /// Identifier stored at `(x, y)`, [EMPTY_ROOM] if no room was placed there.
    pub fn room_id_at(&self, x: i32, y: i32) -> Result<RoomId, GridError> {
        self.check_bounds(x, y)?;
        Ok(self.cells[self.get_ix_point(&Point::new(x, y))])
    }

    /// The cell at `point` as a [Room], read from the grid at call time.
    pub fn room_at(&self, point: Point) -> Option<Room> {
        if self.point_in_bounds(point) {
            Some(Room {
                id: self.cells[self.get_ix_point(&point)],
                position: point,
            })
        } else {
            None
        }
    }

    /// Resolves a room identifier to the position it was placed at.
    pub fn locate(&self, id: RoomId) -> Result<Point, GridError> {
        self.rooms
            .get(&id)
            .copied()
            .ok_or(GridError::RoomNotFound(id))
    }

    /// Placed rooms in placement order.
    pub fn rooms(&self) -> impl Iterator<Item = Room> + '_ {
        self.rooms
            .iter()
            .map(|(&id, &position)| Room { id, position })
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// The in-bounds 4-neighbourhood of `point`, ordered left, right, down, up.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 4]> {
        [
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
        ]
        .into_iter()
        .filter(|p| self.point_in_bounds(*p))
        .collect()
    }
}

impl fmt::Display for RoomGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.cells.chunks(self.size) {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
