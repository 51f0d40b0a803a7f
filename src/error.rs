use crate::room_grid::RoomId;

/// Failures raised by the grid store and the solvers. A search that finds no path is not an
/// error; it is reported as an empty path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid size {0} is not a positive size that fits the coordinate range")]
    InvalidSize(usize),

    #[error("position ({x}, {y}) is out of bounds for a {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },

    #[error("room id 0 is reserved for empty cells")]
    ReservedRoomId,

    #[error("no room with id {0} has been placed")]
    RoomNotFound(RoomId),
}
