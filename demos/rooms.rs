use room_pathfinding::{AstarSolver, GridError, GridSolver, Room, RoomGrid, RoomId};
use std::io::{self, BufRead, Write};

// Asks for two room numbers and prints the rooms along a shortest path on a 5x5 grid with rooms
//  _____
// |     |
// |   2 |
// | 1   |
// |  3  |
// |     |
//  _____
// Set RUST_LOG=info to see the search being logged.

fn read_room_id(
    prompt: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Option<RoomId> {
    print!("{prompt}");
    io::stdout().flush().ok()?;
    lines.next()?.ok()?.trim().parse().ok()
}

fn main() -> Result<(), GridError> {
    env_logger::init();
    let mut grid = RoomGrid::new(5)?;
    grid.place_rooms([Room::new(1, 1, 2), Room::new(2, 3, 1), Room::new(3, 2, 3)])?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let start = read_room_id("Enter the start room number: ", &mut lines);
    let goal = read_room_id("Enter the destination room number: ", &mut lines);
    let (Some(start), Some(goal)) = (start, goal) else {
        println!("Invalid room number.");
        return Ok(());
    };

    let solver = AstarSolver::new();
    match solver.get_room_path(&mut grid, start, goal) {
        Ok(path) if path.is_empty() => println!("No path found."),
        Ok(path) => {
            println!("Path found:");
            for room in path {
                println!("{room}");
            }
        }
        Err(GridError::RoomNotFound(_)) => println!("Invalid room number."),
        Err(e) => return Err(e),
    }
    Ok(())
}
