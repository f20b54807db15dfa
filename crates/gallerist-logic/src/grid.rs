//! Occupancy-grid projection of the room graph.
//!
//! The room editor works on a square 0/1 grid rather than the linked room
//! graph: `from_rooms` projects a graph onto the grid, `from_grid` builds
//! a fresh graph back from it, and `is_reachable` guards edits that would
//! split the gallery into disconnected islands.

use std::collections::HashMap;

use crate::room::{Room, NO_ROOM};

/// Square occupancy grid, indexed `grid[row][col]`.
pub type Grid = Vec<Vec<u8>>;

pub const CELL_EMPTY: u8 = 0;
pub const CELL_ROOM: u8 = 1;

/// The editor never shrinks a gallery below this many rooms.
pub const MIN_ACTIVE_ROOMS: usize = 2;

/// Project a room graph onto a square grid.
///
/// The grid is sized to the larger of the row/col extents plus `border`,
/// and coordinates shift by `border / 2` so slightly negative room
/// coordinates land on valid indices and edge rooms keep an empty ring
/// around them for click-editing.
pub fn from_rooms(rooms: &[Room], border: usize) -> Grid {
    let row_extent = rooms.iter().fold(0, |acc, room| acc.max(room.row))
        - rooms.iter().fold(0, |acc, room| acc.min(room.row))
        + 1;
    let col_extent = rooms.iter().fold(0, |acc, room| acc.max(room.col))
        - rooms.iter().fold(0, |acc, room| acc.min(room.col))
        + 1;

    let size = row_extent.max(col_extent) as usize + border;
    let offset = (border / 2) as i32;

    let mut grid = vec![vec![CELL_EMPTY; size]; size];
    for room in rooms {
        let row = room.row + offset;
        let col = room.col + offset;
        if row >= 0 && col >= 0 && (row as usize) < size && (col as usize) < size {
            grid[row as usize][col as usize] = CELL_ROOM;
        }
    }
    grid
}

/// Rebuild a room graph from an occupancy grid.
///
/// One room per occupied cell in row-major order, ids by insertion order.
/// Adjacency comes straight from neighboring cell occupancy — not from
/// any previous graph — so the result is symmetric by construction.
/// `space` is left at zero pending [`crate::room::recalculate_space`].
pub fn from_grid(grid: &Grid, border: usize) -> Vec<Room> {
    let offset = (border / 2) as i32;

    let mut ids: HashMap<(usize, usize), i32> = HashMap::new();
    for (row, cells) in grid.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == CELL_ROOM {
                ids.insert((row, col), ids.len() as i32);
            }
        }
    }

    let link = |row: isize, col: isize| -> i32 {
        if row < 0 || col < 0 {
            return NO_ROOM;
        }
        ids.get(&(row as usize, col as usize)).copied().unwrap_or(NO_ROOM)
    };

    let mut rooms = Vec::with_capacity(ids.len());
    for (row, cells) in grid.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell != CELL_ROOM {
                continue;
            }
            let id = ids[&(row, col)];
            let (irow, icol) = (row as isize, col as isize);

            let mut room = Room::new(id, row as i32 - offset, col as i32 - offset);
            room.above = link(irow + 1, icol);
            room.below = link(irow - 1, icol);
            room.left = link(irow, icol - 1);
            room.right = link(irow, icol + 1);
            room.extensions = [room.above, room.below, room.left, room.right]
                .iter()
                .filter(|&&neighbour| neighbour != NO_ROOM)
                .count() as u8;
            room.room_type = room.classify();
            rooms.push(room);
        }
    }
    rooms
}

/// Whether the occupied cells form a single 4-connected component.
///
/// Depth-first flood fill from the first occupied cell in row-major
/// order; an empty grid (or one without any occupied cell) counts as
/// unreachable.
pub fn is_reachable(grid: &Grid) -> bool {
    if grid.is_empty() {
        return false;
    }

    let start = grid.iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|&cell| cell == CELL_ROOM)
            .map(|col| (row, col))
    });
    let Some(start) = start else {
        return false;
    };

    let mut visited: Vec<Vec<bool>> = grid.iter().map(|cells| vec![false; cells.len()]).collect();
    let mut stack = vec![start];
    visited[start.0][start.1] = true;

    while let Some((row, col)) = stack.pop() {
        let (row, col) = (row as isize, col as isize);
        for (next_row, next_col) in [(row + 1, col), (row - 1, col), (row, col + 1), (row, col - 1)] {
            if next_row < 0 || next_col < 0 {
                continue;
            }
            let (next_row, next_col) = (next_row as usize, next_col as usize);
            if next_row >= grid.len() || next_col >= grid[next_row].len() {
                continue;
            }
            if grid[next_row][next_col] == CELL_ROOM && !visited[next_row][next_col] {
                visited[next_row][next_col] = true;
                stack.push((next_row, next_col));
            }
        }
    }

    grid.iter().enumerate().all(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .all(|(col, &cell)| cell != CELL_ROOM || visited[row][col])
    })
}

/// Whether flipping one cell keeps the gallery valid: still at least
/// [`MIN_ACTIVE_ROOMS`] occupied cells, still one connected component.
pub fn can_toggle_cell(grid: &Grid, row: usize, col: usize) -> bool {
    if row >= grid.len() || col >= grid[row].len() {
        return false;
    }

    let mut candidate = grid.clone();
    candidate[row][col] = if candidate[row][col] == CELL_ROOM {
        CELL_EMPTY
    } else {
        CELL_ROOM
    };

    let active: usize = candidate
        .iter()
        .map(|cells| cells.iter().filter(|&&cell| cell == CELL_ROOM).count())
        .sum();

    active >= MIN_ACTIVE_ROOMS && is_reachable(&candidate)
}

/// Flip one cell if the edit passes [`can_toggle_cell`]; returns whether
/// the grid changed. Rejected edits leave the grid untouched.
pub fn toggle_cell(grid: &mut Grid, row: usize, col: usize) -> bool {
    if !can_toggle_cell(grid, row, col) {
        return false;
    }
    grid[row][col] = if grid[row][col] == CELL_ROOM {
        CELL_EMPTY
    } else {
        CELL_ROOM
    };
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::build_gallery;
    use crate::room::recalculate_space;

    /// 3×3 grid with a plus shape of occupied cells.
    fn plus_grid() -> Grid {
        vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]
    }

    #[test]
    fn test_from_rooms_is_square_with_border() {
        let rooms = build_gallery("abc", 0, 1); // two rooms at (0,0), (0,1)
        let grid = from_rooms(&rooms, 2);

        assert_eq!(grid.len(), 4); // extent 2 + border 2
        assert!(grid.iter().all(|cells| cells.len() == 4));
        assert_eq!(grid[1][1], CELL_ROOM);
        assert_eq!(grid[1][2], CELL_ROOM);
        let active: usize = grid
            .iter()
            .map(|cells| cells.iter().filter(|&&cell| cell == CELL_ROOM).count())
            .sum();
        assert_eq!(active, 2);
    }

    #[test]
    fn test_from_grid_builds_symmetric_adjacency() {
        let rooms = from_grid(&plus_grid(), 2);
        assert_eq!(rooms.len(), 5);

        let by_id = |id: i32| rooms.iter().find(|room| room.id == id).unwrap();
        for room in &rooms {
            if room.above != NO_ROOM {
                assert_eq!(by_id(room.above).below, room.id);
            }
            if room.below != NO_ROOM {
                assert_eq!(by_id(room.below).above, room.id);
            }
            if room.left != NO_ROOM {
                assert_eq!(by_id(room.left).right, room.id);
            }
            if room.right != NO_ROOM {
                assert_eq!(by_id(room.right).left, room.id);
            }
            assert_eq!(room.room_type, room.classify());
            assert_eq!(room.space, 0);
        }

        // The center cell of the plus touches all four arms.
        let center = rooms.iter().find(|room| room.extensions == 4).unwrap();
        assert_eq!((center.row, center.col), (0, 0));
    }

    #[test]
    fn test_grid_round_trip_preserves_rooms() {
        let rooms = from_grid(&plus_grid(), 2);
        let grid = from_rooms(&rooms, 2);
        let rebuilt = from_grid(&grid, 2);
        assert_eq!(rooms, rebuilt);
    }

    #[test]
    fn test_round_trip_after_space_recompute() {
        let mut rooms = from_grid(&plus_grid(), 2);
        let total = recalculate_space(&mut rooms);
        // Plus shape: center 0, four arms of 6 each.
        assert_eq!(total, 24);
    }

    #[test]
    fn test_is_reachable_on_connected_shape() {
        assert!(is_reachable(&plus_grid()));
    }

    #[test]
    fn test_is_reachable_rejects_islands() {
        let grid = vec![vec![1, 0, 1], vec![0, 0, 0], vec![0, 0, 0]];
        assert!(!is_reachable(&grid));
    }

    #[test]
    fn test_is_reachable_rejects_diagonal_touch() {
        let grid = vec![vec![1, 0], vec![0, 1]];
        assert!(!is_reachable(&grid));
    }

    #[test]
    fn test_empty_grids_are_unreachable() {
        assert!(!is_reachable(&vec![]));
        assert!(!is_reachable(&vec![vec![0, 0], vec![0, 0]]));
    }

    #[test]
    fn test_removing_plus_center_is_rejected() {
        let mut grid = plus_grid();
        assert!(!can_toggle_cell(&grid, 1, 1));
        assert!(!toggle_cell(&mut grid, 1, 1));
        assert_eq!(grid, plus_grid());
    }

    #[test]
    fn test_removing_an_arm_is_allowed() {
        let mut grid = plus_grid();
        assert!(toggle_cell(&mut grid, 0, 1));
        assert_eq!(grid[0][1], CELL_EMPTY);
        assert!(is_reachable(&grid));
    }

    #[test]
    fn test_adding_an_adjacent_cell_is_allowed() {
        let mut grid = plus_grid();
        assert!(toggle_cell(&mut grid, 0, 0));
        assert_eq!(grid[0][0], CELL_ROOM);
    }

    #[test]
    fn test_adding_a_detached_cell_is_rejected() {
        let mut grid = vec![
            vec![1, 1, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ];
        assert!(!toggle_cell(&mut grid, 3, 3));
        assert_eq!(grid[3][3], CELL_EMPTY);
    }

    #[test]
    fn test_minimum_room_count_is_enforced() {
        let grid = vec![vec![1, 1], vec![0, 0]];
        // Dropping either room would leave a single cell.
        assert!(!can_toggle_cell(&grid, 0, 0));
        assert!(!can_toggle_cell(&grid, 0, 1));
        // Growing is always fine.
        assert!(can_toggle_cell(&grid, 1, 0));
    }

    #[test]
    fn test_out_of_bounds_toggle_is_rejected() {
        let grid = plus_grid();
        assert!(!can_toggle_cell(&grid, 5, 1));
        assert!(!can_toggle_cell(&grid, 1, 5));
    }
}
