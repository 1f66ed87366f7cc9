//! Boards shared by the unit tests.

use crate::board::{Board, Cell, Exit, EXIT, WALL};

/// Goal vehicle two cells from the exit marker with a clear lane.
pub(crate) fn one_move_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![2, 2, 2, 0, 0, 3],
        vec![5, 0, 4, 4, 0, 3],
        vec![5, 0, 1, 1, 0, EXIT],
        vec![6, 0, 9, 10, 11, 11],
        vec![6, 0, 9, 10, 0, 0],
        vec![6, 7, 7, 8, 8, 8],
    ]
}

pub(crate) fn one_move_board() -> Board {
    Board::from_rows(&one_move_rows(), Exit::new(2, 5)).unwrap()
}

/// Truck 3 blocks the lane and is itself held in place by car 2.
///
/// Shortest solution: 2 left, 3 down, 1 right.
pub(crate) fn three_move_board() -> Board {
    let rows = vec![
        vec![0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 3, 0],
        vec![1, 1, 0, 0, 3, 0],
        vec![0, 0, 0, 0, 3, 0],
        vec![0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 2, 2],
    ];
    Board::from_rows(&rows, Exit::new(2, 6)).unwrap()
}

/// A wall sits in the exit lane, so no sequence of moves can solve it.
pub(crate) fn blocked_board() -> Board {
    let rows = vec![
        vec![2, 2, 3, 3],
        vec![1, 1, 0, WALL],
        vec![4, 4, 0, 0],
    ];
    Board::from_rows(&rows, Exit::new(1, 4)).unwrap()
}

/// Open board with a wall in the exit lane; vehicles 2 to 6 can still move.
pub(crate) fn walled_lane_board() -> Board {
    let rows = vec![
        vec![2, 2, 0, 0, 3, 0],
        vec![0, 0, 0, 0, 3, 0],
        vec![1, 1, 0, 0, WALL, 0],
        vec![4, 0, 0, 5, 5, 0],
        vec![4, 0, 0, 0, 0, 0],
        vec![0, 0, 6, 6, 6, 0],
    ];
    Board::from_rows(&rows, Exit::new(2, 6)).unwrap()
}

/// Truck 3 sits in the lane between two walls and can never move.
pub(crate) fn pinned_truck_board() -> Board {
    let rows = vec![
        vec![2, 2, 0, 0, WALL, 0],
        vec![0, 0, 0, 0, 3, 0],
        vec![1, 1, 0, 0, 3, 0],
        vec![4, 0, 0, 0, 3, 0],
        vec![4, 0, 5, 5, WALL, 0],
        vec![0, 0, 0, 0, 0, 0],
    ];
    Board::from_rows(&rows, Exit::new(2, 6)).unwrap()
}

/// Goal vehicle already next to a virtual exit.
pub(crate) fn adjacent_board() -> Board {
    Board::from_rows(&[vec![0, 0, 1, 1], vec![0, 2, 2, 0]], Exit::new(0, 4)).unwrap()
}

/// A full-size puzzle with a longer solution.
pub(crate) fn hard_board() -> Board {
    let rows = vec![
        vec![2, 3, 0, 4, 4, 4],
        vec![2, 3, 0, 5, 5, 5],
        vec![1, 1, 6, 7, 0, 0],
        vec![8, 0, 6, 7, 0, 9],
        vec![8, 10, 11, 12, 12, 9],
        vec![8, 10, 11, 13, 13, 0],
    ];
    Board::from_rows(&rows, Exit::new(2, 6)).unwrap()
}
