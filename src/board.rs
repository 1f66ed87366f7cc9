//! Board representation, canonical keys and move application.
//!
//! The grid is stored flat in row-major order (`idx = row * width + col`) behind
//! an `Arc`, so a board and the canonical key taken from it share one
//! allocation. Vehicle records are kept next to the grid and updated on every
//! move instead of being re-derived.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, MoveError};
use crate::moves::{slide, Direction, Move};
use crate::vehicle::{derive_vehicles, Orientation, Vehicle, VehicleId, GOAL_VEHICLE};

/// A single grid cell code.
pub type Cell = i32;

/// An empty cell.
pub const EMPTY: Cell = 0;

/// The exit marker cell.
pub const EXIT: Cell = 99;

/// A permanently blocked cell. Any negative code is treated as a wall.
pub const WALL: Cell = -1;

/// Returns `true` if the cell code belongs to a vehicle.
#[inline(always)]
pub const fn is_vehicle_cell(cell: Cell) -> bool {
    cell > 0 && cell != EXIT
}

/// Converts (row, col) coordinates to a linear cell index.
#[inline(always)]
pub const fn coord_to_idx(row: usize, col: usize, width: usize) -> usize {
    row * width + col
}

/// Converts a linear cell index to (row, col) coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize, width: usize) -> (usize, usize) {
    (cell_index / width, cell_index % width)
}

/// Where the goal vehicle leaves the board.
///
/// Either an in-grid cell holding the [`EXIT`] marker, or the virtual cell just
/// past the right edge (`col == width`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exit {
    pub row: usize,
    pub col: usize,
}

impl Exit {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Finds the exit marker on `row`, falling back to the virtual exit past
    /// the right edge when the row has none.
    pub fn locate(rows: &[Vec<Cell>], row: usize, width: usize) -> Self {
        rows.get(row)
            .and_then(|cells| cells.iter().take(width).position(|&cell| cell == EXIT))
            .map_or(Self::new(row, width), |col| Self::new(row, col))
    }

    /// Returns `true` if the exit lies beyond the grid rather than on a marker.
    pub const fn is_virtual(&self, width: usize) -> bool {
        self.col >= width
    }
}

/// Key identifying a board state in the visited set.
///
/// Equality is cell-for-cell over the grid, with the dimensions included so
/// that grids of different shapes never compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    width: usize,
    height: usize,
    cells: Arc<[Cell]>,
}

impl Display for CanonicalKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:", self.width, self.height)?;
        for (row, cells) in self.cells.chunks(self.width).enumerate() {
            if row > 0 {
                f.write_str("|")?;
            }
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

/// A puzzle state: the grid plus the vehicles on it.
///
/// Two boards are equal when their grids are, cell for cell. Vehicle records
/// are derived data and take no part in the comparison.
#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    exit: Exit,
    goal_index: usize,
    cells: Arc<[Cell]>,
    vehicles: Vec<Vehicle>,
}

impl Board {
    /// Builds a board from a rectangular grid.
    ///
    /// Fails on jagged or empty grids, broken vehicles, a misplaced exit, or a
    /// goal vehicle that is not on the grid.
    pub fn new(
        rows: &[Vec<Cell>],
        width: usize,
        height: usize,
        exit: Exit,
        goal: VehicleId,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if rows.len() != height {
            return Err(GridError::RowCount {
                expected: height,
                found: rows.len(),
            });
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, cells)| cells.len() != width)
        {
            return Err(GridError::JaggedRow {
                row,
                expected: width,
                found: cells.len(),
            });
        }

        let cells: Arc<[Cell]> = rows.iter().flatten().copied().collect();

        if exit.row >= height || exit.col > width {
            return Err(GridError::ExitOutOfBounds {
                row: exit.row,
                col: exit.col,
                width,
                height,
            });
        }
        if !exit.is_virtual(width) {
            let found = cells[coord_to_idx(exit.row, exit.col, width)];
            if found != EXIT {
                return Err(GridError::ExitMismatch {
                    row: exit.row,
                    col: exit.col,
                    found,
                });
            }
            // the marker stands in for the edge; no playable cells beyond it
            if exit.col + 1 != width {
                return Err(GridError::ExitNotOnEdge {
                    row: exit.row,
                    col: exit.col,
                    width,
                });
            }
        }

        let vehicles = derive_vehicles(&cells, width, height)?;
        let goal_index = vehicles
            .iter()
            .position(|vehicle| vehicle.id == goal)
            .ok_or(GridError::MissingGoalVehicle { id: goal })?;

        log::trace!(
            "built {}x{} board with {} vehicles, exit at ({}, {})",
            width,
            height,
            vehicles.len(),
            exit.row,
            exit.col
        );

        Ok(Self {
            width,
            height,
            exit,
            goal_index,
            cells,
            vehicles,
        })
    }

    /// Builds a board taking the dimensions from the rows themselves and using
    /// vehicle [`GOAL_VEHICLE`] as the goal.
    pub fn from_rows(rows: &[Vec<Cell>], exit: Exit) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        Self::new(rows, width, rows.len(), exit, GOAL_VEHICLE)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn exit(&self) -> Exit {
        self.exit
    }

    /// The vehicle that has to reach the exit.
    pub fn goal_vehicle(&self) -> &Vehicle {
        &self.vehicles[self.goal_index]
    }

    /// All vehicles in scan order, including one that has exited.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// The code of the cell at (row, col). Panics when out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[coord_to_idx(row, col, self.width)]
    }

    /// The flat row-major grid.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The grid as a matrix of rows.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.width).map(<[Cell]>::to_vec).collect()
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey {
            width: self.width,
            height: self.height,
            cells: Arc::clone(&self.cells),
        }
    }

    /// The neighbouring in-bounds cell in `direction`, if any.
    pub(crate) fn neighbour(
        &self,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Option<(usize, usize)> {
        match direction {
            Direction::Up => row.checked_sub(1).map(|r| (r, col)),
            Direction::Down => (row + 1 < self.height).then_some((row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| (row, c)),
            Direction::Right => (col + 1 < self.width).then_some((row, col + 1)),
        }
    }

    /// Returns `true` if `vehicle` sliding in `direction` would enter the exit
    /// at column `col` of `row`.
    pub(crate) fn leads_to_exit(
        &self,
        vehicle: &Vehicle,
        direction: Direction,
        row: usize,
        col: usize,
    ) -> bool {
        vehicle.id == self.goal_vehicle().id
            && vehicle.orientation == Orientation::Horizontal
            && direction == Direction::Right
            && row == self.exit.row
            && col == self.exit.col
    }

    /// Applies a move and returns the resulting board.
    ///
    /// Every traversed cell must be empty, except that the last step of the
    /// goal vehicle may enter the exit, which takes it off the grid. `self` is
    /// left untouched whether or not the move succeeds.
    pub fn apply_move(&self, mv: &Move) -> Result<Board, MoveError> {
        let id = mv.vehicle;
        let index = self
            .vehicles
            .iter()
            .position(|vehicle| vehicle.id == id)
            .ok_or(MoveError::UnknownVehicle(id))?;
        let vehicle = self.vehicles[index];

        if vehicle.exited {
            return Err(MoveError::VehicleExited(id));
        }
        if !vehicle.orientation.allows(mv.direction) {
            return Err(MoveError::WrongAxis {
                id,
                direction: mv.direction,
            });
        }
        if mv.distance == 0 {
            return Err(MoveError::ZeroDistance(id));
        }

        let reach = slide(self, &vehicle, mv.direction);
        let exits = reach.exit && mv.distance == reach.max + 1;
        if mv.distance > reach.max && !exits {
            return Err(match reach.blocked_at {
                Some((row, col)) => MoveError::Blocked { id, row, col },
                None => MoveError::OutOfBounds(id),
            });
        }

        let mut cells = self.cells.to_vec();
        for (row, col) in vehicle.cells() {
            cells[coord_to_idx(row, col, self.width)] = EMPTY;
        }

        let mut moved = vehicle;
        if exits {
            moved.exited = true;
        } else {
            match mv.direction {
                Direction::Up => moved.row -= mv.distance,
                Direction::Down => moved.row += mv.distance,
                Direction::Left => moved.col -= mv.distance,
                Direction::Right => moved.col += mv.distance,
            }
            for (row, col) in moved.cells() {
                cells[coord_to_idx(row, col, self.width)] = id;
            }
        }

        // integrity: the id must cover exactly the vehicle's cells afterwards
        let expected = moved.cells().count();
        let found = cells.iter().filter(|&&cell| cell == id).count();
        if found != expected {
            return Err(MoveError::Integrity {
                id,
                expected,
                found,
            });
        }

        let mut vehicles = self.vehicles.clone();
        vehicles[index] = moved;

        Ok(Board {
            width: self.width,
            height: self.height,
            exit: self.exit,
            goal_index: self.goal_index,
            cells: cells.into(),
            vehicles,
        })
    }

    /// Applies `moves` in order, stopping at the first one that fails.
    pub fn replay(&self, moves: &[Move]) -> Result<Board, MoveError> {
        moves
            .iter()
            .try_fold(self.clone(), |board, mv| board.apply_move(mv))
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Board {}

/// Renders a vehicle id as a single character.
///
/// Ids 1-9 are digits, 10-35 use letters.
fn cell_char(cell: Cell) -> char {
    match cell {
        EMPTY => '.',
        EXIT => '>',
        c if c < 0 => '#',
        c @ 1..=9 => char::from(b'0' + c as u8),
        c @ 10..=35 => char::from(b'A' + (c - 10) as u8),
        _ => '?',
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(self.width).enumerate() {
            for &cell in cells {
                write!(f, "{}", cell_char(cell))?;
            }
            if row == self.exit.row && self.exit.is_virtual(self.width) {
                f.write_str(">")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for idx in 0..42 {
            let (row, col) = idx_to_coord(idx, 7);
            assert!(col < 7, "idx_to_coord({idx}, 7) produced column {col}");
            assert_eq!(coord_to_idx(row, col, 7), idx, "Roundtrip failed for index {idx}");
        }
    }

    #[test]
    fn test_canonical_key_is_stable() {
        let first = fixtures::one_move_board();
        let second = fixtures::one_move_board();
        assert_eq!(first.canonical_key(), second.canonical_key());
        assert_eq!(
            first.canonical_key().to_string(),
            "6x6:2,2,2,0,0,3|5,0,4,4,0,3|5,0,1,1,0,99|6,0,9,10,11,11|6,0,9,10,0,0|6,7,7,8,8,8"
        );
    }

    #[test]
    fn test_canonical_key_encodes_width() {
        let wide = Board::from_rows(&[vec![1, 1, 0, 0]], Exit::new(0, 4)).unwrap();
        let tall = Board::from_rows(&[vec![1, 1], vec![0, 0]], Exit::new(0, 2)).unwrap();
        assert_eq!(wide.cells(), tall.cells(), "Flat cells are the same on purpose");
        assert_ne!(wide.canonical_key(), tall.canonical_key());
    }

    #[test]
    fn test_rejects_malformed_grids() {
        let exit = Exit::new(0, 3);
        assert_eq!(Board::from_rows(&[], exit), Err(GridError::EmptyGrid));
        assert_eq!(
            Board::from_rows(&[vec![1, 1, 0], vec![0, 0]], exit),
            Err(GridError::JaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Board::new(&[vec![1, 1, 0]], 3, 2, exit, 1),
            Err(GridError::RowCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_rejects_bad_exit_and_missing_goal() {
        let rows = vec![vec![1, 1, 0]];
        assert_eq!(
            Board::from_rows(&rows, Exit::new(1, 3)),
            Err(GridError::ExitOutOfBounds {
                row: 1,
                col: 3,
                width: 3,
                height: 1
            })
        );
        assert_eq!(
            Board::from_rows(&rows, Exit::new(0, 2)),
            Err(GridError::ExitMismatch {
                row: 0,
                col: 2,
                found: 0
            })
        );
        assert_eq!(
            Board::new(&rows, 3, 1, Exit::new(0, 3), 4),
            Err(GridError::MissingGoalVehicle { id: 4 })
        );
    }

    #[test]
    fn test_exit_marker_must_be_on_the_edge() {
        let rows = vec![vec![1, 1, 0, EXIT, 0]];
        assert_eq!(
            Board::from_rows(&rows, Exit::new(0, 3)),
            Err(GridError::ExitNotOnEdge {
                row: 0,
                col: 3,
                width: 5
            })
        );
        assert_eq!(
            Board::from_rows(&rows, Exit::locate(&rows, 0, 5)).unwrap_err(),
            GridError::ExitNotOnEdge {
                row: 0,
                col: 3,
                width: 5
            },
            "Locating the marker does not make a mid-row exit valid"
        );
    }

    #[test]
    fn test_exit_locate() {
        let rows = fixtures::one_move_rows();
        assert_eq!(Exit::locate(&rows, 2, 6), Exit::new(2, 5));
        assert_eq!(Exit::locate(&rows, 0, 6), Exit::new(0, 6));
        assert!(Exit::new(0, 6).is_virtual(6));
    }

    #[test]
    fn test_apply_move_leaves_original_untouched() {
        let board = fixtures::one_move_board();
        let before = board.canonical_key();

        let moved = board.apply_move(&Move::new(1, Direction::Right, 1)).unwrap();
        assert_eq!(board.canonical_key(), before, "Source board must not change");
        assert_eq!(moved.cell(2, 2), EMPTY);
        assert_eq!(moved.cell(2, 4), 1);
        let vehicle = moved.vehicle(1).unwrap();
        assert_eq!((vehicle.row, vehicle.col), (2, 3));
    }

    #[test]
    fn test_apply_move_then_reverse_restores_key() {
        let board = fixtures::three_move_board();
        let mv = Move::new(2, Direction::Left, 3);
        let back = board
            .apply_move(&mv)
            .and_then(|moved| moved.apply_move(&mv.reversed()))
            .unwrap();
        assert_eq!(back.canonical_key(), board.canonical_key());
    }

    #[test]
    fn test_apply_move_rejects_illegal_moves() {
        let board = fixtures::one_move_board();
        assert_eq!(
            board.apply_move(&Move::new(42, Direction::Left, 1)),
            Err(MoveError::UnknownVehicle(42))
        );
        assert_eq!(
            board.apply_move(&Move::new(1, Direction::Up, 1)),
            Err(MoveError::WrongAxis {
                id: 1,
                direction: Direction::Up
            })
        );
        assert_eq!(
            board.apply_move(&Move::new(1, Direction::Left, 0)),
            Err(MoveError::ZeroDistance(1))
        );
        assert_eq!(
            board.apply_move(&Move::new(1, Direction::Left, 2)),
            Err(MoveError::Blocked { id: 1, row: 2, col: 0 })
        );
        assert_eq!(
            board.apply_move(&Move::new(2, Direction::Left, 1)),
            Err(MoveError::OutOfBounds(2))
        );
        // the exit marker only opens for the goal vehicle
        assert_eq!(
            board.apply_move(&Move::new(3, Direction::Down, 1)),
            Err(MoveError::Blocked { id: 3, row: 2, col: 5 })
        );
    }

    #[test]
    fn test_drive_through_exit_removes_goal_vehicle() {
        let board = fixtures::one_move_board();
        let exited = board.apply_move(&Move::new(1, Direction::Right, 2)).unwrap();

        assert!(exited.goal_vehicle().exited);
        assert!(exited.cells().iter().all(|&cell| cell != 1));
        assert_eq!(exited.cell(2, 5), EXIT, "The exit marker stays in place");
        assert_eq!(
            exited.apply_move(&Move::new(1, Direction::Left, 1)),
            Err(MoveError::VehicleExited(1))
        );
    }

    #[test]
    fn test_equality_compares_grids_only() {
        let board = Board::from_rows(&[vec![1, 1, 0, 0]], Exit::new(0, 4)).unwrap();
        let direct = board.apply_move(&Move::new(1, Direction::Right, 3)).unwrap();
        let stepped = board
            .replay(&[
                Move::new(1, Direction::Right, 2),
                Move::new(1, Direction::Right, 1),
            ])
            .unwrap();

        assert_ne!(
            direct.goal_vehicle().col,
            stepped.goal_vehicle().col,
            "The exited records remember where each run left from"
        );
        assert_eq!(direct.canonical_key(), stepped.canonical_key());
        assert_eq!(direct, stepped, "Same grid means same board");

        let moved = board.apply_move(&Move::new(1, Direction::Right, 1)).unwrap();
        assert_ne!(moved, board);
    }

    #[test]
    fn test_replay_applies_moves_in_order() {
        let board = fixtures::three_move_board();
        let end = board
            .replay(&[
                Move::new(2, Direction::Left, 2),
                Move::new(3, Direction::Down, 2),
                Move::new(1, Direction::Right, 4),
            ])
            .unwrap();
        let goal = end.goal_vehicle();
        assert_eq!((goal.row, goal.col), (2, 4));

        assert!(board.replay(&[Move::new(3, Direction::Down, 2)]).is_err());
    }

    #[test]
    fn test_display_fixture() {
        insta::assert_snapshot!(fixtures::one_move_board().to_string());
    }

    #[test]
    fn test_display_virtual_exit() {
        let board = Board::from_rows(&[vec![0, 1, 1], vec![WALL, 0, 0]], Exit::new(0, 3)).unwrap();
        assert_eq!(board.to_string(), ".11>\n#..\n");
    }
}
