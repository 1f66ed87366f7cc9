//! Vehicle records and their derivation from a raw grid.
//!
//! Vehicles are never stored in the input. They are recovered by scanning the
//! grid once and walking each newly seen id along its axis.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::board::{coord_to_idx, idx_to_coord, is_vehicle_cell, Cell, EMPTY};
use crate::error::GridError;
use crate::moves::Direction;

/// Identifier of a vehicle, equal to the cell code it occupies.
pub type VehicleId = Cell;

/// The vehicle that has to leave through the exit, unless a board says otherwise.
pub const GOAL_VEHICLE: VehicleId = 1;

/// Longest run a single vehicle may occupy.
pub const MAX_VEHICLE_LENGTH: usize = 3;

/// The axis a vehicle slides along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The two directions along this axis, backward first.
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Orientation::Horizontal => [Direction::Left, Direction::Right],
            Orientation::Vertical => [Direction::Up, Direction::Down],
        }
    }

    /// Returns `true` if a vehicle with this orientation can move in `direction`.
    pub const fn allows(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Orientation::Horizontal, Direction::Left | Direction::Right)
                | (Orientation::Vertical, Direction::Up | Direction::Down)
        )
    }
}

/// A vehicle on the board, anchored at its topmost/leftmost cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub orientation: Orientation,
    pub length: usize,
    pub row: usize,
    pub col: usize,
    /// Set once the vehicle has driven through the exit and left the grid.
    pub exited: bool,
}

impl Vehicle {
    /// The cells covered by this vehicle, anchor first. Empty once exited.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let count = if self.exited { 0 } else { self.length };
        (0..count).map(move |offset| match self.orientation {
            Orientation::Horizontal => (self.row, self.col + offset),
            Orientation::Vertical => (self.row + offset, self.col),
        })
    }

    /// The cell at the edge of the vehicle facing `direction`.
    pub const fn front(&self, direction: Direction) -> (usize, usize) {
        match direction {
            Direction::Up | Direction::Left => (self.row, self.col),
            Direction::Down => (self.row + self.length - 1, self.col),
            Direction::Right => (self.row, self.col + self.length - 1),
        }
    }
}

/// Recovers every vehicle from a flat row-major grid.
///
/// Vehicles come back in first-seen scan order, which is also the order the
/// move generator visits them in. A one-cell run has no neighbour to tell its
/// axis, so it is treated as horizontal when either horizontal neighbour is
/// empty and as vertical otherwise.
pub fn derive_vehicles(
    grid: &[Cell],
    width: usize,
    height: usize,
) -> Result<Vec<Vehicle>, GridError> {
    let mut cell_counts: FxHashMap<VehicleId, usize> = FxHashMap::default();
    for &cell in grid.iter().filter(|&&cell| is_vehicle_cell(cell)) {
        *cell_counts.entry(cell).or_insert(0) += 1;
    }

    let at = |row: usize, col: usize| grid[coord_to_idx(row, col, width)];

    let mut seen: FxHashSet<VehicleId> = FxHashSet::default();
    let mut vehicles = Vec::with_capacity(cell_counts.len());

    for (cell_index, &id) in grid.iter().enumerate() {
        if !is_vehicle_cell(id) || !seen.insert(id) {
            continue;
        }
        let (row, col) = idx_to_coord(cell_index, width);

        let (orientation, length) = if col + 1 < width && at(row, col + 1) == id {
            let length = (col..width).take_while(|&c| at(row, c) == id).count();
            (Orientation::Horizontal, length)
        } else if row + 1 < height && at(row + 1, col) == id {
            let length = (row..height).take_while(|&r| at(r, col) == id).count();
            (Orientation::Vertical, length)
        } else {
            let left_open = col > 0 && at(row, col - 1) == EMPTY;
            let right_open = col + 1 < width && at(row, col + 1) == EMPTY;
            if left_open || right_open {
                (Orientation::Horizontal, 1)
            } else {
                (Orientation::Vertical, 1)
            }
        };

        // any cell of this id outside the walked run means a broken vehicle
        if cell_counts.get(&id).copied() != Some(length) {
            return Err(GridError::DisconnectedVehicle { id });
        }
        if length > MAX_VEHICLE_LENGTH {
            return Err(GridError::VehicleTooLong { id, length });
        }

        vehicles.push(Vehicle {
            id,
            orientation,
            length,
            row,
            col,
            exited: false,
        });
    }

    Ok(vehicles)
}
