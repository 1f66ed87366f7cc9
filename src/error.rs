//! Error types for board construction, move application and file handling.
//!
//! `GridError` covers malformed input grids and `MoveError` covers moves that
//! would break a vehicle. Running out of search budget or finding no solution
//! are not errors; see [`crate::solver::Outcome`].

use thiserror::Error;

use crate::board::Cell;
use crate::moves::Direction;
use crate::vehicle::VehicleId;

/// A grid that cannot be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    JaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("vehicle {id} does not occupy a single straight run of cells")]
    DisconnectedVehicle { id: VehicleId },
    #[error("vehicle {id} is {length} cells long")]
    VehicleTooLong { id: VehicleId, length: usize },
    #[error("goal vehicle {id} is not on the board")]
    MissingGoalVehicle { id: VehicleId },
    #[error("exit ({row}, {col}) lies outside a {width}x{height} board")]
    ExitOutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error("exit ({row}, {col}) holds {found} instead of the exit marker")]
    ExitMismatch { row: usize, col: usize, found: Cell },
    #[error("exit marker ({row}, {col}) is not in the last column of a board {width} wide")]
    ExitNotOnEdge { row: usize, col: usize, width: usize },
}

/// A move that cannot be applied to a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no vehicle {0} on the board")]
    UnknownVehicle(VehicleId),
    #[error("vehicle {0} has already left the board")]
    VehicleExited(VehicleId),
    #[error("vehicle {id} cannot move {direction}")]
    WrongAxis {
        id: VehicleId,
        direction: Direction,
    },
    #[error("move of vehicle {0} has zero distance")]
    ZeroDistance(VehicleId),
    #[error("vehicle {id} is blocked at ({row}, {col})")]
    Blocked {
        id: VehicleId,
        row: usize,
        col: usize,
    },
    #[error("vehicle {0} would leave the board")]
    OutOfBounds(VehicleId),
    #[error("vehicle {id} covers {found} cells after the move, expected {expected}")]
    Integrity {
        id: VehicleId,
        expected: usize,
        found: usize,
    },
}

/// Top-level error for the public entry points and file handling.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed grid: {0}")]
    Grid(#[from] GridError),
    #[error("invalid move: {0}")]
    Move(#[from] MoveError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
