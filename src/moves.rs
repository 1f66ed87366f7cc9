//! Moves and legal move enumeration.
//!
//! A move slides one vehicle any number of free cells along its axis and
//! always costs one unit, however far it goes.

use std::fmt::{self, Display, Formatter};
use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::board::{Board, EMPTY};
use crate::vehicle::{Vehicle, VehicleId};

/// A direction for a move. Flipped with [`Neg`] (i.e. `-`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A single slide of one vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub vehicle: VehicleId,
    pub direction: Direction,
    pub distance: usize,
}

impl Move {
    pub const fn new(vehicle: VehicleId, direction: Direction, distance: usize) -> Self {
        Self {
            vehicle,
            direction,
            distance,
        }
    }

    /// The move that undoes this one. Not valid for a drive through the exit.
    pub fn reversed(&self) -> Self {
        Self::new(self.vehicle, -self.direction, self.distance)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.vehicle, self.direction, self.distance)
    }
}

/// How far a vehicle can slide in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slide {
    /// Number of empty cells ahead before anything else.
    pub max: usize,
    /// The first occupied in-bounds cell, unless it is the exit.
    pub blocked_at: Option<(usize, usize)>,
    /// Whether the position right after the empty run is the exit.
    pub exit: bool,
}

/// Scans outward from the vehicle's front in `direction`.
pub(crate) fn slide(board: &Board, vehicle: &Vehicle, direction: Direction) -> Slide {
    let (mut row, mut col) = vehicle.front(direction);
    let mut max = 0;

    loop {
        match board.neighbour(row, col, direction) {
            Some((next_row, next_col)) if board.cell(next_row, next_col) == EMPTY => {
                max += 1;
                row = next_row;
                col = next_col;
            }
            Some((next_row, next_col)) => {
                let exit = board.leads_to_exit(vehicle, direction, next_row, next_col);
                return Slide {
                    max,
                    blocked_at: (!exit).then_some((next_row, next_col)),
                    exit,
                };
            }
            None => {
                // off the edge; only a virtual exit sits out here
                let exit = board.exit().is_virtual(board.width())
                    && board.leads_to_exit(vehicle, direction, row, col + 1);
                return Slide {
                    max,
                    blocked_at: None,
                    exit,
                };
            }
        }
    }
}

/// Enumerates every legal move on the board.
///
/// Vehicles are visited in scan order, each in its backward then forward
/// direction, and every distance from 1 to the maximum is listed. When the goal
/// vehicle has a clear run to the exit, one extra move drives it through.
pub fn possible_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();

    for vehicle in board.vehicles().iter().filter(|vehicle| !vehicle.exited) {
        for direction in vehicle.orientation.directions() {
            let reach = slide(board, vehicle, direction);
            let longest = if reach.exit { reach.max + 1 } else { reach.max };
            moves.extend((1..=longest).map(|distance| Move::new(vehicle.id, direction, distance)));
        }
    }

    moves
}

impl Board {
    /// See [`possible_moves`].
    pub fn possible_moves(&self) -> Vec<Move> {
        possible_moves(self)
    }
}
