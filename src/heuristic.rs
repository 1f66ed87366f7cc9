//! Estimates of the remaining moves, used to order the informed searches.

use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::board::{is_vehicle_cell, Board, Cell, EMPTY};
use crate::goal::{is_goal, GoalRule};
use crate::vehicle::Orientation;

/// Estimate returned when the goal vehicle can never reach the exit from here.
pub const UNALIGNED_PENALTY: u32 = 1000;

/// Which estimate to search with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    /// Number of vehicles standing between the goal vehicle and the exit.
    ///
    /// Fast but not admissible: clearing one blocker can take many moves.
    #[default]
    BlockingVehicles,
    /// 0 when solved, 2 with anything in the lane, 1 otherwise. Admissible.
    LowerBound,
}

impl HeuristicKind {
    pub fn estimate(self, board: &Board, rule: GoalRule) -> u32 {
        match self {
            HeuristicKind::BlockingVehicles => blocking_vehicles(board),
            HeuristicKind::LowerBound => lower_bound(board, rule),
        }
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeuristicKind::BlockingVehicles => "blocking-vehicles",
            HeuristicKind::LowerBound => "lower-bound",
        })
    }
}

/// What lies between the goal vehicle and the exit.
enum Lane {
    /// The goal vehicle has already left the board.
    Exited,
    /// The goal vehicle can never get there: wrong row, wrong axis, or a wall.
    Unreachable,
    /// Cells strictly between the leading edge and the exit.
    Open(Vec<Cell>),
}

fn lane(board: &Board) -> Lane {
    let goal = board.goal_vehicle();
    if goal.exited {
        return Lane::Exited;
    }

    let exit = board.exit();
    let front = goal.col + goal.length;
    if goal.orientation != Orientation::Horizontal || goal.row != exit.row || front > exit.col {
        return Lane::Unreachable;
    }

    let cells: Vec<Cell> = (front..exit.col).map(|col| board.cell(exit.row, col)).collect();
    // anything that is neither empty nor a vehicle never moves out of the way
    if cells.iter().any(|&cell| cell != EMPTY && !is_vehicle_cell(cell)) {
        return Lane::Unreachable;
    }
    Lane::Open(cells)
}

/// Counts the distinct vehicles in the exit lane.
pub fn blocking_vehicles(board: &Board) -> u32 {
    match lane(board) {
        Lane::Exited => 0,
        Lane::Unreachable => UNALIGNED_PENALTY,
        Lane::Open(cells) => {
            let mut blockers = 0;
            let mut previous = EMPTY;
            // a horizontal blocker covers consecutive cells, count it once
            for cell in cells {
                if is_vehicle_cell(cell) && cell != previous {
                    blockers += 1;
                }
                previous = cell;
            }
            blockers
        }
    }
}

/// A lower bound on the remaining moves.
pub fn lower_bound(board: &Board, rule: GoalRule) -> u32 {
    if is_goal(board, rule) {
        return 0;
    }
    match lane(board) {
        Lane::Exited => 0,
        Lane::Unreachable => UNALIGNED_PENALTY,
        Lane::Open(cells) if cells.iter().any(|&cell| is_vehicle_cell(cell)) => 2,
        Lane::Open(_) => 1,
    }
}
