//! The win condition.

use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::vehicle::Orientation;

/// When a board counts as solved.
///
/// A goal vehicle that has driven through the exit satisfies both rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalRule {
    /// The goal vehicle's leading cell sits directly in front of the exit.
    #[default]
    ReachedExit,
    /// The goal vehicle has driven through the exit and left the grid.
    DroveThrough,
}

impl Display for GoalRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalRule::ReachedExit => "reached-exit",
            GoalRule::DroveThrough => "drove-through",
        })
    }
}

/// Returns `true` if the board is solved under `rule`.
pub fn is_goal(board: &Board, rule: GoalRule) -> bool {
    let goal = board.goal_vehicle();
    if goal.exited {
        return true;
    }
    match rule {
        GoalRule::ReachedExit => {
            let exit = board.exit();
            goal.orientation == Orientation::Horizontal
                && goal.row == exit.row
                && goal.col + goal.length == exit.col
        }
        GoalRule::DroveThrough => false,
    }
}

impl Board {
    /// See [`is_goal`].
    pub fn is_goal(&self, rule: GoalRule) -> bool {
        is_goal(self, rule)
    }
}
