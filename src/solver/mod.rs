//! Search strategies over board states.
//!
//! Every strategy shares the same pieces: the move generator, the state
//! expander, a visited structure keyed by [`CanonicalKey`](crate::board::CanonicalKey)
//! and a step budget checked before each expansion. They differ only in the
//! order in which states are expanded.

mod best_first;
mod bfs;
mod ida;
mod node;
mod stats;

use serde::Serialize;

pub use best_first::BestFirst;
pub use bfs::BreadthFirst;
pub use ida::IterativeDeepening;
pub use stats::SearchStats;

use crate::board::Board;
use crate::config::{GoalRule, Method, SolverConfig};
use crate::error::MoveError;
use crate::moves::{possible_moves, Move};

/// How a search run ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// A goal state was reached by these moves.
    Solved { moves: Vec<Move> },
    /// Every reachable state was examined without finding a goal.
    NoSolution,
    /// The step budget ran out first; solvability is unknown.
    BudgetExhausted,
}

/// The result of one search run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub method: Method,
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl SearchReport {
    pub(crate) fn new(method: Method, outcome: Outcome, stats: SearchStats) -> Self {
        match &outcome {
            Outcome::Solved { moves } => {
                log::debug!("{method}: solved in {} moves ({stats})", moves.len())
            }
            Outcome::NoSolution => log::debug!("{method}: no solution ({stats})"),
            Outcome::BudgetExhausted => log::warn!("{method}: step budget exhausted ({stats})"),
        }
        Self {
            method,
            outcome,
            stats,
        }
    }

    pub fn solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved { .. })
    }

    /// The solution moves; empty unless solved.
    pub fn moves(&self) -> &[Move] {
        match &self.outcome {
            Outcome::Solved { moves } => moves,
            _ => &[],
        }
    }

    /// Number of expansions the run used.
    pub fn steps_used(&self) -> usize {
        self.stats.expanded
    }

    /// Replays the solution on `board` and checks that it ends in a goal state.
    ///
    /// Returns `Ok(false)` for runs that found no solution.
    pub fn verify(&self, board: &Board, rule: GoalRule) -> Result<bool, MoveError> {
        if !self.solved() {
            return Ok(false);
        }
        Ok(board.replay(self.moves())?.is_goal(rule))
    }
}

/// A search strategy.
///
/// Object safe so callers can pick a strategy at runtime via [`Method::solver`].
pub trait Search {
    fn method(&self) -> Method;

    /// Searches from `board` until a goal, exhaustion, or the step budget.
    ///
    /// Errors only if the expander rejects a generated move, which means the
    /// board invariants were broken.
    fn search(&self, board: &Board, config: &SolverConfig) -> Result<SearchReport, MoveError>;
}

impl Method {
    pub fn solver(self) -> &'static dyn Search {
        match self {
            Method::Bfs => &BreadthFirst,
            Method::BestFirst => &BestFirst,
            Method::IdaStar => &IterativeDeepening,
        }
    }
}

/// Runs the strategy selected in `config`.
pub fn solve(board: &Board, config: &SolverConfig) -> Result<SearchReport, MoveError> {
    log::debug!(
        "{}: searching {}x{} board with {} vehicles, goal rule {}, budget {}",
        config.method,
        board.width(),
        board.height(),
        board.vehicles().len(),
        config.goal_rule,
        config.step_budget
    );
    config.method.solver().search(board, config)
}

/// All successors of `board`, in move generation order.
fn successors(board: &Board) -> Result<Vec<(Move, Board)>, MoveError> {
    possible_moves(board)
        .into_iter()
        .map(|mv| match board.apply_move(&mv) {
            Ok(next) => Ok((mv, next)),
            Err(err) => {
                log::error!("generated move {mv} was rejected: {err}\n{board}");
                Err(err)
            }
        })
        .collect()
}
