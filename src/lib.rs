//! Rush Hour Solver Library
//!
//! Searches the state space of the Rush Hour sliding-block puzzle: vehicles
//! slide along their own axis through empty cells until the goal vehicle
//! reaches the exit. Boards are validated on construction, states are
//! deduplicated by their canonical key and every search runs under an explicit
//! step budget.

pub mod board;
pub mod config;
pub mod error;
pub mod goal;
pub mod heuristic;
pub mod moves;
pub mod persistence;
pub mod solver;
pub mod vehicle;

#[cfg(test)]
mod fixtures;

pub use board::{Board, CanonicalKey, Cell, Exit};
pub use config::{GoalRule, HeuristicKind, Method, SolverConfig, DEFAULT_STEP_BUDGET};
pub use error::{Error, GridError, MoveError};
pub use moves::{Direction, Move};
pub use solver::{solve, Outcome, Search, SearchReport, SearchStats};
pub use vehicle::{Vehicle, VehicleId, GOAL_VEHICLE};

/// Finds a shortest solution with breadth-first search.
///
/// `exit_col` may equal `width` for an exit past the right edge. The report
/// tells a board with no solution apart from a budget that ran out.
pub fn solve_bfs(
    grid: &[Vec<Cell>],
    width: usize,
    height: usize,
    exit_row: usize,
    exit_col: usize,
    step_budget: usize,
) -> Result<SearchReport, Error> {
    let board = Board::new(grid, width, height, Exit::new(exit_row, exit_col), GOAL_VEHICLE)?;
    let config = SolverConfig::default()
        .with_method(Method::Bfs)
        .with_step_budget(step_budget);
    Ok(solve(&board, &config)?)
}

/// Finds some solution with best-first search and the default budget.
///
/// The exit is the marker on `exit_row`, or past the right edge if there is
/// none. `None` covers both an unsolvable board and an exhausted budget; use
/// [`solve_bfs`] to tell them apart.
pub fn solve_heuristic(
    grid: &[Vec<Cell>],
    width: usize,
    height: usize,
    exit_row: usize,
) -> Result<Option<Vec<Move>>, Error> {
    let exit = Exit::locate(grid, exit_row, width);
    let board = Board::new(grid, width, height, exit, GOAL_VEHICLE)?;
    let config = SolverConfig::default().with_method(Method::BestFirst);
    let report = solve(&board, &config)?;
    Ok(match report.outcome {
        Outcome::Solved { moves } => Some(moves),
        Outcome::NoSolution | Outcome::BudgetExhausted => None,
    })
}
