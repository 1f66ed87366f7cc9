//! Breadth-first search.
//!
//! Every move costs one edge regardless of slide distance, so the first goal
//! dequeued is reached in the fewest possible moves.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::node::{NodeArena, ROOT};
use super::{successors, Outcome, Search, SearchReport, SearchStats};
use crate::board::{Board, CanonicalKey};
use crate::config::{Method, SolverConfig};
use crate::error::MoveError;
use crate::goal::is_goal;

#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirst;

impl Search for BreadthFirst {
    fn method(&self) -> Method {
        Method::Bfs
    }

    fn search(&self, board: &Board, config: &SolverConfig) -> Result<SearchReport, MoveError> {
        let mut stats = SearchStats::default();
        let mut arena = NodeArena::new(board.clone());
        let mut visited: FxHashSet<CanonicalKey> = FxHashSet::default();
        visited.insert(board.canonical_key());
        let mut frontier = VecDeque::from([ROOT]);

        let outcome = 'search: {
            while let Some(id) = frontier.pop_front() {
                if stats.expanded >= config.step_budget {
                    break 'search Outcome::BudgetExhausted;
                }
                stats.expanded += 1;

                let node = arena.get(id);
                if is_goal(&node.board, config.goal_rule) {
                    break 'search Outcome::Solved {
                        moves: arena.path(id),
                    };
                }

                let next_states = successors(&node.board)?;
                log::trace!(
                    "bfs: depth {} has {} successors",
                    node.cost,
                    next_states.len()
                );

                for (mv, next) in next_states {
                    stats.generated += 1;
                    if !visited.insert(next.canonical_key()) {
                        stats.duplicates += 1;
                        continue;
                    }
                    frontier.push_back(arena.push(next, id, mv));
                }
                stats.observe_frontier(frontier.len());
            }
            Outcome::NoSolution
        };

        Ok(SearchReport::new(Method::Bfs, outcome, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoalRule;
    use crate::fixtures;
    use crate::moves::{Direction, Move};

    fn bfs(board: &Board, config: SolverConfig) -> SearchReport {
        BreadthFirst.search(board, &config).unwrap()
    }

    #[test]
    fn test_fixture_is_one_move() {
        let report = bfs(&fixtures::one_move_board(), SolverConfig::default());
        assert_eq!(report.moves(), &[Move::new(1, Direction::Right, 1)]);
    }

    #[test]
    fn test_three_move_board_is_optimal() {
        let board = fixtures::three_move_board();
        let report = bfs(&board, SolverConfig::default());
        assert_eq!(report.moves().len(), 3, "Shortest solution has three moves");
        assert!(report.verify(&board, GoalRule::ReachedExit).unwrap());
    }

    #[test]
    fn test_drive_through_counts_as_the_final_move() {
        let board = fixtures::adjacent_board();

        let reached = bfs(&board, SolverConfig::default());
        assert!(reached.solved());
        assert!(reached.moves().is_empty(), "Already at the exit");

        let config = SolverConfig::default().with_goal_rule(GoalRule::DroveThrough);
        let through = bfs(&board, config);
        assert_eq!(through.moves(), &[Move::new(1, Direction::Right, 1)]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let board = fixtures::three_move_board();
        let first = bfs(&board, SolverConfig::default());
        let second = bfs(&board, SolverConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_small_budget_aborts() {
        let config = SolverConfig::default().with_step_budget(2);
        let report = bfs(&fixtures::three_move_board(), config);
        assert_eq!(report.outcome, Outcome::BudgetExhausted);
        assert_eq!(report.steps_used(), 2);
    }

    #[test]
    fn test_exhaustion_counts_every_state_once() {
        let report = bfs(&fixtures::blocked_board(), SolverConfig::default());
        assert_eq!(report.outcome, Outcome::NoSolution);
        // car 1 has two positions and car 4 three
        assert_eq!(report.steps_used(), 6);
    }
}
