//! Best-first search ordered by `f = g + h`.
//!
//! With the default blocking-vehicles estimate this is a greedy search: it
//! expands far fewer states than BFS but the solution may be longer. With the
//! admissible lower-bound estimate it behaves as a textbook A*.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use super::node::{NodeArena, NodeId, ROOT};
use super::{successors, Outcome, Search, SearchReport, SearchStats};
use crate::board::{Board, CanonicalKey};
use crate::config::{Method, SolverConfig};
use crate::error::MoveError;
use crate::goal::is_goal;

#[derive(Clone, Copy, Debug, Default)]
pub struct BestFirst;

/// A frontier entry with its cached estimate.
#[derive(PartialEq, Eq)]
struct Entry {
    cost: u32,
    estimate: u32,
    /// Insertion sequence; earlier entries win ties.
    seq: u64,
    id: NodeId,
}

impl Entry {
    fn priority(&self) -> u32 {
        self.cost.saturating_add(self.estimate)
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .priority()
            .cmp(&self.priority())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Search for BestFirst {
    fn method(&self) -> Method {
        Method::BestFirst
    }

    fn search(&self, board: &Board, config: &SolverConfig) -> Result<SearchReport, MoveError> {
        let estimate = |board: &Board| config.heuristic.estimate(board, config.goal_rule);

        let mut stats = SearchStats::default();
        let mut arena = NodeArena::new(board.clone());
        // best known cost per state; a state is queued again only if reached cheaper
        let mut best_cost: FxHashMap<CanonicalKey, u32> = FxHashMap::default();
        best_cost.insert(board.canonical_key(), 0);

        let mut seq = 0;
        let mut frontier = BinaryHeap::from([Entry {
            cost: 0,
            estimate: estimate(board),
            seq,
            id: ROOT,
        }]);

        let outcome = 'search: {
            while let Some(entry) = frontier.pop() {
                let node = arena.get(entry.id);
                let stale = best_cost
                    .get(&node.board.canonical_key())
                    .is_some_and(|&best| best < entry.cost);
                if stale {
                    continue;
                }

                if stats.expanded >= config.step_budget {
                    break 'search Outcome::BudgetExhausted;
                }
                stats.expanded += 1;

                if is_goal(&node.board, config.goal_rule) {
                    break 'search Outcome::Solved {
                        moves: arena.path(entry.id),
                    };
                }

                let next_states = successors(&node.board)?;
                log::trace!(
                    "best-first: f {} (g {}, h {}) has {} successors",
                    entry.priority(),
                    entry.cost,
                    entry.estimate,
                    next_states.len()
                );

                let cost = entry.cost + 1;
                for (mv, next) in next_states {
                    stats.generated += 1;
                    let key = next.canonical_key();
                    if best_cost.get(&key).is_some_and(|&best| best <= cost) {
                        stats.duplicates += 1;
                        continue;
                    }
                    best_cost.insert(key, cost);

                    seq += 1;
                    let next_estimate = estimate(&next);
                    frontier.push(Entry {
                        cost,
                        estimate: next_estimate,
                        seq,
                        id: arena.push(next, entry.id, mv),
                    });
                }
                stats.observe_frontier(frontier.len());
            }
            Outcome::NoSolution
        };

        Ok(SearchReport::new(Method::BestFirst, outcome, stats))
    }
}
