//! Iterative deepening A*.
//!
//! Depth-first passes bounded by a threshold on `f = g + h`; each pass raises
//! the threshold to the smallest `f` that was cut off. Uses an explicit stack to
//! avoid recursion depth limits. A transposition table of the best `g` per
//! state, cleared between passes, keeps a pass from revisiting states it has
//! already reached as cheaply.
//!
//! A cut-off only counts towards the next threshold if the pass never reached
//! that state at the same or a lower `g`. When no such cut-off is left, a
//! higher threshold cannot reach anything new and the board has no solution.

use rustc_hash::FxHashMap;

use super::{successors, Outcome, Search, SearchReport, SearchStats};
use crate::board::{Board, CanonicalKey};
use crate::config::{Method, SolverConfig};
use crate::error::MoveError;
use crate::goal::is_goal;
use crate::heuristic::UNALIGNED_PENALTY;
use crate::moves::Move;

#[derive(Clone, Copy, Debug, Default)]
pub struct IterativeDeepening;

/// A successor together with its estimate.
type Child = (Move, Board, u32);

/// One level of the depth-first stack.
struct Frame {
    /// Moves from the root.
    cost: u32,
    /// Successors ordered by estimate, most promising first.
    children: Vec<Child>,
    /// Index of the next child to try.
    next: usize,
}

/// How a single bounded pass ended.
enum Pass {
    Found(Vec<Move>),
    /// Smallest `f` above the threshold, or `None` if nothing new was cut off.
    Exceeded(Option<u32>),
    OutOfBudget,
}

impl Search for IterativeDeepening {
    fn method(&self) -> Method {
        Method::IdaStar
    }

    fn search(&self, board: &Board, config: &SolverConfig) -> Result<SearchReport, MoveError> {
        let mut stats = SearchStats::default();
        let mut threshold = config.heuristic.estimate(board, config.goal_rule);

        // a wall in the lane or a misaligned goal vehicle stays that way
        if threshold >= UNALIGNED_PENALTY {
            log::debug!("ida-star: goal vehicle can never reach the exit");
            return Ok(SearchReport::new(Method::IdaStar, Outcome::NoSolution, stats));
        }

        let outcome = loop {
            stats.iterations += 1;
            log::trace!("ida-star: pass {} with threshold {threshold}", stats.iterations);

            match bounded_pass(board, config, threshold, &mut stats)? {
                Pass::Found(moves) => break Outcome::Solved { moves },
                Pass::OutOfBudget => break Outcome::BudgetExhausted,
                Pass::Exceeded(None) => break Outcome::NoSolution,
                Pass::Exceeded(Some(next)) => threshold = next,
            }
        };

        Ok(SearchReport::new(Method::IdaStar, outcome, stats))
    }
}

/// Expands `board` if the budget allows, returning its ordered children.
fn expand(
    board: &Board,
    config: &SolverConfig,
    stats: &mut SearchStats,
) -> Result<Option<Vec<Child>>, MoveError> {
    if stats.expanded >= config.step_budget {
        return Ok(None);
    }
    stats.expanded += 1;

    let mut children: Vec<Child> = successors(board)?
        .into_iter()
        .map(|(mv, next)| {
            let estimate = config.heuristic.estimate(&next, config.goal_rule);
            (mv, next, estimate)
        })
        .collect();
    stats.generated += children.len();
    // stable, so ties keep generation order
    children.sort_by_key(|&(_, _, estimate)| estimate);
    Ok(Some(children))
}

fn bounded_pass(
    root: &Board,
    config: &SolverConfig,
    threshold: u32,
    stats: &mut SearchStats,
) -> Result<Pass, MoveError> {
    let mut table: FxHashMap<CanonicalKey, u32> = FxHashMap::default();
    table.insert(root.canonical_key(), 0);

    let Some(children) = expand(root, config, stats)? else {
        return Ok(Pass::OutOfBudget);
    };
    if is_goal(root, config.goal_rule) {
        return Ok(Pass::Found(Vec::new()));
    }

    let mut path: Vec<Move> = Vec::new();
    let mut stack = vec![Frame {
        cost: 0,
        children,
        next: 0,
    }];
    // cheapest cut-off per state, with its `f`
    let mut cut: FxHashMap<CanonicalKey, (u32, u32)> = FxHashMap::default();

    while let Some(frame) = stack.last_mut() {
        let Some((mv, child, estimate)) = frame.children.get(frame.next).cloned() else {
            stack.pop();
            path.pop();
            continue;
        };
        frame.next += 1;

        let cost = frame.cost + 1;
        let key = child.canonical_key();
        if table.get(&key).is_some_and(|&seen| seen <= cost) {
            stats.duplicates += 1;
            continue;
        }

        let f = cost.saturating_add(estimate);
        if f > threshold {
            cut.entry(key)
                .and_modify(|entry| *entry = (*entry).min((cost, f)))
                .or_insert((cost, f));
            continue;
        }
        table.insert(key, cost);

        path.push(mv);
        if is_goal(&child, config.goal_rule) {
            return Ok(Pass::Found(path));
        }
        let Some(children) = expand(&child, config, stats)? else {
            return Ok(Pass::OutOfBudget);
        };
        stack.push(Frame {
            cost,
            children,
            next: 0,
        });
        stats.observe_frontier(stack.len());
    }

    // states this pass reached at least as cheaply would add nothing new
    let next_threshold = cut
        .iter()
        .filter(|&(key, &(cost, _))| table.get(key).map_or(true, |&seen| seen > cost))
        .map(|(_, &(_, f))| f)
        .min();
    Ok(Pass::Exceeded(next_threshold))
}
