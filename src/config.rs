//! Solver configuration.

use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use crate::goal::GoalRule;
pub use crate::heuristic::HeuristicKind;

/// Default cap on expansions per search.
///
/// Every expansion adds at most one visited entry per generated move, so the
/// budget also bounds the memory a search can take.
pub const DEFAULT_STEP_BUDGET: usize = 50_000;

/// Search strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Breadth-first search; solutions use the fewest moves.
    #[default]
    Bfs,
    /// Best-first search on moves so far plus the heuristic.
    BestFirst,
    /// Iterative deepening on the same estimate.
    IdaStar,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Bfs, Method::BestFirst, Method::IdaStar];
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Bfs => "bfs",
            Method::BestFirst => "best-first",
            Method::IdaStar => "ida-star",
        })
    }
}

/// Everything a search run needs besides the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub method: Method,
    pub goal_rule: GoalRule,
    pub heuristic: HeuristicKind,
    /// Maximum number of expansions before the run gives up.
    pub step_budget: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            goal_rule: GoalRule::default(),
            heuristic: HeuristicKind::default(),
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

impl SolverConfig {
    pub fn with_method(self, method: Method) -> Self {
        Self { method, ..self }
    }

    pub fn with_goal_rule(self, goal_rule: GoalRule) -> Self {
        Self { goal_rule, ..self }
    }

    pub fn with_heuristic(self, heuristic: HeuristicKind) -> Self {
        Self { heuristic, ..self }
    }

    pub fn with_step_budget(self, step_budget: usize) -> Self {
        Self {
            step_budget,
            ..self
        }
    }
}
