//! Counters collected during a search run.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States taken off the frontier and expanded. Counts against the budget.
    pub expanded: usize,
    /// Successor states produced by the expander.
    pub generated: usize,
    /// Successors dropped because their state was already known.
    pub duplicates: usize,
    /// Largest frontier (or stack depth for IDA*) seen during the run.
    pub peak_frontier: usize,
    /// Deepening iterations; zero for the single-pass searches.
    pub iterations: usize,
}

impl SearchStats {
    pub(crate) fn observe_frontier(&mut self, size: usize) {
        self.peak_frontier = self.peak_frontier.max(size);
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded {}, generated {}, duplicates {}, peak frontier {}",
            self.expanded, self.generated, self.duplicates, self.peak_frontier
        )?;
        if self.iterations > 0 {
            write!(f, ", iterations {}", self.iterations)?;
        }
        Ok(())
    }
}
