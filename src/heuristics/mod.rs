/*!
Decision heuristics.

Two structures choose the next variable to decide:
- The [queue](queue::Queue), a variable move-to-front list used in focused mode.
- The [scores](scores::Scores), a heap of exponentially bumped activities (EVSIDS) used in stable mode.

Both implement [Heuristic], and both are kept for every variable for the life of a context, though only the structure of the current [SearchMode] is bumped and consulted.
On switching mode the newly active structure is brought up to date (see [switch_mode](crate::context::GenericContext::switch_mode)).
*/

pub mod queue;
pub mod scores;

use crate::structures::{literal::Variable, value::Valuation};

/// The mode of a search, and with it the decision heuristic in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Frequent restarts, decisions from the [queue](queue::Queue).
    Focused,

    /// Reluctant restarts, decisions from the [scores](scores::Scores), target phases.
    Stable,
}

impl SearchMode {
    /// An index for per-mode records.
    pub fn index(self) -> usize {
        match self {
            SearchMode::Focused => 0,
            SearchMode::Stable => 1,
        }
    }

    /// The heuristic used in the mode.
    pub fn select<'h>(self, queue: &'h mut queue::Queue, scores: &'h mut scores::Scores) -> &'h mut dyn Heuristic {
        match self {
            SearchMode::Focused => queue,
            SearchMode::Stable => scores,
        }
    }

    /// The other mode.
    pub fn other(self) -> Self {
        match self {
            SearchMode::Focused => SearchMode::Stable,
            SearchMode::Stable => SearchMode::Focused,
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Focused => write!(f, "focused"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// The operations of a decision heuristic.
pub trait Heuristic {
    /// Adds `variable` to the structure.
    fn enqueue(&mut self, variable: Variable);

    /// Removes `variable` from the structure.
    fn dequeue(&mut self, variable: Variable);

    /// Bumps each of `variables`, as the variables analysed in a conflict.
    fn bump(&mut self, variables: &[Variable]);

    /// The next unassigned variable to decide, if any.
    fn pick(&mut self, values: &Valuation) -> Option<Variable>;

    /// Notes `variable` is unassigned after a backtrack, so the variable may be picked again.
    fn unassigned(&mut self, variable: Variable);
}
