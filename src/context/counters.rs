/// Counts for various things which count, roughly.
///
/// Counts are kept over the life of a context, across solves.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counters {
    /// A count of every conflict.
    pub conflicts: u64,

    /// A count of every decision, assumptions included.
    pub decisions: u64,

    /// A count of every literal propagated.
    pub propagations: u64,

    /// A measure of work done in propagation, in place of time.
    ///
    /// One tick for each literal propagated and for each visit to a long clause.
    pub ticks: u64,

    /// A count of solves.
    pub solves: u64,

    /// A count of original clauses given, tautologies included.
    pub original: u64,

    /// A count of learned clauses, units included.
    pub learned: u64,

    /// A count of learned units.
    pub learned_units: u64,

    /// A count of literals removed from learned clauses by minimization.
    pub minimized: u64,

    /// A count of variables with a value at level zero.
    pub fixed: u64,

    pub restarts: u64,

    /// A count of reductions of the learned clauses.
    pub reductions: u64,

    /// A count of learned clauses deleted by reductions.
    pub reduced: u64,

    /// A count of garbage collections.
    pub collections: u64,

    pub rephases: u64,

    /// A count of switches between focused and stable mode.
    pub switches: u64,

    /// A count of rounds of backbone probing.
    pub backbone_rounds: u64,

    /// A count of units found by backbone probing.
    pub backbone_units: u64,

    /// A count of rounds of sweeping.
    pub sweep_rounds: u64,

    /// A count of equivalences found by sweeping, each eliminating a variable.
    pub sweep_equivalences: u64,

    /// A count of calls to the sub-solver made while sweeping.
    pub sweep_solved: u64,
}

/// Limits on a solve, each relative to the start of the solve.
///
/// Limits apply to the next solve only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub conflicts: Option<u64>,
    pub decisions: Option<u64>,
    pub ticks: Option<u64>,
}

impl Limits {
    /// The limits as absolute bounds on `counters`.
    pub(crate) fn bounds_from(&self, counters: &Counters) -> Limits {
        Limits {
            conflicts: self.conflicts.map(|limit| counters.conflicts.saturating_add(limit)),
            decisions: self.decisions.map(|limit| counters.decisions.saturating_add(limit)),
            ticks: self.ticks.map(|limit| counters.ticks.saturating_add(limit)),
        }
    }

    /// True if `counters` have reached some (absolute) bound.
    pub(crate) fn reached(&self, counters: &Counters) -> bool {
        self.conflicts.is_some_and(|bound| counters.conflicts >= bound)
            || self.decisions.is_some_and(|bound| counters.decisions >= bound)
            || self.ticks.is_some_and(|bound| counters.ticks >= bound)
    }
}

/// The points at which the next scheduled procedures are due, as counts of conflicts.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Schedule {
    pub restart: u64,
    pub reduce: u64,
    pub rephase: u64,
    pub backbone: u64,
    pub sweep: u64,

    /// The count of fixed variables when clauses satisfied at level zero were last removed.
    pub simplified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_limits() {
        let counters = Counters {
            conflicts: 10,
            ticks: 500,
            ..Default::default()
        };
        let requested = Limits {
            conflicts: Some(5),
            decisions: None,
            ticks: Some(u64::MAX),
        };
        let bounds = requested.bounds_from(&counters);
        assert_eq!(bounds.conflicts, Some(15));
        assert_eq!(bounds.ticks, Some(u64::MAX));
        assert!(!bounds.reached(&counters));

        let later = Counters {
            conflicts: 15,
            ..counters
        };
        assert!(bounds.reached(&later));
        assert!(!Limits::default().reached(&later));
    }
}
