use crate::{
    config::Config,
    db::{
        arena::Arena,
        assignment::{Assigned, Flags},
        phases::Phases,
        substitution::Substitution,
        trail::Trail,
        watches::Watches,
    },
    generic::reluctant::Reluctant,
    heuristics::{queue::Queue, scores::Scores, SearchMode},
    kitten::Kitten,
    procedures::{analyze::Analysis, mode::ModeSchedule, reduce::Tiers, restart::Averages},
    reports::Report,
    structures::{literal::Literal, value::Valuation},
};

use super::{
    callbacks::{CallbackTerminate, Proof},
    counters::Schedule,
    ContextState, Counters, Limits,
};

/// A generic context, parameratised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements [Default].
///
/// # Example
///
/// ```rust
/// # use kissat_core::context::GenericContext;
/// # use kissat_core::generic::minimal_pcg::MinimalPCG32;
/// # use kissat_core::config::Config;
/// let context = GenericContext::<MinimalPCG32>::from_config(Config::default());
/// assert!(!context.is_inconsistent());
/// ```
pub struct GenericContext<R: rand::Rng + std::default::Default> {
    /// The configuration of a context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng.
    pub rng: R,

    /// Every clause of more than two literals.
    pub(crate) arena: Arena,

    /// Watch lists, and with them every binary clause.
    pub(crate) watches: Watches,

    /// The current (partial) valuation.
    pub(crate) values: Valuation,

    /// Level, reason and trail position of each assigned variable.
    pub(crate) assigned: Vec<Assigned>,

    pub(crate) flags: Vec<Flags>,

    pub(crate) trail: Trail,

    pub(crate) phases: Phases,

    /// Representatives of variables eliminated by sweeping.
    pub(crate) substitution: Substitution,

    /// Decisions in focused mode.
    pub(crate) queue: Queue,

    /// Decisions in stable mode.
    pub(crate) scores: Scores,

    /// The current search mode.
    pub(crate) mode: SearchMode,

    /// Buffers of conflict analysis.
    pub(crate) analysis: Analysis,

    /// Glue averages, one for each search mode.
    pub(crate) averages: [Averages; 2],

    /// Restarts of stable mode.
    pub(crate) reluctant: Reluctant,

    pub(crate) tiers: Tiers,

    pub(crate) schedule: Schedule,

    pub(crate) mode_schedule: ModeSchedule,

    /// Limits requested for the next solve.
    pub(crate) limits: Limits,

    /// Limits of the current solve, as absolute counts.
    pub(crate) bounds: Limits,

    /// Assumptions for the next solve, in the order given.
    pub(crate) assumptions: Vec<Literal>,

    /// Failed assumptions of the last solve, indexed by literal.
    pub(crate) failed: Vec<bool>,

    /// True if the empty clause has been derived.
    pub(crate) inconsistent: bool,

    /// A count of variables without a value.
    pub(crate) unassigned: usize,

    /// Literals given to [add](GenericContext::add) since the last terminating zero.
    pub(crate) clause_buffer: Vec<Literal>,

    pub(crate) proof: Proof,

    /// The sub-solver, used for backbone probing and sweeping.
    pub(crate) kitten: Kitten,

    /// Terminates procedures, if true.
    pub(super) callback_terminate: Option<Box<CallbackTerminate>>,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(&self.state)
    }

    /// True if the empty clause has been derived, and so the clauses of the context are unsatisfiable regardless of any assumptions.
    ///
    /// Adding a unit which contradicts an earlier unit makes the context inconsistent without any solve.
    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    /// A count of the variables of the context.
    pub fn variables(&self) -> usize {
        self.flags.len()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// The current search mode.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Limits the next solve to `limit` further conflicts.
    pub fn set_conflict_limit(&mut self, limit: u64) {
        self.limits.conflicts = Some(limit);
    }

    /// Limits the next solve to `limit` further decisions.
    pub fn set_decision_limit(&mut self, limit: u64) {
        self.limits.decisions = Some(limit);
    }

    /// Limits the next solve to `limit` further ticks.
    pub fn set_ticks_limit(&mut self, limit: u64) {
        self.limits.ticks = Some(limit);
    }
}
