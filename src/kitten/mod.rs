/*!
Kitten, a small embedded CDCL solver for local queries.

The [context](crate::context) uses a kitten to settle questions about a handful of clauses at a time, e.g. whether a literal is implied by the clauses around it (see [backbone](crate::procedures::backbone)).
A kitten is deliberately simple: no restarts, no clause deletion, no minimization, and decisions from a move-to-front [queue](crate::heuristics::queue::Queue).

# Literals

A kitten speaks in terms of the literals of its caller, which may be spread over a large range of variables.
Each caller literal is imported on first use to a dense internal variable, and exported again whenever a clause or value is handed back.
So, the size of a kitten is proportional to the clauses given, not to the variables of the caller.

# Status

| [KittenStatus]       | Code | Meaning                                             |
|----------------------|------|-----------------------------------------------------|
| Unknown              | 0    | Accepting clauses, or a solve stopped at the limit  |
| Satisfiable          | 10   | Values and flips are available                      |
| Unsatisfiable        | 20   | Failed assumptions and cores are available          |
| Core                 | 21   | A clausal core has been computed                    |

Adding a clause or assumption, or solving, after a solve resets the kitten to Unknown, clearing the assumptions of the previous solve.
Requests not valid in the current status return a [KittenError::Status].

# Antecedents

If [track_antecedents](Kitten::track_antecedents) is called before anything is learned, each learned klause records the klauses resolved to derive it.
After an unsatisfiable solve these records give a [clausal core](Kitten::compute_clausal_core): the original klauses (and learned klauses) the refutation depends on.

```rust
# use kissat_core::kitten::{Kitten, KittenStatus};
# use kissat_core::structures::literal::Literal;
let lit = |x: i32| Literal::from_external(x).unwrap();
let mut kitten = Kitten::default();
kitten.track_antecedents().unwrap();
kitten.clause_with_id_and_exception(0, &[lit(1), lit(2)], None).unwrap();
kitten.clause_with_id_and_exception(1, &[lit(-1), lit(2)], None).unwrap();
kitten.clause_with_id_and_exception(2, &[lit(3), lit(4)], None).unwrap();

kitten.assume(lit(-2));
assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
assert!(kitten.failed(lit(-2)).unwrap());

kitten.compute_clausal_core().unwrap();
let mut ids = Vec::default();
kitten.traverse_core_ids(|id| ids.push(id)).unwrap();
assert_eq!(ids, vec![Some(0), Some(1)]);
```
*/

mod clausal_core;
pub mod klauses;
mod search;

pub use clausal_core::CoreCounts;

use klauses::{Katch, KlauseRef, Klauses, NO_ID};
use rand::Rng;

use crate::{
    generic::minimal_pcg::MinimalPCG32,
    heuristics::{queue::Queue, Heuristic},
    misc::log::targets,
    structures::{
        literal::{Literal, Variable},
        value::{Valuation, Value},
    },
    types::err::KittenError,
};

/// The status of a kitten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KittenStatus {
    Unknown,
    Satisfiable,
    Unsatisfiable,
    Core,
}

impl KittenStatus {
    /// The numeric code of the status.
    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Satisfiable => 10,
            Self::Unsatisfiable => 20,
            Self::Core => 21,
        }
    }
}

impl std::fmt::Display for KittenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Satisfiable => write!(f, "satisfiable"),
            Self::Unsatisfiable => write!(f, "unsatisfiable"),
            Self::Core => write!(f, "core"),
        }
    }
}

/// Counts of events in a kitten, kept across [clear](Kitten::clear).
#[derive(Clone, Copy, Debug, Default)]
pub struct KittenCounters {
    pub original: u64,
    pub learned: u64,
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub flip: u64,
    pub flipped: u64,
    pub solved: u64,
    pub sat: u64,
    pub unsat: u64,
    pub unknown: u64,

    /// A measure of work done, mostly by propagation.
    pub ticks: u64,
}

/// The assignment of an internal variable.
#[derive(Clone, Copy, Default)]
struct Kar {
    level: u32,

    /// The klause which propagated the variable, or None for a decision.
    reason: Option<KlauseRef>,
}

/// The kitten struct.
pub struct Kitten {
    status: KittenStatus,
    antecedents: bool,
    learned: bool,

    level: u32,
    propagated: usize,
    unassigned: usize,

    /// An empty klause, or a klause in conflict at the root level.
    inconsistent: Option<KlauseRef>,

    /// The klause explaining failed assumptions, if any.
    failing: Option<KlauseRef>,

    /// The word offset following the last original klause.
    end_original: usize,

    klauses: Klauses,
    values: Valuation,
    vars: Vec<Kar>,
    marks: Vec<bool>,
    phases: Vec<bool>,
    failed: Vec<bool>,
    queue: Queue,
    watches: Vec<Vec<Katch>>,

    /// Internal variable of each caller variable.
    import: Vec<Option<Variable>>,

    /// Caller variable of each internal variable.
    export: Vec<Variable>,

    analyzed: Vec<Variable>,
    assumptions: Vec<Literal>,
    core: Vec<KlauseRef>,
    klause: Vec<Literal>,
    resolved: Vec<KlauseRef>,
    trail: Vec<Literal>,
    units: Vec<KlauseRef>,

    ticks_limit: u64,
    counters: KittenCounters,
    rng: MinimalPCG32,
}

impl Default for Kitten {
    fn default() -> Self {
        Kitten::with_seed(0)
    }
}

impl Kitten {
    /// A kitten with randomness seeded by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Kitten {
            status: KittenStatus::Unknown,
            antecedents: false,
            learned: false,
            level: 0,
            propagated: 0,
            unassigned: 0,
            inconsistent: None,
            failing: None,
            end_original: 0,
            klauses: Klauses::default(),
            values: Valuation::default(),
            vars: Vec::default(),
            marks: Vec::default(),
            phases: Vec::default(),
            failed: Vec::default(),
            queue: Queue::default(),
            watches: Vec::default(),
            import: Vec::default(),
            export: Vec::default(),
            analyzed: Vec::default(),
            assumptions: Vec::default(),
            core: Vec::default(),
            klause: Vec::default(),
            resolved: Vec::default(),
            trail: Vec::default(),
            units: Vec::default(),
            ticks_limit: u64::MAX,
            counters: KittenCounters::default(),
            rng: MinimalPCG32::seeded(seed),
        }
    }

    pub fn status(&self) -> KittenStatus {
        self.status
    }

    pub fn counters(&self) -> KittenCounters {
        self.counters
    }

    /// The count of (internal) variables.
    pub fn variables(&self) -> usize {
        self.vars.len()
    }

    fn require(&self, expected: KittenStatus) -> Result<(), KittenError> {
        match self.status == expected {
            true => Ok(()),
            false => Err(KittenError::Status {
                expected,
                found: self.status,
            }),
        }
    }

    /// Records antecedents of each learned klause from now on.
    pub fn track_antecedents(&mut self) -> Result<(), KittenError> {
        self.require(KittenStatus::Unknown)?;
        if self.learned {
            return Err(KittenError::AlreadyLearned);
        }
        log::trace!(target: targets::KITTEN, "Tracking antecedents");
        self.antecedents = true;
        Ok(())
    }

    /// Decisions take a random phase.
    pub fn randomize_phases(&mut self) {
        log::trace!(target: targets::KITTEN, "Randomizing phases");
        for phase in self.phases.iter_mut() {
            *phase = self.rng.random_bool(0.5);
        }
    }

    /// Decisions take the opposite of their current phase.
    pub fn flip_phases(&mut self) {
        log::trace!(target: targets::KITTEN, "Flipping phases");
        for phase in self.phases.iter_mut() {
            *phase = !*phase;
        }
    }

    /// Removes any limit on ticks.
    pub fn no_ticks_limit(&mut self) {
        self.ticks_limit = u64::MAX;
    }

    /// Limits the next solves to `delta` further ticks.
    pub fn set_ticks_limit(&mut self, delta: u64) {
        self.ticks_limit = self.counters.ticks.saturating_add(delta);
        log::trace!(target: targets::KITTEN, "Ticks limit {}", self.ticks_limit);
    }

    /// Shuffles the decision queue, the watch lists and the units.
    pub fn shuffle_clauses(&mut self) -> Result<(), KittenError> {
        self.require(KittenStatus::Unknown)?;

        let variables = self.vars.len();
        if variables > 0 {
            for _ in 0..variables {
                let variable = self.rng.random_range(0..variables) as Variable;
                self.queue.dequeue(variable);
                self.queue.enqueue(variable);
            }
            self.queue.reset_search();
        }

        for list in self.watches.iter_mut() {
            shuffle(&mut self.rng, list);
        }
        shuffle(&mut self.rng, &mut self.units);
        Ok(())
    }

    /// Extends internal structures to cover `variables` variables, queueing each fresh variable.
    fn enlarge_internal(&mut self, variables: usize) {
        let old = self.vars.len();
        self.values.resize(variables);
        self.vars.resize(variables, Kar::default());
        self.marks.resize(variables, false);
        self.phases.resize(variables, true);
        self.failed.resize(2 * variables, false);
        self.watches.resize_with(2 * variables, Vec::default);
        self.queue.resize(variables);
        for variable in old..variables {
            self.unassigned += 1;
            self.queue.enqueue(variable as Variable);
        }
        self.queue.reset_search();
    }

    /// The internal literal of a caller literal, importing the variable if required.
    fn import_literal(&mut self, literal: Literal) -> Literal {
        let external = literal.variable() as usize;
        if external >= self.import.len() {
            self.import.resize(external + 1, None);
        }
        let internal = match self.import[external] {
            Some(internal) => internal,
            None => {
                let internal = self.export.len() as Variable;
                self.export.push(external as Variable);
                self.import[external] = Some(internal);
                internal
            }
        };
        if internal as usize >= self.vars.len() {
            self.enlarge_internal(internal as usize + 1);
        }
        Literal::new(internal, literal.polarity())
    }

    /// The internal literal of a caller literal, if the variable has been imported.
    fn internal_literal(&self, literal: Literal) -> Option<Literal> {
        let internal = self.import.get(literal.variable() as usize).copied().flatten()?;
        Some(Literal::new(internal, literal.polarity()))
    }

    fn export_literal(&self, literal: Literal) -> Literal {
        Literal::new(self.export[literal.variable() as usize], literal.polarity())
    }

    /// Adds a clause, as the literals of `literals` other than `except`, identified by `id`.
    ///
    /// A variable may occur at most once in a clause.
    pub fn clause_with_id_and_exception(
        &mut self,
        id: u32,
        literals: &[Literal],
        except: Option<Literal>,
    ) -> Result<(), KittenError> {
        if self.status != KittenStatus::Unknown {
            self.reset_incremental();
        } else if self.level > 0 {
            self.backtrack_to_root();
        }

        for literal in literals {
            if Some(*literal) == except {
                continue;
            }
            let internal = self.import_literal(*literal);
            let variable = internal.variable() as usize;
            if self.marks[variable] {
                for marked in self.klause.drain(..) {
                    self.marks[marked.variable() as usize] = false;
                }
                return Err(KittenError::DuplicateVariable);
            }
            self.marks[variable] = true;
            self.klause.push(internal);
        }
        for literal in &self.klause {
            self.marks[literal.variable() as usize] = false;
        }

        let reference = self.klauses.add_original(id, &self.klause);
        self.counters.ticks += 1;
        self.counters.original += 1;
        self.end_original = self.klauses.len();
        self.klause.clear();
        self.connect_original(reference);
        Ok(())
    }

    pub fn clause_with_id(&mut self, id: u32, literals: &[Literal]) -> Result<(), KittenError> {
        self.clause_with_id_and_exception(id, literals, None)
    }

    /// Adds a clause without an id.
    pub fn clause(&mut self, literals: &[Literal]) -> Result<(), KittenError> {
        self.clause_with_id_and_exception(NO_ID, literals, None)
    }

    pub fn unit(&mut self, literal: Literal) -> Result<(), KittenError> {
        self.clause(&[literal])
    }

    pub fn binary(&mut self, a: Literal, b: Literal) -> Result<(), KittenError> {
        self.clause(&[a, b])
    }

    /// Assumes `literal` for the next solve.
    pub fn assume(&mut self, literal: Literal) {
        if self.status != KittenStatus::Unknown {
            self.reset_incremental();
        }
        let internal = self.import_literal(literal);
        log::trace!(target: targets::KITTEN, "Assume {internal}");
        self.assumptions.push(internal);
    }

    /// The value of `literal` in the satisfying assignment found.
    ///
    /// A literal never given to the kitten is unassigned.
    pub fn value(&self, literal: Literal) -> Result<Value, KittenError> {
        self.require(KittenStatus::Satisfiable)?;
        Ok(match self.internal_literal(literal) {
            Some(internal) => self.values.value(internal),
            None => Value::Unassigned,
        })
    }

    /// The value of `literal`, if assigned at the root level, and otherwise unassigned.
    pub fn fixed(&self, literal: Literal) -> Value {
        match self.internal_literal(literal) {
            Some(internal) if self.vars[internal.variable() as usize].level == 0 => self.values.value(internal),
            _ => Value::Unassigned,
        }
    }

    /// Attempts to flip the value of `literal` in the satisfying assignment, without falsifying any clause.
    ///
    /// Returns true if the value was flipped.
    pub fn flip_literal(&mut self, literal: Literal) -> Result<bool, KittenError> {
        self.require(KittenStatus::Satisfiable)?;
        Ok(match self.internal_literal(literal) {
            Some(internal) => self.flip_internal(internal),
            None => false,
        })
    }

    /// True if `literal` is an assumption used to derive unsatisfiability.
    pub fn failed(&self, literal: Literal) -> Result<bool, KittenError> {
        self.require(KittenStatus::Unsatisfiable)?;
        Ok(match self.internal_literal(literal) {
            Some(internal) => self.failed[internal.index()],
            None => false,
        })
    }

    /// Removes every clause, assumption and variable, keeping only counters and the source of randomness.
    ///
    /// Clearing twice is the same as clearing once.
    pub fn clear(&mut self) {
        log::trace!(target: targets::KITTEN, "Clearing {} variables", self.vars.len());
        self.status = KittenStatus::Unknown;
        self.antecedents = false;
        self.learned = false;
        self.level = 0;
        self.propagated = 0;
        self.unassigned = 0;
        self.inconsistent = None;
        self.failing = None;
        self.end_original = 0;

        self.klauses.clear();
        self.values = Valuation::default();
        self.vars.clear();
        self.marks.clear();
        self.phases.clear();
        self.failed.clear();
        self.queue = Queue::default();
        self.watches.clear();
        self.import.clear();
        self.export.clear();

        self.analyzed.clear();
        self.assumptions.clear();
        self.core.clear();
        self.klause.clear();
        self.resolved.clear();
        self.trail.clear();
        self.units.clear();

        self.ticks_limit = u64::MAX;
    }
}

/// A Fisher-Yates shuffle.
fn shuffle<T>(rng: &mut MinimalPCG32, items: &mut [T]) {
    for index in 1..items.len() {
        let other = rng.random_range(0..=index);
        items.swap(index, other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    #[test]
    fn satisfiable() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1), lit(2)]).unwrap();
        kitten.clause(&[lit(-1), lit(2)]).unwrap();
        kitten.clause(&[lit(-2), lit(3), lit(4)]).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.value(lit(2)), Ok(Value::True));
        assert_eq!(kitten.value(lit(-2)), Ok(Value::False));
        assert_eq!(kitten.value(lit(100)), Ok(Value::Unassigned));
        assert!(kitten.value(lit(3)).unwrap().is_true() || kitten.value(lit(4)).unwrap().is_true());
    }

    #[test]
    fn unsatisfiable() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1), lit(2)]).unwrap();
        kitten.clause(&[lit(-1), lit(2)]).unwrap();
        kitten.clause(&[lit(1), lit(-2)]).unwrap();
        kitten.clause(&[lit(-1), lit(-2)]).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
        assert_eq!(kitten.status().code(), 20);
    }

    #[test]
    fn status_misuse() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1)]).unwrap();
        assert_eq!(
            kitten.value(lit(1)),
            Err(KittenError::Status {
                expected: KittenStatus::Satisfiable,
                found: KittenStatus::Unknown
            })
        );
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert!(kitten.failed(lit(1)).is_err());
        assert!(kitten.compute_clausal_core().is_err());
    }

    #[test]
    fn duplicate_variable() {
        let mut kitten = Kitten::default();
        assert_eq!(kitten.clause(&[lit(1), lit(-1)]), Err(KittenError::DuplicateVariable));
        // The exception removes the duplicate.
        kitten.clause_with_id_and_exception(3, &[lit(1), lit(2), lit(-1)], Some(lit(-1))).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
    }

    #[test]
    fn import_is_sparse() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1_000), lit(-50_000)]).unwrap();
        assert_eq!(kitten.variables(), 2);
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
    }

    #[test]
    fn assumptions_reset_after_solve() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1), lit(2)]).unwrap();
        kitten.assume(lit(-1));
        kitten.assume(lit(-2));
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
        assert_eq!(kitten.failed(lit(-1)), Ok(true));
        assert_eq!(kitten.failed(lit(-2)), Ok(true));

        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
    }

    #[test]
    fn clashing_assumptions() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1), lit(2)]).unwrap();
        kitten.assume(lit(3));
        kitten.assume(lit(-3));
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
        assert_eq!(kitten.failed(lit(3)), Ok(true));
        assert_eq!(kitten.failed(lit(-3)), Ok(true));
    }

    #[test]
    fn root_falsified_assumption() {
        let mut kitten = Kitten::default();
        kitten.unit(lit(-1)).unwrap();
        kitten.clause(&[lit(2), lit(3)]).unwrap();
        kitten.assume(lit(2));
        kitten.assume(lit(1));
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
        assert_eq!(kitten.failed(lit(1)), Ok(true));
        assert_eq!(kitten.failed(lit(2)), Ok(false));
        assert_eq!(kitten.fixed(lit(-1)), Value::True);
    }

    #[test]
    fn flip() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1), lit(2)]).unwrap();
        kitten.unit(lit(3)).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.flip_literal(lit(3)), Ok(false));

        let one = kitten.value(lit(1)).unwrap();
        let two = kitten.value(lit(2)).unwrap();
        // With both true either may flip, with one true that one is stuck.
        if one.is_true() && two.is_true() {
            assert_eq!(kitten.flip_literal(lit(1)), Ok(true));
            assert_eq!(kitten.value(lit(1)), Ok(Value::False));
            assert_eq!(kitten.flip_literal(lit(2)), Ok(false));
        } else if one.is_true() {
            assert_eq!(kitten.flip_literal(lit(1)), Ok(false));
        } else {
            assert_eq!(kitten.flip_literal(lit(2)), Ok(false));
        }
    }

    #[test]
    fn ticks_limit() {
        let mut kitten = Kitten::default();
        for x in 1..20 {
            kitten.clause(&[lit(x), lit(x + 1)]).unwrap();
        }
        kitten.set_ticks_limit(0);
        assert_eq!(kitten.solve(), KittenStatus::Unknown);
        kitten.no_ticks_limit();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);

        kitten.set_ticks_limit(u64::MAX);
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
    }

    #[test]
    fn clear_idempotent() {
        let mut kitten = Kitten::default();
        kitten.clause(&[lit(1)]).unwrap();
        kitten.clause(&[lit(-1)]).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);

        kitten.clear();
        kitten.clear();
        assert_eq!(kitten.variables(), 0);
        assert_eq!(kitten.status(), KittenStatus::Unknown);

        kitten.clause(&[lit(-1)]).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.value(lit(1)), Ok(Value::False));
    }

    #[test]
    fn shuffled_and_randomized() {
        let mut kitten = Kitten::with_seed(7);
        for x in 1..10 {
            kitten.clause(&[lit(x), lit(-(x + 1)), lit(x + 2)]).unwrap();
        }
        kitten.shuffle_clauses().unwrap();
        kitten.randomize_phases();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        kitten.flip_phases();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.queue.iter().count(), kitten.variables());
    }
}
