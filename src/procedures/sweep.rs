/*!
Sweeping for equivalent literals, with the [kitten](crate::kitten) sub-solver.

Two literals are equivalent if they take the same value in every model of the formula.
Sweeping finds equivalent literals by asking the kitten about the clauses around a variable, and then eliminates one variable of each pair found by substituting its equivalent literal.

# Overview

A round of sweeping is made at level zero, and for each candidate variable (up to [Config::sweep_candidates](crate::config::Config::sweep_candidates), from a random offset):

1. The [environment](crate::procedures::environment) of the variable is gathered, up to [Config::sweep_clauses](crate::config::Config::sweep_clauses) clauses, given to a cleared kitten, and solved.
   If the environment is unsatisfiable, so is the formula, and the context is inconsistent.
2. The literals of the variables of the environment which are true in the model found form a single class of candidates.
   Through the round, every literal of a class has the same value in each model seen, and so the literals of a class may be equivalent.
3. While some class has two literals `a` and `b`:
   - If the kitten can flip `a` (or `b`) in its model, the literal differs from the rest of its class in a model, and leaves the class.
   - Otherwise `¬a ∧ b` is assumed and the environment solved, and if unsatisfiable `a ∧ ¬b` is assumed and the environment solved.
     A model from either solve splits each class by the values of the model.
   - If both are unsatisfiable, `a` and `b` are equivalent, and the variable of the two with the larger index is eliminated in favour of the other literal.

Each kitten solve is limited to [Config::sweep_ticks](crate::config::Config::sweep_ticks) ticks, and a solve which reaches the limit ends the sweep of the candidate.

# Substitution

When `b` is eliminated in favour of `a`, every clause containing the variable of `b` is rewritten with `b` replaced by `a` (and `¬b` by `¬a`).
A rewritten clause which is a tautology or satisfied at level zero is deleted, and literals false at level zero are dropped, so rewriting may give new units.
The representative is recorded in the [substitution](crate::db::substitution) of the context, which extends each model to the eliminated variable and resolves literals given later.

# Proofs

The two binary clauses `a ∨ ¬b` and `¬a ∨ b` are passed to the proof, each after the learned clauses of the clausal core of its refutation.
The binary clauses are never deleted from the proof, as each later substitution of a literal of an eliminated variable depends on them.
Each rewritten clause is then passed to the proof as derived, and the clause rewritten as deleted.
*/

use crate::{
    context::GenericContext,
    db::assignment::Reason,
    heuristics::Heuristic,
    kitten::KittenStatus,
    misc::log::targets,
    procedures::environment::{Environment, Formula},
    structures::{
        literal::{Literal, Variable},
        value::Value,
    },
    types::err::ErrorKind,
};

/// Possible 'Ok' results from checking whether two literals are equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PairOk {
    /// The literal was flipped in the model of the kitten.
    Flipped(Literal),

    /// A model of the kitten gives the literals different values.
    Distinguished,

    /// The literals are equivalent, and the variable of the literal was eliminated.
    Equivalent(Literal),

    /// The kitten reached its ticks limit.
    Unknown,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// True if a round of sweeping is due.
    pub(crate) fn sweeping(&self) -> bool {
        self.config.sweep.value && self.counters.conflicts >= self.schedule.sweep
    }

    /// Makes a round of sweeping.
    ///
    /// For documentation, see [procedures::sweep](crate::procedures::sweep).
    pub(crate) fn sweep(&mut self) -> Result<(), ErrorKind> {
        self.counters.sweep_rounds += 1;
        self.schedule.sweep = self.counters.conflicts + self.config.sweep_interval.value * (self.counters.sweep_rounds + 1);

        if self.inconsistent || self.variables() == 0 {
            return Ok(());
        }
        self.return_to_root();
        if self.propagate().is_some() {
            self.proof.add(&[]);
            self.inconsistent = true;
            return Ok(());
        }

        let mut formula = self.irredundant_formula();

        let variables = self.variables();
        let offset = self.rng.random_range(0..variables);
        let candidates = (offset..variables)
            .chain(0..offset)
            .filter(|variable| {
                let flags = self.flags[*variable];
                flags.active && !flags.fixed && !flags.eliminated && !formula.occurrences[*variable].is_empty()
            })
            .take(self.config.sweep_candidates.value)
            .map(|variable| variable as Variable)
            .collect::<Vec<_>>();
        log::debug!(target: targets::SWEEP, "Round {} with {} candidates", self.counters.sweep_rounds, candidates.len());

        let equivalences_before = self.counters.sweep_equivalences;
        for candidate in candidates {
            let flags = self.flags[candidate as usize];
            if flags.fixed || flags.eliminated {
                continue;
            }
            let environment = formula.environment(candidate, self.config.sweep_clauses.value);
            let eliminated = self.sweep_variable(&formula, &environment)?;
            if self.inconsistent {
                break;
            }
            if eliminated > 0 {
                formula = self.irredundant_formula();
            }
        }

        log::debug!(target: targets::SWEEP, "Round {} found {} equivalences", self.counters.sweep_rounds, self.counters.sweep_equivalences - equivalences_before);
        self.kitten.clear();
        Ok(())
    }

    /// Sweeps the environment of a variable, and returns the count of variables eliminated.
    fn sweep_variable(&mut self, formula: &Formula, environment: &Environment) -> Result<usize, ErrorKind> {
        self.load_environment(formula, environment, self.config.sweep_ticks.value)?;
        self.counters.sweep_solved += 1;
        match self.kitten.solve() {
            KittenStatus::Satisfiable => {}
            KittenStatus::Unsatisfiable => {
                log::info!(target: targets::SWEEP, "Environment of {} is unsatisfiable", environment.variables[0] + 1);
                let lemmas = self.replay_core()?;
                self.proof.add(&[]);
                self.inconsistent = true;
                self.delete_lemmas(lemmas);
                return Ok(0);
            }
            KittenStatus::Unknown | KittenStatus::Core => return Ok(0),
        }

        let mut class = Vec::with_capacity(environment.variables.len());
        for variable in &environment.variables {
            if !self.is_sweepable(*variable) {
                continue;
            }
            let positive = Literal::new(*variable, true);
            match self.kitten.value(positive)? {
                Value::True => class.push(positive),
                Value::False => class.push(!positive),
                Value::Unassigned => {}
            }
        }
        let mut partition = vec![class];

        let mut eliminated = 0;
        while let Some(class) = partition.last_mut() {
            if self.inconsistent {
                break;
            }
            class.retain(|literal| {
                let flags = self.flags[literal.variable() as usize];
                !flags.fixed && !flags.eliminated
            });
            let size = class.len();
            if size < 2 {
                partition.pop();
                continue;
            }

            let (first, second) = (class[size - 2], class[size - 1]);
            match self.sweep_pair(first, second)? {
                PairOk::Flipped(literal) => class.retain(|other| *other != literal),
                PairOk::Equivalent(literal) => {
                    class.retain(|other| *other != literal);
                    eliminated += 1;
                }
                PairOk::Distinguished => partition = self.refine_partition(partition)?,
                PairOk::Unknown => break,
            }
        }
        Ok(eliminated)
    }

    fn is_sweepable(&self, variable: Variable) -> bool {
        let flags = self.flags[variable as usize];
        flags.active && !flags.fixed && !flags.eliminated
    }

    /// Splits each class of `partition` by the values of the current model of the kitten, dropping classes of a single literal.
    fn refine_partition(&self, partition: Vec<Vec<Literal>>) -> Result<Vec<Vec<Literal>>, ErrorKind> {
        let mut refined = Vec::with_capacity(2 * partition.len());
        for class in partition {
            let mut positive = Vec::default();
            let mut negative = Vec::default();
            for literal in class {
                if !self.is_sweepable(literal.variable()) {
                    continue;
                }
                match self.kitten.value(literal)? {
                    Value::True => positive.push(literal),
                    Value::False => negative.push(literal),
                    Value::Unassigned => {}
                }
            }
            for split in [positive, negative] {
                if split.len() > 1 {
                    refined.push(split);
                }
            }
        }
        Ok(refined)
    }

    /// Checks whether `first` and `second` are equivalent, and if so eliminates one of the two.
    fn sweep_pair(&mut self, first: Literal, second: Literal) -> Result<PairOk, ErrorKind> {
        if self.kitten.status() == KittenStatus::Satisfiable {
            for literal in [first, second] {
                if self.kitten.flip_literal(literal)? {
                    log::trace!(target: targets::SWEEP, "Flipped {literal}");
                    return Ok(PairOk::Flipped(literal));
                }
            }
        }

        let implication = match self.refute(!first, second)? {
            Some(lemmas) => lemmas,
            None if self.kitten.status() == KittenStatus::Satisfiable => return Ok(PairOk::Distinguished),
            None => return Ok(PairOk::Unknown),
        };
        let converse = match self.refute(first, !second)? {
            Some(lemmas) => lemmas,
            None if self.kitten.status() == KittenStatus::Satisfiable => return Ok(PairOk::Distinguished),
            None => return Ok(PairOk::Unknown),
        };

        self.add_lemmas(&implication);
        self.proof.add(&[first, !second]);
        self.delete_lemmas(implication);
        self.add_lemmas(&converse);
        self.proof.add(&[!first, second]);
        self.delete_lemmas(converse);

        let (representative, eliminated) = match first.variable() < second.variable() {
            true => (first, second),
            false => (second, first),
        };
        log::debug!(target: targets::SWEEP, "Equivalence {eliminated} = {representative}");
        self.substitute(eliminated, representative);
        Ok(PairOk::Equivalent(eliminated))
    }

    /// Solves the environment assuming `a` and `b`, and returns the learned clauses of the core if unsatisfiable.
    fn refute(&mut self, a: Literal, b: Literal) -> Result<Option<Vec<Vec<Literal>>>, ErrorKind> {
        self.kitten.assume(a);
        self.kitten.assume(b);
        self.counters.sweep_solved += 1;
        match self.kitten.solve() {
            KittenStatus::Unsatisfiable => Ok(Some(self.core_lemmas()?)),
            KittenStatus::Satisfiable | KittenStatus::Unknown | KittenStatus::Core => Ok(None),
        }
    }

    /// Eliminates the variable of `eliminated` by replacing each of its literals with the equivalent literal of `representative`.
    ///
    /// Requires level zero, and the binary clauses of the equivalence to have been passed to the proof.
    pub(crate) fn substitute(&mut self, eliminated: Literal, representative: Literal) {
        let variable = eliminated.variable();
        self.substitution.eliminate(eliminated, representative);
        self.flags[variable as usize].eliminated = true;
        self.flags[variable as usize].active = false;
        self.queue.dequeue(variable);
        self.scores.dequeue(variable);
        self.unassigned -= 1;
        self.counters.sweep_equivalences += 1;
        for assumption in self.assumptions.iter_mut() {
            *assumption = self.substitution.resolve(*assumption);
        }

        let mut units = Vec::default();

        let binaries = self
            .watches
            .binaries()
            .filter(|(a, b, _)| a.variable() == variable || b.variable() == variable)
            .collect::<Vec<_>>();
        for (a, b, redundant) in binaries {
            self.watches.remove_binary(a, b);
            self.rewrite_clause(&[a, b], redundant, 0, &mut units);
        }

        let references = self
            .arena
            .references()
            .filter(|reference| {
                let clause = self.arena.clause(*reference);
                !clause.is_garbage() && clause.literals().iter().any(|literal| literal.variable() == variable)
            })
            .collect::<Vec<_>>();
        for reference in references {
            let clause = self.arena.clause(reference);
            let literals = clause.literals().to_vec();
            let redundant = clause.is_redundant();
            let glue = clause.glue();
            self.arena.clause_mut(reference).set_garbage();
            self.rewrite_clause(&literals, redundant, glue, &mut units);
        }

        self.collect_garbage();
        if self.inconsistent {
            return;
        }

        for unit in units {
            match self.root_value(unit) {
                Value::True => {}
                Value::False => {
                    self.proof.add(&[]);
                    self.inconsistent = true;
                    return;
                }
                Value::Unassigned => self.assign(unit, Reason::Unit),
            }
        }
        if self.propagate().is_some() {
            log::info!(target: targets::SWEEP, "Conflict at level zero after substitution");
            self.proof.add(&[]);
            self.inconsistent = true;
        }
    }

    /// Stores `clause` with each literal resolved, or notes the unit it has become.
    ///
    /// The rewritten clause is passed to the proof before `clause` is deleted.
    fn rewrite_clause(&mut self, clause: &[Literal], redundant: bool, glue: u32, units: &mut Vec<Literal>) {
        let mut literals = Vec::with_capacity(clause.len());
        for literal in clause {
            let literal = self.substitution.resolve(*literal);
            match self.root_value(literal) {
                Value::True => {
                    self.proof.delete(clause);
                    return;
                }
                Value::False => {}
                Value::Unassigned => literals.push(literal),
            }
        }
        literals.sort_unstable();
        literals.dedup();
        if literals.windows(2).any(|pair| pair[0] == !pair[1]) {
            self.proof.delete(clause);
            return;
        }

        self.proof.add(&literals);
        self.proof.delete(clause);
        match literals.as_slice() {
            [] => {
                log::info!(target: targets::SWEEP, "Empty clause from substitution");
                self.inconsistent = true;
            }

            [unit] => units.push(*unit),

            [a, b] => self.watches.watch_binary(*a, *b, redundant),

            // Watched once the arena is collected.
            long => {
                let glue = glue.min(long.len() as u32 - 1);
                self.arena.add_clause(long, redundant, glue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, context::Context, reports::Report, structures::literal::Literal, types::err::StateError};

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    /// Clauses making 1, 2, 3, 4 and -5 equivalent.
    fn cycle(config: Config) -> Context {
        let mut context = Context::from_config(config);
        context.add_clause(&[-1, 3]).unwrap();
        context.add_clause(&[-3, 2]).unwrap();
        context.add_clause(&[-2, 4]).unwrap();
        context.add_clause(&[-4, 1]).unwrap();
        context.add_clause(&[1, 5]).unwrap();
        context.add_clause(&[-1, -5]).unwrap();
        context
    }

    #[test]
    fn eliminates_all_but_one() {
        let mut config = Config::default();
        config.checker.value = true;
        let mut context = cycle(config);
        context.sweep().unwrap();

        assert!(!context.is_inconsistent());
        assert_eq!(context.counters.sweep_equivalences, 4);
        assert!(!context.flags[0].eliminated);
        assert!((1..5).all(|variable| context.flags[variable].eliminated));
        assert_eq!(context.substitution.resolve(lit(4)), lit(1));
        assert_eq!(context.substitution.resolve(lit(5)), lit(-1));
        assert_eq!(context.watches.binaries().count(), 0);

        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        let one = context.value(1).unwrap();
        for external in 2..=4 {
            assert_eq!(context.value(external), Ok(one.signum() * external));
        }
        assert_eq!(context.value(5), Ok(-one.signum() * 5));
    }

    #[test]
    fn nothing_to_find() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2, 3]).unwrap();
        context.add_clause(&[-1, -2]).unwrap();
        context.add_clause(&[-3, 4]).unwrap();
        context.sweep().unwrap();

        assert_eq!(context.counters.sweep_equivalences, 0);
        assert!(context.flags.iter().all(|flags| !flags.eliminated));
    }

    #[test]
    fn clauses_given_later() {
        let mut config = Config::default();
        config.checker.value = true;
        let mut context = cycle(config);
        context.sweep().unwrap();
        assert!(context.flags[1].eliminated);

        assert!(context.add_clause(&[-2]).is_ok());
        assert_eq!(context.fixed(1), Ok(-1));
        assert_eq!(context.fixed(4), Ok(-1));
        assert_eq!(context.fixed(5), Ok(1));
        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        assert_eq!(context.value(3), Ok(-3));

        context.assume(3).unwrap();
        assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(context.failed(3), Ok(true));
    }

    #[test]
    fn valuation_dropped_between_solves() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2]).unwrap();
        context.add_clause(&[-1, 3]).unwrap();
        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        assert!(context.value(1).is_ok());

        context.sweep().unwrap();
        assert_eq!(context.value(1), Err(StateError::NotSatisfiable.into()));

        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        assert!(context.value(1) == Ok(1) || context.value(2) == Ok(2));
    }

    #[test]
    fn substituted_binary_becomes_unit() {
        let mut config = Config::default();
        config.checker.value = true;
        let mut context = Context::from_config(config);
        context.add_clause(&[-1, 2]).unwrap();
        context.add_clause(&[-2, 1]).unwrap();
        context.add_clause(&[1, 2]).unwrap();
        context.add_clause(&[-2, 3, 4]).unwrap();

        context.substitute_checked(lit(2), lit(1));
        assert!(!context.is_inconsistent());
        assert_eq!(context.fixed(1), Ok(1));
        assert_eq!(context.fixed(2), Ok(1));
        assert_eq!(context.watches.binaries().count(), 0);

        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        assert!(context.value(3) == Ok(3) || context.value(4) == Ok(4));
    }

    impl Context {
        /// Passes the equivalence `eliminated = representative` to the proof, and substitutes.
        fn substitute_checked(&mut self, eliminated: Literal, representative: Literal) {
            self.proof.add(&[representative, !eliminated]);
            self.proof.add(&[!representative, eliminated]);
            self.substitute(eliminated, representative);
        }
    }
}
