/*!
Backbone probing, with the [kitten](crate::kitten) sub-solver.

A backbone literal is a literal true in every model of the formula.
Propagation finds some backbone literals (the units), and probing finds others by asking the kitten about the clauses around a variable.

# Overview

A round of probing is made at level zero, and for each candidate variable (up to [Config::backbone_candidates](crate::config::Config::backbone_candidates), from a random offset):

1. The [environment](crate::procedures::environment) of the variable is gathered, up to [Config::backbone_clauses](crate::config::Config::backbone_clauses) clauses.
2. The environment is given to a cleared kitten, and solved.
   If the environment is unsatisfiable, so is the formula, and the context is inconsistent.
3. In the model found, the literal of the candidate is true.
   If the kitten can flip the literal without falsifying any clause of the environment, the literal is not a backbone literal of the environment.
4. Otherwise, the negation of the literal is assumed and the environment solved again.
   If the assumption fails, the literal is implied by the environment, and so by the formula, and is fixed at level zero.

Each kitten solve is limited to [Config::backbone_ticks](crate::config::Config::backbone_ticks) ticks, and a solve which reaches the limit settles nothing.

# Proofs

After each refutation the learned clauses of the clausal core are passed to the proof before the unit (or empty clause) found, as described in [environment](crate::procedures::environment).
*/

use crate::{
    context::GenericContext,
    db::assignment::Reason,
    kitten::KittenStatus,
    misc::log::targets,
    procedures::environment::{Environment, Formula},
    structures::{
        literal::{Literal, Variable},
        value::Value,
    },
    types::err::ErrorKind,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// True if a round of backbone probing is due.
    pub(crate) fn backboning(&self) -> bool {
        self.config.backbone.value && self.counters.conflicts >= self.schedule.backbone
    }

    /// Makes a round of backbone probing.
    ///
    /// For documentation, see [procedures::backbone](crate::procedures::backbone).
    pub(crate) fn backbone(&mut self) -> Result<(), ErrorKind> {
        self.counters.backbone_rounds += 1;
        self.schedule.backbone =
            self.counters.conflicts + self.config.backbone_interval.value * (self.counters.backbone_rounds + 1);

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
            .take(self.config.backbone_candidates.value)
            .map(|variable| variable as Variable)
            .collect::<Vec<_>>();
        log::debug!(target: targets::BACKBONE, "Round {} with {} candidates", self.counters.backbone_rounds, candidates.len());

        let units_before = self.counters.backbone_units;
        for candidate in candidates {
            if self.flags[candidate as usize].fixed {
                continue;
            }
            let environment = formula.environment(candidate, self.config.backbone_clauses.value);
            self.probe(candidate, &formula, &environment)?;
            if self.inconsistent {
                break;
            }
        }

        log::debug!(target: targets::BACKBONE, "Round {} found {} units", self.counters.backbone_rounds, self.counters.backbone_units - units_before);
        self.kitten.clear();
        Ok(())
    }

    /// Probes whether the literal of `candidate` in a model of `environment` is a backbone literal.
    fn probe(&mut self, candidate: Variable, formula: &Formula, environment: &Environment) -> Result<(), ErrorKind> {
        self.load_environment(formula, environment, self.config.backbone_ticks.value)?;

        match self.kitten.solve() {
            KittenStatus::Satisfiable => {}
            KittenStatus::Unsatisfiable => {
                log::info!(target: targets::BACKBONE, "Environment of {} is unsatisfiable", candidate + 1);
                let lemmas = self.replay_core()?;
                self.proof.add(&[]);
                self.inconsistent = true;
                self.delete_lemmas(lemmas);
                return Ok(());
            }
            KittenStatus::Unknown | KittenStatus::Core => return Ok(()),
        }

        let positive = Literal::new(candidate, true);
        let literal = match self.kitten.value(positive)? {
            Value::False => !positive,
            Value::True | Value::Unassigned => positive,
        };
        if self.kitten.flip_literal(literal)? {
            return Ok(());
        }

        self.kitten.assume(!literal);
        match self.kitten.solve() {
            KittenStatus::Unsatisfiable => {}
            KittenStatus::Satisfiable | KittenStatus::Unknown | KittenStatus::Core => return Ok(()),
        }

        let failed = self.kitten.failed(!literal)?;
        let lemmas = self.replay_core()?;
        match failed {
            true => {
                log::debug!(target: targets::BACKBONE, "Backbone literal {literal}");
                self.counters.backbone_units += 1;
                self.proof.add(&[literal]);
                self.assign(literal, Reason::Unit);
                self.delete_lemmas(lemmas);
                if self.propagate().is_some() {
                    self.proof.add(&[]);
                    self.inconsistent = true;
                }
            }

            false => {
                self.proof.add(&[]);
                self.inconsistent = true;
                self.delete_lemmas(lemmas);
            }
        }
        Ok(())
    }
}
