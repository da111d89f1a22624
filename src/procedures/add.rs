/*!
Adding clauses to a context.

# Overview

Clauses are given either whole, with [add_clause](GenericContext::add_clause), or literal by literal, with [add](GenericContext::add), where a zero ends the clause (as in IPASIR and the DIMACS format).
External literals are non-zero signed integers, and variables are created as needed by the literals given.
[reserve](GenericContext::reserve) creates variables in advance.

Before it's stored, a clause is simplified with respect to the values fixed at level zero:

- Duplicate literals are removed.
- A tautology, a clause with some literal and its negation, is not stored.
- Each literal of an [eliminated](crate::db::substitution) variable is replaced by its representative.
  The substituted clause is passed to the proof as derived, and the clause given as deleted.
- A clause with some literal true at level zero is not stored.
- Literals false at level zero are removed.
  The shortened clause is passed to the proof as derived, and the clause given as deleted.

What remains determines how the clause is stored:

| Literals | Storage                                                          |
|----------|------------------------------------------------------------------|
| 0        | None, the context is [inconsistent](GenericContext::is_inconsistent) |
| 1        | Assigned at level zero and propagated at once                    |
| 2        | Watches only                                                     |
| 3+       | The [arena](crate::db::arena), watched from its first two literals |

So, adding `{1}` and then `{-1}` makes the context inconsistent without a solve.
*/

use crate::{
    context::GenericContext,
    db::assignment::{Assigned, Flags, Reason},
    heuristics::Heuristic,
    misc::log::targets,
    structures::literal::{Literal, Variable, MAX_VARIABLE},
    types::err::{ClauseDBError, ErrorKind},
};

/// Ok results of adding a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added, perhaps shortened, perhaps as a unit.
    Added,

    /// The clause contains some literal and its negation.
    Tautology,

    /// Some literal of the clause is true at level zero.
    Satisfied,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Ensures variables `1..=variables` (externally) exist.
    pub fn reserve(&mut self, variables: usize) -> Result<(), ErrorKind> {
        if variables > MAX_VARIABLE as usize + 1 {
            return Err(ClauseDBError::VariablesExhausted.into());
        }
        self.enlarge(variables);
        Ok(())
    }

    /// Extends every per-variable structure to cover `variables` variables.
    fn enlarge(&mut self, variables: usize) {
        let old = self.flags.len();
        if variables <= old {
            return;
        }
        log::trace!(target: targets::PROPAGATION, "Enlarging to {variables} variables");

        self.values.resize(variables);
        self.assigned.resize(variables, Assigned::default());
        self.flags.resize(variables, Flags::default());
        self.watches.resize(variables);
        self.phases.resize(variables, self.config.phase.value);
        self.substitution.resize(variables);
        self.analysis.resize(variables);
        self.failed.resize(2 * variables, false);
        self.queue.resize(variables);
        self.scores.resize(variables);
        for variable in old..variables {
            self.queue.enqueue(variable as Variable);
            self.scores.enqueue(variable as Variable);
        }
        self.unassigned += variables - old;
    }

    /// The internal literal of an external literal, with variables created as required.
    pub(crate) fn import_literal(&mut self, external: i32) -> Result<Literal, ErrorKind> {
        if external == 0 || external == i32::MIN {
            return Err(ErrorKind::InvalidLiteral(external));
        }
        let Some(literal) = Literal::from_external(external) else {
            return Err(ClauseDBError::VariablesExhausted.into());
        };
        self.enlarge(literal.variable() as usize + 1);
        Ok(literal)
    }

    /// Adds a literal to the clause being given literal by literal, with zero ending the clause.
    pub fn add(&mut self, external: i32) -> Result<(), ErrorKind> {
        if external == 0 {
            let clause = std::mem::take(&mut self.clause_buffer);
            self.add_internal_clause(clause)?;
            return Ok(());
        }
        match self.import_literal(external) {
            Ok(literal) => {
                self.clause_buffer.push(literal);
                Ok(())
            }
            Err(e) => {
                self.clause_buffer.clear();
                Err(e)
            }
        }
    }

    /// Adds a clause of external literals.
    pub fn add_clause(&mut self, clause: &[i32]) -> Result<ClauseOk, ErrorKind> {
        if !self.clause_buffer.is_empty() {
            return Err(ClauseDBError::Unterminated.into());
        }
        let mut literals = Vec::with_capacity(clause.len());
        for external in clause {
            literals.push(self.import_literal(*external)?);
        }
        self.add_internal_clause(literals)
    }

    /// Adds a clause of internal literals.
    pub fn add_internal_clause(&mut self, mut clause: Vec<Literal>) -> Result<ClauseOk, ErrorKind> {
        self.reset_incremental();
        if let Some(max) = clause.iter().map(|literal| literal.variable()).max() {
            if max > MAX_VARIABLE {
                return Err(ClauseDBError::VariablesExhausted.into());
            }
            self.enlarge(max as usize + 1);
        }
        self.counters.original += 1;

        clause.sort_unstable();
        clause.dedup();
        self.proof.original(&clause);

        if clause.windows(2).any(|pair| pair[0] == !pair[1]) {
            log::trace!(target: targets::PROPAGATION, "Tautology {clause:?}");
            return Ok(ClauseOk::Tautology);
        }

        if let Some(substituted) = self.substitution.apply(&clause) {
            if substituted.windows(2).any(|pair| pair[0] == !pair[1]) {
                log::trace!(target: targets::PROPAGATION, "Tautology after substitution {clause:?}");
                self.proof.delete(&clause);
                return Ok(ClauseOk::Tautology);
            }
            self.proof.add(&substituted);
            self.proof.delete(&clause);
            clause = substituted;
        }
        for literal in &clause {
            self.flags[literal.variable() as usize].active = true;
        }

        if self.inconsistent {
            return Ok(ClauseOk::Added);
        }

        if clause.iter().any(|literal| self.root_value(*literal).is_true()) {
            self.proof.delete(&clause);
            return Ok(ClauseOk::Satisfied);
        }

        let given = clause.len();
        let mut shortened = clause.clone();
        shortened.retain(|literal| !self.root_value(*literal).is_false());
        if shortened.len() < given {
            self.proof.add(&shortened);
            self.proof.delete(&clause);
        }

        match shortened.as_slice() {
            [] => {
                log::info!(target: targets::PROPAGATION, "Empty clause added");
                self.inconsistent = true;
            }

            [unit] => {
                self.assign(*unit, Reason::Unit);
                if self.propagate().is_some() {
                    log::info!(target: targets::PROPAGATION, "Conflict at level zero from unit {unit}");
                    self.proof.add(&[]);
                    self.inconsistent = true;
                }
            }

            [a, b] => self.watches.watch_binary(*a, *b, false),

            long => {
                let reference = self.arena.add_clause(long, false, 0);
                self.watches.watch_clause(long, reference);
            }
        }
        Ok(ClauseOk::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, context::Context};

    #[test]
    fn contradictory_units() {
        let mut context = Context::from_config(Config::default());
        assert_eq!(context.add_clause(&[1]), Ok(ClauseOk::Added));
        assert!(!context.is_inconsistent());
        assert_eq!(context.add_clause(&[-1]), Ok(ClauseOk::Added));
        assert!(context.is_inconsistent());
    }

    #[test]
    fn simplified_on_entry() {
        let mut context = Context::from_config(Config::default());
        assert_eq!(context.add_clause(&[1, -1, 2]), Ok(ClauseOk::Tautology));
        assert_eq!(context.add_clause(&[-3]), Ok(ClauseOk::Added));
        assert_eq!(context.add_clause(&[-3, 4, 5]), Ok(ClauseOk::Satisfied));

        // Shortened to a binary clause, so the arena stays empty.
        assert_eq!(context.add_clause(&[3, 4, 5, 5]), Ok(ClauseOk::Added));
        assert!(context.arena.is_empty());
        assert_eq!(context.watches.binaries().count(), 1);
    }

    #[test]
    fn streaming() {
        let mut context = Context::from_config(Config::default());
        for literal in [1, 2, 3, 0, -1, 0] {
            context.add(literal).unwrap();
        }
        assert_eq!(context.arena.references().count(), 1);
        assert!(context.values.value(Literal::from_external(-1).unwrap()).is_true());

        context.add(4).unwrap();
        assert_eq!(
            context.add_clause(&[5]),
            Err(ErrorKind::ClauseDB(ClauseDBError::Unterminated))
        );
        context.add(0).unwrap();
        assert_eq!(context.variables(), 4);
    }

    #[test]
    fn invalid_literals() {
        let mut context = Context::from_config(Config::default());
        assert_eq!(context.add_clause(&[1, 0]), Err(ErrorKind::InvalidLiteral(0)));
        assert_eq!(context.add_clause(&[i32::MIN]), Err(ErrorKind::InvalidLiteral(i32::MIN)));
        assert_eq!(
            context.add_clause(&[i32::MAX]),
            Err(ErrorKind::ClauseDB(ClauseDBError::VariablesExhausted))
        );
        assert_eq!(context.reserve(usize::MAX), Err(ClauseDBError::VariablesExhausted.into()));
    }
}
