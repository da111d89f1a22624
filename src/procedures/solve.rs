/*!
Determines the satisfiability of the formula in a context.

# Overview

A solve loops over propagation, conflict analysis, the scheduled procedures, and decisions:

```text
  loop
    propagate
    conflict?    → analyze, and backjump (or unsatisfiable at level zero)
    limit?       → unknown
    terminate?   → unknown
    restart?     → restart
    rephase?     → rephase
    backbone?    → backbone probing at level zero
    sweep?       → sweeping for equivalent literals at level zero
    reduce?      → reduce and collect
    switch?      → switch mode
    decide       → satisfiable if no variable remains, unsatisfiable if an assumption fails
```

The limits given with [set_conflict_limit](GenericContext::set_conflict_limit) and friends apply to the solve which follows, relative to the counts at its start, and are then cleared.

# Incremental use

After a solve, the state of the context is one of [Satisfiable](ContextState::Satisfiable), [Unsatisfiable](ContextState::Unsatisfiable), or [Unknown](ContextState::Unknown).
If satisfiable, the values of literals are available with [value](GenericContext::value), and if unsatisfiable under assumptions the failed assumptions are available with [failed](GenericContext::failed).

The next call to add a clause, assume, or solve returns the context to level zero, clears the assumptions, and returns the state to [Input](ContextState::Input).

# Example

```rust
# use kissat_core::{config::Config, context::Context, reports::Report};
let mut context = Context::from_config(Config::default());
context.add_clause(&[1, 2]).unwrap();
context.add_clause(&[-1, 2]).unwrap();

context.assume(-2).unwrap();
assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
assert_eq!(context.failed(-2), Ok(true));

assert_eq!(context.solve(), Ok(Report::Satisfiable));
assert_eq!(context.value(2), Ok(2));
assert_eq!(context.fixed(2), Ok(1));
```
*/

use crate::{
    context::{ContextState, GenericContext, Limits},
    misc::log::targets,
    procedures::decide::DecisionOk,
    reports::Report,
    structures::{literal::Literal, value::Value},
    types::err::{ClauseDBError, ErrorKind, StateError},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Determines the satisfiability of the context, under any assumptions given.
    ///
    /// For documentation, see [procedures::solve](crate::procedures::solve).
    pub fn solve(&mut self) -> Result<Report, ErrorKind> {
        if !self.clause_buffer.is_empty() {
            return Err(ClauseDBError::Unterminated.into());
        }
        self.reset_incremental();
        self.counters.solves += 1;
        self.state = ContextState::Solving;

        self.bounds = self.limits.bounds_from(&self.counters);
        self.limits = Limits::default();
        log::info!(target: targets::DECISION, "Solve {} with {} variables and {} assumptions", self.counters.solves, self.variables(), self.assumptions.len());

        let result = self.search();
        self.state = match result {
            Ok(Report::Satisfiable) => ContextState::Satisfiable,
            Ok(Report::Unsatisfiable) => ContextState::Unsatisfiable,
            Ok(Report::Unknown) | Err(_) => ContextState::Unknown,
        };
        log::info!(target: targets::DECISION, "Solve {}: {}", self.counters.solves, self.report());
        result
    }

    fn search(&mut self) -> Result<Report, ErrorKind> {
        if self.inconsistent {
            return Ok(Report::Unsatisfiable);
        }

        loop {
            if let Some(conflict) = self.propagate() {
                self.counters.conflicts += 1;
                self.analyze(conflict)?;
                if self.inconsistent {
                    return Ok(Report::Unsatisfiable);
                }
                continue;
            }

            if self.bounds.reached(&self.counters) {
                log::info!(target: targets::DECISION, "Limit reached");
                return Ok(Report::Unknown);
            }
            if self.check_callback_terminate() {
                log::info!(target: targets::DECISION, "Terminated by callback");
                return Ok(Report::Unknown);
            }

            if self.restarting() {
                self.restart();
            }
            if self.rephasing() {
                self.rephase();
            }
            if self.backboning() {
                self.backbone()?;
                if self.inconsistent {
                    return Ok(Report::Unsatisfiable);
                }
                continue;
            }
            if self.sweeping() {
                self.sweep()?;
                if self.inconsistent {
                    return Ok(Report::Unsatisfiable);
                }
                continue;
            }
            if self.reducing() {
                self.reduce();
            }
            if self.switching() {
                self.switch_mode();
                continue;
            }

            match self.decide() {
                DecisionOk::Literal(_) | DecisionOk::Satisfied => {}
                DecisionOk::Exhausted => return Ok(Report::Satisfiable),
                DecisionOk::Failed(assumption) => {
                    self.analyze_failed(assumption);
                    return Ok(Report::Unsatisfiable);
                }
            }
        }
    }

    /// The value of the (external) literal in the satisfying valuation found, as the literal if true, its negation if false, or zero if without a value.
    ///
    /// The value of an eliminated variable is the value of its representative.
    ///
    /// Requires the last solve to have been satisfiable.
    pub fn value(&self, external: i32) -> Result<i32, ErrorKind> {
        if self.state != ContextState::Satisfiable {
            return Err(StateError::NotSatisfiable.into());
        }
        let literal = Literal::from_external(external).ok_or(ErrorKind::InvalidLiteral(external))?;
        if literal.variable() as usize >= self.variables() {
            return Ok(0);
        }
        Ok(match self.values.value(self.substitution.resolve(literal)) {
            Value::True => external,
            Value::False => -external,
            Value::Unassigned => 0,
        })
    }

    /// The value of the (external) literal at level zero, as 1 if true, -1 if false, and 0 otherwise.
    pub fn fixed(&self, external: i32) -> Result<i32, ErrorKind> {
        let literal = Literal::from_external(external).ok_or(ErrorKind::InvalidLiteral(external))?;
        if literal.variable() as usize >= self.variables() {
            return Ok(0);
        }
        Ok(match self.root_value(self.substitution.resolve(literal)) {
            Value::True => 1,
            Value::False => -1,
            Value::Unassigned => 0,
        })
    }
}
