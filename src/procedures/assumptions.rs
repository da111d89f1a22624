/*!
Assumptions, and failed assumptions.

Assumptions are literals which hold for the next solve only.
Each is [decided](crate::procedures::decide) before any free decision, and so the solve is a search for a valuation extending the assumptions.

If some assumption is found false when it comes to be decided, the solve is unsatisfiable under the assumptions.
The assumptions responsible are then found by a walk back over the trail from the false assumption, through the reasons of each literal, to the decisions reached.
Each decision reached is an assumption, as no free decision is made before every assumption holds.
These assumptions, together with the false assumption, are the *failed* assumptions, available through [failed](GenericContext::failed).

After a solve, the next call to add a clause, assume, or solve clears the assumptions and the failed assumptions, and returns the context to level zero.
*/

use crate::{
    context::{ContextState, GenericContext},
    db::assignment::Reason,
    misc::log::targets,
    structures::literal::Literal,
    types::err::{ErrorKind, StateError},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Assumes the (external) literal for the next solve.
    pub fn assume(&mut self, external: i32) -> Result<(), ErrorKind> {
        self.reset_incremental();
        let literal = self.import_literal(external)?;
        let literal = self.substitution.resolve(literal);
        self.flags[literal.variable() as usize].active = true;
        log::trace!(target: targets::DECISION, "Assume {literal}");
        self.assumptions.push(literal);
        Ok(())
    }

    /// True if the (external) literal is an assumption responsible for the last solve being unsatisfiable.
    ///
    /// Requires the last solve to have been unsatisfiable.
    pub fn failed(&self, external: i32) -> Result<bool, ErrorKind> {
        if self.state != ContextState::Unsatisfiable {
            return Err(StateError::NotUnsatisfiable.into());
        }
        let literal = Literal::from_external(external).ok_or(ErrorKind::InvalidLiteral(external))?;
        let literal = self.substitution.resolve(literal);
        Ok(self.failed.get(literal.index()).copied().unwrap_or(false))
    }

    /// Marks the assumptions responsible for `assumption` being false as failed.
    pub(crate) fn analyze_failed(&mut self, assumption: Literal) {
        self.failed[assumption.index()] = true;
        let variable = assumption.variable() as usize;
        if self.assigned[variable].level == 0 {
            log::debug!(target: targets::ANALYSIS, "Assumption {assumption} false at level zero");
            return;
        }

        let mut seen = vec![false; self.variables()];
        seen[variable] = true;
        for literal in self.trail.literals().iter().rev() {
            let variable = literal.variable() as usize;
            if !seen[variable] {
                continue;
            }
            let assignment = self.assigned[variable];
            if assignment.level == 0 {
                continue;
            }
            match assignment.reason {
                Reason::Decision => self.failed[literal.index()] = true,
                Reason::Unit => {}
                Reason::Binary(other) => seen[other.variable() as usize] = true,
                Reason::Clause(reference) => {
                    for other in self.arena.literals(reference) {
                        seen[other.variable() as usize] = true;
                    }
                }
            }
        }
        log::debug!(target: targets::ANALYSIS, "Failed assumptions: {}", self.failed.iter().filter(|failed| **failed).count());
    }

    /// Returns to level zero and clears the assumptions, if a solve has been made since the last input.
    pub(crate) fn reset_incremental(&mut self) {
        if self.state == ContextState::Input {
            return;
        }
        self.backtrack(0);
        self.assumptions.clear();
        self.failed.fill(false);
        self.state = ContextState::Input;
    }

    /// Returns to level zero for inprocessing.
    ///
    /// Outside of a solve this loses the valuation of the last solve, and so the context returns to input as after [reset_incremental](Self::reset_incremental).
    pub(crate) fn return_to_root(&mut self) {
        match self.state {
            ContextState::Solving => self.backtrack(0),
            _ => self.reset_incremental(),
        }
    }
}
