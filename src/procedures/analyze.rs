/*!
Analysis of a conflict.

Takes a clause falsified by the current valuation and learns an asserting clause, then backjumps and asserts it.

# Overview

The conflict clause is resolved with the reasons of its literals at the conflict level, in reverse trail order, until a single literal of the conflict level remains.
This literal is the first unique implication point (UIP), and its negation is the literal asserted by the learned clause.

- Literals at level zero are skipped throughout, as they're fixed for the life of the context.
- Each redundant clause used as a reason (or as the conflict) is marked as used, which protects the clause from the next [reduction](crate::procedures::reduce).

The learned clause is then:
1. [Minimized](crate::procedures::minimize), by removal of literals implied by other literals of the clause.
2. Given a glue, the count of distinct levels among its literals.
3. Ordered so the asserted literal is first and a literal of the highest remaining level is second.
   The second literal sets the backjump level, and the two are watched.

Each variable seen during analysis is bumped in the [heuristic](crate::heuristics::Heuristic) of the current mode, and the target and best phases are updated from the trail before the backjump.

| Learned | Stored                                   | Reason of the asserted literal |
|---------|------------------------------------------|--------------------------------|
| Unit    | Not stored, fixed at level zero           | [Unit](Reason::Unit)           |
| Binary  | Redundant binary watches                 | [Binary](Reason::Binary)       |
| Long    | Redundant clause in the [arena](crate::db::arena) | [Clause](Reason::Clause) |

A conflict at level zero derives the empty clause.

# Example

```rust, ignore
match self.analyze(conflict)? {
    AnalysisOk::Empty => return Ok(self.unsatisfiable()),
    AnalysisOk::Unit(literal) | AnalysisOk::Asserting { literal, .. } => {}
}
```
*/

use crate::{
    context::GenericContext,
    db::{
        arena::MAX_USED,
        assignment::{Assigned, Reason},
    },
    heuristics::SearchMode,
    misc::log::targets,
    procedures::propagate::Conflict,
    structures::literal::{Literal, Variable},
    types::err::{AnalysisError, ErrorKind},
};

/// Marks of variables during analysis and minimization.
pub(crate) mod marks {
    /// The variable was resolved on, or is in the learned clause.
    pub const SEEN: u8 = 1;

    /// The literal of the variable is not implied by the learned clause.
    pub const POISONED: u8 = 1 << 1;

    /// The literal of the variable is implied by the learned clause.
    pub const REMOVABLE: u8 = 1 << 2;
}

/// Buffers of conflict analysis, kept between conflicts.
#[derive(Default)]
pub struct Analysis {
    /// Marks of each variable.
    pub(crate) marks: Vec<u8>,

    /// Every variable with a mark.
    pub(crate) analyzed: Vec<Variable>,

    /// Levels with some literal in the learned clause, indexed by level.
    pub(crate) levels: Vec<bool>,

    /// Every level with a flag set in `levels`.
    pub(crate) pulled: Vec<u32>,

    /// The learned clause.
    pub(crate) clause: Vec<Literal>,
}

impl Analysis {
    /// Extends the buffers to cover `variables` variables.
    pub fn resize(&mut self, variables: usize) {
        self.marks.resize(variables, 0);
        self.levels.resize(variables + 1, false);
    }

    /// Marks `literal` as part of the conflict at `level`.
    ///
    /// Returns true if the literal is at `level` and had not been seen.
    /// Otherwise the literal is placed in the learned clause, unless already seen or fixed.
    fn mark(&mut self, assigned: &[Assigned], literal: Literal, level: u32) -> bool {
        let variable = literal.variable();
        if self.marks[variable as usize] & marks::SEEN != 0 {
            return false;
        }
        let literal_level = assigned[variable as usize].level;
        if literal_level == 0 {
            return false;
        }
        self.marks[variable as usize] |= marks::SEEN;
        self.analyzed.push(variable);
        if literal_level == level {
            return true;
        }
        self.clause.push(literal);
        if !self.levels[literal_level as usize] {
            self.levels[literal_level as usize] = true;
            self.pulled.push(literal_level);
        }
        false
    }

    /// Clears every mark, ready for the next conflict.
    fn clear(&mut self) {
        for variable in self.analyzed.drain(..) {
            self.marks[variable as usize] = 0;
        }
        for level in self.pulled.drain(..) {
            self.levels[level as usize] = false;
        }
    }
}

/// Possible 'Ok' results from conflict analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisOk {
    /// The empty clause was derived, and so the context is inconsistent.
    Empty,

    /// A unit clause was learned, and its literal asserted at level zero.
    Unit(Literal),

    /// A clause was learned and its first literal asserted after a backjump to `level`.
    Asserting { literal: Literal, level: u32 },
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Analyses `conflict`, learns a clause, backjumps, and asserts the learned clause.
    ///
    /// For documentation, see [procedures::analyze](crate::procedures::analyze).
    pub fn analyze(&mut self, conflict: Conflict) -> Result<AnalysisOk, ErrorKind> {
        let level = self.trail.level();
        if level == 0 {
            log::info!(target: targets::ANALYSIS, "Conflict at level zero");
            self.proof.add(&[]);
            self.inconsistent = true;
            return Ok(AnalysisOk::Empty);
        }
        log::trace!(target: targets::ANALYSIS, "Analysis of {conflict:?} at level {level}");

        self.analysis.clause.clear();
        self.analysis.clause.push(Literal::new(0, true));

        let mut open = 0;
        match conflict {
            Conflict::Binary(a, b) => {
                open += self.analysis.mark(&self.assigned, a, level) as usize;
                open += self.analysis.mark(&self.assigned, b, level) as usize;
            }
            Conflict::Clause(reference) => {
                self.note_reason_use(reference);
                for literal in self.arena.literals(reference) {
                    open += self.analysis.mark(&self.assigned, *literal, level) as usize;
                }
            }
        }

        let mut position = self.trail.len();
        let uip = loop {
            let literal = loop {
                if position == 0 {
                    log::error!(target: targets::ANALYSIS, "No unique implication point found");
                    self.analysis.clear();
                    return Err(AnalysisError::NoAssertion.into());
                }
                position -= 1;
                let literal = self.trail.literals()[position];
                let variable = literal.variable() as usize;
                if self.analysis.marks[variable] & marks::SEEN != 0 && self.assigned[variable].level == level {
                    break literal;
                }
            };

            open = open.saturating_sub(1);
            if open == 0 {
                break literal;
            }

            match self.assigned[literal.variable() as usize].reason {
                Reason::Binary(other) => {
                    open += self.analysis.mark(&self.assigned, other, level) as usize;
                }

                Reason::Clause(reference) => {
                    self.note_reason_use(reference);
                    for other in self.arena.literals(reference) {
                        if *other != literal {
                            open += self.analysis.mark(&self.assigned, *other, level) as usize;
                        }
                    }
                }

                Reason::Decision | Reason::Unit => {
                    log::error!(target: targets::ANALYSIS, "Resolution reached {literal} without a reason");
                    self.analysis.clear();
                    return Err(AnalysisError::NoDecision.into());
                }
            }
        };

        self.analysis.clause[0] = !uip;
        if !self.analysis.levels[level as usize] {
            self.analysis.levels[level as usize] = true;
            self.analysis.pulled.push(level);
        }

        if self.config.minimize.value {
            let before = self.analysis.clause.len();
            self.minimize();
            self.counters.minimized += (before - self.analysis.clause.len()) as u64;
        }

        let mut clause = std::mem::take(&mut self.analysis.clause);

        let mut glue_levels = clause
            .iter()
            .map(|literal| self.assigned[literal.variable() as usize].level)
            .collect::<Vec<_>>();
        glue_levels.sort_unstable();
        glue_levels.dedup();
        let glue = glue_levels.len() as u32;

        let mut jump = 0;
        for index in 1..clause.len() {
            let literal_level = self.assigned[clause[index].variable() as usize].level;
            if literal_level > jump {
                jump = literal_level;
                clause.swap(1, index);
            }
        }

        let bumped = self
            .analysis
            .analyzed
            .iter()
            .copied()
            .filter(|variable| self.analysis.marks[*variable as usize] & marks::SEEN != 0)
            .collect::<Vec<_>>();
        self.mode.select(&mut self.queue, &mut self.scores).bump(&bumped);
        self.analysis.clear();

        self.update_phases();
        self.proof.add(&clause);
        self.counters.learned += 1;

        let asserted = clause[0];
        let result = match clause.len() {
            1 => {
                log::debug!(target: targets::ANALYSIS, "Learned unit {asserted}");
                self.counters.learned_units += 1;
                self.backtrack(0);
                self.assign(asserted, Reason::Unit);
                AnalysisOk::Unit(asserted)
            }

            2 => {
                log::trace!(target: targets::ANALYSIS, "Learned binary {asserted} {}", clause[1]);
                self.watches.watch_binary(asserted, clause[1], true);
                self.backtrack(jump);
                self.assign(asserted, Reason::Binary(clause[1]));
                AnalysisOk::Asserting { literal: asserted, level: jump }
            }

            _ => {
                let reference = self.arena.add_clause(&clause, true, glue);
                let used = match glue <= self.tiers.tier2 {
                    true => MAX_USED,
                    false => MAX_USED - 1,
                };
                self.arena.clause_mut(reference).set_used(used);
                self.watches.watch_clause(&clause, reference);
                log::trace!(target: targets::ANALYSIS, "Learned {reference} with glue {glue}: {clause:?}");
                self.backtrack(jump);
                self.assign(asserted, Reason::Clause(reference));
                AnalysisOk::Asserting { literal: asserted, level: jump }
            }
        };

        self.averages[self.mode.index()].update(glue);
        if self.mode == SearchMode::Stable {
            self.reluctant.tick();
        }

        clause.clear();
        self.analysis.clause = clause;
        Ok(result)
    }

    /// Notes the use of a redundant clause in analysis.
    fn note_reason_use(&mut self, reference: crate::db::arena::Reference) {
        let clause = self.arena.clause(reference);
        if !clause.is_redundant() {
            return;
        }
        let glue = clause.glue();
        self.tiers.note_use(glue);
        let used = match glue <= self.tiers.tier2 {
            true => MAX_USED,
            false => MAX_USED - 1,
        };
        self.arena.clause_mut(reference).set_used(used);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, context::Context};

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    fn decide(context: &mut Context, external: i32) {
        context.trail.new_level(Some(lit(external)));
        context.assign(lit(external), Reason::Decision);
    }

    #[test]
    fn learns_unit() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[-1, 2]).unwrap();
        context.add_clause(&[-1, 3]).unwrap();
        context.add_clause(&[-2, -3, 4]).unwrap();
        context.add_clause(&[-2, -3, -4]).unwrap();

        decide(&mut context, 1);
        let conflict = context.propagate().unwrap();
        assert_eq!(context.analyze(conflict), Ok(AnalysisOk::Unit(lit(-1))));
        assert_eq!(context.trail.level(), 0);
        assert!(context.flags[0].fixed);
        assert_eq!(context.counters.learned_units, 1);
    }

    #[test]
    fn backjumps_over_unrelated_levels() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[-1, -2, 3]).unwrap();
        context.add_clause(&[-1, -2, -3]).unwrap();
        context.add_clause(&[4, 5]).unwrap();

        decide(&mut context, 1);
        decide(&mut context, 4);
        decide(&mut context, 2);
        let conflict = context.propagate().unwrap();

        assert_eq!(
            context.analyze(conflict),
            Ok(AnalysisOk::Asserting { literal: lit(-2), level: 1 })
        );
        assert_eq!(context.trail.level(), 1);
        assert!(context.values.value(lit(-2)).is_true());
        assert_eq!(context.assigned[1].reason, Reason::Binary(lit(-1)));
        assert!(context.analysis.analyzed.is_empty());
    }

    #[test]
    fn level_zero_conflict() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2]).unwrap();
        let conflict = Conflict::Binary(lit(1), lit(2));
        assert_eq!(context.analyze(conflict), Ok(AnalysisOk::Empty));
        assert!(context.is_inconsistent());
    }
}
