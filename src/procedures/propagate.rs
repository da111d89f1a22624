/*!
Unit propagation over watch lists.

See [GenericContext::propagate] for the relevant context method.

# Overview

Each literal on the trail after the propagated index is taken in turn, and the watch list of its negation (now false) is examined:

- A binary watch holds the other literal of the clause.
  If the other literal is true there's nothing to do, if false the clause is a conflict, and otherwise the other literal is assigned with the binary clause as the reason.
- A long watch holds a reference and a blocking literal.
  If the blocking literal is true the clause is satisfied without a visit to the [arena](crate::db::arena).
  Otherwise, the false watched literal is moved to the second position of the clause and the first (other) watched literal is inspected.
  If the other watched literal is true, the blocking literal is updated to it.
  Otherwise a replacement for the false literal is searched for, starting from the searched cursor of the clause and wrapping around.
  On success the clause is watched from the replacement and the watch is dropped from the list.
  On failure the clause is a conflict if the other watched literal is false, and otherwise asserts the other watched literal.

The list being examined is taken from the [watches](crate::db::watches) for the duration, and compacted in place with a read and a write cursor.
The first conflict found ends propagation, with the remaining watches copied back unexamined.

# Ticks

Each literal propagated and each visit to a long clause adds a tick to the [counters](crate::context::Counters).
Ticks are the measure of work for every budget of the context, in place of time.

# Level zero

A literal assigned at level zero is fixed for the life of the context.
So, the reason of the literal is dropped (and replaced with [Unit](Reason::Unit)), the variable is removed from both heuristics, and, if the literal was propagated, the unit is passed to the proof.
*/

use crate::{
    context::GenericContext,
    db::{
        arena::Reference,
        assignment::{Assigned, Reason},
        watches::Watch,
    },
    heuristics::Heuristic,
    misc::log::targets,
    structures::{literal::Literal, value::Value},
};

/// A clause falsified by the current valuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conflict {
    /// A binary clause, as its two literals.
    Binary(Literal, Literal),

    /// A long clause.
    Clause(Reference),
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Makes `literal` true at the current level, for the given reason.
    pub(crate) fn assign(&mut self, literal: Literal, reason: Reason) {
        let variable = literal.variable();
        let level = self.trail.level();

        let reason = match level {
            0 => {
                if !matches!(reason, Reason::Unit) {
                    self.proof.add(&[literal]);
                }
                self.flags[variable as usize].fixed = true;
                self.counters.fixed += 1;
                self.queue.dequeue(variable);
                self.scores.dequeue(variable);
                log::trace!(target: targets::PROPAGATION, "Fixed {literal}");
                Reason::Unit
            }
            _ => reason,
        };

        self.values.set(literal);
        self.assigned[variable as usize] = Assigned {
            level,
            reason,
            trail: self.trail.len() as u32,
        };
        self.trail.push(literal);
        self.unassigned -= 1;
    }

    /// The value of `literal` if assigned at level zero, and unassigned otherwise.
    pub(crate) fn root_value(&self, literal: Literal) -> Value {
        match self.assigned[literal.variable() as usize].level {
            0 => self.values.value(literal),
            _ => Value::Unassigned,
        }
    }

    /// Propagates every literal on the trail not yet propagated, stopping at the first conflict.
    ///
    /// For documentation see [procedures::propagate](crate::procedures::propagate).
    pub fn propagate(&mut self) -> Option<Conflict> {
        while !self.trail.fully_propagated() {
            let literal = self.trail.literals()[self.trail.propagated];
            self.trail.propagated += 1;
            self.counters.propagations += 1;
            self.counters.ticks += 1;

            if let Some(conflict) = self.propagate_literal(literal) {
                log::trace!(target: targets::PROPAGATION, "Conflict {conflict:?} from {literal}");
                return Some(conflict);
            }
        }
        None
    }

    /// Examines the watches of the negation of `literal`, which has just become true.
    fn propagate_literal(&mut self, literal: Literal) -> Option<Conflict> {
        let not_literal = !literal;
        let mut list = self.watches.take(not_literal);

        let mut read = 0;
        let mut write = 0;
        let mut conflict = None;

        while read < list.len() {
            let watch = list[read];
            read += 1;
            list[write] = watch;
            write += 1;

            match watch {
                Watch::Binary { other, .. } => match self.values.value(other) {
                    Value::True => {}
                    Value::False => {
                        conflict = Some(Conflict::Binary(not_literal, other));
                        break;
                    }
                    Value::Unassigned => self.assign(other, Reason::Binary(not_literal)),
                },

                Watch::Long { blit, reference } => {
                    if self.values.value(blit).is_true() {
                        continue;
                    }
                    self.counters.ticks += 1;

                    let mut clause = self.arena.clause_mut(reference);
                    let size = clause.size();
                    let searched = clause.searched();
                    let literals = clause.literals_mut();
                    if literals[0] == not_literal {
                        literals.swap(0, 1);
                    }
                    let other = literals[0];
                    let other_value = self.values.value(other);
                    if other_value.is_true() {
                        list[write - 1] = Watch::Long { blit: other, reference };
                        continue;
                    }

                    let start = match searched < size {
                        true => searched.max(2),
                        false => 2,
                    };
                    let replacement = (start..size)
                        .chain(2..start)
                        .find(|position| !self.values.value(literals[*position]).is_false());

                    match replacement {
                        Some(position) => {
                            literals.swap(1, position);
                            let watched = literals[1];
                            clause.set_searched(position);
                            self.watches.watch_long(watched, other, reference);
                            write -= 1;
                        }

                        None if other_value.is_false() => {
                            conflict = Some(Conflict::Clause(reference));
                            break;
                        }

                        None => self.assign(other, Reason::Clause(reference)),
                    }
                }
            }
        }

        while read < list.len() {
            list[write] = list[read];
            read += 1;
            write += 1;
        }
        list.truncate(write);
        self.watches.restore(not_literal, list);

        conflict
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, context::Context, structures::literal::Literal};

    use super::*;

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    #[test]
    fn long_clause_asserts_last() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2, 3, 4]).unwrap();

        context.trail.new_level(Some(lit(-1)));
        context.assign(lit(-1), Reason::Decision);
        context.trail.new_level(Some(lit(-3)));
        context.assign(lit(-3), Reason::Decision);
        assert!(context.propagate().is_none());
        assert!(context.values.value(lit(2)).is_unassigned());

        context.trail.new_level(Some(lit(-4)));
        context.assign(lit(-4), Reason::Decision);
        assert!(context.propagate().is_none());
        assert!(context.values.value(lit(2)).is_true());
        assert!(matches!(context.assigned[1].reason, Reason::Clause(_)));
    }

    #[test]
    fn binary_conflict() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2]).unwrap();
        context.add_clause(&[1, -2]).unwrap();

        context.trail.new_level(Some(lit(-1)));
        context.assign(lit(-1), Reason::Decision);
        let conflict = context.propagate();
        assert!(matches!(conflict, Some(Conflict::Binary(..))));
        assert!(context.counters.ticks > 0);
    }

    #[test]
    fn root_units_are_fixed() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2, 3]).unwrap();
        context.add_clause(&[-1]).unwrap();
        context.add_clause(&[-2]).unwrap();

        assert!(context.values.value(lit(3)).is_true());
        assert_eq!(context.assigned[2].reason, Reason::Unit);
        assert!(context.flags[2].fixed);
        assert_eq!(context.root_value(lit(3)), Value::True);
    }
}
