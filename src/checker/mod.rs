/*!
An internal checker of learned and deleted clauses.

The checker keeps its own copy of every clause added to or derived by the context, indexed by a hash of the sorted literals of the clause, with its own watches, values and trail.
Nothing is shared with the context, and the checker only sees clauses as they are passed to it.

- Original clauses are added without any check.
- Each derived clause is checked to be a reverse unit propagation (RUP) consequence of the clauses held: the negation of each literal is assigned, and propagation over the held clauses must reach a conflict.
- Each deleted clause must be held.

A failed check is a bug in the solver, and so is [fatal](crate::misc::fatal_error).

The checker is enabled by [Config::checker](crate::config::Config::checker), and is fed by the same events as the proof callbacks.

```rust
# use kissat_core::checker::Checker;
# use kissat_core::structures::literal::Literal;
let lits = |xs: &[i32]| xs.iter().filter_map(|x| Literal::from_external(*x)).collect::<Vec<_>>();
let mut checker = Checker::default();
checker.add_original(&lits(&[1, 2]));
checker.add_original(&lits(&[-1, 2]));
checker.add_derived(&lits(&[2]));
checker.delete(&lits(&[1, 2]));
assert_eq!(checker.counters().checked, 1);
```
*/

use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
};

use crate::{
    misc::{fatal, log::targets},
    structures::{
        literal::Literal,
        value::{Valuation, Value},
    },
};

struct CheckerClause {
    /// The literals of the clause, with the watched literals first.
    literals: Vec<Literal>,
    hash: u64,
    garbage: bool,
}

/// Counts of events seen by a checker.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckerCounters {
    pub originals: usize,
    pub checked: usize,
    pub deleted: usize,
}

/// The checker struct.
#[derive(Default)]
pub struct Checker {
    clauses: Vec<CheckerClause>,
    table: HashMap<u64, Vec<usize>>,
    watches: Vec<Vec<usize>>,
    values: Valuation,
    trail: Vec<Literal>,
    propagated: usize,
    inconsistent: bool,
    counters: CheckerCounters,
}

/// Sorts and deduplicates a copy of `literals`, for use as the identity of a clause.
fn normalise(literals: &[Literal]) -> Vec<Literal> {
    let mut sorted = literals.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

fn hash_of(sorted: &[Literal]) -> u64 {
    let mut hasher = DefaultHasher::new();
    sorted.hash(&mut hasher);
    hasher.finish()
}

fn display(literals: &[Literal]) -> String {
    literals
        .iter()
        .map(|literal| literal.as_external().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Checker {
    pub fn counters(&self) -> CheckerCounters {
        self.counters
    }

    /// True if the clauses held are known to be unsatisfiable.
    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    fn ensure(&mut self, literals: &[Literal]) {
        if let Some(max) = literals.iter().map(|literal| literal.variable() as usize + 1).max() {
            if self.values.variables() < max {
                self.values.resize(max);
                self.watches.resize_with(2 * max, Vec::default);
            }
        }
    }

    fn value(&self, literal: Literal) -> Value {
        self.values.value(literal)
    }

    fn assign(&mut self, literal: Literal) {
        self.values.set(literal);
        self.trail.push(literal);
    }

    /// Propagates the trail, returning false on a conflict.
    fn propagate(&mut self) -> bool {
        while self.propagated < self.trail.len() {
            let not_literal = !self.trail[self.propagated];
            self.propagated += 1;

            let mut list = std::mem::take(&mut self.watches[not_literal.index()]);
            let mut read = 0;
            let mut write = 0;
            let mut conflict = false;

            while read < list.len() {
                let index = list[read];
                read += 1;
                let clause = &mut self.clauses[index];
                if clause.garbage {
                    continue;
                }
                if clause.literals[0] == not_literal {
                    clause.literals.swap(0, 1);
                }
                let other = clause.literals[0];
                if self.values.value(other).is_true() {
                    list[write] = index;
                    write += 1;
                    continue;
                }
                let replacement = (2..clause.literals.len())
                    .find(|position| !self.values.value(clause.literals[*position]).is_false());
                if let Some(position) = replacement {
                    clause.literals.swap(1, position);
                    let watched = clause.literals[1];
                    self.watches[watched.index()].push(index);
                    continue;
                }
                list[write] = index;
                write += 1;
                if self.values.value(other).is_false() {
                    conflict = true;
                    break;
                }
                self.values.set(other);
                self.trail.push(other);
            }

            while read < list.len() {
                list[write] = list[read];
                read += 1;
                write += 1;
            }
            list.truncate(write);
            self.watches[not_literal.index()] = list;

            if conflict {
                return false;
            }
        }
        true
    }

    /// Stores a clause, and watches or propagates the clause as required.
    fn insert(&mut self, literals: &[Literal]) {
        self.ensure(literals);
        let sorted = normalise(literals);
        let hash = hash_of(&sorted);
        let index = self.clauses.len();
        self.table.entry(hash).or_default().push(index);

        let tautology = sorted.windows(2).any(|pair| pair[0] == !pair[1]);
        let satisfied = sorted.iter().any(|literal| self.value(*literal).is_true());
        let mut unassigned: Vec<Literal> = sorted
            .iter()
            .copied()
            .filter(|literal| self.value(*literal).is_unassigned())
            .collect();

        if !self.inconsistent && !tautology && !satisfied {
            match unassigned.len() {
                0 => {
                    log::info!(target: targets::CHECKER, "Checker found the empty clause");
                    self.inconsistent = true;
                }
                1 => {
                    self.assign(unassigned[0]);
                    if !self.propagate() {
                        log::info!(target: targets::CHECKER, "Checker found a root conflict");
                        self.inconsistent = true;
                    }
                }
                _ => {
                    self.watches[unassigned[0].index()].push(index);
                    self.watches[unassigned[1].index()].push(index);
                }
            }
        }

        // Root false literals follow the watched literals, and are never examined again.
        let mut ordered = std::mem::take(&mut unassigned);
        ordered.extend(sorted.iter().copied().filter(|literal| !self.value(*literal).is_unassigned()));
        self.clauses.push(CheckerClause {
            literals: ordered,
            hash,
            garbage: false,
        });
    }

    /// Adds an original clause.
    pub fn add_original(&mut self, literals: &[Literal]) {
        log::trace!(target: targets::CHECKER, "Original {}", display(literals));
        self.counters.originals += 1;
        self.insert(literals);
    }

    /// Checks and adds a derived clause.
    pub fn add_derived(&mut self, literals: &[Literal]) {
        log::trace!(target: targets::CHECKER, "Derived {}", display(literals));
        self.ensure(literals);
        self.counters.checked += 1;
        if !self.implied(literals) {
            fatal!("checker: derived clause {} is not implied", display(literals));
        }
        self.insert(literals);
    }

    /// True if `literals` is implied by unit propagation over the clauses held.
    fn implied(&mut self, literals: &[Literal]) -> bool {
        if self.inconsistent {
            return true;
        }
        let root = self.trail.len();
        let mut implied = false;
        for literal in literals {
            match self.value(*literal) {
                Value::True => {
                    implied = true;
                    break;
                }
                Value::False => {}
                Value::Unassigned => self.assign(!*literal),
            }
        }
        if !implied {
            implied = !self.propagate();
        }
        for literal in self.trail.drain(root..) {
            self.values.clear(literal);
        }
        self.propagated = root;
        implied
    }

    /// Deletes a clause, which must be held.
    pub fn delete(&mut self, literals: &[Literal]) {
        log::trace!(target: targets::CHECKER, "Delete {}", display(literals));
        let sorted = normalise(literals);
        let hash = hash_of(&sorted);
        let found = self.table.get(&hash).and_then(|bucket| {
            bucket.iter().position(|index| {
                let clause = &self.clauses[*index];
                clause.hash == hash && normalise(&clause.literals) == sorted
            })
        });
        let Some(position) = found else {
            fatal!("checker: deleted clause {} is not held", display(literals));
        };
        if let Some(bucket) = self.table.get_mut(&hash) {
            let index = bucket.swap_remove(position);
            self.clauses[index].garbage = true;
            if bucket.is_empty() {
                self.table.remove(&hash);
            }
        }
        self.counters.deleted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(externals: &[i32]) -> Vec<Literal> {
        externals
            .iter()
            .filter_map(|external| Literal::from_external(*external))
            .collect()
    }

    #[test]
    fn resolvent_is_implied() {
        let mut checker = Checker::default();
        checker.add_original(&lits(&[1, 2, 3]));
        checker.add_original(&lits(&[-1, 2, 3]));
        checker.add_derived(&lits(&[2, 3]));
        assert_eq!(checker.counters().checked, 1);
        assert!(!checker.is_inconsistent());
    }

    #[test]
    #[should_panic(expected = "not implied")]
    fn unsupported_clause() {
        let mut checker = Checker::default();
        checker.add_original(&lits(&[1, 2, 3]));
        checker.add_derived(&lits(&[1, 2]));
    }

    #[test]
    fn empty_clause_after_units() {
        let mut checker = Checker::default();
        checker.add_original(&lits(&[1, 2]));
        checker.add_original(&lits(&[-1, 2]));
        checker.add_original(&lits(&[-2]));
        assert!(checker.is_inconsistent());
        checker.add_derived(&[]);
    }

    #[test]
    fn delete_by_literal_set() {
        let mut checker = Checker::default();
        checker.add_original(&lits(&[3, 1, 2]));
        checker.delete(&lits(&[1, 2, 3]));
        assert_eq!(checker.counters().deleted, 1);
    }

    #[test]
    #[should_panic(expected = "not held")]
    fn delete_missing() {
        let mut checker = Checker::default();
        checker.add_original(&lits(&[1, 2, 3]));
        checker.delete(&lits(&[1, 2]));
    }

    #[test]
    fn deleted_clause_replaced() {
        let mut checker = Checker::default();
        checker.add_original(&lits(&[1, 2, 3]));
        checker.add_original(&lits(&[-1, 2, 3]));
        checker.delete(&lits(&[-1, 2, 3]));
        checker.add_original(&lits(&[-1, 2, 3, 4]));
        checker.add_derived(&lits(&[2, 3, 4]));
    }
}
