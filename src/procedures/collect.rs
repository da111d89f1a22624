/*!
Garbage collection of the [arena](crate::db::arena).

Clauses are deleted by marking them as garbage, and the space of a garbage clause is only recovered by a collection.

A collection:
1. At level zero, removes literals false at level zero from each clause, as a derived clause (with the original deleted).
   A clause shortened to two literals moves from the arena to the watches.
2. [Compacts](crate::db::arena::Arena::compact) the arena, which moves each surviving clause and so changes its reference.
3. Remaps the reference of every reason on the trail.
   A reason is never garbage, and so a reason without a relocation is fatal.
4. Rebuilds every long watch from the first two literals of each clause, which are the watched literals.

Any reference held outside of the context is stale after a collection.
*/

use crate::{
    context::GenericContext,
    db::{arena::Reference, assignment::Reason},
    misc::{fatal, log::targets},
    structures::literal::Literal,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Collects garbage from the arena.
    ///
    /// For documentation, see [procedures::collect](crate::procedures::collect).
    pub fn collect_garbage(&mut self) {
        if self.trail.level() == 0 && self.trail.fully_propagated() {
            self.shrink_falsified();
        }

        let before = self.arena.len();
        let relocations = self.arena.compact();

        for literal in self.trail.literals() {
            let variable = literal.variable() as usize;
            if let Reason::Clause(reference) = self.assigned[variable].reason {
                match relocations.get(reference) {
                    Some(relocated) => self.assigned[variable].reason = Reason::Clause(relocated),
                    None => fatal!("Reason {reference} of {literal} was collected"),
                }
            }
        }

        self.watches.flush_long();
        for reference in self.arena.references() {
            self.watches.watch_clause(self.arena.literals(reference), reference);
        }
        self.arena.shrink_arena();

        self.counters.collections += 1;
        log::debug!(target: targets::ARENA, "Collection {} kept {} clauses, {before} to {} words", self.counters.collections, relocations.len(), self.arena.len());
    }

    /// Removes literals false at level zero from every clause not satisfied at level zero.
    fn shrink_falsified(&mut self) {
        let references = self.arena.references().collect::<Vec<_>>();
        for reference in references {
            let clause = self.arena.clause(reference);
            if clause.is_garbage() {
                continue;
            }
            let literals = clause.literals();
            if literals.iter().any(|literal| self.root_value(*literal).is_true())
                || !literals.iter().any(|literal| self.root_value(*literal).is_false())
            {
                continue;
            }

            let original = literals.to_vec();
            let redundant = clause.is_redundant();
            let kept = original
                .iter()
                .copied()
                .filter(|literal| !self.root_value(*literal).is_false())
                .collect::<Vec<Literal>>();
            if kept.len() < 2 {
                continue;
            }

            self.proof.add(&kept);
            self.proof.delete(&original);
            match kept.len() {
                2 => {
                    self.watches.watch_binary(kept[0], kept[1], redundant);
                    self.arena.clause_mut(reference).set_garbage();
                }
                size => {
                    self.arena.clause_mut(reference).literals_mut()[..size].copy_from_slice(&kept);
                    self.arena.shrink_clause(reference, size);
                }
            }
        }
    }

    /// Iterates over every clause of the arena which isn't garbage, with its (current) reference.
    ///
    /// Binary clauses are not stored in the arena, and so aren't included.
    pub fn clauses(&self) -> impl Iterator<Item = (Reference, &[Literal])> + '_ {
        self.arena.references().filter_map(|reference| {
            let clause = self.arena.clause(reference);
            match clause.is_garbage() {
                true => None,
                false => Some((reference, clause.literals())),
            }
        })
    }

    /// The literals of the clause at `reference`.
    pub fn clause_literals(&self, reference: Reference) -> &[Literal] {
        self.arena.literals(reference)
    }
}
