/*!
Watch lists.

Each literal has a list of [Watch]es for the clauses which need to be examined when the literal becomes false.

- A binary clause is never stored in the [arena](crate::db::arena), and instead exists only as a pair of [Watch::Binary] entries, one in the list of each literal, each holding the other literal.
- A long clause is watched from its first two literals with a [Watch::Long] entry holding the reference of the clause together with a blocking literal.
  The blocking literal is some other literal of the clause, and if true the clause is satisfied without any need to visit the arena.

Propagation keeps the watched literals of a long clause in the first two positions of the clause.
So, after a [compaction](crate::db::arena::Arena::compact) long watches are rebuilt directly from the arena.
*/

use crate::{db::arena::Reference, structures::literal::Literal};

/// A watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watch {
    /// A binary clause, with the other literal of the clause.
    Binary { other: Literal, redundant: bool },

    /// A long clause, with a blocking literal.
    Long { blit: Literal, reference: Reference },
}

/// The watch lists of every literal.
#[derive(Default)]
pub struct Watches {
    lists: Vec<Vec<Watch>>,
}

impl Watches {
    /// Extends the lists to cover `variables` variables.
    pub fn resize(&mut self, variables: usize) {
        self.lists.resize_with(2 * variables, Vec::default);
    }

    /// The watches of `literal`.
    pub fn list(&self, literal: Literal) -> &[Watch] {
        &self.lists[literal.index()]
    }

    /// Takes the watch list of `literal`, leaving an empty list in its place.
    ///
    /// Used during propagation, so the watches of other literals may be updated while the list is traversed.
    /// The list should be returned with [restore](Watches::restore).
    pub fn take(&mut self, literal: Literal) -> Vec<Watch> {
        std::mem::take(&mut self.lists[literal.index()])
    }

    /// Returns a list taken with [take](Watches::take).
    pub fn restore(&mut self, literal: Literal, list: Vec<Watch>) {
        let slot = &mut self.lists[literal.index()];
        debug_assert!(slot.is_empty());
        *slot = list;
    }

    /// Watches the binary clause `a ∨ b` from both literals.
    pub fn watch_binary(&mut self, a: Literal, b: Literal, redundant: bool) {
        self.lists[a.index()].push(Watch::Binary { other: b, redundant });
        self.lists[b.index()].push(Watch::Binary { other: a, redundant });
    }

    /// Watches the clause at `reference` from `literal`, with `blit` as the blocking literal.
    pub fn watch_long(&mut self, literal: Literal, blit: Literal, reference: Reference) {
        self.lists[literal.index()].push(Watch::Long { blit, reference });
    }

    /// Watches a long clause from its first two literals.
    pub fn watch_clause(&mut self, literals: &[Literal], reference: Reference) {
        self.watch_long(literals[0], literals[1], reference);
        self.watch_long(literals[1], literals[0], reference);
    }

    /// Removes both watches of the binary clause `a ∨ b`.
    pub fn remove_binary(&mut self, a: Literal, b: Literal) {
        self.lists[a.index()].retain(|watch| !matches!(watch, Watch::Binary { other, .. } if *other == b));
        self.lists[b.index()].retain(|watch| !matches!(watch, Watch::Binary { other, .. } if *other == a));
    }

    /// Removes every long watch, keeping binary watches.
    pub fn flush_long(&mut self) {
        for list in self.lists.iter_mut() {
            list.retain(|watch| matches!(watch, Watch::Binary { .. }));
        }
    }

    /// Iterates over each binary clause once, as `(a, b, redundant)` with `a < b`.
    pub fn binaries(&self) -> impl Iterator<Item = (Literal, Literal, bool)> + '_ {
        self.lists.iter().enumerate().flat_map(|(index, list)| {
            let literal = Literal::from_index(index);
            list.iter().filter_map(move |watch| match watch {
                Watch::Binary { other, redundant } if literal < *other => Some((literal, *other, *redundant)),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    #[test]
    fn binary_symmetry() {
        let mut watches = Watches::default();
        watches.resize(3);
        watches.watch_binary(lit(1), lit(-2), false);
        watches.watch_binary(lit(2), lit(3), true);

        assert_eq!(watches.list(lit(1)), &[Watch::Binary { other: lit(-2), redundant: false }]);
        assert_eq!(watches.list(lit(-2)), &[Watch::Binary { other: lit(1), redundant: false }]);
        assert_eq!(watches.binaries().count(), 2);

        watches.remove_binary(lit(-2), lit(1));
        assert!(watches.list(lit(1)).is_empty());
        assert!(watches.list(lit(-2)).is_empty());
        assert_eq!(watches.binaries().collect::<Vec<_>>(), vec![(lit(2), lit(3), true)]);
    }

    #[test]
    fn flush_keeps_binaries() {
        let mut watches = Watches::default();
        watches.resize(4);
        let mut arena = crate::db::arena::Arena::default();
        let clause = [lit(1), lit(2), lit(3)];
        let reference = arena.add_clause(&clause, false, 0);
        watches.watch_clause(&clause, reference);
        watches.watch_binary(lit(1), lit(4), false);

        assert_eq!(watches.list(lit(1)).len(), 2);
        watches.flush_long();
        assert_eq!(watches.list(lit(1)), &[Watch::Binary { other: lit(4), redundant: false }]);
        assert!(watches.list(lit(2)).is_empty());
    }
}
