/*!
The arena, a flat and growable buffer of words holding every clause with more than two literals.

Clauses are identified by [Reference]s, word offsets into the arena, rather than by pointers.
So, the arena may be reallocated as it grows, and compacted by garbage collection, with the only cost being that references held elsewhere are remapped after a compaction.

# Layout

Each clause is a header of [HEADER_WORDS] words followed by its literals:

| Word | Contents                                   |
|------|--------------------------------------------|
| 0    | [flags] in the low byte, glue above        |
| 1    | The searched cursor for replacement watches |
| 2    | The size of the clause                     |
| 3..  | The literals of the clause                 |

The size of a clause and the shrunken flag are all that's needed to find the next clause, and so the arena is walked by [next_clause](Arena::next_clause) without any external index.

Shrinking a clause overwrites the freed literals with [TOMBSTONE] words.
The words are reclaimed only when the arena is [compacted](Arena::compact).
Bit 31 of the first header word is never set, and so a header is never mistaken for a tombstone.

# Capacity

Capacity doubles as required, up to [MAX_ARENA] words.
A reference is a `u32`, and exceeding the ceiling is [fatal](crate::misc::fatal_error).

```rust
# use kissat_core::db::arena::Arena;
# use kissat_core::structures::literal::Literal;
let mut arena = Arena::default();
let lits: Vec<Literal> = [1, -2, 3].iter().filter_map(|l| Literal::from_external(*l)).collect();
let reference = arena.add_clause(&lits, false, 0);

assert_eq!(arena.literals(reference), lits.as_slice());
assert_eq!(arena.references().count(), 1);
```
*/

use crate::{
    misc::{fatal, log::targets},
    structures::literal::Literal,
};

/// A count of words preceding the literals of a clause.
pub const HEADER_WORDS: usize = 3;

/// The maximum number of words held by an arena.
pub const MAX_ARENA: usize = if usize::BITS >= 64 { 1 << 31 } else { 1 << 29 };

/// The word written over literals removed by shrinking a clause.
pub const TOMBSTONE: u32 = u32::MAX;

/// The initial capacity of an arena, in words.
const INITIAL_CAPACITY: usize = 1 << 10;

/// Flags of a clause, in the first header word.
pub mod flags {
    pub const GARBAGE: u32 = 1;
    pub const REDUNDANT: u32 = 1 << 1;
    pub const REASON: u32 = 1 << 2;
    pub const SHRUNKEN: u32 = 1 << 3;

    /// The used counter occupies two bits.
    pub const USED_SHIFT: u32 = 4;
    pub const USED_MASK: u32 = 0b11 << USED_SHIFT;

    pub const GLUE_SHIFT: u32 = 8;
}

/// The largest value of the used counter.
pub const MAX_USED: u32 = 3;

/// The largest glue recorded, keeping bit 31 of the first header word clear.
pub const MAX_GLUE: u32 = (1 << 23) - 1;

/// A word offset into the arena identifying a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference(u32);

impl Reference {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Views a slice of literal words as literals.
pub(crate) fn as_literals(words: &[u32]) -> &[Literal] {
    // Safety: Literal is repr(transparent) over u32.
    unsafe { std::slice::from_raw_parts(words.as_ptr().cast::<Literal>(), words.len()) }
}

/// Views a mutable slice of literal words as literals.
pub(crate) fn as_literals_mut(words: &mut [u32]) -> &mut [Literal] {
    // Safety: Literal is repr(transparent) over u32.
    unsafe { std::slice::from_raw_parts_mut(words.as_mut_ptr().cast::<Literal>(), words.len()) }
}

/// A read-only view of a clause in the arena.
#[derive(Clone, Copy)]
pub struct Clause<'a> {
    words: &'a [u32],
}

impl<'a> Clause<'a> {
    pub fn size(&self) -> usize {
        self.words[2] as usize
    }

    pub fn glue(&self) -> u32 {
        self.words[0] >> flags::GLUE_SHIFT
    }

    pub fn used(&self) -> u32 {
        (self.words[0] & flags::USED_MASK) >> flags::USED_SHIFT
    }

    pub fn searched(&self) -> usize {
        self.words[1] as usize
    }

    pub fn is_garbage(&self) -> bool {
        self.words[0] & flags::GARBAGE != 0
    }

    pub fn is_redundant(&self) -> bool {
        self.words[0] & flags::REDUNDANT != 0
    }

    pub fn is_reason(&self) -> bool {
        self.words[0] & flags::REASON != 0
    }

    pub fn is_shrunken(&self) -> bool {
        self.words[0] & flags::SHRUNKEN != 0
    }

    pub fn literals(&self) -> &'a [Literal] {
        let words: &'a [u32] = self.words;
        as_literals(&words[HEADER_WORDS..])
    }
}

/// A mutable view of a clause in the arena.
pub struct ClauseMut<'a> {
    words: &'a mut [u32],
}

impl ClauseMut<'_> {
    pub fn size(&self) -> usize {
        self.words[2] as usize
    }

    pub fn glue(&self) -> u32 {
        self.words[0] >> flags::GLUE_SHIFT
    }

    pub fn searched(&self) -> usize {
        self.words[1] as usize
    }

    fn set_flag(&mut self, flag: u32, value: bool) {
        match value {
            true => self.words[0] |= flag,
            false => self.words[0] &= !flag,
        }
    }

    pub fn set_glue(&mut self, glue: u32) {
        let glue = glue.min(MAX_GLUE);
        self.words[0] = (self.words[0] & ((1 << flags::GLUE_SHIFT) - 1)) | (glue << flags::GLUE_SHIFT);
    }

    /// Sets the used counter, saturating at [MAX_USED].
    pub fn set_used(&mut self, used: u32) {
        let used = used.min(MAX_USED);
        self.words[0] = (self.words[0] & !flags::USED_MASK) | (used << flags::USED_SHIFT);
    }

    pub fn set_searched(&mut self, searched: usize) {
        self.words[1] = searched as u32;
    }

    pub fn set_garbage(&mut self) {
        self.set_flag(flags::GARBAGE, true)
    }

    pub fn set_redundant(&mut self, redundant: bool) {
        self.set_flag(flags::REDUNDANT, redundant)
    }

    pub fn set_reason(&mut self, reason: bool) {
        self.set_flag(flags::REASON, reason)
    }

    pub fn literals(&self) -> &[Literal] {
        as_literals(&self.words[HEADER_WORDS..])
    }

    pub fn literals_mut(&mut self) -> &mut [Literal] {
        as_literals_mut(&mut self.words[HEADER_WORDS..])
    }
}

/// The arena struct.
#[derive(Default)]
pub struct Arena {
    words: Vec<u32>,
}

impl Arena {
    /// A count of words in use.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A count of words allocated.
    pub fn capacity(&self) -> usize {
        self.words.capacity()
    }

    /// Ensures room for `needed` further words, doubling capacity as required.
    fn reserve_words(&mut self, needed: usize) {
        let required = self.words.len() + needed;
        if required > MAX_ARENA {
            fatal!("maximum arena capacity of {MAX_ARENA} words exhausted");
        }
        if required <= self.words.capacity() {
            return;
        }
        let mut capacity = self.words.capacity().max(INITIAL_CAPACITY);
        while capacity < required {
            capacity *= 2;
        }
        let capacity = capacity.min(MAX_ARENA);
        self.words.reserve_exact(capacity - self.words.len());
        log::debug!(target: targets::ARENA, "Arena enlarged to {capacity} words");
    }

    /// Appends a zeroed clause of `size` literals and returns its reference.
    ///
    /// The header records the size, and all other fields are left for the caller to populate.
    pub fn allocate_clause(&mut self, size: usize) -> Reference {
        self.reserve_words(HEADER_WORDS + size);
        let start = self.words.len();
        self.words.resize(start + HEADER_WORDS + size, 0);
        self.words[start + 2] = size as u32;
        Reference(start as u32)
    }

    /// Allocates and populates a clause.
    pub fn add_clause(&mut self, literals: &[Literal], redundant: bool, glue: u32) -> Reference {
        let reference = self.allocate_clause(literals.len());
        let mut clause = self.clause_mut(reference);
        clause.set_redundant(redundant);
        clause.set_glue(glue);
        clause.set_searched(2);
        clause.literals_mut().copy_from_slice(literals);
        reference
    }

    /// The words of the clause at `reference`, header included.
    fn span(&self, reference: Reference) -> std::ops::Range<usize> {
        let start = reference.index();
        let size = self.words[start + 2] as usize;
        start..start + HEADER_WORDS + size
    }

    pub fn clause(&self, reference: Reference) -> Clause<'_> {
        let span = self.span(reference);
        Clause {
            words: &self.words[span],
        }
    }

    pub fn clause_mut(&mut self, reference: Reference) -> ClauseMut<'_> {
        let span = self.span(reference);
        ClauseMut {
            words: &mut self.words[span],
        }
    }

    /// The literals of the clause at `reference`.
    pub fn literals(&self, reference: Reference) -> &[Literal] {
        self.clause(reference).literals()
    }

    /// The reference following `reference`, which may be the end of the arena.
    pub fn next_clause(&self, reference: Reference) -> Reference {
        let span = self.span(reference);
        let mut next = span.end;
        if self.words[span.start] & flags::SHRUNKEN != 0 {
            while next < self.words.len() && self.words[next] == TOMBSTONE {
                next += 1;
            }
        }
        Reference(next as u32)
    }

    /// Iterates over the reference of every clause in the arena, garbage included.
    pub fn references(&self) -> References<'_> {
        References {
            arena: self,
            next: Reference(0),
        }
    }

    /// Shrinks the clause at `reference` to its first `size` literals.
    pub fn shrink_clause(&mut self, reference: Reference, size: usize) {
        let span = self.span(reference);
        let old_size = span.len() - HEADER_WORDS;
        if size >= old_size {
            return;
        }
        let start = span.start;
        self.words[start + HEADER_WORDS + size..span.end].fill(TOMBSTONE);
        self.words[start + 2] = size as u32;
        self.words[start] |= flags::SHRUNKEN;
        if self.words[start + 1] as usize >= size {
            self.words[start + 1] = 2;
        }
    }

    /// Removes every garbage clause, moving each remaining clause towards the start of the arena.
    ///
    /// Returns the relocation of each remaining clause.
    /// Any reference held outside the arena is stale after a compaction, and must be remapped through the relocations.
    pub fn compact(&mut self) -> Relocations {
        let end = self.words.len();
        let mut moved = Vec::new();
        let mut source = 0;
        let mut destination = 0;

        while source < end {
            let next = self.next_clause(Reference(source as u32)).index();
            if self.words[source] & flags::GARBAGE == 0 {
                let length = HEADER_WORDS + self.words[source + 2] as usize;
                self.words.copy_within(source..source + length, destination);
                self.words[destination] &= !flags::SHRUNKEN;
                moved.push((Reference(source as u32), Reference(destination as u32)));
                destination += length;
            }
            source = next;
        }

        log::debug!(target: targets::ARENA, "Compacted arena from {end} to {destination} words");
        self.words.truncate(destination);
        Relocations { moved }
    }

    /// Releases capacity if less than a quarter of the arena is in use.
    /// Returns true if capacity was released.
    pub fn shrink_arena(&mut self) -> bool {
        if self.words.capacity() <= INITIAL_CAPACITY || 4 * self.words.len() >= self.words.capacity() {
            return false;
        }
        let before = self.words.capacity();
        self.words.shrink_to_fit();
        log::debug!(target: targets::ARENA, "Arena shrunk from {before} to {} words", self.words.capacity());
        true
    }
}

/// An iterator over the references of an arena.
pub struct References<'a> {
    arena: &'a Arena,
    next: Reference,
}

impl Iterator for References<'_> {
    type Item = Reference;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.index() >= self.arena.len() {
            return None;
        }
        let reference = self.next;
        self.next = self.arena.next_clause(reference);
        Some(reference)
    }
}

/// The relocation of each clause surviving a compaction, ordered by previous reference.
pub struct Relocations {
    moved: Vec<(Reference, Reference)>,
}

impl Relocations {
    /// The reference of the clause previously at `reference`, if the clause survived.
    pub fn get(&self, reference: Reference) -> Option<Reference> {
        self.moved
            .binary_search_by_key(&reference, |(from, _)| *from)
            .ok()
            .map(|position| self.moved[position].1)
    }

    /// A count of surviving clauses.
    pub fn len(&self) -> usize {
        self.moved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moved.is_empty()
    }
}
