/*!
The clause store of a [Kitten](super::Kitten).

Klauses (kitten clauses) live in a single vector of words, each a header of three words followed by the literals of the klause and, for a learned klause derived while antecedents are tracked, the references of the klauses resolved to derive it.

| Word | Contents                                                                    |
|------|-----------------------------------------------------------------------------|
| 0    | The id of an original klause, or the count of antecedents of a learned one  |
| 1    | The size of the klause                                                       |
| 2    | [flags]                                                                      |
| 3..  | Literals, then antecedents                                                   |

The count of antecedents is zero whenever antecedents are not tracked, so the store can always be walked by [next](Klauses::next).
*/

use crate::{
    db::arena::{as_literals, as_literals_mut},
    misc::fatal,
    structures::literal::Literal,
};

const HEADER_WORDS: usize = 3;

/// The id of a klause added without an id.
pub const NO_ID: u32 = u32::MAX;

pub mod flags {
    /// The klause is part of a computed core.
    pub const CORE: u32 = 1;

    /// The klause was derived during a solve.
    pub const LEARNED: u32 = 1 << 1;
}

/// A word offset into the store identifying a klause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KlauseRef(u32);

impl KlauseRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for KlauseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// An entry in the watch list of a literal.
///
/// Binary klauses keep the other literal in the watch, and so are propagated without a visit to the store.
#[derive(Clone, Copy, Debug)]
pub enum Katch {
    Binary { other: Literal, reference: KlauseRef },
    Large { blit: Literal, reference: KlauseRef },
}

impl Katch {
    pub fn reference(self) -> KlauseRef {
        match self {
            Katch::Binary { reference, .. } | Katch::Large { reference, .. } => reference,
        }
    }
}

#[derive(Default)]
pub struct Klauses {
    words: Vec<u32>,
}

impl Klauses {
    /// The count of words in the store.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear()
    }

    fn push(&mut self, aux: u32, flags: u32, literals: &[Literal], antecedents: &[KlauseRef]) -> KlauseRef {
        let start = self.words.len();
        if start + HEADER_WORDS + literals.len() + antecedents.len() >= u32::MAX as usize {
            fatal!("kitten: maximum number of literals exhausted");
        }
        self.words.push(aux);
        self.words.push(literals.len() as u32);
        self.words.push(flags);
        self.words.extend(literals.iter().map(|literal| literal.code()));
        self.words.extend(antecedents.iter().map(|antecedent| antecedent.0));
        KlauseRef(start as u32)
    }

    /// Stores an original klause with the given id.
    pub fn add_original(&mut self, id: u32, literals: &[Literal]) -> KlauseRef {
        self.push(id, 0, literals, &[])
    }

    /// Stores a learned klause, together with the antecedents it was derived from.
    pub fn add_learned(&mut self, literals: &[Literal], antecedents: &[KlauseRef]) -> KlauseRef {
        self.push(antecedents.len() as u32, flags::LEARNED, literals, antecedents)
    }

    pub fn size(&self, reference: KlauseRef) -> usize {
        self.words[reference.index() + 1] as usize
    }

    /// The id of an original klause.
    pub fn id(&self, reference: KlauseRef) -> u32 {
        self.words[reference.index()]
    }

    fn flags(&self, reference: KlauseRef) -> u32 {
        self.words[reference.index() + 2]
    }

    pub fn is_learned(&self, reference: KlauseRef) -> bool {
        self.flags(reference) & flags::LEARNED != 0
    }

    pub fn is_core(&self, reference: KlauseRef) -> bool {
        self.flags(reference) & flags::CORE != 0
    }

    pub fn set_core(&mut self, reference: KlauseRef, core: bool) {
        let word = &mut self.words[reference.index() + 2];
        match core {
            true => *word |= flags::CORE,
            false => *word &= !flags::CORE,
        }
    }

    fn literal_span(&self, reference: KlauseRef) -> std::ops::Range<usize> {
        let start = reference.index() + HEADER_WORDS;
        start..start + self.size(reference)
    }

    pub fn literals(&self, reference: KlauseRef) -> &[Literal] {
        let span = self.literal_span(reference);
        as_literals(&self.words[span])
    }

    pub fn literals_mut(&mut self, reference: KlauseRef) -> &mut [Literal] {
        let span = self.literal_span(reference);
        as_literals_mut(&mut self.words[span])
    }

    /// The antecedents of a learned klause, empty if antecedents were not tracked.
    pub fn antecedents(&self, reference: KlauseRef) -> impl Iterator<Item = KlauseRef> + '_ {
        let start = self.literal_span(reference).end;
        let count = match self.is_learned(reference) {
            true => self.words[reference.index()] as usize,
            false => 0,
        };
        self.words[start..start + count].iter().map(|word| KlauseRef(*word))
    }

    /// The reference following `reference`, which may be the end of the store.
    pub fn next(&self, reference: KlauseRef) -> KlauseRef {
        let mut end = self.literal_span(reference).end;
        if self.is_learned(reference) {
            end += self.words[reference.index()] as usize;
        }
        KlauseRef(end as u32)
    }

    /// Iterates over the references of klauses before the word offset `end`.
    pub fn references_until(&self, end: usize) -> impl Iterator<Item = KlauseRef> + '_ {
        let first = (end > 0).then_some(KlauseRef(0));
        std::iter::successors(first, move |reference| {
            let next = self.next(*reference);
            (next.index() < end).then_some(next)
        })
    }

    /// Keeps only the original klauses before `end` which are marked as core, clearing the mark.
    ///
    /// Returns the (new) reference of each klause kept, in order.
    pub fn retain_core_originals(&mut self, end: usize) -> Vec<KlauseRef> {
        let mut kept = Vec::default();
        let mut source = 0;
        let mut destination = 0;
        while source < end {
            let reference = KlauseRef(source as u32);
            let next = self.next(reference).index();
            if !self.is_learned(reference) && self.is_core(reference) {
                self.set_core(reference, false);
                self.words.copy_within(source..next, destination);
                kept.push(KlauseRef(destination as u32));
                destination += next - source;
            }
            source = next;
        }
        self.words.truncate(destination);
        kept
    }
}
