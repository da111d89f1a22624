//! Clausal cores of an unsatisfiable kitten.
//!
//! The core is found by a depth-first walk over antecedents from the empty klause (or the klause explaining failed assumptions).
//! A klause is added to the core only after each of its antecedents, so the core lists klauses in an order where each learned klause follows the klauses it was derived from.

use super::{klauses::KlauseRef, Kitten, KittenStatus};
use crate::{misc::log::targets, structures::literal::Literal, types::err::KittenError};

/// Work on the stack used to compute a core.
#[derive(Clone, Copy, Debug)]
enum CoreWork {
    /// Visit the antecedents of a klause.
    Expand(KlauseRef),

    /// Every antecedent of the klause is in the core, so the klause may follow.
    Finish(KlauseRef),
}

/// The size of a clausal core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreCounts {
    pub original: usize,
    pub learned: usize,
}

impl Kitten {
    /// Marks the klauses used to derive unsatisfiability as the core.
    ///
    /// Requires an unsatisfiable status and [tracked antecedents](Kitten::track_antecedents).
    /// If unsatisfiability is only due to clashing assumptions the core is empty.
    pub fn compute_clausal_core(&mut self) -> Result<CoreCounts, KittenError> {
        self.require(KittenStatus::Unsatisfiable)?;
        if !self.antecedents {
            return Err(KittenError::AntecedentsNotTracked);
        }

        let mut counts = CoreCounts::default();
        let start = self.inconsistent.or(self.failing);
        let mut work: Vec<CoreWork> = start.into_iter().map(CoreWork::Expand).collect();

        while let Some(item) = work.pop() {
            match item {
                CoreWork::Expand(reference) => {
                    if self.klauses.is_core(reference) {
                        continue;
                    }
                    work.push(CoreWork::Finish(reference));
                    for antecedent in self.klauses.antecedents(reference) {
                        if !self.klauses.is_core(antecedent) {
                            work.push(CoreWork::Expand(antecedent));
                        }
                    }
                }

                CoreWork::Finish(reference) => {
                    if self.klauses.is_core(reference) {
                        continue;
                    }
                    self.klauses.set_core(reference, true);
                    self.core.push(reference);
                    match self.klauses.is_learned(reference) {
                        true => counts.learned += 1,
                        false => counts.original += 1,
                    }
                }
            }
        }

        log::debug!(target: targets::KITTEN, "Core of {} original and {} learned klauses", counts.original, counts.learned);
        self.status = KittenStatus::Core;
        Ok(counts)
    }

    /// Calls `f` on the id of each original klause in the core, in the order the klauses were added.
    ///
    /// A klause added without an id gives None.
    pub fn traverse_core_ids(&self, mut f: impl FnMut(Option<u32>)) -> Result<(), KittenError> {
        self.require(KittenStatus::Core)?;
        for reference in self.klauses.references_until(self.end_original) {
            if self.klauses.is_learned(reference) || !self.klauses.is_core(reference) {
                continue;
            }
            let id = self.klauses.id(reference);
            f((id != super::klauses::NO_ID).then_some(id));
        }
        Ok(())
    }

    /// Calls `f` on each klause of the core, with whether the klause was learned and the literals of the klause as given by the caller.
    ///
    /// Each learned klause follows the klauses it was derived from.
    pub fn traverse_core_clauses(&self, mut f: impl FnMut(bool, &[Literal])) -> Result<(), KittenError> {
        self.require(KittenStatus::Core)?;
        let mut exported = Vec::default();
        for reference in &self.core {
            exported.clear();
            exported.extend(
                self.klauses
                    .literals(*reference)
                    .iter()
                    .map(|literal| self.export_literal(*literal)),
            );
            f(self.klauses.is_learned(*reference), &exported);
        }
        Ok(())
    }

    /// Removes every klause other than the original klauses of the core, and returns to accepting clauses.
    pub fn shrink_to_clausal_core(&mut self) -> Result<(), KittenError> {
        self.require(KittenStatus::Core)?;

        self.trail.clear();
        self.unassigned = self.vars.len();
        self.propagated = 0;
        self.level = 0;
        self.queue.reset_search();
        self.values.clear_all();
        for list in self.watches.iter_mut() {
            list.clear();
        }
        if !self.assumptions.is_empty() {
            self.reset_assumptions();
        }

        // An original empty klause in the core is found again when reconnected.
        self.inconsistent = None;
        self.units.clear();
        self.core.clear();

        let kept = self.klauses.retain_core_originals(self.end_original);
        log::debug!(target: targets::KITTEN, "Shrunk to {} original klauses", kept.len());
        for reference in kept {
            self.connect(reference);
        }
        self.end_original = self.klauses.len();
        self.status = KittenStatus::Unknown;
        Ok(())
    }

    /// Clears the core marks of the last core computed.
    pub(super) fn reset_core(&mut self) {
        for reference in self.core.drain(..) {
            self.klauses.set_core(reference, false);
        }
    }
}
