//! Search within a kitten: assignment, propagation, analysis and decisions.
//!
//! At the root level every assignment is justified by a unit klause.
//! Where the reason of a root level assignment is larger, the unit is learned on the spot (with the reasons of the other literals as antecedents), and so a refutation can always be traced back through klauses alone.

use super::{
    klauses::{Katch, KlauseRef},
    Kar, Kitten, KittenStatus,
};
use crate::{
    heuristics::Heuristic,
    misc::{fatal, log::targets},
    structures::{literal::Literal, value::Value},
};

/// The result of a decision.
enum Step {
    /// A decision was made.
    Decided,

    /// The search is complete.
    Finished(KittenStatus),

    /// The ticks limit was reached.
    Limited,
}

impl Kitten {
    /// Stores the klause buffer as a learned klause, with the resolved buffer as antecedents when tracked.
    pub(super) fn new_learned_klause(&mut self) -> KlauseRef {
        let antecedents: &[KlauseRef] = match self.antecedents {
            true => &self.resolved,
            false => &[],
        };
        let reference = self.klauses.add_learned(&self.klause, antecedents);
        self.counters.ticks += 1;
        self.counters.learned += 1;
        self.learned = true;
        self.connect(reference);
        reference
    }

    /// Records a fresh klause as empty, unit, or watched.
    pub(super) fn connect(&mut self, reference: KlauseRef) {
        match self.klauses.size(reference) {
            0 => {
                self.inconsistent.get_or_insert(reference);
            }
            1 => self.units.push(reference),
            _ => {
                let literals = self.klauses.literals(reference);
                let (a, b) = (literals[0], literals[1]);
                self.watch(a, b, reference);
                self.watch(b, a, reference);
            }
        }
    }

    /// Connects an original klause added at the root level, where root values may already falsify some literals.
    ///
    /// Literals which are not false are moved to the front, so the watches are valid.
    /// If a single literal is not false the klause is propagated at once, and if every literal is false the kitten is inconsistent.
    pub(super) fn connect_original(&mut self, reference: KlauseRef) {
        let size = self.klauses.size(reference);
        if size < 2 {
            self.connect(reference);
            return;
        }

        let mut front = 0;
        for index in 0..size {
            let literal = self.klauses.literals(reference)[index];
            if !self.values.value(literal).is_false() {
                self.klauses.literals_mut(reference).swap(front, index);
                front += 1;
            }
        }
        self.connect(reference);

        if self.inconsistent.is_some() {
            return;
        }
        match front {
            0 => {
                log::trace!(target: targets::KITTEN, "Original klause {reference} falsified at the root");
                self.inconsistent(reference);
            }
            1 => {
                let unit = self.klauses.literals(reference)[0];
                if self.values.value(unit) == Value::Unassigned {
                    self.assign(unit, Some(reference));
                }
            }
            _ => {}
        }
    }

    /// Watches `literal` in the klause at `reference`, with the other watched literal as a blocker.
    fn watch(&mut self, literal: Literal, other: Literal, reference: KlauseRef) {
        let katch = match self.klauses.size(reference) {
            2 => Katch::Binary { other, reference },
            _ => Katch::Large {
                blit: other,
                reference,
            },
        };
        self.watches[literal.index()].push(katch);
    }

    fn assign(&mut self, literal: Literal, reason: Option<KlauseRef>) {
        let variable = literal.variable() as usize;
        self.values.set(literal);
        self.phases[variable] = literal.polarity();
        self.trail.push(literal);

        let mut reason = reason;
        if self.level == 0 {
            if let Some(root_reason) = reason {
                if self.klauses.size(root_reason) > 1 {
                    if self.antecedents {
                        self.resolved.push(root_reason);
                        for other in self.klauses.literals(root_reason) {
                            if *other == literal {
                                continue;
                            }
                            if let Some(other_reason) = self.vars[other.variable() as usize].reason {
                                self.resolved.push(other_reason);
                            }
                        }
                    }
                    self.klause.push(literal);
                    reason = Some(self.new_learned_klause());
                    self.resolved.clear();
                    self.klause.clear();
                }
            }
        }

        self.vars[variable] = Kar {
            level: self.level,
            reason,
        };
        self.unassigned -= 1;
    }

    fn propagate_literal(&mut self, literal: Literal) -> Option<KlauseRef> {
        let not_literal = !literal;
        let mut watches = std::mem::take(&mut self.watches[not_literal.index()]);
        let mut ticks = 1 + ((watches.len() * std::mem::size_of::<Katch>()) >> 7) as u64;
        let mut conflict = None;

        let mut read = 0;
        let mut write = 0;
        while read < watches.len() {
            let katch = watches[read];
            watches[write] = katch;
            read += 1;
            write += 1;

            match katch {
                Katch::Binary { other, reference } => match self.values.value(other) {
                    Value::True => {}
                    Value::False => {
                        self.counters.conflicts += 1;
                        conflict = Some(reference);
                        break;
                    }
                    Value::Unassigned => self.assign(other, Some(reference)),
                },

                Katch::Large { blit, reference } => {
                    if self.values.value(blit).is_true() {
                        continue;
                    }
                    ticks += 1;
                    let literals = self.klauses.literals_mut(reference);
                    let other = match literals[0] == not_literal {
                        true => literals[1],
                        false => literals[0],
                    };
                    let other_value = self.values.value(other);
                    if other_value.is_true() {
                        watches[write - 1] = Katch::Large {
                            blit: other,
                            reference,
                        };
                        continue;
                    }

                    let replacement = (2..literals.len()).find(|index| !self.values.value(literals[*index]).is_false());
                    if let Some(index) = replacement {
                        let replacement = literals[index];
                        literals[0] = other;
                        literals[1] = replacement;
                        literals[index] = not_literal;
                        self.watches[replacement.index()].push(Katch::Large {
                            blit: other,
                            reference,
                        });
                        write -= 1;
                    } else if other_value.is_false() {
                        self.counters.conflicts += 1;
                        conflict = Some(reference);
                        break;
                    } else {
                        self.assign(other, Some(reference));
                    }
                }
            }
        }

        while read < watches.len() {
            watches[write] = watches[read];
            read += 1;
            write += 1;
        }
        watches.truncate(write);
        self.watches[not_literal.index()] = watches;
        self.counters.ticks += ticks;
        conflict
    }

    /// Propagates the trail, returning a klause in conflict if one is found.
    pub(super) fn propagate(&mut self) -> Option<KlauseRef> {
        let mut conflict = None;
        while conflict.is_none() && self.propagated < self.trail.len() {
            let literal = self.trail[self.propagated];
            conflict = self.propagate_literal(literal);
            self.propagated += 1;
            self.counters.propagations += 1;
        }
        conflict
    }

    fn unassign(&mut self, literal: Literal) {
        self.values.clear(literal);
        self.unassigned += 1;
        self.queue.unassigned(literal.variable());
    }

    fn backtrack(&mut self, jump: u32) {
        while let Some(literal) = self.trail.last().copied() {
            if self.vars[literal.variable() as usize].level == jump {
                break;
            }
            self.trail.pop();
            self.unassign(literal);
        }
        self.propagated = self.trail.len();
        self.level = jump;
    }

    pub(super) fn backtrack_to_root(&mut self) {
        let trail = std::mem::take(&mut self.trail);
        for literal in &trail {
            self.unassign(*literal);
        }
        self.trail = trail;
        self.trail.clear();
        self.propagated = 0;
        self.level = 0;
    }

    /// Derives a first UIP klause from `conflict`, backjumps, and asserts the UIP.
    fn analyze(&mut self, conflict: KlauseRef) {
        let level = self.level;
        let mut reason = conflict;
        let mut position = self.trail.len();
        let mut open = 0;
        let mut jump = 0;

        // The first slot is for the negated UIP, and the second for a literal on the jump level.
        self.klause.push(!self.trail[position - 1]);

        let uip = loop {
            self.resolved.push(reason);
            for index in 0..self.klauses.size(reason) {
                let mut literal = self.klauses.literals(reason)[index];
                let variable = literal.variable() as usize;
                if self.marks[variable] {
                    continue;
                }
                self.marks[variable] = true;
                self.analyzed.push(variable as u32);
                let literal_level = self.vars[variable].level;
                if literal_level < level {
                    if literal_level > jump {
                        jump = literal_level;
                        if self.klause.len() > 1 {
                            std::mem::swap(&mut self.klause[1], &mut literal);
                        }
                    }
                    self.klause.push(literal);
                } else {
                    open += 1;
                }
            }

            let uip = loop {
                position -= 1;
                let literal = self.trail[position];
                if self.marks[literal.variable() as usize] {
                    break literal;
                }
            };
            open -= 1;
            if open == 0 {
                break uip;
            }
            reason = match self.vars[uip.variable() as usize].reason {
                Some(reason) => reason,
                None => fatal!("kitten: decision {uip} reached before the first UIP"),
            };
        };

        log::trace!(target: targets::KITTEN, "First UIP {} jump level {jump}", !uip);
        self.klause[0] = !uip;

        for variable in self.analyzed.drain(..) {
            self.marks[variable as usize] = false;
            self.queue.move_to_front(variable);
        }

        let learned = self.new_learned_klause();
        self.resolved.clear();
        self.klause.clear();
        self.backtrack(jump);
        self.assign(!uip, Some(learned));
    }

    /// Identifies the assumptions responsible for a falsified assumption.
    fn failing(&mut self) {
        let mut failed_clashing = None;
        let mut first_failed = None;
        let mut failed_unit = None;
        for assumption in &self.assumptions {
            if !self.values.value(*assumption).is_false() {
                continue;
            }
            first_failed.get_or_insert(*assumption);
            let var = self.vars[assumption.variable() as usize];
            if var.level == 0 {
                failed_unit = Some(*assumption);
                break;
            }
            if failed_clashing.is_none() && var.reason.is_none() {
                failed_clashing = Some(*assumption);
            }
        }

        let Some(failed) = failed_unit.or(failed_clashing).or(first_failed) else {
            fatal!("kitten: failing analysis without a false assumption");
        };
        log::trace!(target: targets::KITTEN, "First failed assumption {failed}");
        self.failed[failed.index()] = true;

        if failed_unit.is_some() {
            self.failing = self.vars[failed.variable() as usize].reason;
            return;
        }

        if failed_clashing.is_some() {
            self.failed[(!failed).index()] = true;
            return;
        }

        self.marks[failed.variable() as usize] = true;
        self.analyzed.push(failed.variable());
        self.klause.push(!failed);

        let mut next = 0;
        while next < self.analyzed.len() {
            let variable = self.analyzed[next];
            next += 1;
            match self.vars[variable as usize].reason {
                None => {
                    let mut literal = Literal::new(variable, true);
                    if self.values.value(literal).is_false() {
                        literal = !literal;
                    }
                    log::trace!(target: targets::KITTEN, "Failed assumption {literal}");
                    self.failed[literal.index()] = true;
                    self.klause.push(!literal);
                }
                Some(reason) => {
                    self.resolved.push(reason);
                    for other in self.klauses.literals(reason) {
                        let other_variable = other.variable();
                        if other_variable == variable || self.marks[other_variable as usize] {
                            continue;
                        }
                        self.marks[other_variable as usize] = true;
                        self.analyzed.push(other_variable);
                    }
                }
            }
        }

        for variable in self.analyzed.drain(..) {
            self.marks[variable as usize] = false;
        }

        self.failing = match self.resolved.as_slice() {
            [reason] => Some(*reason),
            _ => Some(self.new_learned_klause()),
        };
        self.resolved.clear();
        self.klause.clear();
    }

    fn decide(&mut self) -> Step {
        if self.level == 0 && !self.trail.is_empty() {
            self.trail.clear();
            self.propagated = 0;
        }

        let mut decision = None;
        while (self.level as usize) < self.assumptions.len() {
            let assumption = self.assumptions[self.level as usize];
            match self.values.value(assumption) {
                Value::False => {
                    self.failing();
                    return Step::Finished(KittenStatus::Unsatisfiable);
                }
                // A pseudo decision level for an assumption already satisfied.
                Value::True => self.level += 1,
                Value::Unassigned => {
                    decision = Some(assumption);
                    break;
                }
            }
        }

        if self.unassigned == 0 {
            return Step::Finished(KittenStatus::Satisfiable);
        }

        if self.counters.ticks >= self.ticks_limit {
            log::trace!(target: targets::KITTEN, "Ticks limit {} hit", self.ticks_limit);
            return Step::Limited;
        }

        let decision = match decision {
            Some(assumption) => assumption,
            None => match self.queue.pick(&self.values) {
                Some(variable) => Literal::new(variable, self.phases[variable as usize]),
                None => fatal!("kitten: no unassigned variable in the queue"),
            },
        };
        self.counters.decisions += 1;
        self.level += 1;
        self.assign(decision, None);
        Step::Decided
    }

    /// Registers a root level conflict, deriving the empty klause if antecedents are tracked.
    fn inconsistent(&mut self, conflict: KlauseRef) {
        if !self.antecedents {
            self.inconsistent = Some(conflict);
            return;
        }

        let mut reference = conflict;
        let mut next = 0;
        loop {
            self.resolved.push(reference);
            for literal in self.klauses.literals(reference) {
                let variable = literal.variable() as usize;
                if self.marks[variable] {
                    continue;
                }
                self.marks[variable] = true;
                self.analyzed.push(variable as u32);
            }
            if next == self.analyzed.len() {
                break;
            }
            let variable = self.analyzed[next];
            next += 1;
            reference = match self.vars[variable as usize].reason {
                Some(reason) => reason,
                None => fatal!("kitten: root level variable {variable} without a reason"),
            };
        }

        let empty = self.new_learned_klause();
        log::trace!(target: targets::KITTEN, "Derived the empty klause {empty}");
        self.inconsistent = Some(empty);

        for variable in self.analyzed.drain(..) {
            self.marks[variable as usize] = false;
        }
        self.resolved.clear();
    }

    /// Assigns and propagates each unit klause, returning true if a root level conflict was found.
    fn propagate_units(&mut self) -> bool {
        if self.inconsistent.is_some() {
            return true;
        }

        let mut next = 0;
        while next < self.units.len() {
            let reference = self.units[next];
            next += 1;
            let unit = self.klauses.literals(reference)[0];
            match self.values.value(unit) {
                Value::True => {}
                Value::False => {
                    self.inconsistent(reference);
                    return true;
                }
                Value::Unassigned => {
                    self.assign(unit, Some(reference));
                    if let Some(conflict) = self.propagate() {
                        self.inconsistent(conflict);
                        return true;
                    }
                }
            }
        }
        false
    }

    pub(super) fn reset_assumptions(&mut self) {
        for assumption in self.assumptions.drain(..) {
            self.failed[assumption.index()] = false;
            self.failed[(!assumption).index()] = false;
        }
        self.failing = None;
    }

    /// Returns to the root level and clears anything particular to the last solve.
    pub(super) fn reset_incremental(&mut self) {
        if self.level > 0 {
            self.backtrack_to_root();
        }
        if !self.assumptions.is_empty() {
            self.reset_assumptions();
        }
        if self.status == KittenStatus::Core {
            self.reset_core();
        }
        self.status = KittenStatus::Unknown;
    }

    /// Solves the clauses under the current assumptions.
    ///
    /// Unknown is returned only if the [ticks limit](Kitten::set_ticks_limit) is reached.
    pub fn solve(&mut self) -> KittenStatus {
        if self.status != KittenStatus::Unknown {
            self.reset_incremental();
        } else if self.level > 0 {
            self.backtrack_to_root();
        }

        log::trace!(target: targets::KITTEN, "Solving under {} assumptions", self.assumptions.len());
        self.counters.solved += 1;

        let mut status = match self.propagate_units() {
            true => KittenStatus::Unsatisfiable,
            false => KittenStatus::Unknown,
        };

        while status == KittenStatus::Unknown {
            if let Some(conflict) = self.propagate() {
                if self.level > 0 {
                    self.analyze(conflict);
                } else {
                    self.inconsistent(conflict);
                    status = KittenStatus::Unsatisfiable;
                }
                continue;
            }
            match self.decide() {
                Step::Decided => {}
                Step::Finished(finished) => status = finished,
                Step::Limited => break,
            }
        }

        if status == KittenStatus::Unknown && !self.assumptions.is_empty() {
            self.reset_assumptions();
        }

        match status {
            KittenStatus::Satisfiable => self.counters.sat += 1,
            KittenStatus::Unsatisfiable => self.counters.unsat += 1,
            _ => self.counters.unknown += 1,
        }
        log::debug!(target: targets::KITTEN, "Solved with status {status}");
        self.status = status;
        status
    }

    /// Flips the value of the true literal of the variable of `literal`, if every watched klause stays satisfied.
    pub(super) fn flip_internal(&mut self, literal: Literal) -> bool {
        self.counters.flip += 1;
        if self.vars[literal.variable() as usize].level == 0 {
            return false;
        }
        let literal = match self.values.value(literal).is_false() {
            true => !literal,
            false => literal,
        };

        let mut watches = std::mem::take(&mut self.watches[literal.index()]);
        let mut ticks = 1 + ((watches.len() * std::mem::size_of::<Katch>()) >> 7) as u64;
        let mut flipped = true;

        let mut read = 0;
        let mut write = 0;
        while read < watches.len() {
            let katch = watches[read];
            watches[write] = katch;
            read += 1;
            write += 1;

            match katch {
                Katch::Binary { other, .. } => {
                    if !self.values.value(other).is_true() {
                        flipped = false;
                        break;
                    }
                }

                Katch::Large { blit, reference } => {
                    if self.values.value(blit).is_true() {
                        continue;
                    }
                    ticks += 1;
                    let literals = self.klauses.literals_mut(reference);
                    let other = match literals[0] == literal {
                        true => literals[1],
                        false => literals[0],
                    };
                    if self.values.value(other).is_true() {
                        continue;
                    }
                    let replacement = (2..literals.len()).find(|index| self.values.value(literals[*index]).is_true());
                    match replacement {
                        Some(index) => {
                            let replacement = literals[index];
                            literals[0] = other;
                            literals[1] = replacement;
                            literals[index] = literal;
                            self.watches[replacement.index()].push(Katch::Large {
                                blit: other,
                                reference,
                            });
                            write -= 1;
                        }
                        None => {
                            flipped = false;
                            break;
                        }
                    }
                }
            }
        }

        while read < watches.len() {
            watches[write] = watches[read];
            read += 1;
            write += 1;
        }
        watches.truncate(write);
        self.watches[literal.index()] = watches;
        self.counters.ticks += ticks;

        if flipped {
            log::trace!(target: targets::KITTEN, "Flipped {literal}");
            self.values.set(!literal);
            self.counters.flipped += 1;
        }
        flipped
    }
}
