/*!
Reduction of the learned clause database.

# Overview

Learned clauses are kept in [tiers](Tiers) by glue:

- Tier one clauses (glue at most `tier1`) are kept while used since the last reduction.
- Tier two clauses (glue at most `tier2`) are kept while used recently, as each reduction halves the used counter of every clause.
- Every other learned clause is a candidate for deletion.

Each reduction deletes [Config::reduce_fraction](crate::config::Config::reduce_fraction) percent of the candidates, taking clauses with the largest glue (and then the largest size) first.
A clause which is the reason for some literal on the trail is never deleted.

Before candidates are chosen, if some variable has been fixed since the last reduction, every clause satisfied at level zero is deleted, original clauses included.

The arena is then [collected](crate::procedures::collect), and the next reduction is scheduled after `reduce_interval * sqrt(reductions)` further conflicts.

# Tier limits

The limits of the tiers are (re)computed at each reduction from the glue of each learned clause used in analysis.
The `tier1` limit is the smallest glue covering [Config::tier1_relative](crate::config::Config::tier1_relative) percent of uses, and likewise for `tier2`.
Until enough uses have been seen, the limits from [Config::tier1](crate::config::Config::tier1) and [Config::tier2](crate::config::Config::tier2) are used.
*/

use crate::{
    config::Config,
    context::GenericContext,
    db::{
        arena::{Reference, MAX_GLUE, MAX_USED},
        assignment::Reason,
    },
    misc::log::targets,
    structures::literal::Literal,
};

/// A count of uses of clauses by glue, below which tier limits are not recomputed.
const TIER_SAMPLE: u64 = 1_000;

/// The limit on glue tracked by the histogram of uses, with larger glue counted at the limit.
const TIER_GLUE: usize = 64;

/// Glue limits of the tiers, and the uses they're taken from.
#[derive(Clone, Debug)]
pub struct Tiers {
    pub tier1: u32,
    pub tier2: u32,

    default_tier1: u32,
    default_tier2: u32,
    tier1_relative: u32,
    tier2_relative: u32,

    /// Uses of learned clauses in analysis, by glue.
    uses: Vec<u64>,
}

impl Tiers {
    pub fn new(config: &Config) -> Self {
        Tiers {
            tier1: config.tier1.value,
            tier2: config.tier2.value.max(config.tier1.value),
            default_tier1: config.tier1.value,
            default_tier2: config.tier2.value.max(config.tier1.value),
            tier1_relative: config.tier1_relative.value,
            tier2_relative: config.tier2_relative.value,
            uses: vec![0; TIER_GLUE + 1],
        }
    }

    /// Notes the use of a learned clause with `glue`.
    pub fn note_use(&mut self, glue: u32) {
        let index = (glue as usize).min(TIER_GLUE);
        self.uses[index] += 1;
    }

    /// Recomputes the tier limits from the uses noted.
    pub fn recompute(&mut self) {
        let total: u64 = self.uses.iter().sum();
        if total < TIER_SAMPLE {
            self.tier1 = self.default_tier1;
            self.tier2 = self.default_tier2;
            return;
        }
        let limit = |relative: u32| {
            let target = total * relative as u64 / 100;
            let mut accumulated = 0;
            for (glue, uses) in self.uses.iter().enumerate() {
                accumulated += uses;
                if accumulated >= target {
                    return glue as u32;
                }
            }
            TIER_GLUE as u32
        };
        self.tier1 = limit(self.tier1_relative).max(1);
        self.tier2 = limit(self.tier2_relative).max(self.tier1).min(MAX_GLUE);
        log::debug!(target: targets::REDUCTION, "Tier limits {} and {} from {total} uses", self.tier1, self.tier2);
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// True if a reduction is due.
    pub fn reducing(&self) -> bool {
        self.config.reduce.value && self.counters.conflicts >= self.schedule.reduce
    }

    /// Reduces the learned clauses.
    ///
    /// For documentation, see [procedures::reduce](crate::procedures::reduce).
    pub fn reduce(&mut self) {
        self.counters.reductions += 1;
        log::debug!(target: targets::REDUCTION, "Reduction {}", self.counters.reductions);

        self.mark_reasons(true);
        if self.counters.fixed > self.schedule.simplified {
            self.delete_satisfied();
            self.schedule.simplified = self.counters.fixed;
        }
        self.tiers.recompute();

        let mut candidates: Vec<(u32, usize, Reference)> = Vec::default();
        let references = self.arena.references().collect::<Vec<_>>();
        for reference in references {
            let clause = self.arena.clause(reference);
            if clause.is_garbage() || !clause.is_redundant() || clause.is_reason() {
                continue;
            }
            let glue = clause.glue();
            let size = clause.size();
            let used = clause.used();
            self.arena.clause_mut(reference).set_used(used >> 1);

            let keep = (glue <= self.tiers.tier1 && used > 0) || (glue <= self.tiers.tier2 && used >= MAX_USED - 1);
            if !keep {
                candidates.push((glue, size, reference));
            }
        }

        candidates.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        let target = candidates.len() * self.config.reduce_fraction.value as usize / 100;
        for (_, _, reference) in candidates.into_iter().take(target) {
            self.proof.delete(self.arena.literals(reference));
            self.arena.clause_mut(reference).set_garbage();
        }
        self.counters.reduced += target as u64;
        log::debug!(target: targets::REDUCTION, "Reduced {target} clauses");

        self.mark_reasons(false);
        self.collect_garbage();

        let scale = ((self.counters.reductions + 1) as f64).sqrt();
        self.schedule.reduce = self.counters.conflicts + (self.config.reduce_interval.value as f64 * scale) as u64;
    }

    /// Sets (or clears) the reason flag of each clause which is the reason for some literal on the trail.
    fn mark_reasons(&mut self, reason: bool) {
        for literal in self.trail.literals() {
            if let Reason::Clause(reference) = self.assigned[literal.variable() as usize].reason {
                self.arena.clause_mut(reference).set_reason(reason);
            }
        }
    }

    /// Deletes every clause satisfied at level zero, binary clauses included.
    fn delete_satisfied(&mut self) {
        let references = self.arena.references().collect::<Vec<_>>();
        let mut deleted = 0;
        for reference in references {
            let clause = self.arena.clause(reference);
            if clause.is_garbage() || clause.is_reason() {
                continue;
            }
            if clause.literals().iter().any(|literal| self.root_value(*literal).is_true()) {
                self.proof.delete(self.arena.literals(reference));
                self.arena.clause_mut(reference).set_garbage();
                deleted += 1;
            }
        }

        let satisfied = self
            .watches
            .binaries()
            .filter(|(a, b, _)| self.root_value(*a).is_true() || self.root_value(*b).is_true())
            .map(|(a, b, _)| (a, b))
            .collect::<Vec<(Literal, Literal)>>();
        for (a, b) in satisfied {
            self.proof.delete(&[a, b]);
            self.watches.remove_binary(a, b);
            deleted += 1;
        }
        log::debug!(target: targets::REDUCTION, "Deleted {deleted} satisfied clauses");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn learned_clauses(context: &Context) -> usize {
        context
            .arena
            .references()
            .filter(|reference| context.arena.clause(*reference).is_redundant())
            .count()
    }

    #[test]
    fn deletes_high_glue() {
        let mut context = Context::from_config(Config::default());
        context.reserve(40).unwrap();
        for start in 0..10 {
            let literals = (start..start + 4)
                .map(|variable| Literal::new(variable, true))
                .collect::<Vec<_>>();
            let reference = context.arena.add_clause(&literals, true, 10 + start);
            context.watches.watch_clause(&literals, reference);
        }
        let protected = [Literal::new(30, true), Literal::new(31, true), Literal::new(32, true)];
        let reference = context.arena.add_clause(&protected, true, 2);
        context.arena.clause_mut(reference).set_used(1);
        context.watches.watch_clause(&protected, reference);

        context.reduce();
        assert_eq!(context.counters.reduced, 7);
        assert_eq!(learned_clauses(&context), 4);
        assert_eq!(context.counters.collections, 1);

        // The clause of glue two survives, as does the clause of least glue among the rest.
        let glues = context
            .arena
            .references()
            .map(|reference| context.arena.clause(reference).glue())
            .collect::<Vec<_>>();
        assert!(glues.contains(&2));
        assert!(glues.contains(&10));
        assert!(!glues.contains(&19));
    }

    #[test]
    fn used_halved() {
        let mut context = Context::from_config(Config::default());
        context.reserve(8).unwrap();
        let literals = [Literal::new(1, true), Literal::new(2, false), Literal::new(3, true)];
        let reference = context.arena.add_clause(&literals, true, 2);
        context.arena.clause_mut(reference).set_used(MAX_USED);
        context.watches.watch_clause(&literals, reference);

        let used = |context: &Context| {
            context
                .arena
                .references()
                .map(|reference| context.arena.clause(reference).used())
                .collect::<Vec<_>>()
        };

        context.reduce();
        assert_eq!(used(&context), vec![MAX_USED >> 1]);
        context.reduce();
        assert_eq!(used(&context), vec![0]);
    }

    #[test]
    fn tier_limits() {
        let mut tiers = Tiers::new(&Config::default());
        tiers.recompute();
        assert_eq!((tiers.tier1, tiers.tier2), (2, 6));

        for _ in 0..500 {
            tiers.note_use(3);
        }
        for _ in 0..400 {
            tiers.note_use(5);
        }
        for _ in 0..100 {
            tiers.note_use(9);
        }
        tiers.recompute();
        assert_eq!((tiers.tier1, tiers.tier2), (3, 5));
    }
}
