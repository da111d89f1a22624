//! Resetting the saved phases.
//!
//! Every [Config::rephase_interval](crate::config::Config::rephase_interval) conflicts (scaled by the count of rephases), the saved phase of each variable is reset, cycling through:
//!
//! | Kind     | Saved phase                                   |
//! |----------|-----------------------------------------------|
//! | Best     | The best phase, where the variable has one    |
//! | Original | [Config::phase](crate::config::Config::phase) |
//! | Best     | As above                                      |
//! | Inverted | The negation of the original phase            |
//!
//! After a rephase the target phases are taken from the new saved phases, and both the target and best phases may be replaced by any trail (as their recorded lengths are reset).

use crate::{context::GenericContext, misc::log::targets};

/// The kinds of rephase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rephase {
    Best,
    Original,
    Inverted,
}

const CYCLE: [Rephase; 4] = [Rephase::Best, Rephase::Original, Rephase::Best, Rephase::Inverted];

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// True if a rephase is due.
    pub fn rephasing(&self) -> bool {
        self.config.rephase.value && self.counters.conflicts >= self.schedule.rephase
    }

    /// Resets the saved phases, returning the kind of rephase made.
    pub fn rephase(&mut self) -> Rephase {
        let kind = CYCLE[(self.counters.rephases % CYCLE.len() as u64) as usize];
        self.counters.rephases += 1;

        let original = self.config.phase.value;
        match kind {
            Rephase::Best => {
                for (saved, best) in self.phases.saved.iter_mut().zip(&self.phases.best) {
                    if let Some(best) = best {
                        *saved = *best;
                    }
                }
            }
            Rephase::Original => self.phases.saved.fill(original),
            Rephase::Inverted => self.phases.saved.fill(!original),
        }

        for (target, saved) in self.phases.target.iter_mut().zip(&self.phases.saved) {
            *target = Some(*saved);
        }
        self.phases.target_assigned = 0;
        self.phases.best_assigned = 0;

        self.schedule.rephase = self.counters.conflicts + self.config.rephase_interval.value * (self.counters.rephases + 1);
        log::debug!(target: targets::REPHASE, "Rephase {} ({kind:?}), next at {}", self.counters.rephases, self.schedule.rephase);
        kind
    }
}
