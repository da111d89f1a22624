/*!
Restarts.

A restart backtracks to the level of the last assumption, keeping every learned clause, saved phase, and heuristic score.

When to restart depends on the [mode](crate::heuristics::SearchMode):

- In focused mode a restart is made when the fast moving average of learned clause glue exceeds the slow moving average by the margin given by [Config::restart_margin](crate::config::Config::restart_margin), and at least [Config::restart_interval](crate::config::Config::restart_interval) conflicts have passed since the last restart.
  In other words, when recently learned clauses are (much) worse than usual.
- In stable mode a restart is made when the [reluctant doubling](crate::generic::reluctant) trigger is set, following the Luby sequence scaled by [Config::reluctant_period](crate::config::Config::reluctant_period).

Averages are kept for each mode, so that each mode compares only clauses learned while in that mode.
*/

use crate::{
    config::Config,
    context::GenericContext,
    generic::ema::Ema,
    heuristics::SearchMode,
    misc::log::targets,
};

/// Averages of learned clause glue.
#[derive(Clone, Debug)]
pub struct Averages {
    pub fast_glue: Ema,
    pub slow_glue: Ema,
}

impl Averages {
    pub fn new(config: &Config) -> Self {
        Averages {
            fast_glue: Ema::new(config.ema_fast.value),
            slow_glue: Ema::new(config.ema_slow.value),
        }
    }

    /// Updates both averages with the glue of a learned clause.
    pub fn update(&mut self, glue: u32) {
        self.fast_glue.update(glue as f64);
        self.slow_glue.update(glue as f64);
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// True if a restart is due.
    pub fn restarting(&mut self) -> bool {
        if !self.config.restart.value || self.trail.level() as usize <= self.assumptions.len() {
            return false;
        }
        match self.mode {
            SearchMode::Focused => {
                if self.counters.conflicts < self.schedule.restart {
                    return false;
                }
                let averages = &self.averages[SearchMode::Focused.index()];
                let margin = 1.0 + self.config.restart_margin.value as f64 / 100.0;
                averages.fast_glue.value() > margin * averages.slow_glue.value()
            }

            SearchMode::Stable => self.reluctant.triggered(),
        }
    }

    /// Restarts the search.
    pub fn restart(&mut self) {
        let level = (self.assumptions.len() as u32).min(self.trail.level());
        log::debug!(target: targets::RESTART, "Restart {} in {} mode from level {}", self.counters.restarts + 1, self.mode, self.trail.level());
        self.update_phases();
        self.backtrack(level);
        self.counters.restarts += 1;
        match self.mode {
            SearchMode::Focused => {
                self.schedule.restart = self.counters.conflicts + self.config.restart_interval.value;
            }
            SearchMode::Stable => self.phases.target_assigned = 0,
        }
    }
}
