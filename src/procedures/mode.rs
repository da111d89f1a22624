/*!
Switching between focused and stable search.

With [ModeSetting::Switching] a solve begins in focused mode, and alternates between the modes.

- The first switch is made after [Config::mode_init](crate::config::Config::mode_init) conflicts.
  The ticks spent in focused mode up to the first switch are the *base* of every later switch.
- Later switches are made after `base * n²` further ticks, where `n` counts pairs of completed modes.
  So, each mode receives (roughly) the same share of work as the other over time.

A switch returns to level zero.
The heuristic of the mode entered is brought up to date, as the heuristic of the other mode was the only one bumped and consulted since the last switch:
- Entering stable mode, the scores are rebuilt to hold every unassigned variable, and the target phases are reset.
- Entering focused mode, the search cursor of the queue is reset and the restart schedule begins anew.

With [ModeSetting::Focused] or [ModeSetting::Stable] no switch is ever made.
*/

use crate::{
    config::{Config, ModeSetting},
    context::GenericContext,
    heuristics::SearchMode,
    misc::log::targets,
    structures::literal::Variable,
};

/// The next switch of mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeLimit {
    /// Switch once the count of conflicts reaches the limit.
    Conflicts(u64),

    /// Switch once the count of ticks reaches the limit.
    Ticks(u64),

    /// Never switch.
    Never,
}

/// When to switch mode.
#[derive(Clone, Debug)]
pub struct ModeSchedule {
    pub limit: ModeLimit,

    /// Ticks spent before the first switch.
    pub base_ticks: u64,

    /// Ticks at the start of the first solve.
    pub start_ticks: Option<u64>,
}

impl ModeSchedule {
    pub fn new(config: &Config) -> Self {
        let limit = match config.mode.value {
            ModeSetting::Switching => ModeLimit::Conflicts(config.mode_init.value),
            ModeSetting::Focused | ModeSetting::Stable => ModeLimit::Never,
        };
        ModeSchedule {
            limit,
            base_ticks: 0,
            start_ticks: None,
        }
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// True if a switch of mode is due.
    pub fn switching(&mut self) -> bool {
        if self.mode_schedule.start_ticks.is_none() {
            self.mode_schedule.start_ticks = Some(self.counters.ticks);
        }
        match self.mode_schedule.limit {
            ModeLimit::Conflicts(limit) => self.counters.conflicts >= limit,
            ModeLimit::Ticks(limit) => self.counters.ticks >= limit,
            ModeLimit::Never => false,
        }
    }

    /// Switches to the other search mode.
    pub fn switch_mode(&mut self) {
        self.backtrack(0);
        self.counters.switches += 1;

        if self.counters.switches == 1 {
            let start = self.mode_schedule.start_ticks.unwrap_or(0);
            self.mode_schedule.base_ticks = self.counters.ticks.saturating_sub(start).max(1);
        }
        if self.mode_schedule.limit != ModeLimit::Never {
            let pairs = self.counters.switches / 2 + 1;
            let delta = self.mode_schedule.base_ticks.saturating_mul(pairs * pairs);
            self.mode_schedule.limit = ModeLimit::Ticks(self.counters.ticks.saturating_add(delta));
        }

        self.mode = self.mode.other();
        match self.mode {
            SearchMode::Stable => {
                let unassigned = (0..self.flags.len() as Variable).filter(|variable| {
                    let flags = self.flags[*variable as usize];
                    !flags.fixed && !flags.eliminated
                });
                self.scores.rebuild(unassigned);
                self.phases.target_assigned = 0;
                for phase in self.phases.target.iter_mut() {
                    *phase = None;
                }
            }

            SearchMode::Focused => {
                self.queue.reset_search();
                self.schedule.restart = self.counters.conflicts + self.config.restart_interval.value;
            }
        }

        log::info!(target: targets::MODE, "Switch {} to {} mode, next at {:?}", self.counters.switches, self.mode, self.mode_schedule.limit);
    }
}
