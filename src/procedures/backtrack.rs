//! Recovery from a conflict, and restarts.
//!
//! # Overview
//!
//! A backtrack is a jump from some (higher) decision level to some previous (lower) decision level.
//!
//! Typically, a backtrack is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, every literal assigned above level *l - i* is unassigned, and:
//! - The value of each literal is saved as the phase of its variable.
//! - Each variable is returned to the [heuristic](crate::heuristics::Heuristic) of the current mode.
//!
//! Backtracking to a level at or above the current level does nothing.
//!
//! # Literature
//!
//! See [Chronological Backtracking](https://doi.org/10.1007/978-3-319-94144-8_7) for a discussion of chronological and non-chronological backjumping.

use crate::{context::GenericContext, misc::log::targets};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Backtracks to the given target level.
    ///
    /// For documentation, see [procedures::backtrack](crate::procedures::backtrack).
    pub fn backtrack(&mut self, target: u32) {
        if target >= self.trail.level() {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backtrack from {} to {target}", self.trail.level());

        let end = self.trail.end_of_level(target);
        let heuristic = self.mode.select(&mut self.queue, &mut self.scores);
        for literal in self.trail.literals()[end..].iter().rev() {
            let variable = literal.variable();
            self.values.clear(*literal);
            self.phases.saved[variable as usize] = literal.polarity();
            heuristic.unassigned(variable);
        }
        self.unassigned += self.trail.len() - end;
        self.trail.truncate_to_level(target);
    }

    /// Notes the current valuation as the target and best phases, if the valuation is larger than those previously noted.
    ///
    /// Only the literals below the current level are noted, as the current level holds a conflict.
    pub(crate) fn update_phases(&mut self) {
        let level = self.trail.level();
        if level == 0 {
            return;
        }
        let consistent = self.trail.end_of_level(level - 1);

        if self.phases.target_assigned < consistent && self.mode == crate::heuristics::SearchMode::Stable {
            for literal in &self.trail.literals()[..consistent] {
                self.phases.target[literal.variable() as usize] = Some(literal.polarity());
            }
            self.phases.target_assigned = consistent;
        }

        if self.phases.best_assigned < consistent {
            for literal in &self.trail.literals()[..consistent] {
                self.phases.best[literal.variable() as usize] = Some(literal.polarity());
            }
            self.phases.best_assigned = consistent;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        context::Context,
        db::assignment::Reason,
        structures::literal::Literal,
    };

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    #[test]
    fn saves_phases() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2, 3]).unwrap();
        let unassigned = context.unassigned;

        context.trail.new_level(Some(lit(-1)));
        context.assign(lit(-1), Reason::Decision);
        context.trail.new_level(Some(lit(-2)));
        context.assign(lit(-2), Reason::Decision);
        assert!(context.propagate().is_none());
        assert_eq!(context.unassigned, unassigned - 3);

        context.backtrack(1);
        assert_eq!(context.trail.level(), 1);
        assert_eq!(context.unassigned, unassigned - 1);
        assert!(!context.phases.saved[1]);
        assert!(context.phases.saved[2]);
        assert!(context.values.value(lit(3)).is_unassigned());

        context.backtrack(3);
        assert_eq!(context.trail.level(), 1);
    }
}
