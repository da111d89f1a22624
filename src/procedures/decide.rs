/*!
Methods for choosing the value of a variable.

# Overview

Before any free decision, each assumption is decided in the order given, each on a level of its own:
- An assumption already true opens a level without a decision, so the levels of the trail and the assumptions stay aligned.
- An assumption already false has failed, and the solve is unsatisfiable under the assumptions.

Once every assumption holds, the variable decided is taken from the [heuristic](crate::heuristics::Heuristic) of the current mode:
the [queue](crate::heuristics::queue) in focused mode, and the [scores](crate::heuristics::scores) in stable mode.

# Phases

The value given to the variable is its [phase](crate::db::phases).
In stable mode the target phase is preferred, if [Config::target_phases](crate::config::Config::target_phases) is set and the variable has a target phase.
Otherwise, the saved phase is used.
*/

use crate::{
    context::GenericContext,
    db::assignment::Reason,
    heuristics::SearchMode,
    misc::log::targets,
    structures::literal::Literal,
};

/// Possible 'Ok' results from making a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionOk {
    /// Some literal was decided, perhaps an assumption.
    Literal(Literal),

    /// The next assumption already holds.
    Satisfied,

    /// The next assumption is false.
    Failed(Literal),

    /// Every variable has a value, so no decision could be made.
    Exhausted,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Makes a decision, or reports why no decision is needed.
    pub fn decide(&mut self) -> DecisionOk {
        let level = self.trail.level() as usize;
        if let Some(assumption) = self.assumptions.get(level).copied() {
            let value = self.values.value(assumption);
            if value.is_true() {
                log::trace!(target: targets::DECISION, "Assumption {assumption} already holds");
                self.trail.new_level(None);
                return DecisionOk::Satisfied;
            }
            if value.is_false() {
                log::trace!(target: targets::DECISION, "Assumption {assumption} failed");
                return DecisionOk::Failed(assumption);
            }
            self.counters.decisions += 1;
            self.trail.new_level(Some(assumption));
            self.assign(assumption, Reason::Decision);
            return DecisionOk::Literal(assumption);
        }

        let heuristic = self.mode.select(&mut self.queue, &mut self.scores);
        let Some(variable) = heuristic.pick(&self.values) else {
            return DecisionOk::Exhausted;
        };

        let use_target = self.mode == SearchMode::Stable && self.config.target_phases.value;
        let polarity = self.phases.decision_phase(variable, use_target);
        let decision = Literal::new(variable, polarity);
        log::trace!(target: targets::DECISION, "Decision {decision} at level {}", level + 1);

        self.counters.decisions += 1;
        self.trail.new_level(Some(decision));
        self.assign(decision, Reason::Decision);
        DecisionOk::Literal(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, context::Context};

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    #[test]
    fn assumptions_first() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2, 3]).unwrap();
        context.assume(-2).unwrap();
        context.assume(-2).unwrap();

        assert_eq!(context.decide(), DecisionOk::Literal(lit(-2)));
        assert_eq!(context.decide(), DecisionOk::Satisfied);
        assert_eq!(context.trail.level(), 2);
        assert!(context.trail.frame(2).decision.is_none());

        assert!(matches!(context.decide(), DecisionOk::Literal(_)));
        assert_eq!(context.trail.level(), 3);
    }

    #[test]
    fn exhausted() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2]).unwrap();
        assert!(matches!(context.decide(), DecisionOk::Literal(_)));
        assert!(context.propagate().is_none());
        while let DecisionOk::Literal(_) = context.decide() {
            assert!(context.propagate().is_none());
        }
        assert_eq!(context.unassigned, 0);
        assert_eq!(context.decide(), DecisionOk::Exhausted);
    }

    #[test]
    fn saved_phase() {
        let mut config = Config::default();
        config.phase.value = false;
        let mut context = Context::from_config(config);
        context.reserve(1).unwrap();
        assert_eq!(context.decide(), DecisionOk::Literal(lit(-1)));
    }
}
