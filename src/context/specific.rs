use crate::{
    checker::Checker,
    config::{Config, ModeSetting},
    db::{arena::Arena, phases::Phases, substitution::Substitution, trail::Trail, watches::Watches},
    generic::{minimal_pcg::MinimalPCG32, reluctant::Reluctant},
    heuristics::{queue::Queue, scores::Scores, SearchMode},
    kitten::Kitten,
    procedures::{analyze::Analysis, mode::ModeSchedule, reduce::Tiers, restart::Averages},
    structures::value::Valuation,
};

use super::{
    callbacks::Proof,
    counters::Schedule,
    ContextState, Counters, GenericContext, Limits,
};

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        let seed = config.random_seed.value;
        let mode = match config.mode.value {
            ModeSetting::Stable => SearchMode::Stable,
            ModeSetting::Focused | ModeSetting::Switching => SearchMode::Focused,
        };
        let averages = [Averages::new(&config), Averages::new(&config)];
        let proof = Proof {
            checker: config.checker.value.then(Checker::default),
            ..Default::default()
        };
        let schedule = Schedule {
            restart: config.restart_interval.value,
            reduce: config.reduce_interval.value,
            rephase: config.rephase_interval.value,
            backbone: config.backbone_interval.value,
            sweep: config.sweep_interval.value,
            simplified: 0,
        };

        Self {
            arena: Arena::default(),
            watches: Watches::default(),
            values: Valuation::default(),
            assigned: Vec::default(),
            flags: Vec::default(),
            trail: Trail::default(),
            phases: Phases::default(),
            substitution: Substitution::default(),
            queue: Queue::default(),
            scores: Scores::new(config.decay.value),
            mode,
            analysis: Analysis::default(),
            averages,
            reluctant: Reluctant::new(config.reluctant_period.value, config.reluctant_limit.value),
            tiers: Tiers::new(&config),
            schedule,
            mode_schedule: ModeSchedule::new(&config),

            limits: Limits::default(),
            bounds: Limits::default(),

            assumptions: Vec::default(),
            failed: Vec::default(),
            inconsistent: false,
            unassigned: 0,
            clause_buffer: Vec::default(),

            proof,
            kitten: Kitten::with_seed(seed),

            config,
            counters: Counters::default(),

            rng: MinimalPCG32::seeded(seed),
            state: ContextState::Input,

            callback_terminate: None,
        }
    }
}
