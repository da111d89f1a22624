/*!
Configuration of a context.

All configuration of a context is contained in a [Config], given when the context is [created](crate::context::Context::from_config).
The configuration is fixed from then on.

Each option is a [ConfigOption], with a name and bounds on the values the option may take.
The defaults follow the defaults of Kissat, where the option has a counterpart.

```rust
# use kissat_core::config::{Config, ModeSetting};
let mut config = Config::default();
assert!(config.mode.set(ModeSetting::Stable));
assert!(!config.reduce_fraction.set(101));
assert_eq!(config.reduce_fraction.value, 75);
```
*/

mod config_option;
pub use config_option::ConfigOption;

mod mode;
pub use mode::ModeSetting;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Which search modes to use.
    pub mode: ConfigOption<ModeSetting>,

    /// Conflicts before the first switch of mode.
    pub mode_init: ConfigOption<u64>,

    /// Permit restarts.
    pub restart: ConfigOption<bool>,

    /// Minimum conflicts between restarts in focused mode.
    pub restart_interval: ConfigOption<u64>,

    /// Percentage by which the fast glue average must exceed the slow glue average for a restart in focused mode.
    pub restart_margin: ConfigOption<u32>,

    /// Base period of reluctant doubling, in conflicts.
    pub reluctant_period: ConfigOption<u64>,

    /// Maximum period of reluctant doubling, in conflicts.
    pub reluctant_limit: ConfigOption<u64>,

    /// Permit reduction of learned clauses.
    pub reduce: ConfigOption<bool>,

    /// Base conflicts between reductions, scaled by the square root of the count of reductions.
    pub reduce_interval: ConfigOption<u64>,

    /// Percentage of reducible clauses to delete.
    pub reduce_fraction: ConfigOption<u32>,

    /// Glue limit for clauses kept while used recently.
    pub tier1: ConfigOption<u32>,

    /// Glue limit for clauses kept while used very recently.
    pub tier2: ConfigOption<u32>,

    /// Percentage of glue uses covered by tier one, when computed from the glue histogram.
    pub tier1_relative: ConfigOption<u32>,

    /// Percentage of glue uses covered by tier two, when computed from the glue histogram.
    pub tier2_relative: ConfigOption<u32>,

    /// Window of the fast glue average.
    pub ema_fast: ConfigOption<f64>,

    /// Window of the slow glue average.
    pub ema_slow: ConfigOption<f64>,

    /// Score decay, per mille.
    pub decay: ConfigOption<u32>,

    /// The initial phase of variables.
    pub phase: ConfigOption<bool>,

    /// Prefer target phases in stable mode.
    pub target_phases: ConfigOption<bool>,

    /// Permit rephasing.
    pub rephase: ConfigOption<bool>,

    /// Base conflicts between rephases, scaled by the count of rephases.
    pub rephase_interval: ConfigOption<u64>,

    /// Minimize learned clauses.
    pub minimize: ConfigOption<bool>,

    /// Maximum depth of recursive minimization.
    pub minimize_depth: ConfigOption<u32>,

    /// Permit backbone probing with the sub-solver.
    pub backbone: ConfigOption<bool>,

    /// Base conflicts between backbone rounds, scaled by the count of rounds.
    pub backbone_interval: ConfigOption<u64>,

    /// Maximum clauses in the environment given to the sub-solver.
    pub backbone_clauses: ConfigOption<usize>,

    /// Maximum candidates tried in a backbone round.
    pub backbone_candidates: ConfigOption<usize>,

    /// Ticks allowed to each call to the sub-solver.
    pub backbone_ticks: ConfigOption<u64>,

    /// Permit sweeping for equivalent literals with the sub-solver.
    pub sweep: ConfigOption<bool>,

    /// Base conflicts between sweeping rounds, scaled by the count of rounds.
    pub sweep_interval: ConfigOption<u64>,

    /// Maximum clauses in the environment given to the sub-solver.
    pub sweep_clauses: ConfigOption<usize>,

    /// Maximum candidates tried in a sweeping round.
    pub sweep_candidates: ConfigOption<usize>,

    /// Ticks allowed to each call to the sub-solver.
    pub sweep_ticks: ConfigOption<u64>,

    /// Seed of the source of randomness.
    pub random_seed: ConfigOption<u64>,

    /// Check each learned and deleted clause with the internal checker.
    pub checker: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: ConfigOption {
                name: "mode",
                min: ModeSetting::MIN,
                max: ModeSetting::MAX,
                value: ModeSetting::Switching,
            },

            mode_init: ConfigOption {
                name: "mode_init",
                min: 10,
                max: u64::MAX,
                value: 1_000,
            },

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                value: true,
            },

            restart_interval: ConfigOption {
                name: "restart_interval",
                min: 1,
                max: 10_000,
                value: 1,
            },

            restart_margin: ConfigOption {
                name: "restart_margin",
                min: 0,
                max: 25,
                value: 10,
            },

            reluctant_period: ConfigOption {
                name: "reluctant_period",
                min: 0,
                max: 1 << 20,
                value: 1_024,
            },

            reluctant_limit: ConfigOption {
                name: "reluctant_limit",
                min: 0,
                max: 1 << 30,
                value: 1 << 20,
            },

            reduce: ConfigOption {
                name: "reduce",
                min: false,
                max: true,
                value: true,
            },

            reduce_interval: ConfigOption {
                name: "reduce_interval",
                min: 10,
                max: 100_000,
                value: 1_000,
            },

            reduce_fraction: ConfigOption {
                name: "reduce_fraction",
                min: 10,
                max: 100,
                value: 75,
            },

            tier1: ConfigOption {
                name: "tier1",
                min: 1,
                max: 100,
                value: 2,
            },

            tier2: ConfigOption {
                name: "tier2",
                min: 1,
                max: 1_000,
                value: 6,
            },

            tier1_relative: ConfigOption {
                name: "tier1_relative",
                min: 1,
                max: 100,
                value: 50,
            },

            tier2_relative: ConfigOption {
                name: "tier2_relative",
                min: 1,
                max: 100,
                value: 90,
            },

            ema_fast: ConfigOption {
                name: "ema_fast",
                min: 10.0,
                max: 1e6,
                value: 33.0,
            },

            ema_slow: ConfigOption {
                name: "ema_slow",
                min: 100.0,
                max: 1e6,
                value: 1e5,
            },

            decay: ConfigOption {
                name: "decay",
                min: 1,
                max: 200,
                value: 50,
            },

            phase: ConfigOption {
                name: "phase",
                min: false,
                max: true,
                value: true,
            },

            target_phases: ConfigOption {
                name: "target_phases",
                min: false,
                max: true,
                value: true,
            },

            rephase: ConfigOption {
                name: "rephase",
                min: false,
                max: true,
                value: true,
            },

            rephase_interval: ConfigOption {
                name: "rephase_interval",
                min: 10,
                max: 1_000_000,
                value: 1_000,
            },

            minimize: ConfigOption {
                name: "minimize",
                min: false,
                max: true,
                value: true,
            },

            minimize_depth: ConfigOption {
                name: "minimize_depth",
                min: 1,
                max: 1_000_000,
                value: 1_000,
            },

            backbone: ConfigOption {
                name: "backbone",
                min: false,
                max: true,
                value: true,
            },

            backbone_interval: ConfigOption {
                name: "backbone_interval",
                min: 10,
                max: u64::MAX,
                value: 5_000,
            },

            backbone_clauses: ConfigOption {
                name: "backbone_clauses",
                min: 1,
                max: 1 << 20,
                value: 1_024,
            },

            backbone_candidates: ConfigOption {
                name: "backbone_candidates",
                min: 1,
                max: 1 << 16,
                value: 64,
            },

            backbone_ticks: ConfigOption {
                name: "backbone_ticks",
                min: 1,
                max: u64::MAX,
                value: 20_000,
            },

            sweep: ConfigOption {
                name: "sweep",
                min: false,
                max: true,
                value: true,
            },

            sweep_interval: ConfigOption {
                name: "sweep_interval",
                min: 10,
                max: u64::MAX,
                value: 10_000,
            },

            sweep_clauses: ConfigOption {
                name: "sweep_clauses",
                min: 1,
                max: 1 << 20,
                value: 1_024,
            },

            sweep_candidates: ConfigOption {
                name: "sweep_candidates",
                min: 1,
                max: 1 << 16,
                value: 32,
            },

            sweep_ticks: ConfigOption {
                name: "sweep_ticks",
                min: 1,
                max: u64::MAX,
                value: 20_000,
            },

            random_seed: ConfigOption {
                name: "random_seed",
                min: 0,
                max: u64::MAX,
                value: 0,
            },

            checker: ConfigOption {
                name: "checker",
                min: false,
                max: true,
                value: false,
            },
        }
    }
}
