/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, each with one of the targets below.
No log implementation is provided, see [log] for the options.
The integration tests install `env_logger`, so `RUST_LOG=analysis=trace cargo test` shows the analysis of each conflict.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [propagation](crate::procedures::propagate)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analyze)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to [backtracking](crate::procedures::backtrack)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to decisions.
    pub const DECISION: &str = "decision";

    /// Logs related to restarts.
    pub const RESTART: &str = "restart";

    /// Logs related to clause deletion.
    pub const REDUCTION: &str = "reduction";

    /// Logs related to the [arena](crate::db::arena) and garbage collection.
    pub const ARENA: &str = "arena";

    /// Logs related to switching between focused and stable search.
    pub const MODE: &str = "mode";

    /// Logs related to resetting saved phases.
    pub const REPHASE: &str = "rephase";

    /// Logs related to the internal [checker](crate::checker).
    pub const CHECKER: &str = "checker";

    /// Logs related to the [kitten](crate::kitten) sub-solver.
    pub const KITTEN: &str = "kitten";

    /// Logs related to backbone probing.
    pub const BACKBONE: &str = "backbone";

    /// Logs related to sweeping for equivalent literals.
    pub const SWEEP: &str = "sweep";

    /// Logs made immediately before a fatal error.
    pub const FATAL: &str = "fatal";
}
