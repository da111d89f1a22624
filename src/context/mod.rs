/*!
The context, to which clauses are added and within which solves take place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over the source of randomness.
[from_config](Context::from_config) is implemented for a context rather than a generic context, to avoid requiring a source of randomness to be supplied alongside a config.

A context owns every structure of a solve: the [arena](crate::db::arena), [watches](crate::db::watches), the [trail](crate::db::trail), both [heuristics](crate::heuristics), the [phases](crate::db::phases), the optional [checker](crate::checker) and a [kitten](crate::kitten).
Procedures on these structures are methods of the context, documented in [procedures](crate::procedures).

# Example
```rust
# use kissat_core::context::Context;
# use kissat_core::config::Config;
# use kissat_core::reports::Report;
# use kissat_core::procedures::add::ClauseOk;
let mut the_context = Context::from_config(Config::default());

assert_eq!(the_context.add_clause(&[1, 2]), Ok(ClauseOk::Added));
assert_eq!(the_context.add_clause(&[-1]), Ok(ClauseOk::Added));
assert_eq!(the_context.add_clause(&[2, -2]), Ok(ClauseOk::Tautology));

assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
assert_eq!(the_context.value(1), Ok(-1));
assert_eq!(the_context.value(2), Ok(2));
```
*/

pub mod callbacks;
mod counters;
pub use counters::{Counters, Limits};
mod generic;
pub use generic::GenericContext;
mod specific;
pub use specific::Context;

/// The state of a context.
/// These states correspond to the states defined in the IPASIR specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context allows input, and no solve has been made since the last input.
    Input,

    /// A solve is in progress.
    Solving,

    /// A satisfying valuation was found by the last solve.
    Satisfiable,

    /// The last solve found the clauses unsatisfiable, perhaps only under the assumptions given.
    Unsatisfiable,

    /// The last solve stopped at a limit, or was terminated.
    Unknown,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
