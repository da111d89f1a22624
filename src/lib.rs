//! A library for determining the satisfiability of boolean formulas written in conjunctive normal form.
//!
//! kissat_core is the core of a conflict-driven clause-learning (CDCL) solver in the style of Kissat: an arena clause store, two watched literal propagation, first-UIP analysis with minimization, restarts and learned clause reduction driven by two search modes, and an embedded sub-solver ([kitten]) for local queries.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context].
//!
//! Contexts are built from a [configuration](crate::config), and clauses are added [programatically](crate::context::GenericContext::add_clause) as slices of non-zero integers, following the DIMACS (and IPASIR) convention.
//!
//! Internally, a solve is viewed in terms of a handful of databases (see [db]):
//! - Clauses of more than two literals are stored in an [arena](crate::db::arena), and addressed by [references](crate::db::arena::Reference).
//! - Binary clauses live only in the [watches](crate::db::watches).
//! - The current valuation is recorded on the [trail](crate::db::trail), split into decision levels.
//!
//! Useful starting points, then, may be:
//! - The high-level [solve procedure](crate::procedures::solve) to inspect the dynamics of a solve.
//! - The [procedures] for each step of a solve.
//! - The [heuristics] to see how decisions are made in each search mode.
//! - The [configuration](crate::config) to see what features are supported.
//!
//! # Examples
//!
//! + Find (a count of) all valuations of three variables, by blocking each valuation found.
//!
//! ```rust
//! # use kissat_core::config::Config;
//! # use kissat_core::context::Context;
//! # use kissat_core::reports::Report;
//! let mut context = Context::from_config(Config::default());
//! context.reserve(3).unwrap();
//!
//! let mut count = 0;
//! while context.solve() == Ok(Report::Satisfiable) {
//!     count += 1;
//!     let block = (1..=3).map(|v| -context.value(v).unwrap()).collect::<Vec<_>>();
//!     context.add_clause(&block).unwrap();
//! }
//!
//! assert_eq!(count, 8);
//! assert!(context.is_inconsistent());
//! ```
//!
//! + Contradictory units make a context inconsistent without a solve.
//!
//! ```rust
//! # use kissat_core::config::Config;
//! # use kissat_core::context::Context;
//! # use kissat_core::reports::Report;
//! let mut context = Context::from_config(Config::default());
//! context.add_clause(&[1]).unwrap();
//! context.add_clause(&[-1]).unwrap();
//! assert!(context.is_inconsistent());
//! assert_eq!(context.solve().map(|report| report.code()), Ok(20));
//! ```
//!
//! # Verification
//!
//! Each clause added, derived, or deleted is passed to the proof [callbacks](crate::context::callbacks), from which a DRAT proof may be written.
//! And, with [Config::checker](crate::config::Config::checker), each derived clause is checked by reverse unit propagation as it is derived (see [checker]).
//!
//! # Logs
//!
//! Calls to the [log] macros are made throughout, each with a target from [misc::log::targets].
//! No logger is included.

pub mod checker;
pub mod config;
pub mod context;
pub mod db;
pub mod generic;
pub mod heuristics;
pub mod kitten;
pub mod misc;
pub mod procedures;
pub mod reports;
pub mod structures;
pub mod types;
