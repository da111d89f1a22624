//! Various procedures for mutating a context.
//!
//! For the most part these are methods accessed via a context, and primarily placed here for documentation.
//!
//! Roughly, a [solve](crate::procedures::solve) is:
//!
//! ```none
//!              +-----------+   conflict at level zero
//!   +--------->| propagate |-------------------------> unsatisfiable
//!   |          +-----------+
//!   |            |       |
//!   |   conflict |       | no conflict
//!   |            ⌄       ⌄
//!   |    +---------+   +-------------------------------------------+
//!   |    | analyze |   | restart, rephase, backbone, sweep,        |
//!   |    +---------+   | reduce, mode?                             |
//!   |                  +-------------------------------------------+
//!   |            |       |
//!   |   backjump |       ⌄
//!   |     learn  |     +--------+   all assigned
//!   |            |     | decide |---------------> satisfiable
//!   |            |     +--------+
//!   |            |       |     |
//!   +------------+-------+     +-------------------> unsatisfiable, if an assumption fails
//! ```

pub mod add;
pub mod analyze;
pub mod assumptions;
pub mod backbone;
pub mod backtrack;
pub mod collect;
pub mod decide;
pub mod environment;
pub mod minimize;
pub mod mode;
pub mod propagate;
pub mod reduce;
pub mod rephase;
pub mod restart;
pub mod solve;
pub mod sweep;
