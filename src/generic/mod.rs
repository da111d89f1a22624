//! Generic structures, not tied to the solver.

pub mod ema;
pub mod index_heap;
pub mod minimal_pcg;
pub mod reluctant;
