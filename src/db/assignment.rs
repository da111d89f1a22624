/*!
Per-variable records of the current assignment.

The value of a variable is stored in the [valuation](crate::structures::value::Valuation), and the remaining details of the assignment are stored here:
the decision level, the [Reason], and the position on the trail.
These are only meaningful while the variable is assigned.
*/

use crate::{db::arena::Reference, structures::literal::Literal};

/// Why a literal was assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    /// The literal was decided (or assumed).
    Decision,

    /// The literal is a unit at level zero without a clause to point to.
    Unit,

    /// The literal was propagated by a binary clause, with the other (false) literal of the clause.
    Binary(Literal),

    /// The literal was propagated by a long clause.
    Clause(Reference),
}

/// The record of an assignment.
#[derive(Clone, Copy, Debug)]
pub struct Assigned {
    pub level: u32,
    pub reason: Reason,
    pub trail: u32,
}

impl Default for Assigned {
    fn default() -> Self {
        Assigned {
            level: 0,
            reason: Reason::Unit,
            trail: 0,
        }
    }
}

/// Flags of a variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flags {
    /// The variable occurs in some clause or assumption.
    pub active: bool,

    /// The variable has a value at level zero.
    pub fixed: bool,

    /// The variable was replaced by an equivalent literal, see [substitution](crate::db::substitution).
    pub eliminated: bool,
}
