//! Error types used in the library.
//!
//! - Errors here are returned to the caller and leave the context in a usable state.
//!   For the most part they record some misuse of the API, e.g. asking for the value of a literal before a satisfying valuation has been found.
//! - Conditions which cannot be recovered from, such as the arena exceeding the range of a [Reference](crate::db::arena::Reference) or the checker rejecting a proof step, are not errors.
//!   Instead, these go through [fatal_error](crate::misc::fatal_error).
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::kitten::KittenStatus;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    ClauseDB(ClauseDBError),
    Kitten(KittenError),
    State(StateError),

    /// An external literal which is zero or otherwise outside the range of external literals.
    InvalidLiteral(i32),
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Analysis was asked to resolve a conflict without any decision.
    NoDecision,

    /// Walking the trail ran out of literals before a unique implication point was found.
    NoAssertion,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// Errors when adding a clause.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// A clause was added while the previous clause given literal by literal had not been terminated by 0.
    Unterminated,

    /// The variable of a literal exceeds the maximum supported variable.
    VariablesExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Requests which are not valid in the current state of the context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// Values are only available after a satisfiable solve.
    NotSatisfiable,

    /// Failed assumptions are only available after an unsatisfiable solve.
    NotUnsatisfiable,
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::State(e)
    }
}

/// Misuse of a [Kitten](crate::kitten::Kitten) instance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KittenError {
    /// The request requires the instance to be in a different status.
    Status {
        expected: KittenStatus,
        found: KittenStatus,
    },

    /// Antecedents can only be tracked if requested before any clause is learned.
    AlreadyLearned,

    /// The request requires antecedent tracking.
    AntecedentsNotTracked,

    /// A clause given with an exception contains the same variable twice.
    DuplicateVariable,
}

impl From<KittenError> for ErrorKind {
    fn from(e: KittenError) -> Self {
        ErrorKind::Kitten(e)
    }
}
