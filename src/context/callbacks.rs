/*!
Callbacks associated with a context.

# Callback types

Callbacks may be mutable functions.
Still, information passed from the solver is non-mutable.

# Proof callbacks

The context makes no proof of its own.
Instead, each clause the proof would record is passed to a callback:

- [set_callback_original](GenericContext::set_callback_original): each clause given to the context, as given (less duplicate literals).
- [set_callback_addition](GenericContext::set_callback_addition): each clause derived, e.g. a learned clause, a clause shortened by removing literals false at level zero, or a literal fixed by propagation at level zero.
- [set_callback_delete](GenericContext::set_callback_delete): each clause removed.

With these, DRAT lines may be written by the caller without the context knowing of the format.
The [checker](crate::checker), if enabled, sees exactly the same events.
*/

use super::GenericContext;
use crate::{checker::Checker, structures::literal::Literal};

pub type CallbackTerminate = dyn FnMut() -> bool;
pub type CallbackOnClause = dyn FnMut(&[Literal]);

/// The hooks given each step of a proof.
#[derive(Default)]
pub(crate) struct Proof {
    pub original: Option<Box<CallbackOnClause>>,
    pub addition: Option<Box<CallbackOnClause>>,
    pub delete: Option<Box<CallbackOnClause>>,
    pub checker: Option<Checker>,
}

impl Proof {
    /// True if some step would be seen by a callback or the checker.
    pub fn is_active(&self) -> bool {
        self.original.is_some() || self.addition.is_some() || self.delete.is_some() || self.checker.is_some()
    }

    pub fn original(&mut self, clause: &[Literal]) {
        if let Some(callback) = &mut self.original {
            callback(clause);
        }
        if let Some(checker) = &mut self.checker {
            checker.add_original(clause);
        }
    }

    pub fn add(&mut self, clause: &[Literal]) {
        if let Some(checker) = &mut self.checker {
            checker.add_derived(clause);
        }
        if let Some(callback) = &mut self.addition {
            callback(clause);
        }
    }

    pub fn delete(&mut self, clause: &[Literal]) {
        if let Some(checker) = &mut self.checker {
            checker.delete(clause);
        }
        if let Some(callback) = &mut self.delete {
            callback(clause);
        }
    }
}

/// Methods to set general callbacks.
impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    pub fn set_callback_terminate(&mut self, callback: Box<CallbackTerminate>) {
        self.callback_terminate = Some(callback);
    }

    pub fn check_callback_terminate(&mut self) -> bool {
        if let Some(callback) = &mut self.callback_terminate {
            callback()
        } else {
            false
        }
    }
}

/// Methods to set proof callbacks.
impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Set a callback to be made when an original clause is added to the context.
    pub fn set_callback_original(&mut self, callback: Box<CallbackOnClause>) {
        self.proof.original = Some(callback);
    }

    /// Set a callback to be made when a clause is derived.
    pub fn set_callback_addition(&mut self, callback: Box<CallbackOnClause>) {
        self.proof.addition = Some(callback);
    }

    /// Set a callback to be made when a clause is deleted from the context.
    pub fn set_callback_delete(&mut self, callback: Box<CallbackOnClause>) {
        self.proof.delete = Some(callback);
    }
}
