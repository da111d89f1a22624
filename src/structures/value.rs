/*!
Values of literals, and valuations indexed by literal.

A [Valuation] stores a value for each literal rather than each variable, so the value of a literal is a single lookup without any adjustment for polarity.
Assigning a literal sets the literal to true and its negation to false.
*/

use super::literal::{Literal, Variable};

/// The value of a literal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i8)]
pub enum Value {
    False = -1,
    #[default]
    Unassigned = 0,
    True = 1,
}

impl Value {
    pub fn is_true(self) -> bool {
        self == Value::True
    }

    pub fn is_false(self) -> bool {
        self == Value::False
    }

    pub fn is_unassigned(self) -> bool {
        self == Value::Unassigned
    }
}

/// A (partial) valuation, as a value for each literal.
#[derive(Clone, Default)]
pub struct Valuation {
    values: Vec<Value>,
}

impl Valuation {
    /// Extends the valuation to cover `variables` variables.
    pub fn resize(&mut self, variables: usize) {
        self.values.resize(2 * variables, Value::Unassigned);
    }

    /// The value of `literal`.
    pub fn value(&self, literal: Literal) -> Value {
        self.values[literal.index()]
    }

    /// True if `variable` has some value.
    pub fn is_assigned(&self, variable: Variable) -> bool {
        !self.values[2 * variable as usize].is_unassigned()
    }

    /// Makes `literal` true and its negation false.
    pub fn set(&mut self, literal: Literal) {
        self.values[literal.index()] = Value::True;
        self.values[literal.negate().index()] = Value::False;
    }

    /// Removes the value of the variable of `literal`.
    pub fn clear(&mut self, literal: Literal) {
        self.values[literal.index()] = Value::Unassigned;
        self.values[literal.negate().index()] = Value::Unassigned;
    }

    /// Removes every value.
    pub fn clear_all(&mut self) {
        self.values.fill(Value::Unassigned);
    }

    /// The number of variables covered.
    pub fn variables(&self) -> usize {
        self.values.len() / 2
    }
}
