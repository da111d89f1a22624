/*!
Abstract structures shared by the solver and the [kitten](crate::kitten) sub-solver.

- [Variables](literal::Variable) are indices `0..vars`.
- [Literals](literal::Literal) pair a variable with a polarity.
- [Values](value::Value) are the three values a literal may take during a solve.
*/

pub mod literal;
pub mod value;
