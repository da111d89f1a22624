/*!
Databases of a solve.

- The [arena] stores every clause with more than two literals.
- [Watches](watches) index clauses by the literals they watch, and store binary clauses directly.
- The [trail] records assigned literals in order of assignment, split into decision levels.
- [Assignment](assignment) records, for each variable, the level, reason and trail position of its value.
- [Phases](phases) record the preferred value of each variable when it is decided.
- [Substitution](substitution) records the representative of each variable eliminated by an equivalence.
*/

pub mod arena;
pub mod assignment;
pub mod phases;
pub mod substitution;
pub mod trail;
pub mod watches;
