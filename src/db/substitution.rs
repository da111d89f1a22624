/*!
Representatives of variables eliminated by an equivalence.

When [sweeping](crate::procedures::sweep) finds two literals equivalent, the variable with the larger index is eliminated and every occurrence of it is replaced by the other literal, its *representative*.

The representative of an eliminated variable may itself be eliminated later, and so [resolve](Substitution::resolve) follows representatives until reaching a literal of a variable which remains.
As the variable of a representative is always smaller than the variable eliminated, this terminates.

A satisfying valuation is extended to an eliminated variable by taking the value of the resolved literal.
Likewise, literals given after an elimination (in clauses or assumptions) are resolved before use.
*/

use crate::structures::literal::{Literal, Variable};

#[derive(Default)]
pub struct Substitution {
    /// The literal equivalent to the positive literal of each eliminated variable.
    representatives: Vec<Option<Literal>>,
}

impl Substitution {
    pub fn resize(&mut self, variables: usize) {
        self.representatives.resize(variables, None);
    }

    pub fn is_eliminated(&self, variable: Variable) -> bool {
        matches!(self.representatives.get(variable as usize), Some(Some(_)))
    }

    /// Records `eliminated` as equivalent to `representative`.
    pub fn eliminate(&mut self, eliminated: Literal, representative: Literal) {
        debug_assert!(representative.variable() < eliminated.variable());
        let positive = match eliminated.polarity() {
            true => representative,
            false => !representative,
        };
        self.representatives[eliminated.variable() as usize] = Some(positive);
    }

    /// The literal of a variable which remains equivalent to `literal`.
    pub fn resolve(&self, literal: Literal) -> Literal {
        let mut resolved = literal;
        while let Some(Some(representative)) = self.representatives.get(resolved.variable() as usize) {
            resolved = match resolved.polarity() {
                true => *representative,
                false => !*representative,
            };
        }
        resolved
    }

    /// The literals of `clause` resolved, sorted and without duplicates, if some literal is of an eliminated variable.
    pub fn apply(&self, clause: &[Literal]) -> Option<Vec<Literal>> {
        if !clause.iter().any(|literal| self.is_eliminated(literal.variable())) {
            return None;
        }
        let mut resolved = clause.iter().map(|literal| self.resolve(*literal)).collect::<Vec<_>>();
        resolved.sort_unstable();
        resolved.dedup();
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    #[test]
    fn chains_with_polarity() {
        let mut substitution = Substitution::default();
        substitution.resize(4);
        substitution.eliminate(lit(-4), lit(3));
        substitution.eliminate(lit(3), lit(-1));

        assert_eq!(substitution.resolve(lit(4)), lit(1));
        assert_eq!(substitution.resolve(lit(-4)), lit(-1));
        assert_eq!(substitution.resolve(lit(-3)), lit(1));
        assert_eq!(substitution.resolve(lit(2)), lit(2));
        assert!(substitution.is_eliminated(2));
        assert!(!substitution.is_eliminated(0));
    }

    #[test]
    fn applied_to_clauses() {
        let mut substitution = Substitution::default();
        substitution.resize(3);
        substitution.eliminate(lit(3), lit(-2));

        assert_eq!(substitution.apply(&[lit(1), lit(2)]), None);
        assert_eq!(substitution.apply(&[lit(3), lit(1), lit(-2)]), Some(vec![lit(1), lit(-2)]));
        assert_eq!(substitution.apply(&[lit(-3), lit(-2)]), Some(vec![lit(2), lit(-2)]));
    }
}
