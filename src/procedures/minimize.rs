//! Minimization of a learned clause.
//!
//! A literal of the learned clause is removed if its negation is implied by the negations of the other literals of the clause.
//! That is, if each literal of its reason is either in the clause, fixed, or (recursively) removable.
//!
//! The search is depth first over reasons, and limited in two ways:
//! - A literal whose level has no literal in the clause is not removable, as its implication must involve some decision outside the clause.
//! - The depth of the search is bounded by [Config::minimize_depth](crate::config::Config::minimize_depth).
//!
//! Results are kept as marks on variables, so each variable is explored at most once per conflict.
//!
//! # Literature
//!
//! See [Minimizing learned clauses](https://doi.org/10.1007/978-3-642-02777-2_23).

use crate::{
    context::GenericContext,
    db::assignment::Reason,
    procedures::analyze::marks,
    structures::literal::Variable,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Removes each literal implied by the rest of the learned clause, excluding the asserted literal.
    pub(crate) fn minimize(&mut self) {
        let mut clause = std::mem::take(&mut self.analysis.clause);
        let mut kept = 1;
        for index in 1..clause.len() {
            let literal = clause[index];
            if !self.removable(literal.variable(), 0) {
                clause[kept] = literal;
                kept += 1;
            }
        }
        clause.truncate(kept);
        self.analysis.clause = clause;
    }

    /// True if the (false) literal of `variable` is implied by the learned clause.
    fn removable(&mut self, variable: Variable, depth: u32) -> bool {
        let index = variable as usize;
        let assigned = self.assigned[index];
        if assigned.level == 0 {
            return true;
        }
        let mark = self.analysis.marks[index];
        if mark & marks::REMOVABLE != 0 {
            return true;
        }
        if depth > 0 && mark & marks::SEEN != 0 {
            return true;
        }
        if mark & marks::POISONED != 0 {
            return false;
        }
        if !self.analysis.levels[assigned.level as usize] || depth > self.config.minimize_depth.value {
            return false;
        }

        let removable = match assigned.reason {
            Reason::Decision | Reason::Unit => false,

            Reason::Binary(other) => self.removable(other.variable(), depth + 1),

            Reason::Clause(reference) => {
                let size = self.arena.clause(reference).size();
                let mut removable = true;
                for position in 0..size {
                    let other = self.arena.literals(reference)[position].variable();
                    if other != variable && !self.removable(other, depth + 1) {
                        removable = false;
                        break;
                    }
                }
                removable
            }
        };

        if depth > 0 {
            if mark == 0 {
                self.analysis.analyzed.push(variable);
            }
            self.analysis.marks[index] |= match removable {
                true => marks::REMOVABLE,
                false => marks::POISONED,
            };
        }
        removable
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        context::Context,
        db::assignment::Reason,
        procedures::analyze::AnalysisOk,
        structures::literal::Literal,
    };

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    fn decide(context: &mut Context, external: i32) {
        context.trail.new_level(Some(lit(external)));
        context.assign(lit(external), Reason::Decision);
    }

    // 1 implies 2 at level one, and the conflict at level two involves both 1 and 2.
    fn implied_literal(minimize: bool) -> Context {
        let mut config = Config::default();
        config.minimize.value = minimize;
        let mut context = Context::from_config(config);
        context.add_clause(&[-1, 2]).unwrap();
        context.add_clause(&[-1, -2, -3, 4]).unwrap();
        context.add_clause(&[-1, -2, -3, -4]).unwrap();

        decide(&mut context, 1);
        assert!(context.propagate().is_none());
        decide(&mut context, 3);
        let conflict = context.propagate().unwrap();
        assert_eq!(
            context.analyze(conflict),
            Ok(AnalysisOk::Asserting { literal: lit(-3), level: 1 })
        );
        context
    }

    #[test]
    fn removes_implied() {
        let context = implied_literal(true);
        assert_eq!(context.counters.minimized, 1);
        assert_eq!(context.assigned[2].reason, Reason::Binary(lit(-1)));
    }

    #[test]
    fn disabled() {
        let context = implied_literal(false);
        assert_eq!(context.counters.minimized, 0);
        assert!(matches!(context.assigned[2].reason, Reason::Clause(_)));
    }
}
