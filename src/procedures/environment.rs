/*!
Environments of variables, as given to the [kitten](crate::kitten) sub-solver.

[Backbone probing](crate::procedures::backbone) and [sweeping](crate::procedures::sweep) both ask the kitten about the clauses around a variable.

The clauses are taken from a [Formula], a copy of the irredundant clauses of the context simplified at level zero: clauses satisfied at level zero are skipped, and literals false at level zero are dropped.
The *environment* of a variable is then gathered by a breadth first walk from the variable over shared variables, up to a limit on clauses.

# Proofs

If a proof is being made the kitten tracks antecedents.
After a refutation the learned clauses of the clausal core are passed to the proof before whatever the refutation established.
As the context doesn't keep these clauses, those of more than one literal are deleted afterwards.
*/

use crate::{
    context::GenericContext,
    structures::literal::{Literal, Variable},
    types::err::ErrorKind,
};

/// The irredundant clauses of the context, simplified at level zero, with occurrences by variable.
pub(crate) struct Formula {
    pub clauses: Vec<Vec<Literal>>,
    pub occurrences: Vec<Vec<usize>>,

    /// Marks of clauses in the environment being gathered.
    included: Vec<bool>,

    /// Marks of variables reached by the walk being made.
    visited: Vec<bool>,
}

/// The clauses around a variable, and the variables of those clauses.
#[derive(Debug, Default)]
pub(crate) struct Environment {
    /// Indices of clauses of the formula.
    pub clauses: Vec<usize>,

    /// Each variable of the clauses once, in the order reached.
    pub variables: Vec<Variable>,
}

impl Formula {
    pub fn new(clauses: Vec<Vec<Literal>>, variables: usize) -> Self {
        let mut occurrences = vec![Vec::default(); variables];
        for (index, clause) in clauses.iter().enumerate() {
            for literal in clause {
                occurrences[literal.variable() as usize].push(index);
            }
        }
        Formula {
            included: vec![false; clauses.len()],
            visited: vec![false; variables],
            clauses,
            occurrences,
        }
    }

    /// The clauses around `variable`, up to `limit` clauses.
    pub fn environment(&mut self, variable: Variable, limit: usize) -> Environment {
        let mut environment = Environment::default();
        self.visited[variable as usize] = true;
        environment.variables.push(variable);
        let mut next = 0;

        'walk: while next < environment.variables.len() {
            let current = environment.variables[next] as usize;
            next += 1;
            for index in &self.occurrences[current] {
                if self.included[*index] {
                    continue;
                }
                self.included[*index] = true;
                environment.clauses.push(*index);
                for literal in &self.clauses[*index] {
                    let reached = literal.variable();
                    if !self.visited[reached as usize] {
                        self.visited[reached as usize] = true;
                        environment.variables.push(reached);
                    }
                }
                if environment.clauses.len() >= limit {
                    break 'walk;
                }
            }
        }

        for index in &environment.clauses {
            self.included[*index] = false;
        }
        for reached in &environment.variables {
            self.visited[*reached as usize] = false;
        }
        environment
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The irredundant clauses of the context, without clauses satisfied at level zero or literals false at level zero.
    pub(crate) fn irredundant_formula(&self) -> Formula {
        let mut clauses = Vec::default();

        let mut simplified = |literals: &[Literal]| {
            if literals.iter().any(|literal| self.root_value(*literal).is_true()) {
                return;
            }
            let kept = literals
                .iter()
                .copied()
                .filter(|literal| self.root_value(*literal).is_unassigned())
                .collect::<Vec<_>>();
            clauses.push(kept);
        };

        for (a, b, redundant) in self.watches.binaries() {
            if !redundant {
                simplified(&[a, b]);
            }
        }
        for reference in self.arena.references() {
            let clause = self.arena.clause(reference);
            if !clause.is_garbage() && !clause.is_redundant() {
                simplified(clause.literals());
            }
        }

        Formula::new(clauses, self.variables())
    }

    /// Clears the kitten and gives it the clauses of `environment`, identified by index, with `ticks` allowed to each solve.
    pub(crate) fn load_environment(
        &mut self,
        formula: &Formula,
        environment: &Environment,
        ticks: u64,
    ) -> Result<(), ErrorKind> {
        self.kitten.clear();
        if self.proof.is_active() {
            self.kitten.track_antecedents()?;
        }
        for index in &environment.clauses {
            self.kitten.clause_with_id(*index as u32, &formula.clauses[*index])?;
        }
        self.kitten.set_ticks_limit(ticks);
        Ok(())
    }

    /// The learned clauses of the core of the kitten, empty unless a proof is being made.
    pub(crate) fn core_lemmas(&mut self) -> Result<Vec<Vec<Literal>>, ErrorKind> {
        if !self.proof.is_active() {
            return Ok(Vec::default());
        }
        self.kitten.compute_clausal_core()?;
        let mut learned = Vec::default();
        self.kitten.traverse_core_clauses(|is_learned, literals| {
            if is_learned {
                learned.push(literals.to_vec());
            }
        })?;
        Ok(learned)
    }

    /// Passes `lemmas` to the proof.
    pub(crate) fn add_lemmas(&mut self, lemmas: &[Vec<Literal>]) {
        for lemma in lemmas {
            self.proof.add(lemma);
        }
    }

    /// Passes the learned clauses of the core of the kitten to the proof, and returns them.
    pub(crate) fn replay_core(&mut self) -> Result<Vec<Vec<Literal>>, ErrorKind> {
        let lemmas = self.core_lemmas()?;
        self.add_lemmas(&lemmas);
        Ok(lemmas)
    }

    /// Deletes `lemmas` of more than one literal from the proof.
    pub(crate) fn delete_lemmas(&mut self, lemmas: Vec<Vec<Literal>>) {
        for lemma in lemmas.iter().filter(|lemma| lemma.len() > 1) {
            self.proof.delete(lemma);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, context::Context};

    fn lit(external: i32) -> Literal {
        Literal::from_external(external).unwrap()
    }

    fn chain(links: i32) -> Formula {
        let clauses = (1..links)
            .map(|link| vec![lit(-link), lit(link + 1)])
            .collect::<Vec<_>>();
        Formula::new(clauses, links as usize)
    }

    #[test]
    fn breadth_first() {
        let mut formula = chain(6);
        let environment = formula.environment(2, 10);
        assert_eq!(environment.clauses, vec![1, 2, 0, 3, 4]);
        assert_eq!(environment.variables, vec![2, 1, 3, 0, 4, 5]);
    }

    #[test]
    fn limited_and_repeatable() {
        let mut formula = chain(6);
        let limited = formula.environment(0, 2);
        assert_eq!(limited.clauses, vec![0, 1]);
        assert_eq!(limited.variables, vec![0, 1, 2]);

        // Marks are cleared, so a second walk reaches the same clauses.
        let again = formula.environment(0, 2);
        assert_eq!(again.clauses, limited.clauses);
        assert!(formula.included.iter().all(|mark| !mark));
        assert!(formula.visited.iter().all(|mark| !mark));
    }

    #[test]
    fn simplified_at_level_zero() {
        let mut context = Context::from_config(Config::default());
        context.add_clause(&[1, 2, 3]).unwrap();
        context.add_clause(&[-1, 4]).unwrap();
        context.add_clause(&[4, 5, 6]).unwrap();
        context.add_clause(&[-4]).unwrap();

        let formula = context.irredundant_formula();
        let mut clauses = formula.clauses.clone();
        clauses.sort();
        assert_eq!(clauses, vec![vec![lit(2), lit(3)], vec![lit(5), lit(6)]]);
        assert!(formula.occurrences[3].is_empty());
    }
}
