/*!
Exponential variable state independent decaying sum (EVSIDS) scores.

Each variable has a score, and decisions take the unassigned variable with the highest score from an [IndexHeap].
Rather than decaying every score after each conflict, the increment added to a bumped score grows by a factor of `1 / (1 - decay)`.
Once a score or the increment passes [MAX_SCORE], every score and the increment are scaled down by the same power of two, which keeps the relative order of scores exact.

Assigned variables are removed from the heap lazily, when found at the top during a [pick](Heuristic::pick).
*/

use crate::{
    generic::index_heap::IndexHeap,
    heuristics::Heuristic,
    structures::{literal::Variable, value::Valuation},
};

/// The score above which all scores are scaled down.
const MAX_SCORE: f64 = 1e150;

const TWO_POW_120: f64 = (1u128 << 120) as f64;

/// The factor used to scale all scores down, `2^-480`.
const RESCALE: f64 = 1.0 / (TWO_POW_120 * TWO_POW_120 * TWO_POW_120 * TWO_POW_120);

/// The scores struct.
pub struct Scores {
    heap: IndexHeap<f64>,
    increment: f64,
    factor: f64,
}

impl Scores {
    /// Scores with a decay given in per mille.
    pub fn new(decay: u32) -> Self {
        let decay = (decay.clamp(1, 999) as f64) / 1000.0;
        Scores {
            heap: IndexHeap::default(),
            increment: 1.0,
            factor: 1.0 / (1.0 - decay),
        }
    }

    /// Extends the scores to cover `variables` variables, with fresh variables off the heap.
    pub fn resize(&mut self, variables: usize) {
        self.heap.grow(variables);
    }

    pub fn score(&self, variable: Variable) -> f64 {
        self.heap.value(variable as usize)
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.heap.contains(variable as usize)
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    fn rescale(&mut self) {
        self.heap.apply_to_all(|score| score * RESCALE);
        self.increment *= RESCALE;
        log::debug!(target: crate::misc::log::targets::DECISION, "Rescaled scores");
    }

    fn bump_variable(&mut self, variable: Variable) {
        let mut score = self.score(variable) + self.increment;
        if score > MAX_SCORE {
            self.rescale();
            score = self.score(variable) + self.increment;
        }
        self.heap.set_value(variable as usize, score);
    }

    /// Places each of `variables` back on the heap, for use after a switch to stable mode.
    pub fn rebuild(&mut self, variables: impl Iterator<Item = Variable>) {
        for variable in variables {
            self.heap.push(variable as usize);
        }
    }
}

impl Heuristic for Scores {
    fn enqueue(&mut self, variable: Variable) {
        self.heap.push(variable as usize);
    }

    fn dequeue(&mut self, variable: Variable) {
        self.heap.remove(variable as usize);
    }

    fn bump(&mut self, variables: &[Variable]) {
        for variable in variables {
            self.bump_variable(*variable);
        }
        self.increment *= self.factor;
        if self.increment > MAX_SCORE {
            self.rescale();
        }
    }

    fn pick(&mut self, values: &Valuation) -> Option<Variable> {
        while let Some(top) = self.heap.peek_max() {
            if !values.is_assigned(top as Variable) {
                return Some(top as Variable);
            }
            self.heap.pop_max();
        }
        None
    }

    fn unassigned(&mut self, variable: Variable) {
        self.heap.push(variable as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Literal;

    fn scores_of(count: usize) -> Scores {
        let mut scores = Scores::new(50);
        scores.resize(count);
        for variable in 0..count as Variable {
            scores.enqueue(variable);
        }
        scores
    }

    #[test]
    fn later_bumps_weigh_more() {
        let mut scores = scores_of(3);
        scores.bump(&[0]);
        scores.bump(&[1]);
        assert!(scores.score(1) > scores.score(0));

        let values = {
            let mut values = Valuation::default();
            values.resize(3);
            values
        };
        assert_eq!(scores.pick(&values), Some(1));
    }

    #[test]
    fn rescale_keeps_order() {
        let mut scores = scores_of(3);
        scores.bump(&[2]);
        scores.bump(&[0]);
        for _ in 0..20_000 {
            scores.bump(&[1]);
        }
        scores.bump(&[0]);
        assert!(scores.increment() <= MAX_SCORE);
        assert!(scores.score(1) > scores.score(0));
        assert!(scores.score(0) > scores.score(2));
    }

    #[test]
    fn assigned_popped_then_returned() {
        let mut scores = scores_of(2);
        scores.bump(&[1]);
        let mut values = Valuation::default();
        values.resize(2);
        values.set(Literal::new(1, false));

        assert_eq!(scores.pick(&values), Some(0));
        assert!(!scores.contains(1));

        values.clear(Literal::new(1, false));
        scores.unassigned(1);
        assert_eq!(scores.pick(&values), Some(1));
    }
}
