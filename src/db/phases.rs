/*!
Phases, the value given to a variable when decided.

- The *saved* phase is the last value of the variable, and is the default choice.
- The *target* phase is the value of the variable on the longest conflict-free trail since the last restart of the target, and is preferred in stable mode.
- The *best* phase is the value of the variable on the longest conflict-free trail since the last rephase, and is used to reset the saved phases.
*/

use crate::structures::literal::Variable;

#[derive(Default)]
pub struct Phases {
    pub saved: Vec<bool>,
    pub target: Vec<Option<bool>>,
    pub best: Vec<Option<bool>>,

    /// The length of the trail prefix the target phases were taken from.
    pub target_assigned: usize,

    /// The length of the trail prefix the best phases were taken from.
    pub best_assigned: usize,
}

impl Phases {
    /// Extends the phases to cover `variables` variables, with `initial` as the saved phase of fresh variables.
    pub fn resize(&mut self, variables: usize, initial: bool) {
        self.saved.resize(variables, initial);
        self.target.resize(variables, None);
        self.best.resize(variables, None);
    }

    /// The phase to use when deciding `variable`.
    pub fn decision_phase(&self, variable: Variable, use_target: bool) -> bool {
        let index = variable as usize;
        match use_target {
            true => self.target[index].unwrap_or(self.saved[index]),
            false => self.saved[index],
        }
    }
}
