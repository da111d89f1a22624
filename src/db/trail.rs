/*!
The trail, a stack of assigned literals in order of assignment.

Literals are grouped into decision levels by [Frame]s.
Level zero has no frame, and the frame of level `l > 0` records where on the trail the literals of level `l` begin, together with the decision which opened the level.
A level opened for an assumption which already holds has no decision, and no literal of its own.

Literals before `propagated` have had their consequences examined.
*/

use crate::structures::literal::Literal;

/// A decision level.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    /// The decision of the level, if any.
    pub decision: Option<Literal>,

    /// The position of the first literal of the level on the trail.
    pub trail: usize,
}

/// The trail struct.
#[derive(Default)]
pub struct Trail {
    literals: Vec<Literal>,
    frames: Vec<Frame>,

    /// The index of the first literal whose consequences have not been examined.
    pub propagated: usize,
}

impl Trail {
    /// The current decision level.
    pub fn level(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True if every literal on the trail has been propagated.
    pub fn fully_propagated(&self) -> bool {
        self.propagated == self.literals.len()
    }

    pub fn push(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    /// Opens a new decision level.
    pub fn new_level(&mut self, decision: Option<Literal>) {
        self.frames.push(Frame {
            decision,
            trail: self.literals.len(),
        });
    }

    /// The frame of `level`, for `level > 0`.
    pub fn frame(&self, level: u32) -> &Frame {
        &self.frames[level as usize - 1]
    }

    /// The position on the trail of the first literal above `level`.
    pub fn end_of_level(&self, level: u32) -> usize {
        match self.frames.get(level as usize) {
            Some(frame) => frame.trail,
            None => self.literals.len(),
        }
    }

    /// Removes every literal and frame above `level`.
    pub fn truncate_to_level(&mut self, level: u32) {
        let end = self.end_of_level(level);
        self.literals.truncate(end);
        self.frames.truncate(level as usize);
        self.propagated = self.propagated.min(end);
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.literals.clear();
        self.frames.clear();
        self.propagated = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        let mut trail = Trail::default();
        let lit = |external| Literal::from_external(external).unwrap();

        trail.push(lit(1));
        trail.new_level(Some(lit(2)));
        trail.push(lit(2));
        trail.push(lit(-3));
        trail.new_level(None);
        trail.new_level(Some(lit(4)));
        trail.push(lit(4));
        trail.propagated = trail.len();

        assert_eq!(trail.level(), 3);
        assert_eq!(trail.end_of_level(0), 1);
        assert_eq!(trail.end_of_level(1), 3);
        assert_eq!(trail.end_of_level(2), 3);
        assert!(trail.frame(2).decision.is_none());

        trail.truncate_to_level(1);
        assert_eq!(trail.level(), 1);
        assert_eq!(trail.literals(), &[lit(1), lit(2), lit(-3)]);
        assert_eq!(trail.propagated, 3);
    }
}
