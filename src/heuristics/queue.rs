/*!
The variable move-to-front queue.

Variables are kept in a doubly linked list ordered by a stamp, which increases each time a variable is (re)enqueued.
Bumping a variable moves it to the end of the list, and decisions are made from the end backwards.

A search cursor avoids walking over the list from the end for each decision.
The cursor is maintained so every variable after it is assigned, and so a decision only walks backwards from the cursor over assigned variables.
When a variable is unassigned the cursor moves to the variable, if the variable has a larger stamp.

The queue is shared by the solver and the [kitten](crate::kitten) sub-solver.
*/

use crate::{
    heuristics::Heuristic,
    structures::{literal::Variable, value::Valuation},
};

#[derive(Clone, Copy, Debug, Default)]
struct Link {
    prev: Option<Variable>,
    next: Option<Variable>,
    stamp: u64,
    queued: bool,
}

/// The queue struct.
#[derive(Default)]
pub struct Queue {
    links: Vec<Link>,
    first: Option<Variable>,
    last: Option<Variable>,
    search: Option<Variable>,
    stamp: u64,
}

impl Queue {
    /// Extends the queue to cover `variables` variables, with fresh variables not queued.
    pub fn resize(&mut self, variables: usize) {
        self.links.resize(variables, Link::default());
    }

    /// Removes every variable from the queue.
    pub fn clear(&mut self) {
        self.links.fill(Link::default());
        self.first = None;
        self.last = None;
        self.search = None;
        self.stamp = 0;
    }

    pub fn stamp(&self, variable: Variable) -> u64 {
        self.links[variable as usize].stamp
    }

    pub fn first(&self) -> Option<Variable> {
        self.first
    }

    pub fn last(&self) -> Option<Variable> {
        self.last
    }

    pub fn search(&self) -> Option<Variable> {
        self.search
    }

    /// Places the search cursor at the end of the queue.
    pub fn reset_search(&mut self) {
        self.search = self.last;
    }

    /// Iterates over the queue from first to last.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        std::iter::successors(self.first, |variable| self.links[*variable as usize].next)
    }

    fn link(&mut self, variable: Variable) {
        self.stamp += 1;
        self.links[variable as usize] = Link {
            prev: self.last,
            next: None,
            stamp: self.stamp,
            queued: true,
        };
        match self.last {
            Some(last) => self.links[last as usize].next = Some(variable),
            None => self.first = Some(variable),
        }
        self.last = Some(variable);
    }

    fn unlink(&mut self, variable: Variable) {
        let Link { prev, next, .. } = self.links[variable as usize];
        match prev {
            Some(prev) => self.links[prev as usize].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.links[next as usize].prev = prev,
            None => self.last = prev,
        }
        let link = &mut self.links[variable as usize];
        link.prev = None;
        link.next = None;
        link.queued = false;
    }

    /// Moves `variable` to the end of the queue with a fresh stamp.
    pub fn move_to_front(&mut self, variable: Variable) {
        if self.last == Some(variable) {
            return;
        }
        self.dequeue(variable);
        self.enqueue(variable);
    }
}

impl Heuristic for Queue {
    /// Appends `variable` to the queue, and places the search cursor on it.
    fn enqueue(&mut self, variable: Variable) {
        if self.links[variable as usize].queued {
            return;
        }
        self.link(variable);
        self.search = Some(variable);
    }

    fn dequeue(&mut self, variable: Variable) {
        let link = self.links[variable as usize];
        if !link.queued {
            return;
        }
        if self.search == Some(variable) {
            self.search = link.next.or(link.prev);
        }
        self.unlink(variable);
    }

    /// Moves each variable to the front, in order of stamp so the relative order of the variables is kept.
    fn bump(&mut self, variables: &[Variable]) {
        let mut sorted = variables.to_vec();
        sorted.sort_unstable_by_key(|variable| self.stamp(*variable));
        for variable in sorted {
            self.move_to_front(variable);
        }
    }

    fn pick(&mut self, values: &Valuation) -> Option<Variable> {
        let mut cursor = self.search;
        while let Some(variable) = cursor {
            if !values.is_assigned(variable) {
                self.search = Some(variable);
                return Some(variable);
            }
            cursor = self.links[variable as usize].prev;
        }
        self.search = None;
        None
    }

    fn unassigned(&mut self, variable: Variable) {
        if !self.links[variable as usize].queued {
            return;
        }
        match self.search {
            Some(search) if self.stamp(search) >= self.stamp(variable) => {}
            _ => self.search = Some(variable),
        }
    }
}
