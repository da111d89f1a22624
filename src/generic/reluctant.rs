/*!
Reluctant doubling, the restart schedule of stable mode.

The schedule follows the luby sequence (see <https://oeis.org/A182105>), as generated by the `(u, v)` recurrence of Knuth:
if `u & -u == v` then `u` is incremented and `v` reset to `1`, otherwise `v` is doubled.
Each element is scaled by a period (measured in conflicts), and once the scaled value exceeds a limit the sequence starts again.

A restart is triggered once the current element has been waited out.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u64;

/// An iterator over the luby sequence.
#[derive(Clone, Debug)]
pub struct Luby {
    u: LubyRepresentation,
    v: LubyRepresentation,
}

impl Default for Luby {
    fn default() -> Self {
        Luby { u: 1, v: 1 }
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.v;
        if self.u & self.u.wrapping_neg() == self.v {
            self.u = self.u.checked_add(1)?;
            self.v = 1;
        } else {
            self.v = self.v.checked_mul(2)?;
        }
        Some(element)
    }
}

/// A trigger following the luby sequence.
#[derive(Clone, Debug, Default)]
pub struct Reluctant {
    luby: Luby,

    /// Conflicts which remain until the trigger is set.
    wait: u64,

    /// The scale of each element of the luby sequence.
    period: u64,

    /// The largest wait before the sequence is restarted.
    limit: u64,

    triggered: bool,
}

impl Reluctant {
    /// A trigger with the given period and limit, with a period of zero never triggering.
    pub fn new(period: u64, limit: u64) -> Self {
        Reluctant {
            luby: Luby::default(),
            wait: period,
            period,
            limit,
            triggered: false,
        }
    }

    /// Notes a conflict.
    pub fn tick(&mut self) {
        if self.period == 0 || self.triggered {
            return;
        }
        self.wait = self.wait.saturating_sub(1);
        if self.wait > 0 {
            return;
        }
        self.triggered = true;
        let element = self.luby.next().unwrap_or(1);
        let mut next = element.saturating_mul(self.period);
        if next > self.limit {
            self.luby = Luby::default();
            next = self.period;
        }
        self.wait = next;
    }

    /// True if the trigger is set, in which case the trigger is also reset.
    pub fn triggered(&mut self) -> bool {
        std::mem::replace(&mut self.triggered, false)
    }
}
