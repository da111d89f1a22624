/*!
Variables and literals.

A [Variable] is an index `0..vars`.
A [Literal] packs a variable and a polarity into a single word as `2 * variable + sign`, where a set sign bit marks the negative literal.
So, the two literals of a variable are adjacent and negation is `literal ^ 1`.

Outside of the library literals are written as signed, 1-based integers (as in the DIMACS format), and these are converted with [Literal::from_external] and [Literal::as_external].

```rust
# use kissat_core::structures::literal::Literal;
let p = Literal::from_external(3).unwrap();
assert_eq!(p.variable(), 2);
assert!(p.polarity());
assert_eq!((!p).as_external(), -3);
assert_eq!(p.index() ^ 1, (!p).index());
```
*/

/// A variable, as an index.
pub type Variable = u32;

/// The external representation of a literal, as a non-zero signed integer.
pub type ExternalLiteral = i32;

/// The largest variable index supported.
///
/// Literal indices then fit comfortably in a `u32` with room for the tombstone marker of the [arena](crate::db::arena).
pub const MAX_VARIABLE: Variable = (1 << 28) - 1;

/// A literal.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(u32);

impl Literal {
    /// The literal of `variable` with the given polarity.
    pub const fn new(variable: Variable, polarity: bool) -> Self {
        Literal(2 * variable + !polarity as u32)
    }

    /// The literal with the given index, as returned by [index](Literal::index).
    pub const fn from_index(index: usize) -> Self {
        Literal(index as u32)
    }

    /// The literal corresponding to an external literal, if the external literal is valid.
    pub fn from_external(external: ExternalLiteral) -> Option<Self> {
        if external == 0 || external == ExternalLiteral::MIN {
            return None;
        }
        let variable = external.unsigned_abs() - 1;
        if variable > MAX_VARIABLE {
            return None;
        }
        Some(Literal::new(variable, external > 0))
    }

    /// The external representation of the literal.
    pub const fn as_external(self) -> ExternalLiteral {
        let external = (self.variable() + 1) as ExternalLiteral;
        match self.polarity() {
            true => external,
            false => -external,
        }
    }

    /// The variable of the literal.
    pub const fn variable(self) -> Variable {
        self.0 >> 1
    }

    /// True if the literal is the positive literal of its variable.
    pub const fn polarity(self) -> bool {
        self.0 & 1 == 0
    }

    /// The negation of the literal.
    pub const fn negate(self) -> Self {
        Literal(self.0 ^ 1)
    }

    /// The index of the literal, for use with per-literal vectors.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The raw word of the literal, as stored in the arena.
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_external())
    }
}
