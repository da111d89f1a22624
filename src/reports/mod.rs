/*!
Reports for the context.

The integer codes of a [Report] follow the convention of the SAT competition, and of IPASIR.
*/

use crate::context::ContextState;

/// High-level reports regarding a solve.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// Satisfiability of the formula of the context is unknown, for some reason.
    Unknown = 0,

    /// The formula of the context is satisfiable.
    Satisfiable = 10,

    /// The formula of the context is unsatisfiable (under the assumptions given, if any).
    Unsatisfiable = 20,
}

impl Report {
    /// The integer code of the report.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<&ContextState> for Report {
    fn from(value: &ContextState) -> Self {
        match value {
            ContextState::Input | ContextState::Solving | ContextState::Unknown => Self::Unknown,
            ContextState::Satisfiable => Self::Satisfiable,
            ContextState::Unsatisfiable => Self::Unsatisfiable,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(Report::Unknown.code(), 0);
        assert_eq!(Report::Satisfiable.code(), 10);
        assert_eq!(Report::Unsatisfiable.code(), 20);
    }
}
