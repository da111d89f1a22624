use std::str::FromStr;

/// Which search modes a solve may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModeSetting {
    /// Only focused mode: decisions from the queue with frequent restarts.
    Focused = 0,

    /// Only stable mode: decisions from the scores with reluctant restarts.
    Stable,

    /// Begin in focused mode and alternate between the modes.
    Switching,
}

impl std::fmt::Display for ModeSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Focused => write!(f, "focused"),
            Self::Stable => write!(f, "stable"),
            Self::Switching => write!(f, "switching"),
        }
    }
}

impl ModeSetting {
    /// The minimum ModeSetting.
    pub const MIN: ModeSetting = ModeSetting::Focused;

    /// The maximum ModeSetting.
    pub const MAX: ModeSetting = ModeSetting::Switching;
}

impl FromStr for ModeSetting {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focused" => Ok(Self::Focused),
            "stable" => Ok(Self::Stable),
            "switching" => Ok(Self::Switching),
            _unknown_string => Err(()),
        }
    }
}
