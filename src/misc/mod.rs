//! Miscellaneous items.

pub mod log;

/// Reports a condition the solver cannot recover from and panics.
///
/// Reserved for exhausted resources (such as the arena ceiling) and violated internal invariants (such as a rejected proof step).
/// Ordinary outcomes of a solve, including an unknown result, never pass through here.
#[cold]
#[track_caller]
pub fn fatal_error(message: std::fmt::Arguments) -> ! {
    ::log::error!(target: self::log::targets::FATAL, "{message}");
    panic!("fatal error: {message}")
}

/// Formats a message and hands it to [fatal_error].
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::misc::fatal_error(format_args!($($arg)*))
    };
}
pub(crate) use fatal;
