//! Invariant checks.
//!
//! Bad input is reported through `Result`. A failed invariant means the crate
//! or its caller broke a contract, so it is logged and turned into a panic.

use std::fmt;

/// Assert an internal invariant, logging and panicking when it does not hold.
///
/// Unlike `debug_assert!`, this is always checked.
///
/// ```should_panic
/// use word_core::aver;
///
/// let width = 9;
/// aver!(width <= 8, "length prefix of {} bytes", width);
/// ```
#[macro_export]
macro_rules! aver {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::invariant::violation(::core::format_args!($($arg)+))
        }
    };
}

/// Report an invariant violation and panic.
#[cold]
#[track_caller]
pub fn violation(args: fmt::Arguments<'_>) -> ! {
    tracing::error!(target: "word::invariant", "invariant violation: {}", args);
    panic!("invariant violation: {}", args);
}
