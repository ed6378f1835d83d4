//! Guard predicates for controlling trigger applicability.
//!
//! A guard is a zero-argument boolean check attached to a trigger. It is
//! evaluated every time the trigger is fired, before any side effect runs.

use std::fmt;
use std::sync::Arc;

/// Predicate that decides whether a trigger is currently applicable.
///
/// Guards read whatever outside condition they close over; the engine calls
/// them fresh on every fire attempt and never caches the result.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use switchyard::core::Guard;
///
/// let powered = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&powered);
/// let has_power = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!has_power.check());
/// powered.store(true, Ordering::SeqCst);
/// assert!(has_power.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

impl<F> From<F> for Guard
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn from(predicate: F) -> Self {
        Guard::new(predicate)
    }
}
