//! Values exchanged between the engine and user callbacks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitOr, BitOrAssign};

/// Record of one transition attempt.
///
/// Built once per attempt and handed to every callback invoked during that
/// attempt. `trigger` is `None` for forced moves.
///
/// # Example
///
/// ```rust
/// use switchyard::core::Transition;
///
/// let transition = Transition::new("Off", "On", Some("Switch"));
/// assert_eq!(transition.source, "Off");
/// assert_eq!(transition.destination, "On");
/// assert!(!transition.is_reentry());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<S, T> {
    /// State the machine was in when the attempt began
    pub source: S,
    /// State the machine moves to if the attempt commits
    pub destination: S,
    /// Trigger that caused the attempt
    pub trigger: Option<T>,
}

impl<S: PartialEq, T> Transition<S, T> {
    pub fn new(source: S, destination: S, trigger: Option<T>) -> Self {
        Self {
            source,
            destination,
            trigger,
        }
    }

    /// True when source and destination are the same state.
    pub fn is_reentry(&self) -> bool {
        self.source == self.destination
    }
}

/// Outcome of a dynamic target resolver.
///
/// Resolvers are invoked fresh on every fire attempt. A result with
/// `can_transition == false` makes the attempt a silent no-op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicState<S> {
    pub resulting_state: S,
    pub can_transition: bool,
}

impl<S> DynamicState<S> {
    pub fn new(resulting_state: S, can_transition: bool) -> Self {
        Self {
            resulting_state,
            can_transition,
        }
    }

    /// Transition to `state`.
    pub fn to(state: S) -> Self {
        Self::new(state, true)
    }

    /// Decline the transition. `state` is kept only for diagnostics.
    pub fn decline(state: S) -> Self {
        Self::new(state, false)
    }
}

/// Flags selecting which callbacks a forced move runs.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StateTransitionOption;
///
/// let both = StateTransitionOption::EXIT_CURRENT | StateTransitionOption::ENTER_NEW;
/// assert_eq!(both, StateTransitionOption::ALL);
/// assert!(both.contains(StateTransitionOption::ENTER_NEW));
/// assert!(!StateTransitionOption::NONE.contains(StateTransitionOption::EXIT_CURRENT));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateTransitionOption(u8);

impl StateTransitionOption {
    /// Run neither on-exit nor on-entry.
    pub const NONE: Self = Self(0);
    /// Run the current state's on-exit callback.
    pub const EXIT_CURRENT: Self = Self(0b01);
    /// Run the new state's on-entry callback.
    pub const ENTER_NEW: Self = Self(0b10);
    pub const ALL: Self = Self(0b11);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for StateTransitionOption {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StateTransitionOption {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A trigger bound to the argument type its action expects.
///
/// Configuring a trigger through a `ParameterizedTrigger<T, A>` fixes its
/// action to take an `A`; firing it then requires an `A` as well. Firing
/// the same trigger through the plain path, or with a different argument
/// type, is reported as an invalid trigger.
///
/// # Example
///
/// ```rust
/// use switchyard::core::ParameterizedTrigger;
///
/// let assign: ParameterizedTrigger<&str, u32> = ParameterizedTrigger::new("Assign");
/// assert_eq!(assign.trigger(), &"Assign");
/// ```
pub struct ParameterizedTrigger<T, A> {
    trigger: T,
    _argument: PhantomData<fn(A)>,
}

impl<T, A> ParameterizedTrigger<T, A> {
    pub fn new(trigger: T) -> Self {
        Self {
            trigger,
            _argument: PhantomData,
        }
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn into_trigger(self) -> T {
        self.trigger
    }
}

impl<T: Clone, A> Clone for ParameterizedTrigger<T, A> {
    fn clone(&self) -> Self {
        Self::new(self.trigger.clone())
    }
}

impl<T: fmt::Debug, A> fmt::Debug for ParameterizedTrigger<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterizedTrigger")
            .field("trigger", &self.trigger)
            .field("argument", &std::any::type_name::<A>())
            .finish()
    }
}
