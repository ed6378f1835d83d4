//! In-memory graph of states and triggers.
//!
//! One `StateRepresentation` exists per distinct state, created lazily the
//! first time the state is configured or named as a static target. Each
//! holds at most one `TriggerRepresentation` per trigger; the builder
//! enforces that, the engine only reads.

mod action;

pub use action::{ArgumentCallback, Callback, Resolver};
pub(crate) use action::{BoundAction, TriggerAction};

use crate::core::{Guard, State, Trigger};
use std::collections::HashMap;

/// Where a trigger leads.
pub(crate) enum Target<S> {
    Static(S),
    Dynamic(Resolver<S>),
    Ignored,
}

impl<S> Target<S> {
    pub(crate) fn static_state(&self) -> Option<&S> {
        match self {
            Target::Static(state) => Some(state),
            _ => None,
        }
    }
}

pub(crate) struct TriggerRepresentation<S, T> {
    pub(crate) trigger: T,
    pub(crate) target: Target<S>,
    pub(crate) guard: Option<Guard>,
    pub(crate) action: TriggerAction<S, T>,
}

impl<S, T> TriggerRepresentation<S, T> {
    /// True when there is no guard or the guard passes.
    pub(crate) fn is_permitted(&self) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check())
    }
}

pub(crate) struct StateRepresentation<S, T> {
    pub(crate) state: S,
    /// Set once `configure` has been called for this state.
    pub(crate) configured: bool,
    pub(crate) on_entry: Option<Callback<S, T>>,
    pub(crate) on_exit: Option<Callback<S, T>>,
    pub(crate) triggers: HashMap<T, TriggerRepresentation<S, T>>,
}

impl<S: State, T: Trigger> StateRepresentation<S, T> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            configured: false,
            on_entry: None,
            on_exit: None,
            triggers: HashMap::new(),
        }
    }

    pub(crate) fn find_trigger(&self, trigger: &T) -> Option<&TriggerRepresentation<S, T>> {
        self.triggers.get(trigger)
    }
}

pub(crate) type Representations<S, T> = HashMap<S, StateRepresentation<S, T>>;

/// Return the representation for `state`, creating an empty one if absent.
pub(crate) fn find_or_create<'a, S: State, T: Trigger>(
    representations: &'a mut Representations<S, T>,
    state: &S,
) -> &'a mut StateRepresentation<S, T> {
    representations
        .entry(state.clone())
        .or_insert_with(|| StateRepresentation::new(state.clone()))
}
