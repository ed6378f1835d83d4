//! The state machine and its execution engine.
//!
//! Configuration takes `&mut self`; firing takes `&self`. Once the first
//! trigger is fired the representation model can only be read, so callbacks
//! holding a shared handle to the machine may query it or attempt to fire,
//! and the engine rejects the latter with [`TransitionError::Reentrant`].
//!
//! All stored closures are `Send + Sync`, so a machine can be built on one
//! thread and handed to a worker. Firing is still one transition at a time:
//! a second `fire` that overlaps a running one, from any thread, fails with
//! `Reentrant`. Callers that fire from several threads must funnel requests
//! through a single FIFO consumer that owns the machine.

mod diagnostics;
mod engine;
mod error;
mod observers;
mod options;

pub use error::TransitionError;
pub use observers::{StateObserver, TriggerObserver};
pub use options::MachineOptions;

use crate::builder::StateConfiguration;
use crate::core::{State, TransitionHistory, Trigger};
use crate::representation::{find_or_create, Representations, StateRepresentation};
use observers::Observers;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// A synchronous finite state machine.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use switchyard::StateMachine;
///
/// let has_power = Arc::new(AtomicBool::new(false));
/// let power = Arc::clone(&has_power);
///
/// let mut machine = StateMachine::new("Off");
/// machine
///     .configure("Off")
///     .permit_if("Switch", "On", move || power.load(Ordering::SeqCst))?;
///
/// machine.fire("Switch")?;
/// assert_eq!(machine.current_state(), "Off");
///
/// has_power.store(true, Ordering::SeqCst);
/// machine.fire("Switch")?;
/// assert_eq!(machine.current_state(), "On");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StateMachine<S: State, T: Trigger> {
    id: Uuid,
    representations: Representations<S, T>,
    current: Mutex<S>,
    in_transition: AtomicBool,
    enabled: AtomicBool,
    options: MachineOptions,
    observers: Observers<S, T>,
    history: Mutex<TransitionHistory<S>>,
}

/// Lock ignoring poison. Every critical section is a single read or write.
fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Create a machine in `initial` with default options.
    pub fn new(initial: S) -> Self {
        Self::with_options(initial, MachineOptions::default())
    }

    /// Create a machine in `initial`. A `history_limit` turns recording on
    /// however the options were built.
    pub fn with_options(initial: S, mut options: MachineOptions) -> Self {
        options.record_history |= options.history_limit.is_some();

        let mut representations = HashMap::new();
        find_or_create(&mut representations, &initial);

        let history = match options.history_limit {
            Some(limit) => TransitionHistory::bounded(limit),
            None => TransitionHistory::new(),
        };
        let id = Uuid::new_v4();
        debug!(machine = %id, initial = ?initial, "state machine created");

        Self {
            id,
            representations,
            current: Mutex::new(initial),
            in_transition: AtomicBool::new(false),
            enabled: AtomicBool::new(true),
            options,
            observers: Observers::default(),
            history: Mutex::new(history),
        }
    }

    /// Identifier carried by this machine's log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn options(&self) -> &MachineOptions {
        &self.options
    }

    /// Start configuring `state`, creating its representation if needed.
    pub fn configure(&mut self, state: S) -> StateConfiguration<'_, S, T> {
        StateConfiguration::new(&mut self.representations, state)
    }

    /// Observe the destination of every transition before its callbacks run.
    pub fn on_transition_started<F>(&mut self, observer: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.observers.transition_started = Some(Box::new(observer));
    }

    /// Observe the previous state after every committed transition.
    pub fn on_transition_executed<F>(&mut self, observer: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.observers.transition_executed = Some(Box::new(observer));
    }

    /// Observe states named by a dynamic target or `move_to` that have no
    /// representation.
    pub fn on_invalid_state<F>(&mut self, observer: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.observers.invalid_state = Some(Box::new(observer));
    }

    /// Observe triggers that were not applicable in the current state.
    pub fn on_invalid_trigger<F>(&mut self, observer: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.observers.invalid_trigger = Some(Box::new(observer));
    }

    pub fn current_state(&self) -> S {
        lock(&self.current).clone()
    }

    pub fn is_in_state(&self, state: &S) -> bool {
        *lock(&self.current) == *state
    }

    /// True while a fire or move is running its callbacks.
    pub fn is_in_transition(&self) -> bool {
        self.in_transition.load(Ordering::Acquire)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Drop every subsequent fire and move until [`resume`](Self::resume).
    pub fn pause(&self) {
        debug!(machine = %self.id, "machine paused");
        self.enabled.store(false, Ordering::Release);
    }

    pub fn resume(&self) {
        debug!(machine = %self.id, "machine resumed");
        self.enabled.store(true, Ordering::Release);
    }

    /// True if `trigger` is defined for the current state and its guard
    /// passes. Ignored triggers count as handled.
    pub fn can_handle_trigger(&self, trigger: &T) -> bool {
        self.current_representation()
            .and_then(|rep| rep.find_trigger(trigger))
            .is_some_and(|rep| rep.is_permitted())
    }

    /// True if some trigger of the current state statically targets `state`
    /// and its guard passes. Dynamic targets are not evaluated.
    pub fn can_transition_to(&self, state: &S) -> bool {
        self.current_representation().is_some_and(|rep| {
            rep.triggers
                .values()
                .any(|t| t.target.static_state() == Some(state) && t.is_permitted())
        })
    }

    /// Triggers of the current state whose guard currently passes.
    pub fn permitted_triggers(&self) -> Vec<T> {
        self.current_representation()
            .map(|rep| {
                rep.triggers
                    .values()
                    .filter(|t| t.is_permitted())
                    .map(|t| t.trigger.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every state known to the machine, configured or only referenced.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.representations.keys()
    }

    /// True if `configure` was called for `state`.
    pub fn is_configured(&self, state: &S) -> bool {
        self.representations
            .get(state)
            .is_some_and(|rep| rep.configured)
    }

    /// Snapshot of the recorded history. Empty unless
    /// [`MachineOptions::record_history`] is set.
    pub fn history(&self) -> TransitionHistory<S> {
        lock(&self.history).clone()
    }

    pub fn clear_history(&self) {
        lock(&self.history).clear();
    }

    pub(crate) fn current_representation(&self) -> Option<&StateRepresentation<S, T>> {
        let current = lock(&self.current);
        self.representations.get(&*current)
    }

    pub(crate) fn replace_current(&self, state: S) -> S {
        std::mem::replace(&mut *lock(&self.current), state)
    }

    pub(crate) fn history_mut(&self) -> MutexGuard<'_, TransitionHistory<S>> {
        lock(&self.history)
    }

    pub(crate) fn representations(&self) -> &Representations<S, T> {
        &self.representations
    }
}

impl<S: State, T: Trigger> std::fmt::Debug for StateMachine<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("current", &self.current_state())
            .field("states", &self.representations.len())
            .field("in_transition", &self.is_in_transition())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
