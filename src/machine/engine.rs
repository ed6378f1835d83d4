//! Transition execution: `fire`, `fire_with` and forced moves.
//!
//! Callback order for one attempt is fixed:
//!
//! 1. TransitionStarted observer (destination)
//! 2. source on-exit
//! 3. trigger action
//! 4. destination on-entry
//! 5. commit, then TransitionExecuted observer (previous state)
//!
//! A failing callback propagates immediately. The current state is only
//! written at step 5, so after a failure it still names the source state
//! even though earlier callbacks of the attempt have already run.

use crate::core::{
    ParameterizedTrigger, State, StateTransitionOption, Transition, TransitionRecord, Trigger,
};
use crate::machine::diagnostics::Resolution;
use crate::machine::{StateMachine, TransitionError};
use crate::representation::{BoundAction, Callback, StateRepresentation, Target, TriggerAction};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace, warn};

/// Holds the in-transition flag for the duration of one fire or move.
/// Dropping it clears the flag on every exit path, unwinding included.
struct TransitionScope<'a> {
    flag: &'a AtomicBool,
}

impl Drop for TransitionScope<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Fire `trigger` against the current state.
    ///
    /// Returns `Ok(())` both when the machine transitioned and when the
    /// trigger was not applicable (reported through the invalid-trigger
    /// observer). Errors are reserved for reentrant calls and failing
    /// callbacks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use switchyard::StateMachine;
    ///
    /// let mut machine = StateMachine::new("Off");
    /// machine.configure("Off").permit("Switch", "On")?;
    /// machine.configure("On").permit("Switch", "Off")?;
    ///
    /// machine.fire("Switch")?;
    /// assert_eq!(machine.current_state(), "On");
    ///
    /// machine.fire("Unplug")?; // not configured: reported, not an error
    /// assert_eq!(machine.current_state(), "On");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn fire(&self, trigger: T) -> Result<(), TransitionError> {
        self.fire_core(&trigger, |action| action.bind_plain())
    }

    /// Fire a parameterized trigger, handing `argument` to its action.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::sync::Arc;
    /// use switchyard::{ParameterizedTrigger, StateMachine};
    ///
    /// let assign: ParameterizedTrigger<&str, u32> = ParameterizedTrigger::new("Assign");
    /// let worker = Arc::new(AtomicU32::new(0));
    /// let seen = Arc::clone(&worker);
    ///
    /// let mut machine = StateMachine::new("Open");
    /// machine.configure("Open").permit_parameterized(&assign, "Assigned", move |_, id| {
    ///     seen.store(*id, Ordering::SeqCst);
    ///     Ok(())
    /// })?;
    ///
    /// machine.fire_with(&assign, 7)?;
    /// assert_eq!(machine.current_state(), "Assigned");
    /// assert_eq!(worker.load(Ordering::SeqCst), 7);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn fire_with<A: 'static>(
        &self,
        trigger: &ParameterizedTrigger<T, A>,
        argument: A,
    ) -> Result<(), TransitionError> {
        self.fire_core(trigger.trigger(), move |action| {
            action.bind_argument(argument)
        })
    }

    /// Force the machine into `state`, bypassing trigger lookup.
    ///
    /// `option` selects whether the current state's on-exit and the new
    /// state's on-entry run. A state with no representation is always
    /// reported through the invalid-state observer, whatever
    /// [`MachineOptions::report_invalid`](crate::MachineOptions) says.
    pub fn move_to(&self, state: S, option: StateTransitionOption) -> Result<(), TransitionError> {
        self.move_to_core(state, option, false)
    }

    /// Like [`move_to`](Self::move_to), but an unknown state is a silent
    /// no-op.
    pub fn move_to_or_ignore(
        &self,
        state: S,
        option: StateTransitionOption,
    ) -> Result<(), TransitionError> {
        self.move_to_core(state, option, true)
    }

    fn fire_core<'a, B>(&'a self, trigger: &T, bind: B) -> Result<(), TransitionError>
    where
        B: FnOnce(&'a TriggerAction<S, T>) -> Option<Option<BoundAction<'a, S, T>>>,
    {
        let _scope = self.enter_transition()?;

        if !self.is_enabled() {
            trace!(machine = %self.id, trigger = ?trigger, "machine paused, trigger dropped");
            return Ok(());
        }

        let Some(current) = self.current_representation() else {
            let state = self.current_state();
            self.report_invalid_trigger(&state, trigger, "current state has no representation");
            return Ok(());
        };

        let (representation, action) = match self.find_and_evaluate(current, trigger, bind) {
            Resolution::Applicable {
                representation,
                action,
            } => (representation, action),
            Resolution::NotApplicable | Resolution::Ignored => return Ok(()),
        };

        let target = match &representation.target {
            Target::Static(state) => match self.representations.get(state) {
                Some(target) => target,
                None => {
                    self.report_invalid_state(state);
                    return Ok(());
                }
            },
            Target::Dynamic(resolver) => {
                let dynamic = resolver();
                if !dynamic.can_transition {
                    trace!(
                        machine = %self.id,
                        trigger = ?trigger,
                        candidate = ?dynamic.resulting_state,
                        "dynamic target declined"
                    );
                    return Ok(());
                }
                match self.representations.get(&dynamic.resulting_state) {
                    Some(target) => target,
                    None => {
                        self.report_invalid_state(&dynamic.resulting_state);
                        return Ok(());
                    }
                }
            }
            Target::Ignored => return Ok(()),
        };

        self.execute(
            current,
            target,
            Some(trigger.clone()),
            action,
            StateTransitionOption::ALL,
        )
    }

    fn move_to_core(
        &self,
        state: S,
        option: StateTransitionOption,
        ignore_invalid: bool,
    ) -> Result<(), TransitionError> {
        let _scope = self.enter_transition()?;

        if !self.is_enabled() {
            trace!(machine = %self.id, state = ?state, "machine paused, move dropped");
            return Ok(());
        }

        let Some(target) = self.representations.get(&state) else {
            if ignore_invalid {
                trace!(machine = %self.id, state = ?state, "unknown move target ignored");
            } else {
                debug!(machine = %self.id, state = ?state, "invalid move target");
                self.observers.raise_invalid_state(&state);
            }
            return Ok(());
        };

        let Some(current) = self.current_representation() else {
            self.observers.raise_invalid_state(&self.current_state());
            return Ok(());
        };

        debug!(
            machine = %self.id,
            from = ?current.state,
            to = ?target.state,
            option = option.bits(),
            "forced move"
        );
        self.execute(current, target, None, None, option)
    }

    fn enter_transition(&self) -> Result<TransitionScope<'_>, TransitionError> {
        let claimed = self
            .in_transition
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire);
        if claimed.is_err() {
            let state = format!("{:?}", self.current_state());
            warn!(machine = %self.id, state = %state, "reentrant transition rejected");
            return Err(TransitionError::Reentrant { state });
        }
        Ok(TransitionScope {
            flag: &self.in_transition,
        })
    }

    fn execute(
        &self,
        current: &StateRepresentation<S, T>,
        target: &StateRepresentation<S, T>,
        trigger: Option<T>,
        action: Option<BoundAction<'_, S, T>>,
        option: StateTransitionOption,
    ) -> Result<(), TransitionError> {
        let transition = Transition::new(current.state.clone(), target.state.clone(), trigger);

        self.observers.raise_transition_started(&transition.destination);

        if option.contains(StateTransitionOption::EXIT_CURRENT) {
            self.run_callback(current.on_exit.as_ref(), &transition, "exit")?;
        }

        if let Some(action) = action {
            trace!(machine = %self.id, phase = "action", "running callback");
            action(&transition).inspect_err(|error| self.log_failure("action", error))?;
        }

        if option.contains(StateTransitionOption::ENTER_NEW) {
            self.run_callback(target.on_entry.as_ref(), &transition, "entry")?;
        }

        self.commit(transition);
        Ok(())
    }

    fn run_callback(
        &self,
        callback: Option<&Callback<S, T>>,
        transition: &Transition<S, T>,
        phase: &'static str,
    ) -> Result<(), TransitionError> {
        let Some(callback) = callback else {
            return Ok(());
        };
        trace!(machine = %self.id, phase, "running callback");
        callback(transition).inspect_err(|error| self.log_failure(phase, error))
    }

    fn log_failure(&self, phase: &'static str, error: &TransitionError) {
        warn!(
            machine = %self.id,
            phase,
            error = %error,
            "callback failed, current state unchanged"
        );
    }

    fn commit(&self, transition: Transition<S, T>) {
        let Transition {
            destination,
            trigger,
            ..
        } = transition;
        let previous = self.replace_current(destination.clone());

        debug!(
            machine = %self.id,
            from = ?previous,
            to = ?destination,
            trigger = ?trigger,
            "transition committed"
        );

        if self.options.record_history {
            self.history_mut().record(TransitionRecord {
                from: previous.clone(),
                to: destination,
                trigger: trigger.map(|t| format!("{:?}", t)),
                timestamp: Utc::now(),
            });
        }

        self.observers.raise_transition_executed(&previous);
    }
}
