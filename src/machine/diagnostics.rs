//! Trigger resolution and invalid-trigger / invalid-state reporting.
//!
//! Everything here runs before any user side effect: a trigger that turns
//! out to be inapplicable never causes an exit or entry callback to run.

use crate::core::{State, Trigger};
use crate::machine::StateMachine;
use crate::representation::{
    BoundAction, StateRepresentation, Target, TriggerAction, TriggerRepresentation,
};
use tracing::{debug, trace};

/// Outcome of looking a trigger up in the current state.
pub(crate) enum Resolution<'a, S, T> {
    /// Not configured, guard rejected, or wrong fire path. Already reported.
    NotApplicable,
    /// Configured as ignored and its guard passed.
    Ignored,
    Applicable {
        representation: &'a TriggerRepresentation<S, T>,
        action: Option<BoundAction<'a, S, T>>,
    },
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Locate `trigger` in `current`, evaluate its guard and match its
    /// action against the caller's fire path through `bind`.
    pub(crate) fn find_and_evaluate<'a, B>(
        &'a self,
        current: &'a StateRepresentation<S, T>,
        trigger: &T,
        bind: B,
    ) -> Resolution<'a, S, T>
    where
        B: FnOnce(&'a TriggerAction<S, T>) -> Option<Option<BoundAction<'a, S, T>>>,
    {
        let Some(representation) = current.find_trigger(trigger) else {
            self.report_invalid_trigger(&current.state, trigger, "not configured");
            return Resolution::NotApplicable;
        };

        if !representation.is_permitted() {
            self.report_invalid_trigger(&current.state, trigger, "guard rejected");
            return Resolution::NotApplicable;
        }

        if matches!(representation.target, Target::Ignored) {
            trace!(
                machine = %self.id,
                state = ?current.state,
                trigger = ?trigger,
                "trigger ignored"
            );
            return Resolution::Ignored;
        }

        match bind(&representation.action) {
            Some(action) => Resolution::Applicable {
                representation,
                action,
            },
            None => {
                let reason = match representation.action {
                    TriggerAction::Plain(_) => "trigger takes no argument",
                    _ => "argument type mismatch",
                };
                self.report_invalid_trigger(&current.state, trigger, reason);
                Resolution::NotApplicable
            }
        }
    }

    pub(crate) fn report_invalid_trigger(&self, state: &S, trigger: &T, reason: &'static str) {
        debug!(
            machine = %self.id,
            state = ?state,
            trigger = ?trigger,
            reason,
            "invalid trigger"
        );
        if self.options.report_invalid {
            self.observers.raise_invalid_trigger(trigger);
        }
    }

    pub(crate) fn report_invalid_state(&self, state: &S) {
        debug!(machine = %self.id, state = ?state, "invalid state");
        if self.options.report_invalid {
            self.observers.raise_invalid_state(state);
        }
    }
}
