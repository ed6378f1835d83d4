//! Chainable configuration handle for a single state.

use crate::builder::error::ConfigError;
use crate::builder::trigger::TriggerDefinition;
use crate::core::{DynamicState, Guard, ParameterizedTrigger, State, Transition, Trigger};
use crate::machine::TransitionError;
use crate::representation::{
    find_or_create, Callback, Representations, StateRepresentation, Target, TriggerAction,
    TriggerRepresentation,
};
use tracing::trace;

/// Handle positioned at one state's representation.
///
/// Obtained from [`StateMachine::configure`](crate::StateMachine::configure).
/// Callback setters overwrite and always succeed; every trigger definition
/// returns `Err(ConfigError::Conflict)` if the trigger is already defined
/// for this state, leaving the machine untouched.
///
/// # Example
///
/// ```rust
/// use switchyard::StateMachine;
///
/// let mut machine = StateMachine::new("Draft");
/// machine
///     .configure("Draft")
///     .permit("Submit", "Review")?
///     .ignore("Save")?
///     .on_exit(|t| {
///         println!("leaving {:?}", t.source);
///         Ok(())
///     });
///
/// assert!(machine.configure("Draft").permit("Submit", "Archived").is_err());
/// # Ok::<(), switchyard::ConfigError>(())
/// ```
pub struct StateConfiguration<'a, S: State, T: Trigger> {
    representations: &'a mut Representations<S, T>,
    state: S,
}

impl<'a, S: State, T: Trigger> StateConfiguration<'a, S, T> {
    pub(crate) fn new(representations: &'a mut Representations<S, T>, state: S) -> Self {
        find_or_create(representations, &state).configured = true;
        Self {
            representations,
            state,
        }
    }

    /// The state this handle configures.
    pub fn state(&self) -> &S {
        &self.state
    }

    fn current(&mut self) -> &mut StateRepresentation<S, T> {
        find_or_create(self.representations, &self.state)
    }

    /// Set the callback run when the machine enters this state.
    pub fn on_entry<F>(mut self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.current().on_entry = Some(Box::new(action));
        self
    }

    /// Set the callback run when the machine leaves this state.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.current().on_exit = Some(Box::new(action));
        self
    }

    pub fn permit(self, trigger: T, target: S) -> Result<Self, ConfigError> {
        self.define(trigger, Target::Static(target), None, TriggerAction::None)
    }

    pub fn permit_if<G>(self, trigger: T, target: S, guard: G) -> Result<Self, ConfigError>
    where
        G: Into<Guard>,
    {
        self.define(
            trigger,
            Target::Static(target),
            Some(guard.into()),
            TriggerAction::None,
        )
    }

    pub fn permit_then<F>(self, trigger: T, target: S, action: F) -> Result<Self, ConfigError>
    where
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.define(
            trigger,
            Target::Static(target),
            None,
            TriggerAction::plain(action),
        )
    }

    pub fn permit_if_then<G, F>(
        self,
        trigger: T,
        target: S,
        guard: G,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        G: Into<Guard>,
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.define(
            trigger,
            Target::Static(target),
            Some(guard.into()),
            TriggerAction::plain(action),
        )
    }

    /// Static permit with an optional guard and an optional boxed action.
    pub fn permit_with(
        self,
        trigger: T,
        target: S,
        guard: Option<Guard>,
        action: Option<Callback<S, T>>,
    ) -> Result<Self, ConfigError> {
        let action = action.map_or(TriggerAction::None, TriggerAction::Plain);
        self.define(trigger, Target::Static(target), guard, action)
    }

    /// Permit `trigger` to leave and re-enter the state being configured.
    pub fn permit_reentry(self, trigger: T) -> Result<Self, ConfigError> {
        let target = self.state.clone();
        self.permit(trigger, target)
    }

    pub fn permit_reentry_then<F>(self, trigger: T, action: F) -> Result<Self, ConfigError>
    where
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        let target = self.state.clone();
        self.permit_then(trigger, target, action)
    }

    /// Permit a trigger whose action takes an argument of type `A`.
    pub fn permit_parameterized<A, F>(
        self,
        trigger: &ParameterizedTrigger<T, A>,
        target: S,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        A: 'static,
        F: Fn(&Transition<S, T>, &A) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.define(
            trigger.trigger().clone(),
            Target::Static(target),
            None,
            TriggerAction::parameterized(action),
        )
    }

    pub fn permit_parameterized_if<A, G, F>(
        self,
        trigger: &ParameterizedTrigger<T, A>,
        target: S,
        guard: G,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        A: 'static,
        G: Into<Guard>,
        F: Fn(&Transition<S, T>, &A) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.define(
            trigger.trigger().clone(),
            Target::Static(target),
            Some(guard.into()),
            TriggerAction::parameterized(action),
        )
    }

    /// Permit a trigger whose target is computed by `resolver` at fire time.
    pub fn permit_dynamic<R>(self, trigger: T, resolver: R) -> Result<Self, ConfigError>
    where
        R: Fn() -> DynamicState<S> + Send + Sync + 'static,
    {
        self.define(
            trigger,
            Target::Dynamic(Box::new(resolver)),
            None,
            TriggerAction::None,
        )
    }

    pub fn permit_dynamic_then<R, F>(
        self,
        trigger: T,
        resolver: R,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        R: Fn() -> DynamicState<S> + Send + Sync + 'static,
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.define(
            trigger,
            Target::Dynamic(Box::new(resolver)),
            None,
            TriggerAction::plain(action),
        )
    }

    pub fn permit_dynamic_parameterized<A, R, F>(
        self,
        trigger: &ParameterizedTrigger<T, A>,
        resolver: R,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        A: 'static,
        R: Fn() -> DynamicState<S> + Send + Sync + 'static,
        F: Fn(&Transition<S, T>, &A) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.define(
            trigger.trigger().clone(),
            Target::Dynamic(Box::new(resolver)),
            None,
            TriggerAction::parameterized(action),
        )
    }

    /// Accept `trigger` in this state without doing anything.
    pub fn ignore(self, trigger: T) -> Result<Self, ConfigError> {
        self.define(trigger, Target::Ignored, None, TriggerAction::None)
    }

    /// Accept `trigger` silently while `guard` passes; otherwise it is
    /// reported as an invalid trigger.
    pub fn ignore_if<G>(self, trigger: T, guard: G) -> Result<Self, ConfigError>
    where
        G: Into<Guard>,
    {
        self.define(
            trigger,
            Target::Ignored,
            Some(guard.into()),
            TriggerAction::None,
        )
    }

    /// Register a definition assembled with
    /// [`TriggerBuilder`](crate::builder::TriggerBuilder).
    pub fn add(self, definition: TriggerDefinition<S, T>) -> Result<Self, ConfigError> {
        let TriggerRepresentation {
            trigger,
            target,
            guard,
            action,
        } = definition.into_representation();
        self.define(trigger, target, guard, action)
    }

    fn define(
        mut self,
        trigger: T,
        target: Target<S>,
        guard: Option<Guard>,
        action: TriggerAction<S, T>,
    ) -> Result<Self, ConfigError> {
        if self.current().triggers.contains_key(&trigger) {
            return Err(ConfigError::conflict(&self.state, &trigger));
        }

        if let Target::Static(target) = &target {
            find_or_create(self.representations, target);
        }

        trace!(
            state = ?self.state,
            trigger = ?trigger,
            target = target_label(&target),
            action = action.describe(),
            "trigger defined"
        );

        let representation = TriggerRepresentation {
            trigger: trigger.clone(),
            target,
            guard,
            action,
        };
        self.current().triggers.insert(trigger, representation);
        Ok(self)
    }
}

fn target_label<S>(target: &Target<S>) -> &'static str {
    match target {
        Target::Static(_) => "static",
        Target::Dynamic(_) => "dynamic",
        Target::Ignored => "ignored",
    }
}
