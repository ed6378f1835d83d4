//! Builder for assembling a trigger definition piece by piece.

use crate::builder::error::ConfigError;
use crate::core::{DynamicState, Guard, State, Transition, Trigger};
use crate::machine::TransitionError;
use crate::representation::{Resolver, Target, TriggerAction, TriggerRepresentation};

/// A validated trigger definition, ready for
/// [`StateConfiguration::add`](crate::builder::StateConfiguration::add).
pub struct TriggerDefinition<S, T> {
    representation: TriggerRepresentation<S, T>,
}

impl<S, T> TriggerDefinition<S, T> {
    pub fn trigger(&self) -> &T {
        &self.representation.trigger
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.representation.target, Target::Dynamic(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self.representation.target, Target::Ignored)
    }

    pub(crate) fn into_representation(self) -> TriggerRepresentation<S, T> {
        self.representation
    }
}

/// Builder for constructing trigger definitions with a fluent API.
///
/// Unlike the direct `permit*` methods, nothing here is enforced by the type
/// system: `build` reports whichever required part was never supplied.
///
/// # Example
///
/// ```rust
/// use switchyard::builder::TriggerBuilder;
/// use switchyard::{ConfigError, StateMachine};
///
/// let incomplete = TriggerBuilder::<&str, &str>::new().on("Submit").build();
/// assert!(matches!(incomplete, Err(ConfigError::MissingTarget)));
///
/// let definition = TriggerBuilder::new()
///     .on("Submit")
///     .to("Review")
///     .when(|| true)
///     .build()?;
///
/// let mut machine = StateMachine::new("Draft");
/// machine.configure("Draft").add(definition)?;
/// # Ok::<(), ConfigError>(())
/// ```
pub struct TriggerBuilder<S, T> {
    trigger: Option<T>,
    target: Option<S>,
    dynamic: bool,
    resolver: Option<Resolver<S>>,
    ignored: bool,
    guard: Option<Guard>,
    action: TriggerAction<S, T>,
}

impl<S: State, T: Trigger> TriggerBuilder<S, T> {
    /// Create a new trigger builder.
    pub fn new() -> Self {
        Self {
            trigger: None,
            target: None,
            dynamic: false,
            resolver: None,
            ignored: false,
            guard: None,
            action: TriggerAction::None,
        }
    }

    /// Set the trigger (required).
    pub fn on(mut self, trigger: T) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Set a static target state.
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Declare the target dynamic. Requires `.resolver(..)`.
    pub fn to_dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    /// Set the dynamic target resolver. Implies `.to_dynamic()`.
    pub fn resolver<R>(mut self, resolver: R) -> Self
    where
        R: Fn() -> DynamicState<S> + Send + Sync + 'static,
    {
        self.dynamic = true;
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Accept the trigger without transitioning.
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set a plain trigger action (optional).
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.action = TriggerAction::plain(action);
        self
    }

    /// Set an action taking an argument of type `A`. The trigger must then be
    /// fired through a `ParameterizedTrigger<T, A>`.
    pub fn then_with<A, F>(mut self, action: F) -> Self
    where
        A: 'static,
        F: Fn(&Transition<S, T>, &A) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.action = TriggerAction::parameterized(action);
        self
    }

    /// Build the definition.
    pub fn build(self) -> Result<TriggerDefinition<S, T>, ConfigError> {
        let trigger = self.trigger.ok_or(ConfigError::MissingTrigger)?;

        let target = match (self.target, self.dynamic, self.ignored) {
            (Some(_), true, _) => {
                return Err(ConfigError::AmbiguousTarget(
                    "static target combined with a dynamic resolver",
                ))
            }
            (Some(_), false, true) | (None, true, true) => {
                return Err(ConfigError::AmbiguousTarget(
                    "ignored trigger cannot have a target",
                ))
            }
            (Some(state), false, false) => Target::Static(state),
            (None, true, false) => {
                Target::Dynamic(self.resolver.ok_or(ConfigError::MissingResolver)?)
            }
            (None, false, true) => Target::Ignored,
            (None, false, false) => return Err(ConfigError::MissingTarget),
        };

        if matches!(target, Target::Ignored) && !matches!(self.action, TriggerAction::None) {
            return Err(ConfigError::AmbiguousTarget(
                "ignored trigger cannot have an action",
            ));
        }

        Ok(TriggerDefinition {
            representation: TriggerRepresentation {
                trigger,
                target,
                guard: self.guard,
                action: self.action,
            },
        })
    }
}

impl<S: State, T: Trigger> Default for TriggerBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Initial,
        Processing,
    }

    type Builder = TriggerBuilder<TestState, &'static str>;

    #[test]
    fn builder_requires_trigger() {
        let result = Builder::new().to(TestState::Processing).build();
        assert!(matches!(result, Err(ConfigError::MissingTrigger)));
    }

    #[test]
    fn builder_requires_target() {
        let result = Builder::new().on("go").build();
        assert!(matches!(result, Err(ConfigError::MissingTarget)));
    }

    #[test]
    fn dynamic_target_requires_resolver() {
        let result = Builder::new().on("go").to_dynamic().build();
        assert!(matches!(result, Err(ConfigError::MissingResolver)));
    }

    #[test]
    fn resolver_implies_dynamic() {
        let definition = Builder::new()
            .on("go")
            .resolver(|| DynamicState::to(TestState::Processing))
            .build()
            .unwrap();

        assert!(definition.is_dynamic());
        assert_eq!(definition.trigger(), &"go");
    }

    #[test]
    fn static_and_dynamic_targets_conflict() {
        let result = Builder::new()
            .on("go")
            .to(TestState::Initial)
            .resolver(|| DynamicState::to(TestState::Processing))
            .build();

        assert!(matches!(result, Err(ConfigError::AmbiguousTarget(_))));
    }

    #[test]
    fn ignored_trigger_rejects_target_and_action() {
        let with_target = Builder::new()
            .on("noop")
            .ignore()
            .to(TestState::Initial)
            .build();
        assert!(matches!(with_target, Err(ConfigError::AmbiguousTarget(_))));

        let with_action = Builder::new().on("noop").ignore().then(|_| Ok(())).build();
        assert!(matches!(with_action, Err(ConfigError::AmbiguousTarget(_))));
    }

    #[test]
    fn ignored_trigger_builds() {
        let definition = Builder::new()
            .on("noop")
            .ignore()
            .guard(Guard::new(|| true))
            .build()
            .unwrap();

        assert!(definition.is_ignored());
        assert!(!definition.is_dynamic());
    }

    #[test]
    fn argument_action_is_recorded() {
        let definition = Builder::new()
            .on("assign")
            .to(TestState::Processing)
            .then_with(|_, worker: &u16| {
                assert!(*worker > 0);
                Ok(())
            })
            .build()
            .unwrap();

        assert_eq!(
            definition.into_representation().action.argument_type(),
            Some(std::any::TypeId::of::<u16>())
        );
    }
}
