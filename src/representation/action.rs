//! Callback and per-trigger action types.

use crate::core::{DynamicState, Transition};
use crate::machine::TransitionError;
use std::any::{type_name, Any, TypeId};

/// Entry, exit and plain trigger actions.
pub type Callback<S, T> =
    Box<dyn Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync>;

/// Trigger action receiving a typed argument.
pub type ArgumentCallback<S, T, A> =
    Box<dyn Fn(&Transition<S, T>, &A) -> Result<(), TransitionError> + Send + Sync>;

/// Computes the target of a dynamic trigger on every fire attempt.
pub type Resolver<S> = Box<dyn Fn() -> DynamicState<S> + Send + Sync>;

/// An action already matched against the fire path, ready to run once.
pub(crate) type BoundAction<'a, S, T> =
    Box<dyn FnOnce(&Transition<S, T>) -> Result<(), TransitionError> + 'a>;

/// The action attached to a trigger. Its shape is fixed at configuration.
pub(crate) enum TriggerAction<S, T> {
    None,
    Plain(Callback<S, T>),
    Parameterized {
        argument: TypeId,
        argument_name: &'static str,
        action: Box<dyn Any + Send + Sync>,
    },
}

impl<S: 'static, T: 'static> TriggerAction<S, T> {
    pub(crate) fn plain<F>(action: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        TriggerAction::Plain(Box::new(action))
    }

    pub(crate) fn parameterized<A, F>(action: F) -> Self
    where
        A: 'static,
        F: Fn(&Transition<S, T>, &A) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        let action: ArgumentCallback<S, T, A> = Box::new(action);
        TriggerAction::Parameterized {
            argument: TypeId::of::<A>(),
            argument_name: type_name::<A>(),
            action: Box::new(action),
        }
    }

    /// Bind for the plain fire path. `None` when the shape does not match.
    pub(crate) fn bind_plain(&self) -> Option<Option<BoundAction<'_, S, T>>> {
        match self {
            TriggerAction::None => Some(None),
            TriggerAction::Plain(action) => {
                Some(Some(Box::new(move |t: &Transition<S, T>| action(t))))
            }
            TriggerAction::Parameterized { .. } => None,
        }
    }

    /// Bind for the argument fire path. `None` when the shape does not match.
    ///
    /// The recorded argument type is compared first, so the downcast only
    /// runs on a match.
    pub(crate) fn bind_argument<A: 'static>(
        &self,
        argument: A,
    ) -> Option<Option<BoundAction<'_, S, T>>> {
        match self {
            TriggerAction::None => Some(None),
            TriggerAction::Plain(_) => None,
            TriggerAction::Parameterized {
                argument: expected, ..
            } if *expected != TypeId::of::<A>() => None,
            TriggerAction::Parameterized { action, .. } => {
                let action = action.downcast_ref::<ArgumentCallback<S, T, A>>()?;
                Some(Some(Box::new(move |t: &Transition<S, T>| {
                    action(t, &argument)
                })))
            }
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            TriggerAction::None => "none",
            TriggerAction::Plain(_) => "plain",
            TriggerAction::Parameterized { argument_name, .. } => *argument_name,
        }
    }

    #[cfg(test)]
    pub(crate) fn argument_type(&self) -> Option<TypeId> {
        match self {
            TriggerAction::Parameterized { argument, .. } => Some(*argument),
            _ => None,
        }
    }
}
