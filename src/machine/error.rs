//! Errors raised while firing triggers.

use thiserror::Error;

/// Errors that can occur during a transition.
///
/// Invalid triggers and invalid states are not errors: they are reported
/// through the machine's observers and leave the current state untouched.
/// Everything here is fatal to the caller of `fire` / `move_to`.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("State cannot be changed while already in transition (current state {state}). Serialize fire calls through an external queue instead")]
    Reentrant { state: String },

    #[error("Transition action failed: {0}")]
    ActionFailed(String),

    #[error("Transition callback failed")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransitionError {
    /// Wrap an arbitrary error raised inside a callback.
    pub fn callback<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TransitionError::Callback(error.into())
    }

    pub fn is_reentrant(&self) -> bool {
        matches!(self, TransitionError::Reentrant { .. })
    }
}
