//! Errors raised while configuring a state machine.

use thiserror::Error;

/// Errors that can occur when configuring states and triggers.
///
/// Every configuration call that returns one of these leaves the machine
/// exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Trigger {trigger} is already defined for state {state}. A trigger may be defined once per state")]
    Conflict { state: String, trigger: String },

    #[error("Trigger not specified. Call .on(trigger) before .build()")]
    MissingTrigger,

    #[error("Target not specified. Call .to(state), .to_dynamic() or .ignore() before .build()")]
    MissingTarget,

    #[error("Dynamic target requires a resolver. Call .resolver(fn) before .build()")]
    MissingResolver,

    #[error("Conflicting targets: {0}")]
    AmbiguousTarget(&'static str),
}

impl ConfigError {
    pub(crate) fn conflict(state: &impl std::fmt::Debug, trigger: &impl std::fmt::Debug) -> Self {
        ConfigError::Conflict {
            state: format!("{:?}", state),
            trigger: format!("{:?}", trigger),
        }
    }
}
