//! Problems found by a configuration audit.

use thiserror::Error;

/// A structural problem in a machine's configuration.
///
/// States and triggers are rendered with `Debug` so the issue does not
/// carry the machine's type parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq, PartialOrd, Ord)]
pub enum AuditIssue {
    #[error("{from} --{trigger}--> {state}: target state was never configured")]
    UnconfiguredTarget {
        state: String,
        from: String,
        trigger: String,
    },

    #[error("state {state} is unreachable from the current state")]
    Unreachable { state: String },
}

impl AuditIssue {
    pub fn state(&self) -> &str {
        match self {
            AuditIssue::UnconfiguredTarget { state, .. } | AuditIssue::Unreachable { state } => {
                state
            }
        }
    }
}
