//! Static checks over a configured machine using `Validation`.
//!
//! An audit never fails fast: every issue found is accumulated so a single
//! call reports the whole picture.

mod issues;

pub use issues::AuditIssue;

use crate::core::{State, Trigger};
use crate::machine::StateMachine;
use crate::representation::{Representations, Target};
use std::collections::{HashSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

/// Result of [`StateMachine::audit`].
pub type AuditResult = Validation<(), NonEmptyVec<AuditIssue>>;

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Check the configuration for static targets that were never configured
    /// and, when no trigger has a dynamic target, for states that cannot be
    /// reached from the current state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stillwater::validation::Validation;
    /// use switchyard::{AuditIssue, StateMachine};
    ///
    /// let mut machine: StateMachine<&str, &str> = StateMachine::new("Draft");
    /// machine.configure("Draft").permit("Submit", "Review")?;
    ///
    /// match machine.audit() {
    ///     Validation::Failure(issues) => {
    ///         assert!(issues
    ///             .iter()
    ///             .any(|i| matches!(i, AuditIssue::UnconfiguredTarget { .. })));
    ///     }
    ///     Validation::Success(_) => unreachable!(),
    /// }
    /// # Ok::<(), switchyard::ConfigError>(())
    /// ```
    pub fn audit(&self) -> AuditResult {
        let representations = self.representations();
        let mut issues = unconfigured_targets(representations);

        if !has_dynamic_targets(representations) {
            issues.extend(unreachable_states(representations, &self.current_state()));
        }
        issues.sort();

        debug!(machine = %self.id(), issues = issues.len(), "configuration audited");

        let checks: Vec<Validation<(), NonEmptyVec<AuditIssue>>> =
            issues.into_iter().map(Validation::fail).collect();
        Validation::all_vec(checks).map(|_| ())
    }
}

fn unconfigured_targets<S: State, T: Trigger>(
    representations: &Representations<S, T>,
) -> Vec<AuditIssue> {
    representations
        .values()
        .flat_map(|rep| {
            rep.triggers.values().filter_map(move |t| {
                let target = t.target.static_state()?;
                let configured = representations
                    .get(target)
                    .is_some_and(|target| target.configured);
                (!configured).then(|| AuditIssue::UnconfiguredTarget {
                    state: format!("{:?}", target),
                    from: format!("{:?}", rep.state),
                    trigger: format!("{:?}", t.trigger),
                })
            })
        })
        .collect()
}

fn has_dynamic_targets<S: State, T: Trigger>(representations: &Representations<S, T>) -> bool {
    representations
        .values()
        .flat_map(|rep| rep.triggers.values())
        .any(|t| matches!(t.target, Target::Dynamic(_)))
}

/// Breadth-first walk over static edges, ignoring guards.
fn unreachable_states<S: State, T: Trigger>(
    representations: &Representations<S, T>,
    start: &S,
) -> Vec<AuditIssue> {
    let mut seen: HashSet<&S> = HashSet::new();
    let mut queue: VecDeque<&S> = VecDeque::new();

    if let Some((start, _)) = representations.get_key_value(start) {
        seen.insert(start);
        queue.push_back(start);
    }

    while let Some(state) = queue.pop_front() {
        let Some(rep) = representations.get(state) else {
            continue;
        };
        for target in rep.triggers.values().filter_map(|t| t.target.static_state()) {
            if seen.insert(target) {
                queue.push_back(target);
            }
        }
    }

    representations
        .keys()
        .filter(|state| !seen.contains(state))
        .map(|state| AuditIssue::Unreachable {
            state: format!("{:?}", state),
        })
        .collect()
}
