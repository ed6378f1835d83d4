//! Transition history tracking.
//!
//! When enabled through [`MachineOptions`](crate::machine::MachineOptions),
//! the engine appends a record for every committed transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use switchyard::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "Pending",
///     to: "Running",
///     trigger: Some("Start".to_string()),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "Running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Debug rendering of the trigger, `None` for forced moves
    pub trigger: Option<String>,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions, optionally bounded.
///
/// With a limit set, recording past the limit evicts the oldest record.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::new();
/// history.record(TransitionRecord { from: "Start", to: "Middle", trigger: None, timestamp: Utc::now() });
/// history.record(TransitionRecord { from: "Middle", to: "End", trigger: None, timestamp: Utc::now() });
///
/// assert_eq!(history.get_path(), vec![&"Start", &"Middle", &"End"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<S> {
    transitions: VecDeque<TransitionRecord<S>>,
    limit: Option<usize>,
}

impl<S> Default for TransitionHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TransitionHistory<S> {
    /// Create an unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history keeping at most `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a record, evicting the oldest one if the limit is reached.
    pub fn record(&mut self, transition: TransitionRecord<S>) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
    }

    /// States traversed: the first record's source, then every destination.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<S>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    fn record(from: TestState, to: TestState) -> TransitionRecord<TestState> {
        TransitionRecord {
            from,
            to,
            trigger: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: TransitionHistory<TestState> = TransitionHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = TransitionHistory::new();
        history.record(record(TestState::Initial, TestState::Processing));
        history.record(record(TestState::Processing, TestState::Complete));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = TransitionHistory::bounded(2);
        history.record(record(TestState::Initial, TestState::Processing));
        history.record(record(TestState::Processing, TestState::Complete));
        history.record(record(TestState::Complete, TestState::Initial));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path()[0], &TestState::Processing);
        assert_eq!(history.last().map(|r| &r.to), Some(&TestState::Initial));
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = TransitionHistory::bounded(0);
        history.record(record(TestState::Initial, TestState::Processing));
        assert!(history.is_empty());
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = TransitionHistory::new();
        history.record(record(TestState::Initial, TestState::Processing));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = TransitionHistory::bounded(4);
        history.record(record(TestState::Initial, TestState::Processing));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TransitionHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.limit(), Some(4));
    }

    #[test]
    fn clear_empties_history() {
        let mut history = TransitionHistory::new();
        history.record(record(TestState::Initial, TestState::Processing));
        history.clear();
        assert!(history.is_empty());
    }
}
