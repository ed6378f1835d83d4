//! Runtime options for a state machine.

use serde::{Deserialize, Serialize};

/// Options controlling diagnostics and history.
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use switchyard::MachineOptions;
///
/// let options = MachineOptions::new().record_history(true).history_limit(100);
/// assert!(options.report_invalid);
///
/// let loaded = MachineOptions::from_json(r#"{ "report_invalid": false }"#)?;
/// assert!(!loaded.report_invalid);
/// assert!(!loaded.record_history);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Invoke the invalid-trigger and invalid-state observers while firing.
    /// `move_to` reports an unknown state regardless.
    pub report_invalid: bool,
    /// Record every committed transition
    pub record_history: bool,
    /// Keep at most this many history records
    pub history_limit: Option<usize>,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            report_invalid: true,
            record_history: false,
            history_limit: None,
        }
    }
}

impl MachineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_invalid(mut self, enabled: bool) -> Self {
        self.report_invalid = enabled;
        self
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Cap the history. Implies `record_history(true)`.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.record_history = true;
        self.history_limit = Some(limit);
        self
    }

    /// Parse options from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
