//! Observer slots notified by the engine.

/// Callback observing a state.
pub type StateObserver<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Callback observing a trigger.
pub type TriggerObserver<T> = Box<dyn Fn(&T) + Send + Sync>;

/// One optional slot per event. Registering again replaces the previous
/// observer.
pub(crate) struct Observers<S, T> {
    pub(crate) transition_started: Option<StateObserver<S>>,
    pub(crate) transition_executed: Option<StateObserver<S>>,
    pub(crate) invalid_state: Option<StateObserver<S>>,
    pub(crate) invalid_trigger: Option<TriggerObserver<T>>,
}

impl<S, T> Default for Observers<S, T> {
    fn default() -> Self {
        Self {
            transition_started: None,
            transition_executed: None,
            invalid_state: None,
            invalid_trigger: None,
        }
    }
}

impl<S, T> Observers<S, T> {
    pub(crate) fn raise_transition_started(&self, target: &S) {
        if let Some(observer) = &self.transition_started {
            observer(target);
        }
    }

    pub(crate) fn raise_transition_executed(&self, previous: &S) {
        if let Some(observer) = &self.transition_executed {
            observer(previous);
        }
    }

    pub(crate) fn raise_invalid_state(&self, state: &S) {
        if let Some(observer) = &self.invalid_state {
            observer(state);
        }
    }

    pub(crate) fn raise_invalid_trigger(&self, trigger: &T) {
        if let Some(observer) = &self.invalid_trigger {
            observer(trigger);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn empty_slots_are_skipped() {
        let observers: Observers<u8, u8> = Observers::default();
        observers.raise_transition_started(&1);
        observers.raise_transition_executed(&1);
        observers.raise_invalid_state(&1);
        observers.raise_invalid_trigger(&1);
    }

    #[test]
    fn each_slot_receives_its_event() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut observers: Observers<u8, char> = Observers::default();

        let sink = Arc::clone(&log);
        observers.transition_started = Some(Box::new(move |s: &u8| {
            sink.lock().unwrap().push(format!("started {}", s))
        }));
        let sink = Arc::clone(&log);
        observers.invalid_trigger = Some(Box::new(move |t: &char| {
            sink.lock().unwrap().push(format!("invalid {}", t))
        }));

        observers.raise_transition_started(&3);
        observers.raise_invalid_trigger(&'x');
        observers.raise_transition_executed(&2);

        assert_eq!(*log.lock().unwrap(), vec!["started 3", "invalid x"]);
    }
}
