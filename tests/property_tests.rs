//! Property-based tests for the state machine engine.
//!
//! These tests use proptest to drive a configured machine with random
//! trigger sequences and compare it against a plain transition table.

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use switchyard::{state_enum, Guard, MachineOptions, StateMachine};

state_enum! {
    enum Stage {
        Queued,
        Building,
        Testing,
        Released,
    }
}

state_enum! {
    enum Step {
        Advance,
        Retry,
        Abort,
        Heartbeat,
        Unknown,
    }
}

/// Reference transition table. `None` means the trigger does not move the
/// machine; `reported` says whether that counts as an invalid trigger.
fn expected(stage: Stage, step: Step) -> (Option<Stage>, bool) {
    use Stage::*;
    use Step::*;
    match (stage, step) {
        (Queued, Advance) => (Some(Building), false),
        (Building, Advance) => (Some(Testing), false),
        (Testing, Advance) => (Some(Released), false),
        (Building | Testing, Retry) => (Some(Building), false),
        (Queued | Building | Testing, Abort) => (Some(Queued), false),
        (_, Heartbeat) => (None, false),
        _ => (None, true),
    }
}

fn pipeline(options: MachineOptions) -> (StateMachine<Stage, Step>, Arc<AtomicUsize>) {
    let mut machine = StateMachine::with_options(Stage::Queued, options);
    for stage in Stage::ALL {
        machine.configure(*stage).ignore(Step::Heartbeat).unwrap();
    }
    machine
        .configure(Stage::Queued)
        .permit(Step::Advance, Stage::Building)
        .unwrap()
        .permit_reentry(Step::Abort)
        .unwrap();
    machine
        .configure(Stage::Building)
        .permit(Step::Advance, Stage::Testing)
        .unwrap()
        .permit_reentry(Step::Retry)
        .unwrap()
        .permit(Step::Abort, Stage::Queued)
        .unwrap();
    machine
        .configure(Stage::Testing)
        .permit(Step::Advance, Stage::Released)
        .unwrap()
        .permit(Step::Retry, Stage::Building)
        .unwrap()
        .permit(Step::Abort, Stage::Queued)
        .unwrap();

    let invalid = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invalid);
    machine.on_invalid_trigger(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (machine, invalid)
}

prop_compose! {
    fn arbitrary_step()(variant in 0..5u8) -> Step {
        Step::ALL[variant as usize]
    }
}

proptest! {
    #[test]
    fn machine_follows_transition_table(steps in prop::collection::vec(arbitrary_step(), 0..64)) {
        let (machine, invalid) = pipeline(MachineOptions::default());
        let mut stage = Stage::Queued;
        let mut reported = 0;

        for step in steps {
            machine.fire(step).unwrap();
            let (next, is_invalid) = expected(stage, step);
            stage = next.unwrap_or(stage);
            reported += usize::from(is_invalid);

            prop_assert_eq!(machine.current_state(), stage);
            prop_assert!(!machine.is_in_transition());
        }
        prop_assert_eq!(invalid.load(Ordering::SeqCst), reported);
    }

    #[test]
    fn disabled_reporting_never_notifies(steps in prop::collection::vec(arbitrary_step(), 0..64)) {
        let (machine, invalid) = pipeline(MachineOptions::new().report_invalid(false));
        for step in steps {
            machine.fire(step).unwrap();
        }
        prop_assert_eq!(invalid.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn history_forms_a_connected_path(steps in prop::collection::vec(arbitrary_step(), 1..64)) {
        let (machine, _) = pipeline(MachineOptions::new().record_history(true));
        let mut moves = 0;
        let mut stage = Stage::Queued;

        for step in steps {
            machine.fire(step).unwrap();
            if let (Some(next), _) = expected(stage, step) {
                stage = next;
                moves += 1;
            }
        }

        let history = machine.history();
        prop_assert_eq!(history.len(), moves);

        let records: Vec<_> = history.transitions().collect();
        for pair in records.windows(2) {
            prop_assert_eq!(pair[0].to, pair[1].from);
        }
        if let Some(last) = history.last() {
            prop_assert_eq!(last.to, machine.current_state());
        }
    }

    #[test]
    fn bounded_history_never_exceeds_limit(
        limit in 0..8usize,
        steps in prop::collection::vec(arbitrary_step(), 0..64),
    ) {
        let (machine, _) = pipeline(MachineOptions::new().history_limit(limit));
        for step in steps {
            machine.fire(step).unwrap();
            prop_assert!(machine.history().len() <= limit);
        }
    }

    #[test]
    fn guard_is_deterministic(open in any::<bool>()) {
        let guard = Guard::new(move || open);
        prop_assert_eq!(guard.check(), guard.check());
        prop_assert_eq!(guard.check(), open);
    }

    #[test]
    fn can_handle_trigger_predicts_movement(step in arbitrary_step(), advance in 0..4usize) {
        let (machine, _) = pipeline(MachineOptions::default());
        for _ in 0..advance {
            machine.fire(Step::Advance).unwrap();
        }
        let before = machine.current_state();
        let (_, is_invalid) = expected(before, step);

        prop_assert_eq!(machine.can_handle_trigger(&step), !is_invalid);
    }

    #[test]
    fn state_names_match_display(variant in 0..4usize) {
        let stage = Stage::ALL[variant];
        prop_assert_eq!(stage.name(), stage.to_string());
    }
}
