//! Order Desk State Machine
//!
//! This example demonstrates dynamic targets, parameterized triggers,
//! history and the configuration audit.
//!
//! Key concepts:
//! - Targets computed at fire time
//! - Typed trigger arguments checked before any side effect
//! - Forced moves with selective callbacks
//! - Accumulated audit issues via `Validation`
//!
//! Run with: RUST_LOG=switchyard=trace cargo run --example order_desk

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use stillwater::validation::Validation;
use switchyard::{
    state_enum, DynamicState, MachineOptions, ParameterizedTrigger, StateMachine,
    StateTransitionOption, TransitionError,
};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Order {
        Received,
        Picking,
        Backordered,
        Shipped,
        Cancelled,
    }
}

state_enum! {
    enum Event {
        Assign,
        Pick,
        Ship,
        Cancel,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Desk State Machine ===\n");

    let stock = Arc::new(AtomicU32::new(0));
    let picker = Arc::new(Mutex::new(String::new()));
    let assign: ParameterizedTrigger<Event, String> = ParameterizedTrigger::new(Event::Assign);

    let options = MachineOptions::new().history_limit(16);
    let mut desk = StateMachine::with_options(Order::Received, options);

    let assigned = Arc::clone(&picker);
    desk.configure(Order::Received)
        .permit_parameterized(&assign, Order::Picking, move |_, name| {
            let mut slot = assigned
                .lock()
                .map_err(|_| TransitionError::callback("picker slot poisoned"))?;
            *slot = name.clone();
            Ok(())
        })?
        .permit(Event::Cancel, Order::Cancelled)?;

    let available = Arc::clone(&stock);
    desk.configure(Order::Picking)
        .permit_dynamic(Event::Pick, move || {
            if available.load(Ordering::SeqCst) > 0 {
                DynamicState::to(Order::Shipped)
            } else {
                DynamicState::to(Order::Backordered)
            }
        })?
        .permit(Event::Cancel, Order::Cancelled)?;

    desk.configure(Order::Backordered)
        .on_entry(|_| {
            println!("  out of stock, waiting for restock");
            Ok(())
        })
        .permit(Event::Pick, Order::Picking)?;

    desk.configure(Order::Shipped);
    desk.configure(Order::Cancelled);

    desk.on_invalid_trigger(|event| println!("  rejected {}", event));

    println!("Plain fire of a parameterized trigger:");
    desk.fire(Event::Assign)?;

    println!("Assign a picker:");
    desk.fire_with(&assign, "robin".to_string())?;
    let name = picker.lock().map(|p| p.clone()).unwrap_or_default();
    println!("  picker: {}, state: {}\n", name, desk.current_state());

    println!("Pick with an empty shelf:");
    desk.fire(Event::Pick)?;
    println!("  state: {}\n", desk.current_state());

    println!("Restock and retry:");
    stock.store(3, Ordering::SeqCst);
    desk.fire(Event::Pick)?;
    desk.fire(Event::Pick)?;
    println!("  state: {}\n", desk.current_state());

    println!("Operator reopens the order without running callbacks:");
    desk.move_to(Order::Received, StateTransitionOption::NONE)?;
    println!("  state: {}\n", desk.current_state());

    let path: Vec<String> = desk
        .history()
        .get_path()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    println!("Path: {}\n", path.join(" -> "));

    match desk.audit() {
        Validation::Success(_) => println!("Audit: configuration is complete"),
        Validation::Failure(issues) => {
            println!("Audit found {} issue(s):", issues.len());
            for issue in issues.iter() {
                println!("  - {}", issue);
            }
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
