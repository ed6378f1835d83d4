//! Light Switch State Machine
//!
//! This example demonstrates guards, entry/exit callbacks and observers.
//!
//! Key concepts:
//! - Guarded transitions that depend on external state
//! - Invalid triggers reported, not raised
//! - Fixed callback order within a transition
//!
//! Run with: RUST_LOG=switchyard=debug cargo run --example light_switch

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use switchyard::{state_enum, StateMachine};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Light {
        Off,
        On,
    }
}

state_enum! {
    enum Input {
        Switch,
        Unplug,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Light Switch State Machine ===\n");

    let has_power = Arc::new(AtomicBool::new(false));
    let power = Arc::clone(&has_power);

    let mut light = StateMachine::new(Light::Off);
    light
        .configure(Light::Off)
        .on_exit(|t| {
            println!("  leaving {} via {:?}", t.source, t.trigger);
            Ok(())
        })
        .permit_if(Input::Switch, Light::On, move || power.load(Ordering::SeqCst))?;
    light
        .configure(Light::On)
        .on_entry(|t| {
            println!("  entering {}", t.destination);
            Ok(())
        })
        .permit(Input::Switch, Light::Off)?
        .permit(Input::Unplug, Light::Off)?;

    light.on_transition_executed(|previous| println!("  committed, was {}", previous));
    light.on_invalid_trigger(|trigger| println!("  {} is not allowed right now", trigger));

    println!("Flip without power:");
    light.fire(Input::Switch)?;
    println!("State: {}\n", light.current_state());

    println!("Plug in and flip:");
    has_power.store(true, Ordering::SeqCst);
    light.fire(Input::Switch)?;
    println!("State: {}\n", light.current_state());

    println!("Permitted now: {:?}", light.permitted_triggers());
    light.fire(Input::Unplug)?;
    println!("State: {}", light.current_state());

    println!("\n=== Example Complete ===");
    Ok(())
}
