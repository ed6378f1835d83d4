//! Configuration API for state machines.
//!
//! A machine is configured one state at a time through
//! [`StateConfiguration`], obtained from `StateMachine::configure`. Each
//! `(state, trigger)` pair may be defined exactly once, whichever of
//! `permit`, `permit_dynamic` or `ignore` defines it.
//!
//! [`TriggerBuilder`] assembles a definition piece by piece for callers
//! that build configurations from data rather than code.

pub mod configuration;
pub mod error;
pub mod macros;
pub mod trigger;

pub use configuration::StateConfiguration;
pub use error::ConfigError;
pub use trigger::{TriggerBuilder, TriggerDefinition};
