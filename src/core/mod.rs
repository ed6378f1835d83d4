//! Core value types of the state machine.
//!
//! This module contains the types shared by the configuration builder and
//! the execution engine:
//! - State and trigger identity via the `State` and `Trigger` traits
//! - Guard predicates for trigger applicability
//! - Transition records, dynamic targets and forced-move options
//! - Bounded transition history

mod guard;
mod history;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{TransitionHistory, TransitionRecord};
pub use state::{State, Trigger};
pub use transition::{DynamicState, ParameterizedTrigger, StateTransitionOption, Transition};
