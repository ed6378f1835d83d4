//! Switchyard: a synchronous, deterministic finite state machine
//!
//! States and triggers are plain values supplied by the caller. A machine is
//! configured per state with permitted triggers, optional guards and
//! entry/exit callbacks, then driven by firing triggers one at a time.
//!
//! # Core Concepts
//!
//! - **Configuration**: `StateMachine::configure` returns a chainable
//!   [`StateConfiguration`]; duplicate triggers are rejected with
//!   [`ConfigError::Conflict`]
//! - **Targets**: static, computed per attempt (dynamic), or ignored
//! - **Guards**: nullary predicates consulted before anything else runs
//! - **Execution**: `fire`, `fire_with` for parameterized triggers, and
//!   forced `move_to`, all rejecting reentrant calls
//! - **Diagnostics**: observer slots plus `tracing` events for every
//!   transition and every rejected trigger
//!
//! # Example
//!
//! ```rust
//! use switchyard::{state_enum, StateMachine};
//!
//! state_enum! {
//!     pub enum Door { Closed, Open, Locked }
//! }
//!
//! state_enum! {
//!     pub enum Action { Open, Close, Lock, Unlock }
//! }
//!
//! let mut door = StateMachine::new(Door::Closed);
//! door.configure(Door::Closed)
//!     .permit(Action::Open, Door::Open)?
//!     .permit(Action::Lock, Door::Locked)?;
//! door.configure(Door::Open).permit(Action::Close, Door::Closed)?;
//! door.configure(Door::Locked).permit(Action::Unlock, Door::Closed)?;
//!
//! door.fire(Action::Lock)?;
//! door.fire(Action::Open)?; // rejected: locked doors stay shut
//! assert_eq!(door.current_state(), Door::Locked);
//!
//! door.fire(Action::Unlock)?;
//! door.fire(Action::Open)?;
//! assert_eq!(door.current_state(), Door::Open);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audit;
pub mod builder;
pub mod core;
pub mod machine;
mod representation;

// Re-export commonly used types
pub use audit::{AuditIssue, AuditResult};
pub use builder::{ConfigError, StateConfiguration, TriggerBuilder, TriggerDefinition};
pub use core::{
    DynamicState, Guard, ParameterizedTrigger, State, StateTransitionOption, Transition,
    TransitionHistory, TransitionRecord, Trigger,
};
pub use machine::{MachineOptions, StateMachine, TransitionError};
pub use representation::{ArgumentCallback, Callback, Resolver};
