//! Identity traits for states and triggers.
//!
//! States and triggers are opaque to the engine. It only needs to clone them
//! into transition records, compare and hash them as map keys, and format
//! them for diagnostics.

use std::fmt::Debug;
use std::hash::Hash;

/// A node in the machine's graph.
///
/// Implemented automatically for every `Clone + Eq + Hash + Debug` type.
/// Equality and hashing must stay stable for the lifetime of the machine,
/// since states are used as map keys.
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
/// assert_state(&Door::Open);
/// assert_state(&"any hashable value");
/// ```
pub trait State: Clone + Eq + Hash + Debug + 'static {}

impl<S> State for S where S: Clone + Eq + Hash + Debug + 'static {}

/// An edge label causing an attempted transition from the current state.
///
/// The same trigger value may be configured differently in different states.
/// Implemented automatically for every `Clone + Eq + Hash + Debug` type.
pub trait Trigger: Clone + Eq + Hash + Debug + 'static {}

impl<T> Trigger for T where T: Clone + Eq + Hash + Debug + 'static {}
