//! Builder API for two-phase state machine construction.
//!
//! The builder collects every transition and trigger first and validates the
//! configuration as a whole, so a machine is either fully configured with
//! exactly one initial state or not built at all.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

use crate::core::State;
use crate::engine::Transition;

/// Create a transition without conditions.
///
/// # Example
///
/// ```
/// use gearshift::builder::{always, StateMachineBuilder};
/// use gearshift::core::{State, StateKind};
///
/// let created: State<()> = State::new("created", StateKind::Initial);
/// let auth = State::new("auth", StateKind::Intermediate);
///
/// let mut builder = StateMachineBuilder::new("payment");
/// let authorize = builder.add_transition(always(&created, &auth));
/// let machine = builder.trigger("authorize", [authorize]).build().unwrap();
///
/// assert!(machine.is_current_state("created"));
/// ```
pub fn always<C>(from: &State<C>, to: &State<C>) -> Transition<C> {
    Transition::new(from, to)
}

/// Create a transition guarded by a single closure.
///
/// # Example
///
/// ```
/// use gearshift::builder::guarded;
/// use gearshift::core::{State, StateKind};
///
/// struct Payment {
///     reviewed: bool,
/// }
///
/// let auth: State<Payment> = State::new("auth", StateKind::Intermediate);
/// let pending = State::new("pending", StateKind::Intermediate);
///
/// let review = guarded(&auth, &pending, "Review the payment.", |p: &Payment| p.reviewed);
///
/// assert!(review.conditions_hold(&Payment { reviewed: true }).unwrap());
/// ```
pub fn guarded<C, F>(from: &State<C>, to: &State<C>, name: &str, predicate: F) -> Transition<C>
where
    C: 'static,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Transition::new(from, to).guard(name, predicate)
}
