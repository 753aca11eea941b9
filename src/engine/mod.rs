//! Trigger-driven state machine engine.
//!
//! This module registers transitions and triggers and resolves triggers
//! against the active state:
//!
//! - **Transitions**: guarded edges between states, see [`Transition`]
//! - **Triggers**: named, ordered lists of candidate transitions
//! - **State Machine**: owns the registry, tracks the active state and
//!   resolves triggers shallowly or deeply, see [`StateMachine`]
//!
//! Everything runs synchronously on the caller's thread. Mutating operations
//! take `&mut self`; callers that share a machine must serialise access.

mod error;
mod machine;
mod transition;

pub use error::MachineError;
pub use machine::{Resolution, StateMachine};
pub use transition::{Transition, TransitionId};
