//! Core state machine types.
//!
//! This module contains the building blocks a machine is assembled from:
//! - States and their kinds via [`State`] and [`StateKind`]
//! - Guard conditions via the [`Condition`] trait
//! - Side-effecting state actions via the [`Action`] trait
//! - Append-only history of fired transitions
//!
//! Conditions and actions never capture the domain object they work on.
//! The caller passes a context `C` into every trigger call and the engine
//! hands it to each condition and action in turn.

mod action;
mod guard;
mod history;
mod state;

pub use action::{Action, FnAction};
pub use guard::{Condition, Guard};
pub use history::{StateHistory, TransitionRecord};
pub use state::{State, StateKind};

/// Error raised by a caller-supplied condition or action.
///
/// The engine never inspects it; it is carried verbatim as the `source` of
/// the error returned from the trigger call.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;
