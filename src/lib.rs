//! Gearshift: a trigger-driven finite state machine engine
//!
//! A machine tracks the lifecycle of one entity. Transitions between named
//! states are guarded by conditions; states carry actions that run whenever
//! they are entered. Named triggers group candidate transitions for one
//! external event, and resolving a trigger fires the first candidate that
//! leaves the active state and whose conditions hold, optionally repeating
//! until nothing more applies.
//!
//! # Core Concepts
//!
//! - **State**: named node with a kind (initial, intermediate, final) and actions
//! - **Condition**: named guard over the caller's context
//! - **Action**: side-effecting work run when a state is entered
//! - **Transition**: guarded edge between two states
//! - **Trigger**: ordered candidate transitions for one event
//!
//! Domain data never lives in the machine. Every trigger call receives a
//! context `C` that conditions read and actions mutate.
//!
//! # Example
//!
//! ```rust
//! use gearshift::builder::StateMachineBuilder;
//! use gearshift::core::{FnAction, Guard, State, StateKind};
//! use gearshift::Transition;
//!
//! #[derive(Default)]
//! struct Payment {
//!     status: String,
//!     flagged: bool,
//! }
//!
//! let created = State::new("created", StateKind::Initial);
//! let auth = State::new("auth", StateKind::Intermediate).with_action(FnAction::new(
//!     "mark authed",
//!     |p: &mut Payment| {
//!         p.status = "authed".to_string();
//!         Ok(())
//!     },
//! ));
//! let pending = State::new("pending", StateKind::Intermediate);
//! let committed = State::new("committed", StateKind::Final);
//!
//! let mut builder = StateMachineBuilder::new("payment");
//! let authorize = builder.add_transition(Transition::new(&created, &auth));
//! let accept = builder.add_transition(
//!     Transition::new(&auth, &committed).when(Guard::new("Accept the payment.", |p: &Payment| !p.flagged)),
//! );
//! let review = builder.add_transition(
//!     Transition::new(&auth, &pending).when(Guard::new("Review the payment.", |p: &Payment| p.flagged)),
//! );
//! let approve = builder.add_transition(Transition::new(&pending, &committed));
//! builder.add_trigger("authorize", [authorize]);
//! builder.add_trigger("commit", [accept, review, approve]);
//!
//! let mut machine = builder.build().unwrap();
//! let mut payment = Payment { flagged: true, ..Payment::default() };
//!
//! machine.trigger("authorize", &mut payment).unwrap();
//! assert_eq!(payment.status, "authed");
//!
//! let state = machine.trigger_deep("commit", &mut payment).unwrap();
//! assert_eq!(state.name(), "committed");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod graph;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{Action, Condition, FnAction, Guard, HookError, State, StateKind};
pub use engine::{MachineError, Resolution, StateMachine, Transition, TransitionId};
pub use graph::MachineGraph;
pub use validation::ConfigViolation;
