//! Configuration validation for state machines.
//!
//! Building a machine checks the whole configuration at once using
//! Stillwater's `Validation` type, so every problem is reported in a single
//! pass instead of one per build attempt:
//!
//! - exactly one Initial state among the transition endpoints
//! - every transition a trigger names is registered on the machine
//! - at least one transition exists
//!
//! Incremental registration on a live machine (`add_trigger`) runs the same
//! trigger check but fails fast on the first unknown transition.

pub mod rules;
pub mod violations;

pub(crate) use rules::initial_states;
pub use rules::{check_configuration, check_initial_state, check_trigger, ConfigCheck};
pub use violations::ConfigViolation;
