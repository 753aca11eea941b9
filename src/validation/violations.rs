//! Configuration violations.

use crate::engine::TransitionId;
use thiserror::Error;

/// A problem with how a machine was configured.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Invalid transition specified at trigger '{trigger}': {transition} is not registered on this machine")]
    UnknownTransition {
        trigger: String,
        transition: TransitionId,
    },

    #[error("Multiple initial states registered: {}", states.join(", "))]
    MultipleInitialStates { states: Vec<String> },

    #[error("No initial state registered")]
    NoInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,
}
