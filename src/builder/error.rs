//! Build errors for the state machine builder.

use crate::engine::MachineError;
use crate::validation::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid machine configuration: {}", describe(.violations))]
    Invalid { violations: Vec<ConfigViolation> },

    #[error(transparent)]
    Machine(#[from] MachineError),
}

impl BuildError {
    /// Every violation found, empty for non-validation failures.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            BuildError::Invalid { violations } => violations,
            BuildError::Machine(_) => &[],
        }
    }
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
