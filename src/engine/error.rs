//! Errors raised while registering on or driving a machine.

use crate::core::HookError;
use crate::validation::ConfigViolation;
use thiserror::Error;

/// Errors from the state machine engine.
///
/// A condition returning `false` is not an error; it only makes the
/// transition ineligible. Failures inside conditions and actions keep the
/// caller's original error as their `source`.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigViolation),

    #[error("Unknown trigger '{trigger}'")]
    UnknownTrigger { trigger: String },

    #[error("Unknown state '{state}'")]
    UnknownState { state: String },

    #[error("Machine '{machine}' has no active state; register a transition from an initial state")]
    NoActiveState { machine: String },

    #[error("Condition '{condition}' failed on transition '{from}' -> '{to}': {source}")]
    ConditionFailed {
        condition: String,
        from: String,
        to: String,
        #[source]
        source: HookError,
    },

    #[error("Action '{action}' of state '{state}' failed: {source}")]
    ActionFailed {
        state: String,
        action: String,
        #[source]
        source: HookError,
    },

    #[error("Trigger '{trigger}' exceeded the chain limit of {limit} transitions")]
    ChainLimitExceeded { trigger: String, limit: usize },
}

impl MachineError {
    /// Whether the error comes from configuring the machine rather than from
    /// running it.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MachineError::Config(_) | MachineError::UnknownTrigger { .. }
        )
    }

    /// Whether the error was raised by caller-supplied code.
    pub fn is_hook_failure(&self) -> bool {
        matches!(
            self,
            MachineError::ConditionFailed { .. } | MachineError::ActionFailed { .. }
        )
    }
}
