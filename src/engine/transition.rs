//! Transitions between states and their identifiers.

use crate::core::{Condition, Guard, State};
use crate::engine::error::MachineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Handle to a transition registered on a machine.
///
/// Identifiers carry the id of the machine that minted them, so a trigger
/// can never reference a transition that belongs to another machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId {
    machine: Uuid,
    index: usize,
}

impl TransitionId {
    pub(crate) fn new(machine: Uuid, index: usize) -> Self {
        Self { machine, index }
    }

    /// Position of the transition in its machine's registration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn machine(&self) -> Uuid {
        self.machine
    }

    pub(crate) fn belongs_to(&self, machine: Uuid, registered: usize) -> bool {
        self.machine == machine && self.index < registered
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition #{}", self.index)
    }
}

/// A directed edge between two states, guarded by zero or more conditions.
///
/// All conditions must hold for the transition to fire. A transition with
/// no conditions always fires when its source state is active.
pub struct Transition<C> {
    from: State<C>,
    to: State<C>,
    conditions: Vec<Arc<dyn Condition<C>>>,
}

impl<C> Transition<C> {
    pub fn new(from: &State<C>, to: &State<C>) -> Self {
        Self {
            from: from.clone(),
            to: to.clone(),
            conditions: Vec::new(),
        }
    }

    /// Add a condition.
    pub fn when<G>(mut self, condition: G) -> Self
    where
        G: Condition<C> + 'static,
    {
        self.conditions.push(Arc::new(condition));
        self
    }

    /// Add a condition shared with other transitions.
    pub fn when_shared(mut self, condition: Arc<dyn Condition<C>>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a closure guard.
    pub fn guard<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        C: 'static,
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.when(Guard::new(name, predicate))
    }

    pub fn from(&self) -> &State<C> {
        &self.from
    }

    pub fn to(&self) -> &State<C> {
        &self.to
    }

    pub fn conditions(&self) -> &[Arc<dyn Condition<C>>] {
        &self.conditions
    }

    pub fn condition_names(&self) -> Vec<&str> {
        self.conditions.iter().map(|c| c.name()).collect()
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether this transition leaves the named state.
    pub fn starts_at(&self, state: &str) -> bool {
        self.from.name() == state
    }

    /// Evaluate the conditions in order, stopping at the first one that does
    /// not hold.
    pub fn conditions_hold(&self, ctx: &C) -> Result<bool, MachineError> {
        for condition in &self.conditions {
            let passed = condition
                .check(ctx)
                .map_err(|source| MachineError::ConditionFailed {
                    condition: condition.name().to_string(),
                    from: self.from.name().to_string(),
                    to: self.to.name().to_string(),
                    source,
                })?;
            if !passed {
                tracing::trace!(
                    condition = condition.name(),
                    from = self.from.name(),
                    to = self.to.name(),
                    "condition rejected transition"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<C> Clone for Transition<C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            conditions: self.conditions.clone(),
        }
    }
}

impl<C> fmt::Debug for Transition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from.name())
            .field("to", &self.to.name())
            .field("conditions", &self.condition_names())
            .finish()
    }
}
