//! Guard conditions for controlling transitions.
//!
//! Conditions are named predicates over the caller's context. A transition
//! fires only when every one of its conditions holds; a condition returning
//! `false` is ordinary control flow, not an error.

use super::HookError;

/// Named boolean guard evaluated before a transition may fire.
///
/// Evaluation receives the context immutably and should be free of side
/// effects. Returning `Err` aborts the trigger call that evaluated it.
pub trait Condition<C>: Send + Sync {
    /// Human-readable description, used in graph exports and errors.
    fn name(&self) -> &str;

    /// Evaluate the guard against the caller's context.
    fn check(&self, ctx: &C) -> Result<bool, HookError>;
}

/// Condition backed by a closure.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{Condition, Guard};
///
/// struct Payment {
///     amount: u64,
/// }
///
/// let small = Guard::new("Amount below review threshold.", |p: &Payment| p.amount < 1_000);
///
/// assert!(small.check(&Payment { amount: 20 }).unwrap());
/// assert!(!small.check(&Payment { amount: 5_000 }).unwrap());
/// assert_eq!(small.name(), "Amount below review threshold.");
/// ```
pub struct Guard<C> {
    name: String,
    predicate: Box<dyn Fn(&C) -> Result<bool, HookError> + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::try_new(name, move |ctx| Ok(predicate(ctx)))
    }

    /// Create a guard whose evaluation can fail, e.g. because it consults
    /// an external service through the context.
    pub fn try_new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        Guard {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Guard with a fixed outcome.
    pub fn constant(name: impl Into<String>, outcome: bool) -> Self {
        Self::new(name, move |_| outcome)
    }
}

impl<C> Condition<C> for Guard<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, ctx: &C) -> Result<bool, HookError> {
        (self.predicate)(ctx)
    }
}
