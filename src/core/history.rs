//! History of fired transitions.
//!
//! Every transition a machine takes is recorded with the trigger that caused
//! it and the time it happened. History is immutable - `record` returns a
//! new history with the entry appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use gearshift::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "created".to_string(),
///     to: "auth".to_string(),
///     trigger: "authorize".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "auth");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the state that was active before the transition
    pub from: String,
    /// Name of the state the transition entered
    pub to: String,
    /// Trigger whose resolution fired the transition
    pub trigger: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of fired transitions.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(TransitionRecord {
///         from: "created".to_string(),
///         to: "auth".to_string(),
///         trigger: "authorize".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(TransitionRecord {
///         from: "auth".to_string(),
///         to: "pending".to_string(),
///         trigger: "commit".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.path(), vec!["created", "auth", "pending"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Names of the states traversed: the first record's source state, then
    /// the destination of every record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Time between the first and the last record.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Records fired by the named trigger, oldest first.
    pub fn by_trigger<'a>(
        &'a self,
        trigger: &'a str,
    ) -> impl Iterator<Item = &'a TransitionRecord> + 'a {
        self.transitions.iter().filter(move |t| t.trigger == trigger)
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
