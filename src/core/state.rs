//! States and their kinds.
//!
//! A state is a plain value: a name, a kind and the ordered actions that run
//! whenever the state becomes active. States are identified by name; two
//! states with the same name are the same node of the machine graph.

use super::action::Action;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Position of a state in the machine's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    /// The state a freshly built machine starts in. Exactly one per machine.
    Initial,
    /// Any state between the start and the end of the lifecycle.
    Intermediate,
    /// A terminal state.
    Final,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initial => "initial",
            Self::Intermediate => "intermediate",
            Self::Final => "final",
        };
        f.write_str(label)
    }
}

/// A named node of the machine graph.
///
/// Cloning a state is cheap: actions are shared behind `Arc`.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{FnAction, State, StateKind};
///
/// struct Order {
///     audit: Vec<String>,
/// }
///
/// let shipped = State::new("shipped", StateKind::Final).with_action(FnAction::new(
///     "audit",
///     |order: &mut Order| {
///         order.audit.push("shipped".to_string());
///         Ok(())
///     },
/// ));
///
/// assert_eq!(shipped.name(), "shipped");
/// assert!(shipped.is_final());
/// assert_eq!(shipped.action_names(), vec!["audit"]);
/// ```
pub struct State<C> {
    name: String,
    kind: StateKind,
    actions: Vec<Arc<dyn Action<C>>>,
}

impl<C> State<C> {
    /// Create a state without actions.
    pub fn new(name: impl Into<String>, kind: StateKind) -> Self {
        Self {
            name: name.into(),
            kind,
            actions: Vec::new(),
        }
    }

    /// Append an action, builder style.
    pub fn with_action<A>(mut self, action: A) -> Self
    where
        A: Action<C> + 'static,
    {
        self.actions.push(Arc::new(action));
        self
    }

    /// Append an action.
    pub fn add_action<A>(&mut self, action: A)
    where
        A: Action<C> + 'static,
    {
        self.actions.push(Arc::new(action));
    }

    /// Append an action that is shared with other states.
    pub fn add_shared_action(&mut self, action: Arc<dyn Action<C>>) {
        self.actions.push(action);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn is_initial(&self) -> bool {
        self.kind == StateKind::Initial
    }

    pub fn is_final(&self) -> bool {
        self.kind == StateKind::Final
    }

    /// Actions in the order they run.
    pub fn actions(&self) -> &[Arc<dyn Action<C>>] {
        &self.actions
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }
}

impl<C> Clone for State<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            actions: self.actions.clone(),
        }
    }
}

impl<C> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("actions", &self.action_names())
            .finish()
    }
}

impl<C> PartialEq for State<C> {
    /// States compare by identity in the graph: name and kind.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}
