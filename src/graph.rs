//! Serializable view of a machine for renderers.
//!
//! The engine does not draw anything. [`MachineGraph`] is a plain snapshot
//! of nodes (states), edges (transitions) and triggers that a visualisation
//! tool can turn into DOT, SVG or anything else.

use crate::core::StateKind;
use crate::engine::StateMachine;
use serde::{Deserialize, Serialize};

/// A state as a graph node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateNode {
    pub name: String,
    pub kind: StateKind,
    pub actions: Vec<String>,
}

/// A transition as a directed edge, annotated with its condition names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionEdge {
    /// Registration index of the transition
    pub index: usize,
    pub from: String,
    pub to: String,
    pub conditions: Vec<String>,
}

/// A trigger and the edges it may follow, in candidate order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerNode {
    pub name: String,
    pub transitions: Vec<usize>,
}

/// Snapshot of a machine's graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineGraph {
    pub name: String,
    pub current_state: Option<String>,
    pub states: Vec<StateNode>,
    pub transitions: Vec<TransitionEdge>,
    pub triggers: Vec<TriggerNode>,
}

impl MachineGraph {
    pub fn from_machine<C>(machine: &StateMachine<C>) -> Self {
        let states = machine
            .states()
            .iter()
            .map(|state| StateNode {
                name: state.name().to_string(),
                kind: state.kind(),
                actions: state.action_names().into_iter().map(String::from).collect(),
            })
            .collect();

        let transitions = machine
            .transitions()
            .iter()
            .enumerate()
            .map(|(index, transition)| TransitionEdge {
                index,
                from: transition.from().name().to_string(),
                to: transition.to().name().to_string(),
                conditions: transition
                    .condition_names()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            })
            .collect();

        let triggers = machine
            .triggers()
            .iter()
            .map(|(name, ids)| TriggerNode {
                name: name.clone(),
                transitions: ids.iter().map(|id| id.index()).collect(),
            })
            .collect();

        Self {
            name: machine.name().to_string(),
            current_state: machine.current_state_name().map(String::from),
            states,
            transitions,
            triggers,
        }
    }

    /// Edges leaving the named state.
    pub fn edges_from<'a>(&'a self, state: &'a str) -> impl Iterator<Item = &'a TransitionEdge> {
        self.transitions.iter().filter(move |edge| edge.from == state)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
