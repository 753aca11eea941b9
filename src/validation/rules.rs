//! Configuration checks, accumulated with `Validation`.

use crate::core::State;
use crate::engine::{Transition, TransitionId};
use crate::validation::violations::ConfigViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

/// Result of a configuration check.
pub type ConfigCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Names of the Initial states a registry would hold after registering
/// `states` in order.
///
/// Registration is last-write-wins per name, so a state redefined later with
/// a different kind only counts with its final kind.
pub(crate) fn initial_states<'a, C: 'a>(
    states: impl IntoIterator<Item = &'a State<C>>,
) -> Vec<String> {
    let mut registry: Vec<(&str, bool)> = Vec::new();
    for state in states {
        match registry.iter_mut().find(|(name, _)| *name == state.name()) {
            Some(entry) => entry.1 = state.is_initial(),
            None => registry.push((state.name(), state.is_initial())),
        }
    }
    registry
        .into_iter()
        .filter(|(_, initial)| *initial)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Check that the endpoints of `transitions` define exactly one Initial state.
pub fn check_initial_state<C>(transitions: &[Transition<C>]) -> ConfigCheck {
    let initial = initial_states(transitions.iter().flat_map(|t| [t.from(), t.to()]));
    match initial.len() {
        0 => Validation::fail(ConfigViolation::NoInitialState),
        1 => Validation::success(()),
        _ => Validation::fail(ConfigViolation::MultipleInitialStates { states: initial }),
    }
}

/// Check that every transition a trigger names belongs to `machine`, which
/// has `registered` transitions. Reports every unknown transition.
pub fn check_trigger(
    trigger: &str,
    transitions: &[TransitionId],
    machine: Uuid,
    registered: usize,
) -> ConfigCheck {
    let checks: Vec<ConfigCheck> = transitions
        .iter()
        .map(|id| {
            if id.belongs_to(machine, registered) {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::UnknownTransition {
                    trigger: trigger.to_string(),
                    transition: *id,
                })
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// Validate a complete machine configuration, accumulating ALL violations.
pub fn check_configuration<C>(
    machine: Uuid,
    transitions: &[Transition<C>],
    triggers: &[(String, Vec<TransitionId>)],
) -> ConfigCheck {
    let mut checks: Vec<ConfigCheck> = Vec::new();

    if transitions.is_empty() {
        checks.push(Validation::fail(ConfigViolation::NoTransitions));
    } else {
        checks.push(check_initial_state(transitions));
    }

    for (name, ids) in triggers {
        checks.push(check_trigger(name, ids, machine, transitions.len()));
    }

    Validation::all_vec(checks).map(|_| ())
}
