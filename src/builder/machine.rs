//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::engine::{StateMachine, Transition, TransitionId};
use crate::validation::{check_configuration, ConfigCheck};
use stillwater::validation::Validation;
use uuid::Uuid;

/// Two-phase builder: collect transitions and triggers, then validate the
/// whole configuration and set the active state once in [`build`].
///
/// Identifiers handed out by the builder stay valid on the built machine.
///
/// [`build`]: StateMachineBuilder::build
pub struct StateMachineBuilder<C> {
    id: Uuid,
    name: String,
    transitions: Vec<Transition<C>>,
    triggers: Vec<(String, Vec<TransitionId>)>,
    max_chain: Option<usize>,
}

impl<C> StateMachineBuilder<C> {
    /// Create a new builder for a machine with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transitions: Vec::new(),
            triggers: Vec::new(),
            max_chain: None,
        }
    }

    /// Add a transition and return the identifier triggers refer to it by.
    pub fn add_transition(&mut self, transition: Transition<C>) -> TransitionId {
        let id = TransitionId::new(self.id, self.transitions.len());
        self.transitions.push(transition);
        id
    }

    /// Add a transition no trigger needs to reference.
    pub fn transition(mut self, transition: Transition<C>) -> Self {
        self.add_transition(transition);
        self
    }

    /// Add a trigger. Unknown transitions are reported by `build`.
    pub fn add_trigger<I>(&mut self, name: impl Into<String>, transitions: I)
    where
        I: IntoIterator<Item = TransitionId>,
    {
        self.triggers
            .push((name.into(), transitions.into_iter().collect()));
    }

    pub fn trigger<I>(mut self, name: impl Into<String>, transitions: I) -> Self
    where
        I: IntoIterator<Item = TransitionId>,
    {
        self.add_trigger(name, transitions);
        self
    }

    /// Cap the number of transitions a single deep trigger call may fire.
    pub fn max_chain(mut self, limit: usize) -> Self {
        self.max_chain = Some(limit);
        self
    }

    /// Check the configuration without building.
    pub fn validate(&self) -> ConfigCheck {
        check_configuration(self.id, &self.transitions, &self.triggers)
    }

    /// Build the state machine.
    /// Returns every configuration violation at once if the configuration
    /// is invalid.
    pub fn build(self) -> Result<StateMachine<C>, BuildError> {
        if let Validation::Failure(violations) = self.validate() {
            return Err(BuildError::Invalid {
                violations: violations.iter().cloned().collect(),
            });
        }

        let mut machine = StateMachine::with_id(self.id, self.name);
        machine.set_max_chain(self.max_chain);
        for transition in self.transitions {
            machine.add_transition(transition)?;
        }
        for (name, transitions) in self.triggers {
            machine.add_trigger(name, transitions)?;
        }

        tracing::debug!(
            machine = machine.name(),
            states = machine.states().len(),
            transitions = machine.transitions().len(),
            triggers = machine.triggers().len(),
            "state machine built"
        );
        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{State, StateKind};
    use crate::validation::ConfigViolation;

    fn states() -> (State<()>, State<()>, State<()>) {
        (
            State::new("created", StateKind::Initial),
            State::new("auth", StateKind::Intermediate),
            State::new("committed", StateKind::Final),
        )
    }

    #[test]
    fn builder_requires_transitions() {
        let result = StateMachineBuilder::<()>::new("empty").build();

        match result {
            Err(BuildError::Invalid { violations }) => {
                assert_eq!(violations, vec![ConfigViolation::NoTransitions]);
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn builder_requires_initial_state() {
        let (_, auth, committed) = states();

        let result = StateMachineBuilder::new("payment")
            .transition(Transition::new(&auth, &committed))
            .build();

        assert!(matches!(
            result.unwrap_err().violations(),
            [ConfigViolation::NoInitialState]
        ));
    }

    #[test]
    fn builder_accumulates_all_violations() {
        let (created, auth, committed) = states();
        let imported = State::new("imported", StateKind::Initial);
        let stranger = StateMachineBuilder::<()>::new("other").add_transition(Transition::new(
            &created, &auth,
        ));

        let mut builder = StateMachineBuilder::new("payment");
        let authorize = builder.add_transition(Transition::new(&created, &auth));
        builder.add_transition(Transition::new(&imported, &committed));
        builder.add_trigger("authorize", [authorize, stranger]);

        let err = builder.build().unwrap_err();

        assert_eq!(err.violations().len(), 2);
        assert!(err
            .violations()
            .iter()
            .any(|v| matches!(v, ConfigViolation::MultipleInitialStates { .. })));
        assert!(err
            .violations()
            .iter()
            .any(|v| matches!(v, ConfigViolation::UnknownTransition { trigger, .. } if trigger == "authorize")));
        assert!(err.to_string().starts_with("Invalid machine configuration: "));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let (created, auth, committed) = states();

        let mut builder = StateMachineBuilder::new("payment").max_chain(8);
        let authorize = builder.add_transition(Transition::new(&created, &auth));
        let commit = builder.add_transition(Transition::new(&auth, &committed));
        let mut machine = builder
            .trigger("authorize", [authorize])
            .trigger("commit", [commit])
            .build()
            .unwrap();

        assert_eq!(machine.name(), "payment");
        assert!(machine.is_current_state("created"));
        assert_eq!(machine.max_chain(), Some(8));
        assert_eq!(machine.transition(commit).unwrap().to().name(), "committed");

        machine.trigger("authorize", &mut ()).unwrap();
        machine.trigger("commit", &mut ()).unwrap();
        assert!(machine.is_final());
    }

    #[test]
    fn validate_reports_without_consuming() {
        let (created, auth, _) = states();
        let mut builder = StateMachineBuilder::new("payment");
        builder.add_transition(Transition::new(&created, &auth));

        assert!(builder.validate().is_success());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn build_activates_the_surviving_initial_state() {
        let (created, auth, _) = states();
        let demoted = State::new("created", StateKind::Intermediate);
        let fresh = State::new("fresh", StateKind::Initial);

        let machine = StateMachineBuilder::new("payment")
            .transition(Transition::new(&created, &auth))
            .transition(Transition::new(&demoted, &auth))
            .transition(Transition::new(&fresh, &auth))
            .build()
            .unwrap();

        assert!(machine.is_current_state("fresh"));
        assert!(machine.current_state().unwrap().is_initial());
    }
}
