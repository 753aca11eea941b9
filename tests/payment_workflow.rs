//! End-to-end payment lifecycle.
//!
//! created(initial) -> auth -> {committed | pending} -> committed -> reversed

use gearshift::core::{Action, Condition, HookError, State, StateKind};
use gearshift::{
    Checkpoint, MachineError, StateMachine, StateMachineBuilder, Transition, TransitionId,
};

#[derive(Debug, Default)]
struct Payment {
    state: String,
    notes: Vec<String>,
    fraud_accept: bool,
    fraud_review: bool,
    finance_permission: bool,
}

impl Payment {
    fn new() -> Self {
        Self {
            state: "created".to_string(),
            fraud_accept: false,
            fraud_review: true,
            finance_permission: true,
            ..Self::default()
        }
    }
}

struct AuthAction;

impl Action<Payment> for AuthAction {
    fn run(&self, payment: &mut Payment) -> Result<(), HookError> {
        payment.state = "authed".to_string();
        Ok(())
    }

    fn name(&self) -> &str {
        "AuthAction"
    }
}

struct PendingAction;

impl Action<Payment> for PendingAction {
    fn run(&self, payment: &mut Payment) -> Result<(), HookError> {
        payment
            .notes
            .push(format!("pending commit of payment state: {}", payment.state));
        Ok(())
    }

    fn name(&self) -> &str {
        "PendingAction"
    }
}

struct FraudAcceptPayment;

impl Condition<Payment> for FraudAcceptPayment {
    fn name(&self) -> &str {
        "Accept the payment."
    }

    fn check(&self, payment: &Payment) -> Result<bool, HookError> {
        Ok(payment.fraud_accept)
    }
}

struct FraudReviewCondition;

impl Condition<Payment> for FraudReviewCondition {
    fn name(&self) -> &str {
        "Review the payment."
    }

    fn check(&self, payment: &Payment) -> Result<bool, HookError> {
        Ok(payment.fraud_review)
    }
}

struct FinancePermissions;

impl Condition<Payment> for FinancePermissions {
    fn name(&self) -> &str {
        "Has finance permissions."
    }

    fn check(&self, payment: &Payment) -> Result<bool, HookError> {
        Ok(payment.finance_permission)
    }
}

struct Registered {
    machine: StateMachine<Payment>,
    reverse: TransitionId,
}

fn payment_machine() -> Registered {
    let created = State::new("created", StateKind::Initial);
    let auth = State::new("auth", StateKind::Intermediate)
        .with_action(AuthAction)
        .with_action(PendingAction);
    let pending = State::new("pending", StateKind::Intermediate);
    let committed = State::new("committed", StateKind::Final);
    let reversed = State::new("reversed", StateKind::Final);

    let mut machine = StateMachine::new("payment");
    let authorize = machine
        .add_transition(Transition::new(&created, &auth))
        .unwrap();
    let commit = machine
        .add_transition(Transition::new(&auth, &committed).when(FraudAcceptPayment))
        .unwrap();
    let approve = machine
        .add_transition(Transition::new(&pending, &committed).when(FinancePermissions))
        .unwrap();
    let review = machine
        .add_transition(Transition::new(&auth, &pending).when(FraudReviewCondition))
        .unwrap();
    let reverse = machine
        .add_transition(Transition::new(&committed, &reversed))
        .unwrap();

    machine.add_trigger("authorize", [authorize]).unwrap();
    machine
        .add_trigger("commit", [commit, review, approve])
        .unwrap();
    machine.add_trigger("approve", [approve]).unwrap();

    Registered { machine, reverse }
}

#[test]
fn starts_in_created() {
    let Registered { machine, .. } = payment_machine();

    assert_eq!(machine.name(), "payment");
    assert_eq!(machine.current_state().unwrap().name(), "created");
    let names: Vec<_> = machine.states().iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec!["created", "auth", "committed", "pending", "reversed"]
    );
}

#[test]
fn authorize_then_deep_commit_ends_committed() {
    let Registered { mut machine, .. } = payment_machine();
    let mut payment = Payment::new();

    let state = machine.trigger("authorize", &mut payment).unwrap();
    assert_eq!(state.name(), "auth");
    assert_eq!(payment.state, "authed");
    assert_eq!(
        payment.notes,
        vec!["pending commit of payment state: authed".to_string()]
    );

    let state = machine.trigger_deep("commit", &mut payment).unwrap();
    assert_eq!(state.name(), "committed");
    assert_eq!(
        machine.history().path(),
        vec!["created", "auth", "pending", "committed"]
    );
}

#[test]
fn shallow_commit_stops_at_pending() {
    let Registered { mut machine, .. } = payment_machine();
    let mut payment = Payment::new();

    machine.trigger("authorize", &mut payment).unwrap();
    machine.trigger("commit", &mut payment).unwrap();
    assert!(machine.is_current_state("pending"));

    machine.trigger("commit", &mut payment).unwrap();
    assert!(machine.is_current_state("committed"));
}

#[test]
fn accepted_payment_commits_directly() {
    let Registered { mut machine, .. } = payment_machine();
    let mut payment = Payment {
        fraud_accept: true,
        ..Payment::new()
    };

    machine.trigger("authorize", &mut payment).unwrap();
    machine.trigger_deep("commit", &mut payment).unwrap();

    assert!(machine.is_current_state("committed"));
    assert_eq!(machine.history().path(), vec!["created", "auth", "committed"]);
}

#[test]
fn missing_finance_permission_parks_in_pending() {
    let Registered { mut machine, .. } = payment_machine();
    let mut payment = Payment {
        finance_permission: false,
        ..Payment::new()
    };

    machine.trigger("authorize", &mut payment).unwrap();
    machine.trigger_deep("commit", &mut payment).unwrap();
    assert!(machine.is_current_state("pending"));

    payment.finance_permission = true;
    machine.trigger("approve", &mut payment).unwrap();
    assert!(machine.is_current_state("committed"));
}

#[test]
fn trigger_outside_its_states_does_nothing() {
    let Registered { mut machine, .. } = payment_machine();
    let mut payment = Payment::new();

    let state = machine.trigger_deep("commit", &mut payment).unwrap();

    assert_eq!(state.name(), "created");
    assert_eq!(payment.state, "created");
}

#[test]
fn available_transitions_from_auth() {
    let Registered { mut machine, .. } = payment_machine();
    machine.trigger("authorize", &mut Payment::new()).unwrap();

    let targets: Vec<_> = machine
        .available_transitions()
        .iter()
        .map(|t| t.to().name())
        .collect();

    assert_eq!(targets, vec!["committed", "pending"]);
}

#[test]
fn unknown_trigger_is_an_error() {
    let Registered { mut machine, .. } = payment_machine();

    let result = machine.trigger("refund", &mut Payment::new());

    assert!(matches!(result, Err(MachineError::UnknownTrigger { .. })));
    assert!(machine.is_current_state("created"));
}

#[test]
fn reverse_trigger_registered_late() {
    let Registered {
        mut machine,
        reverse,
    } = payment_machine();
    let mut payment = Payment::new();
    machine.add_trigger("reverse", [reverse]).unwrap();

    machine.trigger("authorize", &mut payment).unwrap();
    machine.trigger_deep("commit", &mut payment).unwrap();
    machine.trigger("reverse", &mut payment).unwrap();

    assert!(machine.is_current_state("reversed"));
    assert!(machine.is_final());
}

#[test]
fn rehydrates_from_domain_state() {
    let Registered { mut machine, .. } = payment_machine();
    let mut payment = Payment::new();
    payment.state = "pending".to_string();

    let state_name = payment.state.clone();
    machine.set_current_state(&state_name).unwrap();
    machine.trigger("approve", &mut payment).unwrap();

    assert!(machine.is_current_state("committed"));
}

#[test]
fn checkpoint_survives_restart() {
    let Registered { mut machine, .. } = payment_machine();
    let mut payment = Payment::new();
    machine.trigger("authorize", &mut payment).unwrap();
    let stored = machine.checkpoint().to_binary().unwrap();

    let Registered {
        machine: mut resumed,
        ..
    } = payment_machine();
    resumed
        .restore(&Checkpoint::from_binary(&stored).unwrap())
        .unwrap();
    resumed.trigger_deep("commit", &mut payment).unwrap();

    assert!(resumed.is_current_state("committed"));
    assert_eq!(resumed.history().len(), 3);
}

#[test]
fn graph_lists_condition_names() {
    let Registered { machine, .. } = payment_machine();

    let graph = machine.graph();
    let commit_edges: Vec<_> = graph
        .edges_from("auth")
        .map(|e| (e.to.as_str(), e.conditions.clone()))
        .collect();

    assert_eq!(
        commit_edges,
        vec![
            ("committed", vec!["Accept the payment.".to_string()]),
            ("pending", vec!["Review the payment.".to_string()]),
        ]
    );
    assert_eq!(
        graph.states[1].actions,
        vec!["AuthAction".to_string(), "PendingAction".to_string()]
    );
}

#[test]
fn builder_produces_equivalent_machine() {
    let created = State::new("created", StateKind::Initial);
    let auth = State::new("auth", StateKind::Intermediate).with_action(AuthAction);
    let pending = State::new("pending", StateKind::Intermediate);
    let committed = State::new("committed", StateKind::Final);

    let mut builder = StateMachineBuilder::new("payment");
    let authorize = builder.add_transition(Transition::new(&created, &auth));
    let commit = builder.add_transition(Transition::new(&auth, &committed).when(FraudAcceptPayment));
    let review = builder.add_transition(Transition::new(&auth, &pending).when(FraudReviewCondition));
    let approve =
        builder.add_transition(Transition::new(&pending, &committed).when(FinancePermissions));
    builder.add_trigger("authorize", [authorize]);
    builder.add_trigger("commit", [commit, review, approve]);

    let mut machine = builder.build().unwrap();
    let mut payment = Payment::new();

    assert!(machine.is_current_state("created"));
    machine.trigger("authorize", &mut payment).unwrap();
    machine.trigger_deep("commit", &mut payment).unwrap();
    assert!(machine.is_current_state("committed"));
}
