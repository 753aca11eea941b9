//! Payment Workflow
//!
//! This example walks a payment through authorization, fraud review and
//! commit using triggers.
//!
//! Key concepts:
//! - States with entry actions (auth runs two actions)
//! - Named conditions implemented as trait objects
//! - Shallow vs deep trigger resolution
//! - Graph export for external rendering
//!
//! Run with: RUST_LOG=debug cargo run --example payment_workflow

use gearshift::core::{Action, Condition, HookError, State, StateKind};
use gearshift::{StateMachineBuilder, Transition};
use tracing_subscriber::EnvFilter;

// Payment entity
#[derive(Debug)]
struct Payment {
    id: u64,
    amount: u64,
    state: String,
    reviewer_approved: bool,
}

// Actions
struct AuthAction;

impl Action<Payment> for AuthAction {
    fn run(&self, payment: &mut Payment) -> Result<(), HookError> {
        println!("  Authorizing payment {} for {}", payment.id, payment.amount);
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
        println!("  Pending commit of payment state: {}", payment.state);
        Ok(())
    }

    fn name(&self) -> &str {
        "PendingAction"
    }
}

struct CommitAction;

impl Action<Payment> for CommitAction {
    fn run(&self, payment: &mut Payment) -> Result<(), HookError> {
        payment.state = "committed".to_string();
        println!("  Payment {} committed", payment.id);
        Ok(())
    }

    fn name(&self) -> &str {
        "CommitAction"
    }
}

// Conditions
struct FraudAccept;

impl Condition<Payment> for FraudAccept {
    fn name(&self) -> &str {
        "Accept the payment."
    }

    fn check(&self, payment: &Payment) -> Result<bool, HookError> {
        Ok(payment.amount < 1_000)
    }
}

struct FraudReview;

impl Condition<Payment> for FraudReview {
    fn name(&self) -> &str {
        "Review the payment."
    }

    fn check(&self, payment: &Payment) -> Result<bool, HookError> {
        Ok(payment.amount >= 1_000)
    }
}

struct FinancePermissions;

impl Condition<Payment> for FinancePermissions {
    fn name(&self) -> &str {
        "Has finance permissions."
    }

    fn check(&self, payment: &Payment) -> Result<bool, HookError> {
        Ok(payment.reviewer_approved)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Payment Workflow Example ===\n");

    let created = State::new("created", StateKind::Initial);
    let auth = State::new("auth", StateKind::Intermediate)
        .with_action(AuthAction)
        .with_action(PendingAction);
    let pending = State::new("pending", StateKind::Intermediate);
    let committed = State::new("committed", StateKind::Final).with_action(CommitAction);
    let reversed = State::new("reversed", StateKind::Final);

    let mut builder = StateMachineBuilder::new("payment").max_chain(16);
    let authorize = builder.add_transition(Transition::new(&created, &auth));
    let accept = builder.add_transition(Transition::new(&auth, &committed).when(FraudAccept));
    let review = builder.add_transition(Transition::new(&auth, &pending).when(FraudReview));
    let approve =
        builder.add_transition(Transition::new(&pending, &committed).when(FinancePermissions));
    let reverse = builder.add_transition(Transition::new(&committed, &reversed));
    builder.add_trigger("authorize", [authorize]);
    builder.add_trigger("commit", [accept, review, approve]);
    builder.add_trigger("approve", [approve]);
    builder.add_trigger("reverse", [reverse]);

    // Scenario 1: small payment commits straight away
    println!("Scenario 1: Small Payment");
    let mut machine = builder.build()?;
    let mut small = Payment {
        id: 1001,
        amount: 250,
        state: "created".to_string(),
        reviewer_approved: false,
    };
    machine.trigger("authorize", &mut small)?;
    let state = machine.trigger_deep("commit", &mut small)?;
    println!("  ✓ Final state: {}\n", state.name());

    // Scenario 2: large payment waits for review
    println!("Scenario 2: Large Payment (Shallow Commit)");
    let mut large = Payment {
        id: 1002,
        amount: 5_000,
        state: "created".to_string(),
        reviewer_approved: false,
    };
    machine.set_current_state("created")?;
    machine.trigger("authorize", &mut large)?;
    let state = machine.trigger("commit", &mut large)?;
    println!("  Parked in: {}", state.name());

    let available: Vec<_> = machine
        .available_transitions()
        .iter()
        .map(|t| format!("{} -> {}", t.from().name(), t.to().name()))
        .collect();
    println!("  Available: {}", available.join(", "));

    large.reviewer_approved = true;
    let state = machine.trigger("approve", &mut large)?;
    println!("  ✓ Approved, now: {}\n", state.name());

    // Scenario 3: reversal
    println!("Scenario 3: Reverse");
    let state = machine.trigger("reverse", &mut large)?;
    println!("  ✓ Final state: {} (final: {})\n", state.name(), state.is_final());

    println!("History:");
    for record in machine.history().transitions() {
        println!("  {} -> {} via {}", record.from, record.to, record.trigger);
    }

    println!("\nGraph:");
    println!("{}", machine.graph().to_json()?);

    Ok(())
}
