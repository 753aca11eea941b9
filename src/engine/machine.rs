//! State machine that resolves triggers into guarded transitions.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{State, StateHistory, TransitionRecord};
use crate::engine::error::MachineError;
use crate::engine::transition::{Transition, TransitionId};
use crate::graph::MachineGraph;
use crate::validation::{initial_states, ConfigViolation};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use uuid::Uuid;

/// How far a trigger call walks the machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Fire at most one transition.
    #[default]
    Shallow,

    /// Keep firing transitions from the trigger's candidates until none
    /// applies to the active state.
    Deep,
}

/// A named state machine tracking one entity.
///
/// States are registered implicitly as transition endpoints and referred to
/// by name; transitions are referred to by [`TransitionId`]. Domain data is
/// never stored in the machine: each trigger call receives the context `C`
/// that conditions and actions operate on.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{State, StateKind};
/// use gearshift::{StateMachine, Transition};
///
/// let created: State<()> = State::new("created", StateKind::Initial);
/// let auth = State::new("auth", StateKind::Intermediate);
///
/// let mut machine = StateMachine::new("payment");
/// let authorize = machine.add_transition(Transition::new(&created, &auth)).unwrap();
/// machine.add_trigger("authorize", [authorize]).unwrap();
///
/// assert!(machine.is_current_state("created"));
/// machine.trigger("authorize", &mut ()).unwrap();
/// assert!(machine.is_current_state("auth"));
/// ```
pub struct StateMachine<C> {
    id: Uuid,
    name: String,
    states: Vec<State<C>>,
    state_index: HashMap<String, usize>,
    transitions: Vec<Transition<C>>,
    triggers: BTreeMap<String, Vec<TransitionId>>,
    active: Option<String>,
    // Set once the active state was chosen explicitly rather than resolved
    // from the Initial state.
    pinned: bool,
    history: StateHistory,
    max_chain: Option<usize>,
}

impl<C> StateMachine<C> {
    /// Create an empty machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub(crate) fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            states: Vec::new(),
            state_index: HashMap::new(),
            transitions: Vec::new(),
            triggers: BTreeMap::new(),
            active: None,
            pinned: false,
            history: StateHistory::new(),
            max_chain: None,
        }
    }

    /// Cap the number of transitions a single deep trigger call may fire.
    /// Shallow calls are unaffected.
    pub fn set_max_chain(&mut self, limit: Option<usize>) {
        self.max_chain = limit;
    }

    pub fn max_chain(&self) -> Option<usize> {
        self.max_chain
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a transition and both of its endpoint states.
    ///
    /// A state that is already registered under the same name is replaced by
    /// the incoming definition and keeps its position. Until a transition
    /// fires or the state is set explicitly, the active state follows the
    /// registry's Initial state, so redefining it as non-Initial hands the
    /// role to the next Initial state registered. A second, distinct Initial
    /// state is rejected and leaves the machine unchanged.
    pub fn add_transition(
        &mut self,
        transition: Transition<C>,
    ) -> Result<TransitionId, MachineError> {
        let initial = initial_states(
            self.states
                .iter()
                .chain([transition.from(), transition.to()]),
        );
        if initial.len() > 1 {
            return Err(ConfigViolation::MultipleInitialStates { states: initial }.into());
        }

        self.register_state(transition.from().clone());
        self.register_state(transition.to().clone());

        if !self.pinned && self.history.is_empty() {
            let resolved = initial.into_iter().next();
            if resolved != self.active {
                tracing::debug!(
                    machine = %self.name,
                    state = resolved.as_deref().unwrap_or_default(),
                    "initial state resolved"
                );
                self.active = resolved;
            }
        }

        let id = TransitionId::new(self.id, self.transitions.len());
        self.transitions.push(transition);
        Ok(id)
    }

    fn register_state(&mut self, state: State<C>) {
        match self.state_index.get(state.name()) {
            Some(&index) => self.states[index] = state,
            None => {
                self.state_index
                    .insert(state.name().to_string(), self.states.len());
                self.states.push(state);
            }
        }
    }

    /// Register a trigger over already registered transitions.
    ///
    /// Fails on the first transition that is not registered on this machine;
    /// nothing is stored in that case. A trigger with the same name is
    /// replaced.
    pub fn add_trigger<I>(
        &mut self,
        name: impl Into<String>,
        transitions: I,
    ) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = TransitionId>,
    {
        let name = name.into();
        let transitions: Vec<TransitionId> = transitions.into_iter().collect();

        if let Some(unknown) = transitions
            .iter()
            .find(|id| !id.belongs_to(self.id, self.transitions.len()))
        {
            return Err(ConfigViolation::UnknownTransition {
                trigger: name,
                transition: *unknown,
            }
            .into());
        }

        self.triggers.insert(name, transitions);
        Ok(())
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The active state.
    pub fn current_state(&self) -> Result<&State<C>, MachineError> {
        let name = self.active.as_deref().ok_or_else(|| MachineError::NoActiveState {
            machine: self.name.clone(),
        })?;
        self.state(name).ok_or_else(|| MachineError::UnknownState {
            state: name.to_string(),
        })
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_current_state(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
    }

    /// Whether the active state is a Final state.
    pub fn is_final(&self) -> bool {
        self.current_state().map(|s| s.is_final()).unwrap_or(false)
    }

    pub fn state(&self, name: &str) -> Option<&State<C>> {
        self.state_index.get(name).map(|&index| &self.states[index])
    }

    /// Registered states in first-seen order.
    pub fn states(&self) -> &[State<C>] {
        &self.states
    }

    /// Registered transitions in registration order.
    pub fn transitions(&self) -> &[Transition<C>] {
        &self.transitions
    }

    pub fn transition(&self, id: TransitionId) -> Option<&Transition<C>> {
        if id.belongs_to(self.id, self.transitions.len()) {
            self.transitions.get(id.index())
        } else {
            None
        }
    }

    /// Identifiers of all registered transitions in registration order.
    pub fn transition_ids(&self) -> impl Iterator<Item = TransitionId> + '_ {
        (0..self.transitions.len()).map(move |index| TransitionId::new(self.id, index))
    }

    /// Registered triggers by name.
    pub fn triggers(&self) -> &BTreeMap<String, Vec<TransitionId>> {
        &self.triggers
    }

    /// Transitions leaving the active state, in registration order.
    pub fn available_transitions(&self) -> Vec<&Transition<C>> {
        match self.active.as_deref() {
            Some(active) => self
                .transitions
                .iter()
                .filter(|t| t.starts_at(active))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Serialisable description of the machine for renderers.
    pub fn graph(&self) -> MachineGraph {
        MachineGraph::from_machine(self)
    }

    // =========================================================================
    // Trigger Resolution
    // =========================================================================

    /// Fire at most one transition of the named trigger.
    pub fn trigger(&mut self, trigger: &str, ctx: &mut C) -> Result<&State<C>, MachineError> {
        self.fire(trigger, Resolution::Shallow, ctx)
    }

    /// Fire transitions of the named trigger until none applies.
    pub fn trigger_deep(&mut self, trigger: &str, ctx: &mut C) -> Result<&State<C>, MachineError> {
        self.fire(trigger, Resolution::Deep, ctx)
    }

    /// Resolve a trigger against the active state and return the resulting
    /// state.
    ///
    /// Each pass scans the trigger's transitions in declared order and fires
    /// the first one that leaves the active state and whose conditions all
    /// hold. Deep resolution repeats the pass from the top while the previous
    /// one fired.
    pub fn fire(
        &mut self,
        trigger: &str,
        resolution: Resolution,
        ctx: &mut C,
    ) -> Result<&State<C>, MachineError> {
        let candidates = self.triggers.get(trigger).cloned().ok_or_else(|| {
            MachineError::UnknownTrigger {
                trigger: trigger.to_string(),
            }
        })?;

        let mut fired = 0usize;
        loop {
            if let (Resolution::Deep, Some(limit)) = (resolution, self.max_chain) {
                if fired >= limit {
                    if self.would_fire(&candidates, ctx)? {
                        tracing::warn!(
                            machine = %self.name,
                            trigger,
                            limit,
                            "deep trigger exceeded chain limit"
                        );
                        return Err(MachineError::ChainLimitExceeded {
                            trigger: trigger.to_string(),
                            limit,
                        });
                    }
                    break;
                }
            }

            if self.resolve_pass(trigger, &candidates, ctx)?.is_none() {
                break;
            }
            fired += 1;

            if resolution == Resolution::Shallow {
                break;
            }
        }

        tracing::debug!(
            machine = %self.name,
            trigger,
            fired,
            state = self.active.as_deref().unwrap_or_default(),
            "trigger resolved"
        );
        self.current_state()
    }

    /// Whether a pass would fire a transition. Evaluates conditions but runs
    /// no actions and leaves the active state alone.
    fn would_fire(&self, candidates: &[TransitionId], ctx: &C) -> Result<bool, MachineError> {
        let active = self
            .active
            .as_deref()
            .ok_or_else(|| MachineError::NoActiveState {
                machine: self.name.clone(),
            })?;

        for id in candidates {
            let Some(transition) = self.transitions.get(id.index()) else {
                continue;
            };
            if transition.starts_at(active) && transition.conditions_hold(ctx)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// One scan over the candidates. Returns the transition that fired.
    fn resolve_pass(
        &mut self,
        trigger: &str,
        candidates: &[TransitionId],
        ctx: &mut C,
    ) -> Result<Option<TransitionId>, MachineError> {
        let active = self
            .active
            .clone()
            .ok_or_else(|| MachineError::NoActiveState {
                machine: self.name.clone(),
            })?;

        for &id in candidates {
            let Some(transition) = self.transitions.get(id.index()) else {
                continue;
            };
            if !transition.starts_at(&active) {
                continue;
            }
            if !transition.conditions_hold(ctx)? {
                tracing::trace!(trigger, %id, "candidate skipped");
                continue;
            }

            let destination = transition.to().name().to_string();
            self.enter(&destination, ctx)?;
            self.commit(trigger, active, destination);
            return Ok(Some(id));
        }

        Ok(None)
    }

    /// Run the actions of the registered state `name` in order.
    fn enter(&self, name: &str, ctx: &mut C) -> Result<(), MachineError> {
        let state = self.state(name).ok_or_else(|| MachineError::UnknownState {
            state: name.to_string(),
        })?;
        for action in state.actions() {
            action
                .run(ctx)
                .map_err(|source| MachineError::ActionFailed {
                    state: state.name().to_string(),
                    action: action.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    fn commit(&mut self, trigger: &str, from: String, to: String) {
        tracing::debug!(machine = %self.name, trigger, from = %from, to = %to, "transition fired");
        self.history = self.history.record(TransitionRecord {
            from,
            to: to.clone(),
            trigger: trigger.to_string(),
            timestamp: Utc::now(),
        });
        self.active = Some(to);
    }

    // =========================================================================
    // Rehydration
    // =========================================================================

    /// Move the active state directly, without running actions.
    ///
    /// Used to resume a machine for an entity whose state was stored
    /// elsewhere.
    pub fn set_current_state(&mut self, name: &str) -> Result<&State<C>, MachineError> {
        if !self.state_index.contains_key(name) {
            return Err(MachineError::UnknownState {
                state: name.to_string(),
            });
        }
        self.active = Some(name.to_string());
        self.pinned = true;
        self.current_state()
    }

    /// Capture the active state and history.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            self.name.clone(),
            self.active.clone(),
            self.history.clone(),
        )
    }

    /// Resume from a checkpoint taken from a machine with the same name and
    /// states.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        checkpoint.validate()?;

        if checkpoint.machine != self.name {
            return Err(CheckpointError::MachineMismatch {
                expected: self.name.clone(),
                found: checkpoint.machine.clone(),
            });
        }
        if let Some(state) = &checkpoint.current_state {
            if !self.state_index.contains_key(state) {
                return Err(CheckpointError::UnknownState {
                    state: state.clone(),
                });
            }
        }

        self.active = checkpoint.current_state.clone();
        self.pinned = true;
        self.history = checkpoint.history.clone();
        Ok(())
    }
}

impl<C> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .field("triggers", &self.triggers)
            .finish()
    }
}
