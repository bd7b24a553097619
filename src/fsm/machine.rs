//! State machine that owns the node registry and runs the per-frame algorithm.

use super::config::MachineConfig;
use super::error::MachineError;
use super::node::{NodeId, StateNode};
use super::transition::{first_firing, push_unique, Transition};
use crate::checkpoint::Checkpoint;
use crate::core::{Event, Guard, State, StateHistory, StateTransition, TransitionKind};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, trace, warn};

/// Result of one [`StateMachine::update`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// No transition fired, or the firing one targeted the current node
    Stayed(NodeId),

    /// The current state changed this frame
    Transitioned {
        from: NodeId,
        to: NodeId,
        kind: TransitionKind,
    },
}

impl StepResult {
    /// The node that was current when the update hook ran.
    pub fn current(&self) -> NodeId {
        match *self {
            StepResult::Stayed(id) => id,
            StepResult::Transitioned { to, .. } => to,
        }
    }

    pub fn transitioned(&self) -> bool {
        matches!(self, StepResult::Transitioned { .. })
    }
}

/// A finite state machine driven by an external frame loop.
///
/// A machine has two phases. While building, states are registered and
/// transitions wired. [`start`](Self::start) seals the graph; from then on
/// [`update`](Self::update), [`fixed_update`](Self::fixed_update) and
/// [`dispatch_event`](Self::dispatch_event) drive the current state.
///
/// Each update evaluates the any-state transitions first, then the current
/// node's local transitions, both in insertion order; the first guard that
/// passes wins.
///
/// # Example
///
/// ```rust
/// use harrow::core::{Guard, State};
/// use harrow::fsm::StateMachine;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Idle;
/// struct Moving;
///
/// impl State for Idle {
///     fn name(&self) -> &str { "Idle" }
/// }
/// impl State for Moving {
///     fn name(&self) -> &str { "Moving" }
/// }
///
/// let input = Rc::new(Cell::new(false));
///
/// let mut machine = StateMachine::new();
/// let idle = machine.get_or_create_node(Idle)?;
/// let moving = machine.get_or_create_node(Moving)?;
/// let flag = Rc::clone(&input);
/// machine.add_transition(idle, moving, Guard::new(move || flag.get()))?;
///
/// machine.start("Idle")?;
/// machine.update()?;
/// assert!(machine.is_in_state("Idle"));
///
/// input.set(true);
/// machine.update()?;
/// assert!(machine.is_in_state("Moving"));
/// # Ok::<(), harrow::fsm::MachineError>(())
/// ```
pub struct StateMachine {
    config: MachineConfig,
    nodes: Vec<StateNode>,
    registry: HashMap<String, NodeId>,
    any_transitions: Vec<Transition>,
    current: Option<NodeId>,
    frame: u64,
    fixed_frame: u64,
    history: StateHistory,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let history = StateHistory::with_capacity(config.history_capacity);
        Self {
            config,
            nodes: Vec::new(),
            registry: HashMap::new(),
            any_transitions: Vec::new(),
            current: None,
            frame: 0,
            fixed_frame: 0,
            history,
        }
    }

    /// Start a fluent builder.
    pub fn builder() -> crate::builder::StateMachineBuilder {
        crate::builder::StateMachineBuilder::new()
    }

    // ------------------------------------------------------------------
    // Build phase
    // ------------------------------------------------------------------

    /// Return the node registered under `state.name()`, registering `state`
    /// if the name is new.
    ///
    /// The first instance registered under a name is kept; later instances
    /// with the same name are dropped.
    pub fn get_or_create_node<S>(&mut self, state: S) -> Result<NodeId, MachineError>
    where
        S: State + 'static,
    {
        self.insert_boxed(Box::new(state))
    }

    /// Register an already boxed state without boxing it a second time.
    pub(crate) fn insert_boxed(&mut self, state: Box<dyn State>) -> Result<NodeId, MachineError> {
        self.ensure_building("get_or_create_node")?;

        let name = state.name().to_string();
        if name.is_empty() {
            return Err(MachineError::EmptyStateName);
        }
        if let Some(&id) = self.registry.get(&name) {
            debug!(
                machine = %self.config.label,
                state = %name,
                "state already registered, keeping first instance"
            );
            return Ok(id);
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(StateNode::new(state));
        self.registry.insert(name, id);
        Ok(id)
    }

    /// Add a local transition from `from` to `to`.
    pub fn add_transition(
        &mut self,
        from: NodeId,
        to: NodeId,
        guard: Guard,
    ) -> Result<(), MachineError> {
        self.ensure_building("add_transition")?;
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;

        if !self.nodes[from.0].add_transition(to, guard) {
            debug!(
                machine = %self.config.label,
                from = %self.nodes[from.0].name(),
                to = %self.nodes[to.0].name(),
                "identical transition already present"
            );
        }
        Ok(())
    }

    /// Add a transition to `to` that may fire from every state.
    pub fn add_any_transition(&mut self, to: NodeId, guard: Guard) -> Result<(), MachineError> {
        self.ensure_building("add_any_transition")?;
        let to = self.resolve(to)?;

        if !push_unique(&mut self.any_transitions, Transition::new(to, guard)) {
            debug!(
                machine = %self.config.label,
                to = %self.nodes[to.0].name(),
                "identical any-state transition already present"
            );
        }
        Ok(())
    }

    /// Register both states (or reuse their nodes) and add a local transition
    /// between them.
    pub fn add_state_transition<A, B>(
        &mut self,
        from: A,
        to: B,
        guard: Guard,
    ) -> Result<(NodeId, NodeId), MachineError>
    where
        A: State + 'static,
        B: State + 'static,
    {
        self.ensure_building("add_state_transition")?;
        let from = self.get_or_create_node(from)?;
        let to = self.get_or_create_node(to)?;
        self.add_transition(from, to, guard)?;
        Ok((from, to))
    }

    /// Register `to` (or reuse its node) and add an any-state transition to it.
    pub fn add_any_state_transition<S>(
        &mut self,
        to: S,
        guard: Guard,
    ) -> Result<NodeId, MachineError>
    where
        S: State + 'static,
    {
        self.ensure_building("add_any_state_transition")?;
        let to = self.get_or_create_node(to)?;
        self.add_any_transition(to, guard)?;
        Ok(to)
    }

    /// Add a local transition between two registered states by name.
    pub fn add_transition_by_name(
        &mut self,
        from: &str,
        to: &str,
        guard: Guard,
    ) -> Result<(), MachineError> {
        self.ensure_building("add_transition_by_name")?;
        let from = self.node_id(from)?;
        let to = self.node_id(to)?;
        self.add_transition(from, to, guard)
    }

    /// Add an any-state transition to a registered state by name.
    pub fn add_any_transition_by_name(
        &mut self,
        to: &str,
        guard: Guard,
    ) -> Result<(), MachineError> {
        self.ensure_building("add_any_transition_by_name")?;
        let to = self.node_id(to)?;
        self.add_any_transition(to, guard)
    }

    // ------------------------------------------------------------------
    // Run phase
    // ------------------------------------------------------------------

    /// Enter the registered state `entry` and seal the transition graph.
    ///
    /// Fails with [`MachineError::AlreadyStarted`] when called twice; use
    /// [`restart`](Self::restart) to force an exit-then-enter.
    pub fn start(&mut self, entry: &str) -> Result<(), MachineError> {
        if let Some(current) = self.current {
            return Err(MachineError::AlreadyStarted {
                current: self.nodes[current.0].name().to_string(),
            });
        }
        let id = self.node_id(entry)?;

        info!(machine = %self.config.label, state = %entry, "state machine started");
        self.enter(None, id, TransitionKind::Start);
        Ok(())
    }

    /// Exit the current state and enter `entry`, running both hooks even when
    /// `entry` is already current.
    pub fn restart(&mut self, entry: &str) -> Result<(), MachineError> {
        let current = self.require_started("restart")?;
        let id = self.node_id(entry)?;

        info!(
            machine = %self.config.label,
            from = %self.nodes[current.0].name(),
            to = %entry,
            "state machine restarted"
        );
        self.nodes[current.0].state_mut().on_exit();
        self.enter(Some(current), id, TransitionKind::Restart);
        Ok(())
    }

    /// Per-frame entry point.
    ///
    /// Picks the first passing any-state transition, or failing that the
    /// first passing local transition of the current node. When it targets a
    /// different node, the current state exits and the target enters. The
    /// (possibly new) current state's update hook then runs exactly once.
    ///
    /// A panicking guard or hook propagates and aborts this call.
    pub fn update(&mut self) -> Result<StepResult, MachineError> {
        let current = self.require_started("update")?;

        let candidate = first_firing(&self.any_transitions)
            .map(|t| (t.target(), TransitionKind::Any))
            .or_else(|| {
                first_firing(self.nodes[current.0].transitions())
                    .map(|t| (t.target(), TransitionKind::Local))
            });

        let step = match candidate {
            Some((target, kind)) if target != current => {
                self.nodes[current.0].state_mut().on_exit();
                self.enter(Some(current), target, kind);
                StepResult::Transitioned {
                    from: current,
                    to: target,
                    kind,
                }
            }
            _ => StepResult::Stayed(current),
        };

        let active = step.current();
        trace!(
            machine = %self.config.label,
            state = %self.nodes[active.0].name(),
            frame = self.frame,
            "update"
        );
        self.nodes[active.0].state_mut().on_update();
        self.frame += 1;
        Ok(step)
    }

    /// Fixed-rate entry point. Never evaluates transitions.
    pub fn fixed_update(&mut self) -> Result<(), MachineError> {
        let current = self.require_started("fixed_update")?;
        self.nodes[current.0].state_mut().on_fixed_update();
        self.fixed_frame += 1;
        Ok(())
    }

    /// Route an out-of-band event to the current state only.
    pub fn dispatch_event(&mut self, event: &Event) -> Result<(), MachineError> {
        let current = self.require_started("dispatch_event")?;
        trace!(
            machine = %self.config.label,
            state = %self.nodes[current.0].name(),
            event = %event.tag(),
            "dispatch event"
        );
        self.nodes[current.0].state_mut().on_event(event);
        Ok(())
    }

    /// Capture the current position for later [`resume`](Self::resume).
    pub fn checkpoint(&self) -> Result<Checkpoint, MachineError> {
        let current = self.require_started("checkpoint")?;
        Ok(Checkpoint::new(
            self.config.label.clone(),
            self.nodes[current.0].name().to_string(),
            self.frame,
            self.fixed_frame,
            self.history.clone(),
        ))
    }

    /// Start a freshly wired machine at the position stored in `checkpoint`.
    ///
    /// The checkpointed state is entered (its enter hook runs), counters and
    /// history are restored, and a `Resume` record is appended.
    ///
    /// The checkpoint is validated first, so one assembled or decoded by hand
    /// gets the same version check as [`Checkpoint::from_json`].
    pub fn resume(&mut self, checkpoint: &Checkpoint) -> Result<(), MachineError> {
        self.ensure_building("resume")?;
        checkpoint
            .validate()
            .map_err(|err| MachineError::InvalidCheckpoint {
                reason: err.to_string(),
            })?;
        let id = self.node_id(&checkpoint.current_state)?;

        if checkpoint.label != self.config.label {
            warn!(
                machine = %self.config.label,
                checkpoint_label = %checkpoint.label,
                "resuming from a checkpoint taken on another machine"
            );
        }

        self.history = StateHistory::with_capacity(self.config.history_capacity);
        for transition in checkpoint.history.transitions() {
            self.history.record(transition.clone());
        }
        self.frame = checkpoint.frame;
        self.fixed_frame = checkpoint.fixed_frame;

        info!(
            machine = %self.config.label,
            state = %checkpoint.current_state,
            checkpoint = %checkpoint.id,
            "state machine resumed"
        );
        self.enter(None, id, TransitionKind::Resume);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.current.map(|id| self.nodes[id.0].name())
    }

    pub fn is_in_state(&self, name: &str) -> bool {
        self.current_state_name() == Some(name)
    }

    /// Look up the node registered under `name`.
    pub fn node_id(&self, name: &str) -> Result<NodeId, MachineError> {
        self.registry
            .get(name)
            .copied()
            .ok_or_else(|| MachineError::UnknownState {
                name: name.to_string(),
            })
    }

    pub fn node(&self, id: NodeId) -> Option<&StateNode> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Registered state names, in registration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(StateNode::name)
    }

    pub fn any_transitions(&self) -> &[Transition] {
        &self.any_transitions
    }

    /// Number of completed `update` calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of completed `fixed_update` calls.
    pub fn fixed_frame(&self) -> u64 {
        self.fixed_frame
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn ensure_building(&self, operation: &'static str) -> Result<(), MachineError> {
        match self.current {
            Some(_) => Err(MachineError::Sealed { operation }),
            None => Ok(()),
        }
    }

    fn require_started(&self, operation: &'static str) -> Result<NodeId, MachineError> {
        self.current.ok_or(MachineError::NotStarted { operation })
    }

    fn resolve(&self, id: NodeId) -> Result<NodeId, MachineError> {
        if id.0 < self.nodes.len() {
            Ok(id)
        } else {
            Err(MachineError::UnknownNode { id: id.0 })
        }
    }

    /// Make `to` current, run its enter hook and record the change. The
    /// caller is responsible for exiting the previous state.
    fn enter(&mut self, from: Option<NodeId>, to: NodeId, kind: TransitionKind) {
        let from_name = from.map(|id| self.nodes[id.0].name().to_string());
        let to_name = self.nodes[to.0].name().to_string();

        debug!(
            machine = %self.config.label,
            from = from_name.as_deref().unwrap_or("-"),
            to = %to_name,
            %kind,
            frame = self.frame,
            "state change"
        );

        self.current = Some(to);
        self.nodes[to.0].state_mut().on_enter();
        self.history.record(StateTransition {
            from: from_name,
            to: to_name,
            kind,
            frame: self.frame,
            timestamp: Utc::now(),
        });
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("label", &self.config.label)
            .field("current", &self.current_state_name())
            .field("nodes", &self.nodes)
            .field("any_transitions", &self.any_transitions.len())
            .field("frame", &self.frame)
            .finish()
    }
}
