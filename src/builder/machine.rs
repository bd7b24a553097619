//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Guard, State};
use crate::fsm::{MachineConfig, StateMachine};
use crate::validation::{GraphRules, GraphView, GraphViolation, ViolationStrategy};
use stillwater::validation::Validation;
use tracing::warn;

enum PendingTransition {
    Local { from: String, to: String, guard: Guard },
    Any { to: String, guard: Guard },
}

/// Builder for constructing started state machines with a fluent API.
///
/// States are registered in the order given, transitions are wired by name
/// in the order given, the graph is optionally validated, and the machine is
/// started at the initial state.
///
/// # Example
///
/// ```rust
/// use harrow::builder::StateMachineBuilder;
/// use harrow::core::{Guard, State};
///
/// struct Friendly;
/// struct Wandering;
///
/// impl State for Friendly {
///     fn name(&self) -> &str { "Friendly" }
/// }
/// impl State for Wandering {
///     fn name(&self) -> &str { "Wandering" }
/// }
///
/// let machine = StateMachineBuilder::new()
///     .state(Friendly)
///     .state(Wandering)
///     .transition("Friendly", "Wandering", Guard::always())
///     .initial("Friendly")
///     .build()
///     .unwrap();
///
/// assert!(machine.is_in_state("Friendly"));
/// ```
pub struct StateMachineBuilder {
    config: MachineConfig,
    initial: Option<String>,
    states: Vec<Box<dyn State>>,
    transitions: Vec<PendingTransition>,
    rules: Option<GraphRules>,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
            rules: None,
        }
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a state. Later states reusing a name are ignored.
    pub fn state<S: State + 'static>(mut self, state: S) -> Self {
        self.states.push(Box::new(state));
        self
    }

    /// Add a local transition between two registered states.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        guard: Guard,
    ) -> Self {
        self.transitions.push(PendingTransition::Local {
            from: from.into(),
            to: to.into(),
            guard,
        });
        self
    }

    /// Add an any-state transition to a registered state.
    pub fn any_transition(mut self, to: impl Into<String>, guard: Guard) -> Self {
        self.transitions.push(PendingTransition::Any {
            to: to.into(),
            guard,
        });
        self
    }

    /// Set the entry state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Validate the wired graph before starting.
    pub fn validate_with(mut self, rules: GraphRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Build and start the state machine.
    /// Returns an error if required fields are missing, a transition names
    /// an unregistered state, or validation aborts.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        let Self {
            config,
            initial,
            states,
            transitions,
            rules,
        } = self;

        let initial = initial.ok_or(BuildError::MissingInitialState)?;
        if states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = StateMachine::with_config(config);
        for state in states {
            machine.insert_boxed(state)?;
        }
        for transition in transitions {
            match transition {
                PendingTransition::Local { from, to, guard } => {
                    machine.add_transition_by_name(&from, &to, guard)?
                }
                PendingTransition::Any { to, guard } => {
                    machine.add_any_transition_by_name(&to, guard)?
                }
            }
        }

        if let Some(rules) = rules {
            check_graph(&machine, &rules, &initial)?;
        }

        machine.start(&initial)?;
        Ok(machine)
    }
}

fn check_graph(machine: &StateMachine, rules: &GraphRules, entry: &str) -> Result<(), BuildError> {
    let Validation::Failure(errors) = rules.validate(&GraphView::from(machine), entry) else {
        return Ok(());
    };
    let violations: Vec<GraphViolation> = errors.iter().cloned().collect();

    match rules.violation_strategy() {
        ViolationStrategy::Abort => Err(BuildError::InvalidGraph { violations }),
        ViolationStrategy::IgnoreAndLog => {
            for violation in &violations {
                warn!(machine = %machine.config().label, %violation, "graph violation ignored");
            }
            Ok(())
        }
    }
}

impl Default for StateMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::MachineError;
    use crate::validation::ValidationBuilder;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Named(&'static str);

    impl State for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::new().state(Named("A")).build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_states() {
        let result = StateMachineBuilder::new().initial("A").build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn unknown_initial_state_fails() {
        let result = StateMachineBuilder::new()
            .state(Named("A"))
            .initial("B")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Machine(MachineError::UnknownState { ref name })) if name == "B"
        ));
    }

    #[test]
    fn transition_to_unregistered_state_fails() {
        let result = StateMachineBuilder::new()
            .state(Named("A"))
            .transition("A", "Ghost", Guard::always())
            .initial("A")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Machine(MachineError::UnknownState { ref name })) if name == "Ghost"
        ));
    }

    #[test]
    fn fluent_api_builds_started_machine() {
        let dead = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dead);

        let mut machine = StateMachineBuilder::new()
            .config(MachineConfig::new().label("player"))
            .state(Named("Idle"))
            .state(Named("Moving"))
            .state(Named("Dead"))
            .transition("Idle", "Moving", Guard::always())
            .any_transition("Dead", Guard::new(move || flag.get()))
            .initial("Idle")
            .build()
            .unwrap();

        assert!(machine.is_in_state("Idle"));
        assert_eq!(machine.config().label, "player");
        assert_eq!(machine.node_count(), 3);

        machine.update().unwrap();
        assert!(machine.is_in_state("Moving"));

        dead.set(true);
        machine.update().unwrap();
        assert!(machine.is_in_state("Dead"));
    }

    #[test]
    fn duplicate_state_names_collapse() {
        let machine = StateMachineBuilder::new()
            .state(Named("A"))
            .state(Named("A"))
            .initial("A")
            .build()
            .unwrap();

        assert_eq!(machine.node_count(), 1);
    }

    #[test]
    fn abort_strategy_rejects_invalid_graph() {
        let result = StateMachineBuilder::new()
            .state(Named("A"))
            .state(Named("Orphan"))
            .validate_with(ValidationBuilder::new().require_reachable().build())
            .initial("A")
            .build();

        match result {
            Err(BuildError::InvalidGraph { violations }) => {
                assert_eq!(
                    violations,
                    vec![GraphViolation::Unreachable {
                        state: "Orphan".to_string(),
                        entry: "A".to_string(),
                    }]
                );
            }
            other => panic!("Expected InvalidGraph, got {:?}", other.map(|m| m.node_count())),
        }
    }

    #[test]
    fn ignore_strategy_builds_anyway() {
        let machine = StateMachineBuilder::new()
            .state(Named("A"))
            .state(Named("Orphan"))
            .validate_with(
                ValidationBuilder::new()
                    .require_reachable()
                    .on_violation(ViolationStrategy::IgnoreAndLog)
                    .build(),
            )
            .initial("A")
            .build();

        assert!(machine.is_ok());
    }

    #[test]
    fn machine_builder_shortcut() {
        let machine = StateMachine::builder()
            .state(Named("Only"))
            .initial("Only")
            .build()
            .unwrap();

        assert!(machine.is_started());
    }
}
