//! Builder API for creating graph rules.

use crate::validation::rules::{GraphRules, ValidationCheck};
use crate::validation::view::GraphView;
use crate::validation::violations::{GraphViolation, ViolationStrategy};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating graph rules. Every rule is off until enabled.
pub struct ValidationBuilder {
    require_reachable: bool,
    forbid_self_transitions: bool,
    require_exits: Option<Vec<String>>,
    required_checks: Vec<ValidationCheck>,
    on_violation: ViolationStrategy,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self {
            require_reachable: false,
            forbid_self_transitions: false,
            require_exits: None,
            required_checks: Vec::new(),
            on_violation: ViolationStrategy::Abort,
        }
    }

    /// Every state must be reachable from the entry state
    pub fn require_reachable(mut self) -> Self {
        self.require_reachable = true;
        self
    }

    /// Reject local transitions from a state to itself
    pub fn forbid_self_transitions(mut self) -> Self {
        self.forbid_self_transitions = true;
        self
    }

    /// Every state except the listed terminal ones needs a way out
    pub fn require_exits<I, N>(mut self, terminal: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.require_exits = Some(terminal.into_iter().map(Into::into).collect());
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&GraphView, &str) -> Validation<(), NonEmptyVec<GraphViolation>> + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&GraphView) -> bool + 'static,
    {
        let check = move |graph: &GraphView, _entry: &str| {
            if predicate(graph) {
                Validation::success(())
            } else {
                Validation::fail(GraphViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Set violation handling strategy
    pub fn on_violation(mut self, strategy: ViolationStrategy) -> Self {
        self.on_violation = strategy;
        self
    }

    /// Build the graph rules
    pub fn build(self) -> GraphRules {
        GraphRules {
            require_reachable: self.require_reachable,
            forbid_self_transitions: self.forbid_self_transitions,
            require_exits: self.require_exits,
            required_checks: self.required_checks,
            on_violation: self.on_violation,
        }
    }
}

impl Default for ValidationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
