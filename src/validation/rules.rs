//! Graph rules checked with Validation.

use crate::validation::view::GraphView;
use crate::validation::violations::{GraphViolation, ViolationStrategy};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for validation check functions
pub type ValidationCheck =
    Box<dyn Fn(&GraphView, &str) -> Validation<(), NonEmptyVec<GraphViolation>>>;

/// Structural rules for a transition graph.
/// Uses Validation to accumulate ALL violations.
pub struct GraphRules {
    pub(crate) require_reachable: bool,
    pub(crate) forbid_self_transitions: bool,
    pub(crate) require_exits: Option<Vec<String>>,
    pub(crate) required_checks: Vec<ValidationCheck>,
    pub(crate) on_violation: ViolationStrategy,
}

impl GraphRules {
    /// Check every rule against `graph` started at `entry`.
    /// Returns Validation::Failure with ALL violations if any fail.
    pub fn validate(
        &self,
        graph: &GraphView,
        entry: &str,
    ) -> Validation<(), NonEmptyVec<GraphViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<GraphViolation>>> = Vec::new();

        if !graph.contains(entry) {
            checks.push(Validation::fail(GraphViolation::UnknownEntry {
                entry: entry.to_string(),
            }));
        } else if self.require_reachable {
            let reachable = graph.reachable_from(entry);
            for state in graph.states() {
                if !reachable.contains(state.as_str()) {
                    checks.push(Validation::fail(GraphViolation::Unreachable {
                        state: state.clone(),
                        entry: entry.to_string(),
                    }));
                }
            }
        }

        if self.forbid_self_transitions {
            for state in graph.states() {
                if graph.local_targets(state).contains(&state.as_str()) {
                    checks.push(Validation::fail(GraphViolation::SelfTransition {
                        state: state.clone(),
                    }));
                }
            }
        }

        if let Some(terminal) = &self.require_exits {
            for state in graph.states() {
                if !terminal.contains(state) && !graph.has_exit(state) {
                    checks.push(Validation::fail(GraphViolation::DeadEnd {
                        state: state.clone(),
                    }));
                }
            }
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(graph, entry));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn violation_strategy(&self) -> ViolationStrategy {
        self.on_violation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::builder::ValidationBuilder;

    fn player() -> GraphView {
        GraphView::from_edges(
            &[
                "Movement",
                "Attacking",
                "Watering",
                "Weeding",
                "TakingDamage",
                "Dying",
            ],
            &[
                ("Movement", "Attacking"),
                ("Movement", "Watering"),
                ("Movement", "Weeding"),
                ("Attacking", "Movement"),
                ("Watering", "Movement"),
                ("Weeding", "Movement"),
                ("TakingDamage", "Movement"),
            ],
            &["TakingDamage", "Dying"],
        )
        .unwrap()
    }

    #[test]
    fn well_formed_graph_passes() {
        let rules = ValidationBuilder::new()
            .require_reachable()
            .forbid_self_transitions()
            .require_exits(["Dying"])
            .build();

        assert!(rules.validate(&player(), "Movement").is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let graph = GraphView::from_edges(
            &["Idle", "Loop", "Orphan"],
            &[("Idle", "Loop"), ("Loop", "Loop")],
            &[],
        )
        .unwrap();

        let rules = ValidationBuilder::new()
            .require_reachable()
            .forbid_self_transitions()
            .require_exits(Vec::<String>::new())
            .require_pred(|_graph| false, "Custom check always fails".to_string())
            .build();

        match rules.validate(&graph, "Idle") {
            Validation::Failure(errors) => {
                let errors: Vec<GraphViolation> = errors.iter().cloned().collect();
                assert!(errors.contains(&GraphViolation::Unreachable {
                    state: "Orphan".to_string(),
                    entry: "Idle".to_string(),
                }));
                assert!(errors.contains(&GraphViolation::SelfTransition {
                    state: "Loop".to_string(),
                }));
                assert!(errors.contains(&GraphViolation::DeadEnd {
                    state: "Loop".to_string(),
                }));
                assert!(errors.contains(&GraphViolation::DeadEnd {
                    state: "Orphan".to_string(),
                }));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, GraphViolation::CustomCheckFailed { .. })));
                assert_eq!(errors.len(), 5);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn unknown_entry_is_reported() {
        let rules = ValidationBuilder::new().require_reachable().build();

        match rules.validate(&player(), "Sleeping") {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, GraphViolation::UnknownEntry { .. })));
            }
            Validation::Success(_) => panic!("Expected failure for unknown entry"),
        }
    }

    #[test]
    fn rules_off_by_default() {
        let graph = GraphView::from_edges(&["A", "B"], &[("A", "A")], &[]).unwrap();
        let rules = ValidationBuilder::new().build();

        assert!(rules.validate(&graph, "A").is_success());
    }

    #[test]
    fn custom_validation_check_sees_entry() {
        let rules = ValidationBuilder::new()
            .require(|graph: &GraphView, entry: &str| {
                if graph.any_targets().contains(&entry) {
                    Validation::fail(GraphViolation::CustomCheckFailed {
                        message: format!("entry '{entry}' is an interrupt target"),
                    })
                } else {
                    Validation::success(())
                }
            })
            .build();

        assert!(rules.validate(&player(), "Movement").is_success());
        assert!(rules.validate(&player(), "Dying").is_failure());
    }

    #[test]
    fn violation_strategy_is_stored() {
        let rules = ValidationBuilder::new()
            .on_violation(ViolationStrategy::IgnoreAndLog)
            .build();

        assert_eq!(rules.violation_strategy(), ViolationStrategy::IgnoreAndLog);
    }
}
