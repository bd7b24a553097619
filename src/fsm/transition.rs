//! Guarded edges between nodes.

use super::node::NodeId;
use crate::core::Guard;

/// An edge to a target node, gated by a guard.
///
/// Transitions are immutable once built. The target is a registry key, so a
/// transition does not own or validate the node it points at.
#[derive(Clone, Debug)]
pub struct Transition {
    target: NodeId,
    guard: Guard,
}

impl Transition {
    pub fn new(target: NodeId, guard: Guard) -> Self {
        Self { target, guard }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// Evaluate the guard now.
    pub fn can_fire(&self) -> bool {
        self.guard.check()
    }

    /// Whether both transitions have the same target and share one guard
    /// instance. Separately constructed guards never match.
    pub fn same_edge(&self, other: &Transition) -> bool {
        self.target == other.target && self.guard.ptr_eq(&other.guard)
    }
}

/// Append `transition` unless an identical edge is already present.
/// Returns whether it was added.
pub(crate) fn push_unique(transitions: &mut Vec<Transition>, transition: Transition) -> bool {
    if transitions.iter().any(|t| t.same_edge(&transition)) {
        return false;
    }
    transitions.push(transition);
    true
}

/// First transition, in insertion order, whose guard passes.
pub(crate) fn first_firing(transitions: &[Transition]) -> Option<&Transition> {
    transitions.iter().find(|t| t.can_fire())
}
