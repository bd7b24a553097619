//! Registry entries wrapping one state and its local transitions.

use super::transition::{push_unique, Transition};
use crate::core::{Guard, State};
use std::fmt;

/// Index of a node inside the machine that created it.
///
/// Ids are only meaningful for the machine that handed them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A state plus its outgoing local transitions, in insertion order.
pub struct StateNode {
    state: Box<dyn State>,
    transitions: Vec<Transition>,
}

impl StateNode {
    pub(crate) fn new(state: Box<dyn State>) -> Self {
        Self {
            state,
            transitions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    pub fn state(&self) -> &dyn State {
        self.state.as_ref()
    }

    pub(crate) fn state_mut(&mut self) -> &mut dyn State {
        self.state.as_mut()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Append an edge. An edge with the same target and the same guard
    /// instance collapses into the existing one; returns whether it was added.
    pub(crate) fn add_transition(&mut self, target: NodeId, guard: Guard) -> bool {
        push_unique(&mut self.transitions, Transition::new(target, guard))
    }
}

impl fmt::Debug for StateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("name", &self.name())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
