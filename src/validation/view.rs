//! Read-only view of a transition graph handed to validation checks.

use crate::fsm::{MachineError, NodeId, StateMachine};
use std::collections::{BTreeSet, VecDeque};

/// Names and edges of a machine, detached from its states and guards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphView {
    states: Vec<String>,
    local: Vec<Vec<usize>>,
    any: Vec<usize>,
}

impl GraphView {
    /// Build a view from explicit names and edges.
    ///
    /// ```rust
    /// use harrow::validation::GraphView;
    ///
    /// let graph = GraphView::from_edges(
    ///     &["Idle", "Moving", "Dead"],
    ///     &[("Idle", "Moving"), ("Moving", "Idle")],
    ///     &["Dead"],
    /// )?;
    /// assert!(graph.reachable_from("Idle").contains("Dead"));
    /// # Ok::<(), harrow::fsm::MachineError>(())
    /// ```
    pub fn from_edges(
        states: &[&str],
        local: &[(&str, &str)],
        any: &[&str],
    ) -> Result<Self, MachineError> {
        let mut view = Self {
            states: states.iter().map(|s| s.to_string()).collect(),
            local: vec![Vec::new(); states.len()],
            any: Vec::new(),
        };
        for (from, to) in local {
            let from = view.require(from)?;
            let to = view.require(to)?;
            view.local[from].push(to);
        }
        for to in any {
            let to = view.require(to)?;
            view.any.push(to);
        }
        Ok(view)
    }

    fn require(&self, name: &str) -> Result<usize, MachineError> {
        self.index_of(name).ok_or_else(|| MachineError::UnknownState {
            name: name.to_string(),
        })
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s == name)
    }

    /// Targets of the local transitions leaving `name`, in insertion order.
    pub fn local_targets(&self, name: &str) -> Vec<&str> {
        self.index_of(name)
            .map(|i| self.local[i].iter().map(|&t| self.states[t].as_str()).collect())
            .unwrap_or_default()
    }

    /// Targets of the any-state transitions, in insertion order.
    pub fn any_targets(&self) -> Vec<&str> {
        self.any.iter().map(|&t| self.states[t].as_str()).collect()
    }

    /// Whether some transition can move the machine out of `name`.
    pub fn has_exit(&self, name: &str) -> bool {
        let Some(i) = self.index_of(name) else {
            return false;
        };
        self.local[i].iter().chain(&self.any).any(|&t| t != i)
    }

    /// States reachable from `entry` (including `entry`) through local and
    /// any-state transitions, ignoring guards.
    pub fn reachable_from(&self, entry: &str) -> BTreeSet<&str> {
        let mut seen = BTreeSet::new();
        let Some(start) = self.index_of(entry) else {
            return seen;
        };

        let mut visited = vec![false; self.states.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(i) = queue.pop_front() {
            seen.insert(self.states[i].as_str());
            for &t in self.local[i].iter().chain(&self.any) {
                if !visited[t] {
                    visited[t] = true;
                    queue.push_back(t);
                }
            }
        }
        seen
    }
}

impl From<&StateMachine> for GraphView {
    fn from(machine: &StateMachine) -> Self {
        let states: Vec<String> = machine.state_names().map(str::to_string).collect();
        let local = (0..machine.node_count())
            .map(|i| {
                machine
                    .node(NodeId(i))
                    .map(|node| node.transitions().iter().map(|t| t.target().index()).collect())
                    .unwrap_or_default()
            })
            .collect();
        let any = machine
            .any_transitions()
            .iter()
            .map(|t| t.target().index())
            .collect();
        Self { states, local, any }
    }
}
