//! State transition history tracking.
//!
//! Keeps a bounded, ordered record of the state changes a machine performed,
//! for diagnostics and checkpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Why the current state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// The machine entered its entry state.
    Start,
    /// A local transition of the previous state fired.
    Local,
    /// An any-state transition fired.
    Any,
    /// The controller forced an exit-then-enter.
    Restart,
    /// The machine was resumed from a checkpoint.
    Resume,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Start => "start",
            Self::Local => "local",
            Self::Any => "any",
            Self::Restart => "restart",
            Self::Resume => "resume",
        };
        f.write_str(label)
    }
}

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use harrow::core::{StateTransition, TransitionKind};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Some("Movement".to_string()),
///     to: "Attacking".to_string(),
///     kind: TransitionKind::Local,
///     frame: 12,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "Attacking");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left; `None` when nothing was current before
    pub from: Option<String>,
    /// The state that became current
    pub to: String,
    /// What triggered the change
    pub kind: TransitionKind,
    /// Update frame during which the change happened
    pub frame: u64,
    /// Wall-clock time of the change
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions, bounded to a fixed capacity.
///
/// When full, recording a transition evicts the oldest one. A capacity of
/// zero disables recording.
///
/// # Example
///
/// ```rust
/// use harrow::core::{StateHistory, StateTransition, TransitionKind};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(StateTransition {
///     from: None,
///     to: "Idle".to_string(),
///     kind: TransitionKind::Start,
///     frame: 0,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some("Idle".to_string()),
///     to: "Moving".to_string(),
///     kind: TransitionKind::Local,
///     frame: 3,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["Idle", "Moving"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    capacity: usize,
    transitions: VecDeque<StateTransition>,
}

pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl StateHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of state names traversed.
    ///
    /// Starts with the `from` of the oldest retained record when it has one,
    /// followed by the `to` of every record.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Wall-clock time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition> + '_ {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
