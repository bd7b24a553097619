//! Build errors for the state machine builder.

use crate::fsm::MachineError;
use crate::validation::GraphViolation;
use thiserror::Error;

/// Errors that can occur when building state machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states registered. Add at least one with .state(state)")]
    NoStates,

    #[error("Transition graph failed validation with {} violation(s)", .violations.len())]
    InvalidGraph { violations: Vec<GraphViolation> },

    #[error(transparent)]
    Machine(#[from] MachineError),
}
