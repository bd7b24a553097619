//! Violation errors and handling strategies.

use thiserror::Error;

/// Problems found in a wired transition graph
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("Entry state '{entry}' is not registered")]
    UnknownEntry { entry: String },

    #[error("State '{state}' is unreachable from entry state '{entry}'")]
    Unreachable { state: String, entry: String },

    #[error("State '{state}' has a transition to itself, which never runs exit/enter hooks")]
    SelfTransition { state: String },

    #[error("State '{state}' has no transition leading out of it")]
    DeadEnd { state: String },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

/// Strategy for handling graph violations when building a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationStrategy {
    /// Refuse to build the machine
    Abort,

    /// Build anyway but log a warning per violation
    IgnoreAndLog,
}
