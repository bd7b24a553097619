//! Machine errors.

use thiserror::Error;

/// Errors that can occur while wiring or driving a state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Unknown state '{name}'. Register it before referencing it")]
    UnknownState { name: String },

    #[error("Node #{id} does not belong to this machine")]
    UnknownNode { id: usize },

    #[error("Machine not started. Call .start(state) before .{operation}()")]
    NotStarted { operation: &'static str },

    #[error("Machine already started in state '{current}'. Use .restart(state) to re-enter")]
    AlreadyStarted { current: String },

    #[error("Transition graph is sealed once running. Call .{operation}() before .start()")]
    Sealed { operation: &'static str },

    #[error("State names must not be empty")]
    EmptyStateName,

    #[error("Cannot resume from checkpoint: {reason}")]
    InvalidCheckpoint { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = MachineError::UnknownState {
            name: "Weeding".to_string(),
        };
        assert!(err.to_string().contains("'Weeding'"));

        let err = MachineError::NotStarted {
            operation: "fixed_update",
        };
        assert!(err.to_string().contains(".fixed_update()"));
    }
}
