//! Checkpoints of a running machine's position.
//!
//! A checkpoint captures which state is current, the frame counters and the
//! transition history. States and guards are behavior, not data, so they are
//! not part of it: resuming requires a machine wired with the same states.
//! See [`StateMachine::checkpoint`](crate::fsm::StateMachine::checkpoint) and
//! [`StateMachine::resume`](crate::fsm::StateMachine::resume).

use crate::core::StateHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a started machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Label of the machine it was taken from
    pub label: String,

    /// Name of the current state
    pub current_state: String,

    /// Update frames run so far
    pub frame: u64,

    /// Fixed ticks run so far
    pub fixed_frame: u64,

    /// Retained transition history
    pub history: StateHistory,
}

impl Checkpoint {
    pub(crate) fn new(
        label: String,
        current_state: String,
        frame: u64,
        fixed_frame: u64,
        history: StateHistory,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            label,
            current_state,
            frame,
            fixed_frame,
            history,
        }
    }

    /// Check version compatibility and required fields.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.current_state.is_empty() {
            return Err(CheckpointError::MissingState);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a bincode checkpoint.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateTransition, TransitionKind};

    fn sample() -> Checkpoint {
        let mut history = StateHistory::with_capacity(4);
        history.record(StateTransition {
            from: None,
            to: "Friendly".to_string(),
            kind: TransitionKind::Start,
            frame: 0,
            timestamp: Utc::now(),
        });
        history.record(StateTransition {
            from: Some("Friendly".to_string()),
            to: "Wandering".to_string(),
            kind: TransitionKind::Local,
            frame: 120,
            timestamp: Utc::now(),
        });
        Checkpoint::new("slime".to_string(), "Wandering".to_string(), 300, 150, history)
    }

    #[test]
    fn new_checkpoint_is_valid() {
        let checkpoint = sample();
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert!(!checkpoint.id.is_empty());
        assert!(checkpoint.validate().is_ok());
    }

    #[test]
    fn json_round_trip_keeps_position() {
        let checkpoint = sample();
        let restored = Checkpoint::from_json(&checkpoint.to_json().unwrap()).unwrap();

        assert_eq!(restored.id, checkpoint.id);
        assert_eq!(restored.current_state, "Wandering");
        assert_eq!(restored.frame, 300);
        assert_eq!(restored.history.get_path(), vec!["Friendly", "Wandering"]);
    }

    #[test]
    fn binary_round_trip_keeps_position() {
        let checkpoint = sample();
        let restored = Checkpoint::from_binary(&checkpoint.to_binary().unwrap()).unwrap();

        assert_eq!(restored.fixed_frame, 150);
        assert_eq!(restored.history.len(), 2);
    }

    #[test]
    fn future_version_rejected() {
        let mut checkpoint = sample();
        checkpoint.version = CHECKPOINT_VERSION + 1;

        let result = Checkpoint::from_json(&checkpoint.to_json().unwrap());
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found, supported })
                if found == CHECKPOINT_VERSION + 1 && supported == CHECKPOINT_VERSION
        ));
    }

    #[test]
    fn empty_current_state_rejected() {
        let mut checkpoint = sample();
        checkpoint.current_state.clear();

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::MissingState)
        ));
    }

    #[test]
    fn garbage_input_rejected() {
        assert!(matches!(
            Checkpoint::from_json("not json"),
            Err(CheckpointError::Json(_))
        ));
        assert!(matches!(
            Checkpoint::from_binary(&[1, 2, 3]),
            Err(CheckpointError::Binary(_))
        ));
    }
}
