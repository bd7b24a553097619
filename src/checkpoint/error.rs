//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or checking a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Checkpoint binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Checkpoint does not name a current state")]
    MissingState,
}
