//! Machine configuration.

use crate::core::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`MachineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Machine label must not be empty")]
    EmptyLabel,
}

/// Per-machine settings.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
///
/// # Example
///
/// ```rust
/// use harrow::fsm::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "label": "slime" }"#).unwrap();
/// assert_eq!(config.label, "slime");
/// assert_eq!(config.history_capacity, 64);
///
/// let config = MachineConfig::new().label("player").history_capacity(0);
/// assert_eq!(config.history_capacity, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name reported in log fields and checkpoints
    pub label: String,

    /// Number of transitions kept in history; 0 disables recording
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            label: "machine".to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Parse a config from JSON, filling omitted keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MachineConfig::default();
        assert_eq!(config.label, "machine");
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn json_overrides_fields() {
        let config =
            MachineConfig::from_json(r#"{ "label": "player", "history_capacity": 8 }"#).unwrap();
        assert_eq!(config, MachineConfig::new().label("player").history_capacity(8));
    }

    #[test]
    fn blank_label_rejected() {
        let result = MachineConfig::from_json(r#"{ "label": "  " }"#);
        assert!(matches!(result, Err(ConfigError::EmptyLabel)));
    }

    #[test]
    fn malformed_json_rejected() {
        let result = MachineConfig::from_json(r#"{ "history_capacity": "lots" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
