//! Out-of-band signals routed to the current state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A point-in-time signal emitted by an animation or timeline collaborator,
/// such as `"Attack"` when a swing lands or `"StopWatering"` when a clip ends.
///
/// The machine never interprets the tag; states match on it in
/// [`State::on_event`](super::State::on_event).
///
/// # Example
///
/// ```rust
/// use harrow::core::Event;
/// use serde_json::json;
///
/// let event = Event::new("Attack").with_payload(json!({ "damage": 2 }));
///
/// assert!(event.is("Attack"));
/// assert_eq!(event.payload().and_then(|p| p["damage"].as_u64()), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    tag: String,
    #[serde(default)]
    payload: Option<Value>,
}

impl Event {
    /// Create an event carrying only a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            payload: None,
        }
    }

    /// Attach arbitrary data for the receiving state.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Check whether this event carries the given tag.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

impl From<&str> for Event {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_event_has_no_payload() {
        let event = Event::new("StopWatering");

        assert_eq!(event.tag(), "StopWatering");
        assert!(event.payload().is_none());
    }

    #[test]
    fn is_matches_exact_tag_only() {
        let event: Event = "Attack".into();

        assert!(event.is("Attack"));
        assert!(!event.is("attack"));
        assert!(!event.is("AttackEnd"));
    }

    #[test]
    fn payload_survives_json() {
        let event = Event::new("Hit").with_payload(json!({ "knockback": [1.5, 0.0] }));

        let json = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, event);
    }

    #[test]
    fn missing_payload_field_deserializes() {
        let decoded: Event = serde_json::from_str(r#"{"tag":"Die"}"#).unwrap();

        assert_eq!(decoded, Event::new("Die"));
    }
}
