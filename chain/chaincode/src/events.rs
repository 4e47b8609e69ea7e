//! Notification events emitted by chaincode operations
//!
//! Events are fire-and-forget: topic plus opaque payload bytes, consumed only
//! by external listeners. The core observes no acknowledgment or ordering
//! guarantee.
//!
//! Two notifications exist:
//! - token claim: topic = the patient identifier, payload = the requester
//! - locked put success: topic = [`PUT_SUCCESS_TOPIC`], payload = the patient
//!   identifier

use serde::{Deserialize, Serialize};

/// Fixed topic for the locked variant's put-success notification.
pub const PUT_SUCCESS_TOPIC: &str = "put_success";

/// A single emitted notification as recorded by a ledger implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl EmittedEvent {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    /// Payload interpreted as UTF-8, for listeners that carry string payloads.
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitted_event_payload_str() {
        let event = EmittedEvent::new("p-001", "hospital-a".as_bytes());
        assert_eq!(event.payload_str(), Some("hospital-a"));
    }

    #[test]
    fn test_emitted_event_serialization() {
        let event = EmittedEvent::new(PUT_SUCCESS_TOPIC, b"p-001".to_vec());
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: EmittedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
