//! Append-only history entries
//!
//! A `Record` is immutable once written: the ledger only ever appends to the
//! sequence stored under a patient identifier, never updates or deletes.
//! Duplicates are allowed; insertion order is append order.
//!
//! The two deployment variants carry slightly different field sets: the
//! unlocked variant records a caller-supplied timestamp, the locked variant
//! records the writing hospital's identity instead. Both shapes share one wire
//! struct with the variant-specific fields optional.

use serde::{Deserialize, Serialize};

/// One entry in a patient's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identity of the writer. Present in the locked variant only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    pub disease: String,
    /// Caller-supplied timestamp. Present in the unlocked variant only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Opaque reference to external content.
    pub link: String,
    pub checkpoint: bool,
}

impl Record {
    /// Build a record for the unlocked variant (no writer identity).
    pub fn unlocked(
        disease: impl Into<String>,
        timestamp: i64,
        link: impl Into<String>,
        checkpoint: bool,
    ) -> Self {
        Self {
            hospital: None,
            disease: disease.into(),
            timestamp: Some(timestamp),
            link: link.into(),
            checkpoint,
        }
    }

    /// Build a record for the locked variant (writer identity, no timestamp).
    pub fn locked(
        hospital: impl Into<String>,
        disease: impl Into<String>,
        link: impl Into<String>,
        checkpoint: bool,
    ) -> Self {
        Self {
            hospital: Some(hospital.into()),
            disease: disease.into(),
            timestamp: None,
            link: link.into(),
            checkpoint,
        }
    }
}

/// The value stored under a patient identifier: records in append order.
pub type RecordSequence = Vec<Record>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocked_record_shape() {
        let record = Record::unlocked("flu", 1_708_123_456, "ipfs://abc", false);
        assert_eq!(record.hospital, None);
        assert_eq!(record.timestamp, Some(1_708_123_456));
    }

    #[test]
    fn test_locked_record_shape() {
        let record = Record::locked("hospital-a", "flu", "ipfs://abc", true);
        assert_eq!(record.hospital.as_deref(), Some("hospital-a"));
        assert_eq!(record.timestamp, None);
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = Record::locked("hospital-a", "flu", "ipfs://abc", true);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_absent_fields_omitted_on_wire() {
        let record = Record::unlocked("flu", 42, "link-1", false);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("hospital"));

        let record = Record::locked("hospital-a", "flu", "link-1", false);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("timestamp"));
    }

    #[test]
    fn test_duplicate_records_allowed_in_sequence() {
        let record = Record::unlocked("flu", 42, "link-1", false);
        let sequence: RecordSequence = vec![record.clone(), record.clone()];
        let json = serde_json::to_string(&sequence).unwrap();
        let deserialized: RecordSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.len(), 2);
        assert_eq!(deserialized[0], deserialized[1]);
    }
}
