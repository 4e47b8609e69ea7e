//! Record store — append and raw read of record sequences
//!
//! An append is a read-decode-append-encode-write roundtrip against the
//! payload key. It is not transactionally isolated from concurrent appends at
//! this level; the external ledger's transaction serialization is the sole
//! concurrency guard.

use tracing::debug;
use types::ids::PatientId;
use types::record::Record;

use crate::codec;
use crate::errors::ChaincodeError;
use crate::ledger::LedgerAccessor;

/// Append-only access to the record sequence stored under an identifier.
pub struct RecordStore<'a, L: LedgerAccessor> {
    ledger: &'a mut L,
}

impl<'a, L: LedgerAccessor> RecordStore<'a, L> {
    pub fn new(ledger: &'a mut L) -> Self {
        Self { ledger }
    }

    /// Append `record` to the sequence stored under `patient`.
    ///
    /// An absent value starts a fresh one-element sequence. A present value is
    /// decoded first; a decode failure aborts before any write, leaving the
    /// stored bytes untouched.
    pub fn append(&mut self, patient: &PatientId, record: Record) -> Result<(), ChaincodeError> {
        let mut records = match self.ledger.get_state(patient.as_str())? {
            Some(raw) => codec::decode_records(&raw)?,
            None => Vec::new(),
        };
        records.push(record);

        // Encode fully before the write; an encode failure must not reach the ledger.
        let raw = codec::encode_records(&records)?;
        self.ledger.put_state(patient.as_str(), raw)?;
        debug!(patient = %patient, total = records.len(), "record appended");
        Ok(())
    }

    /// Read the raw encoded sequence stored under `patient`.
    ///
    /// Returns the stored bytes as-is, not a re-rendered view; callers needing
    /// structured access decode them themselves.
    pub fn read_all(&self, patient: &PatientId) -> Result<Vec<u8>, ChaincodeError> {
        self.ledger
            .get_state(patient.as_str())?
            .ok_or_else(|| ChaincodeError::NotFound {
                key: patient.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    fn patient() -> PatientId {
        PatientId::new("p-001")
    }

    #[test]
    fn test_first_append_creates_singleton_sequence() {
        let mut ledger = MemoryLedger::new();
        let record = Record::unlocked("flu", 1, "link-1", false);
        RecordStore::new(&mut ledger)
            .append(&patient(), record.clone())
            .unwrap();

        let raw = RecordStore::new(&mut ledger).read_all(&patient()).unwrap();
        assert_eq!(codec::decode_records(&raw).unwrap(), vec![record]);
    }

    #[test]
    fn test_append_accumulates_in_order() {
        let mut ledger = MemoryLedger::new();
        for i in 0..4 {
            let record = Record::unlocked("flu", i, format!("link-{i}"), false);
            RecordStore::new(&mut ledger)
                .append(&patient(), record)
                .unwrap();
        }

        let raw = RecordStore::new(&mut ledger).read_all(&patient()).unwrap();
        let records = codec::decode_records(&raw).unwrap();
        assert_eq!(records.len(), 4);
        let timestamps: Vec<i64> = records.iter().filter_map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_append_on_malformed_value_fails_and_preserves_bytes() {
        let mut ledger = MemoryLedger::new();
        let garbage = b"{not a sequence".to_vec();
        ledger.put_state("p-001", garbage.clone()).unwrap();

        let err = RecordStore::new(&mut ledger)
            .append(&patient(), Record::unlocked("flu", 1, "link-1", false))
            .unwrap_err();
        assert!(matches!(err, ChaincodeError::Decode { .. }));
        assert_eq!(ledger.get_state("p-001").unwrap(), Some(garbage));
    }

    #[test]
    fn test_read_all_absent_is_not_found() {
        let ledger = &mut MemoryLedger::new();
        let err = RecordStore::new(ledger).read_all(&patient()).unwrap_err();
        assert!(matches!(err, ChaincodeError::NotFound { .. }));
    }

    #[test]
    fn test_read_all_returns_raw_bytes() {
        let mut ledger = MemoryLedger::new();
        let record = Record::locked("hospital-a", "flu", "link-1", true);
        RecordStore::new(&mut ledger)
            .append(&patient(), record)
            .unwrap();

        let raw = RecordStore::new(&mut ledger).read_all(&patient()).unwrap();
        assert_eq!(ledger.get_state("p-001").unwrap(), Some(raw));
    }
}
