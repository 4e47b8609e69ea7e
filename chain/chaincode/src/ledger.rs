//! Ledger accessor — the seam between the core and the external platform
//!
//! The underlying ledger (storage engine, consensus, transaction ordering) is
//! not implemented here. The core reaches it through [`LedgerAccessor`], whose
//! four primitives are assumed to execute within one externally-managed atomic
//! unit of work per invocation. The core holds no cache of ledger state across
//! invocations.
//!
//! [`MemoryLedger`] is the in-memory reference implementation, used as the
//! test double; production deployments implement the trait against the real
//! platform.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::errors::LedgerError;
use crate::events::EmittedEvent;

/// One (key, value) pair yielded by a range scan.
pub type KeyValue = (String, Vec<u8>);

/// Iterator over a key range. Items are fallible so an accessor can surface
/// backend errors mid-scan.
pub type RangeIter<'a> = Box<dyn Iterator<Item = Result<KeyValue, LedgerError>> + 'a>;

/// Capability set exposed by the external ledger: get/put/range/emit.
pub trait LedgerAccessor {
    /// Read the raw value stored at `key`, or `None` if absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write `value` at `key`, overwriting any existing value.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Scan keys in `[start, end)` in ledger iteration order. Empty bounds
    /// mean unbounded on that side; two empty bounds scan the full key space.
    fn range(&self, start: &str, end: &str) -> Result<RangeIter<'_>, LedgerError>;

    /// Fire-and-forget notification to external listeners.
    fn emit_event(&mut self, topic: &str, payload: &[u8]) -> Result<(), LedgerError>;
}

/// In-memory ledger backed by a `BTreeMap`.
///
/// Iteration order is the map's key order, which doubles as a deterministic
/// "ledger iteration order" for tests. Emitted events accumulate in an
/// append-only log.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
    events: Vec<EmittedEvent>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[EmittedEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<EmittedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the ledger holds no keys.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl LedgerAccessor for MemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.state.insert(key.to_string(), value);
        Ok(())
    }

    fn range(&self, start: &str, end: &str) -> Result<RangeIter<'_>, LedgerError> {
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };
        let iter = self
            .state
            .range((lower, upper))
            .map(|(k, v)| Ok((k.clone(), v.clone())));
        Ok(Box::new(iter))
    }

    fn emit_event(&mut self, topic: &str, payload: &[u8]) -> Result<(), LedgerError> {
        self.events.push(EmittedEvent::new(topic, payload.to_vec()));
        Ok(())
    }
}
