//! Operation dispatcher — named operations over the record store and token
//! manager
//!
//! Mirrors the platform's two command surfaces: [`Chaincode::invoke`] for
//! mutating operations (`put`, `getToken`) and [`Chaincode::query`] for
//! read-only operations (`get`, `keys`). Arguments arrive as positional
//! strings and are validated for count and type before any ledger access.
//!
//! The dispatcher runs in one of two deployment variants: `Unlocked` (no token
//! concept, caller-supplied timestamps, `keys` scan available) or `Locked`
//! (writes gated by a claimed token, reads gated while a write is pending).

use tracing::{debug, warn};
use types::ids::PatientId;
use types::record::Record;

use crate::codec;
use crate::errors::ChaincodeError;
use crate::events::PUT_SUCCESS_TOPIC;
use crate::ledger::LedgerAccessor;
use crate::store::RecordStore;
use crate::token::TokenManager;

/// Deployment variant of the record chaincode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// No locking: anyone may append; records carry a timestamp.
    Unlocked,
    /// Single-owner exclusive lock: appends require a prior claim; records
    /// carry the writer's identity.
    Locked,
}

/// Operation name for appending a record.
pub const OP_PUT: &str = "put";
/// Operation name for claiming the write token.
pub const OP_GET_TOKEN: &str = "getToken";
/// Operation name for reading a patient's raw record sequence.
pub const OP_GET: &str = "get";
/// Operation name for listing all stored keys.
pub const OP_KEYS: &str = "keys";

/// The record chaincode: dispatch surface plus the injected ledger accessor.
///
/// Each `invoke`/`query` call is one complete synchronous invocation with no
/// internal suspension points, assumed to execute inside one external ledger
/// transaction.
pub struct Chaincode<L: LedgerAccessor> {
    ledger: L,
    mode: AccessMode,
}

impl<L: LedgerAccessor> Chaincode<L> {
    pub fn new(ledger: L, mode: AccessMode) -> Self {
        Self { ledger, mode }
    }

    /// Shorthand for the unlocked variant.
    pub fn unlocked(ledger: L) -> Self {
        Self::new(ledger, AccessMode::Unlocked)
    }

    /// Shorthand for the locked variant.
    pub fn locked(ledger: L) -> Self {
        Self::new(ledger, AccessMode::Locked)
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Borrow the underlying ledger accessor.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutably borrow the underlying ledger accessor.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Consume the chaincode, returning the ledger accessor.
    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Dispatch a mutating operation: `put` or `getToken`.
    pub fn invoke(&mut self, operation: &str, args: &[String]) -> Result<(), ChaincodeError> {
        debug!(operation, mode = ?self.mode, "invoke");
        match operation {
            OP_PUT => self.put(args),
            OP_GET_TOKEN => self.get_token(args),
            _ => {
                warn!(operation, "unsupported invoke operation");
                Err(ChaincodeError::UnsupportedOperation {
                    operation: operation.to_string(),
                })
            }
        }
    }

    /// Dispatch a read-only operation: `get` or `keys`. Returns raw result
    /// bytes.
    pub fn query(&mut self, operation: &str, args: &[String]) -> Result<Vec<u8>, ChaincodeError> {
        debug!(operation, mode = ?self.mode, "query");
        match operation {
            OP_GET => self.get(args),
            OP_KEYS => self.keys(args),
            _ => {
                warn!(operation, "unsupported query operation");
                Err(ChaincodeError::UnsupportedOperation {
                    operation: operation.to_string(),
                })
            }
        }
    }

    // ───────────────────────── put ─────────────────────────

    /// Append one record. Argument shapes per variant:
    ///
    /// - unlocked: `[id, disease, timestamp, link, checkpoint]`
    /// - locked:   `[id, writer, disease, link, checkpoint]`
    ///
    /// The locked path validates the writer's claim before touching the
    /// store, then appends, releases the token, and emits the success
    /// notification. The payload write and the lock-release write are two
    /// separate ledger puts; the external per-invocation transaction is what
    /// makes them land together.
    fn put(&mut self, args: &[String]) -> Result<(), ChaincodeError> {
        expect_args(OP_PUT, args, 5)?;
        let patient = PatientId::new(args[0].as_str());

        match self.mode {
            AccessMode::Unlocked => {
                let timestamp = parse_timestamp(&args[2])?;
                let checkpoint = parse_checkpoint(&args[4])?;
                let record = Record::unlocked(args[1].as_str(), timestamp, args[3].as_str(), checkpoint);
                RecordStore::new(&mut self.ledger).append(&patient, record)
            }
            AccessMode::Locked => {
                let writer = args[1].as_str();
                let checkpoint = parse_checkpoint(&args[4])?;
                let record = Record::locked(writer, args[2].as_str(), args[3].as_str(), checkpoint);

                TokenManager::new(&mut self.ledger).validate_writer(&patient, writer)?;
                RecordStore::new(&mut self.ledger).append(&patient, record)?;
                TokenManager::new(&mut self.ledger).release(&patient)?;
                self.ledger
                    .emit_event(PUT_SUCCESS_TOPIC, patient.as_str().as_bytes())?;
                debug!(patient = %patient, writer, "locked put completed");
                Ok(())
            }
        }
    }

    // ───────────────────────── getToken ─────────────────────────

    /// Claim the write token: `[id, requester]`. Locked variant only.
    fn get_token(&mut self, args: &[String]) -> Result<(), ChaincodeError> {
        if self.mode == AccessMode::Unlocked {
            return Err(ChaincodeError::UnsupportedOperation {
                operation: OP_GET_TOKEN.to_string(),
            });
        }
        expect_args(OP_GET_TOKEN, args, 2)?;
        let patient = PatientId::new(args[0].as_str());
        TokenManager::new(&mut self.ledger).claim(&patient, &args[1])
    }

    // ───────────────────────── get ─────────────────────────

    /// Read the raw encoded record sequence. Argument shapes per variant:
    ///
    /// - unlocked: `[id]`
    /// - locked:   `[id, reader]` — the reader identity feeds the
    ///   read-eligibility check against the token holder.
    fn get(&mut self, args: &[String]) -> Result<Vec<u8>, ChaincodeError> {
        match self.mode {
            AccessMode::Unlocked => {
                expect_args(OP_GET, args, 1)?;
                let patient = PatientId::new(args[0].as_str());
                RecordStore::new(&mut self.ledger).read_all(&patient)
            }
            AccessMode::Locked => {
                expect_args(OP_GET, args, 2)?;
                let patient = PatientId::new(args[0].as_str());
                TokenManager::new(&mut self.ledger).check_readable(&patient, &args[1])?;
                RecordStore::new(&mut self.ledger).read_all(&patient)
            }
        }
    }

    // ───────────────────────── keys ─────────────────────────

    /// Full range scan over the key space, returned as a JSON list of keys in
    /// ledger iteration order. Unlocked variant only.
    fn keys(&mut self, args: &[String]) -> Result<Vec<u8>, ChaincodeError> {
        if self.mode == AccessMode::Locked {
            return Err(ChaincodeError::UnsupportedOperation {
                operation: OP_KEYS.to_string(),
            });
        }
        expect_args(OP_KEYS, args, 0)?;

        let mut keys = Vec::new();
        {
            // Scope the iterator so it is dropped (closed) on every exit path,
            // including a mid-scan error.
            let iter = self.ledger.range("", "")?;
            for item in iter {
                let (key, _value) = item?;
                keys.push(key);
            }
        }
        codec::encode_keys(&keys)
    }
}

fn expect_args(
    operation: &'static str,
    args: &[String],
    expected: usize,
) -> Result<(), ChaincodeError> {
    if args.len() != expected {
        return Err(ChaincodeError::ArgumentCount {
            operation,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn parse_timestamp(raw: &str) -> Result<i64, ChaincodeError> {
    raw.parse::<i64>().map_err(|e| ChaincodeError::ArgumentType {
        field: "timestamp",
        reason: e.to_string(),
    })
}

fn parse_checkpoint(raw: &str) -> Result<bool, ChaincodeError> {
    raw.parse::<bool>().map_err(|e| ChaincodeError::ArgumentType {
        field: "checkpoint",
        reason: e.to_string(),
    })
}
