//! Record Chaincode — access-controlled, append-only patient record store
//!
//! This crate implements the record-append protocol layered on a generic
//! key-value ledger, combined with a token-based ownership/lock state machine.
//! The ledger itself (storage engine, consensus, transaction ordering) is an
//! external collaborator reached through the [`ledger::LedgerAccessor`] trait;
//! every invocation is assumed to run inside one externally-managed ledger
//! transaction.
//!
//! # Modules
//! - `errors`: Error taxonomy for dispatch, codec, token, and ledger failures
//! - `events`: Notification topics and the emitted-event carrier
//! - `ledger`: Ledger accessor trait and the in-memory reference ledger
//! - `codec`: JSON wire codec for record sequences and tokens
//! - `token`: Token manager — the per-identifier lock state machine
//! - `store`: Record store — append and raw read of record sequences
//! - `dispatch`: Operation dispatcher mapping named operations to the core
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod codec;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod store;
pub mod token;

/// Chaincode interface version — frozen after release
pub const CHAINCODE_VERSION: &str = "1.0.0";
