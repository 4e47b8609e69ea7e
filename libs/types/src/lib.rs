//! Types library for the patient record ledger
//!
//! This library provides the core type definitions shared across the record
//! ledger system, ensuring type safety and a stable wire encoding.
//!
//! # Version
//! v1.0.0 - Frozen wire encoding
//!
//! # Modules
//! - `ids`: Identifier types (PatientId) and key derivation
//! - `record`: Append-only history entries
//! - `token`: Lock/ownership wire form and reified state machine

// Public modules
pub mod ids;
pub mod record;
pub mod token;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::record::*;
    pub use crate::token::*;
}
