//! Identifier types for ledger entities
//!
//! Patient identifiers arrive from callers as opaque strings; the newtype keeps
//! payload keys and derived token keys from being mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to a patient key to derive its companion token key.
///
/// Payload and lock metadata live in separate namespaces of the same key space.
pub const TOKEN_KEY_SUFFIX: &str = "token";

/// Identifier for a patient/subject in the ledger key space.
///
/// A `RecordSequence` is stored under the identifier itself; the companion
/// `Token` is stored under [`PatientId::token_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    /// Create a new PatientId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the ledger key under which this patient's token is stored.
    pub fn token_key(&self) -> String {
        format!("{}{}", self.0, TOKEN_KEY_SUFFIX)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PatientId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PatientId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
