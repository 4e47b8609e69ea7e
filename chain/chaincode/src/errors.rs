//! Chaincode-specific error types
//!
//! Comprehensive error taxonomy for dispatch, codec, token, and ledger
//! operations. Every error propagates to the caller immediately; the core
//! performs no internal retries, and the enclosing ledger transaction is
//! expected to be discarded on error.

use thiserror::Error;

/// Failures reported by the external ledger accessor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Error accessing state: {reason}")]
    Access { reason: String },

    #[error("Error emitting event on topic {topic}: {reason}")]
    Emit { topic: String, reason: String },
}

/// Errors surfaced by chaincode operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChaincodeError {
    #[error("{operation} operation must include {expected} arguments, got {got}")]
    ArgumentCount {
        operation: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Failed to parse {field} argument: {reason}")]
    ArgumentType { field: &'static str, reason: String },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("decoding failed: {reason}")]
    Decode { reason: String },

    #[error("encoding failed: {reason}")]
    Encode { reason: String },

    #[error("token conflict for {patient}: {detail}")]
    TokenConflict { patient: String, detail: String },

    #[error("someone is writing the data, try later (patient {patient}, held by {holder})")]
    ReadBlocked { patient: String, holder: String },

    #[error("no related data has been stored under {key}")]
    NotFound { key: String },

    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_count_display() {
        let err = ChaincodeError::ArgumentCount {
            operation: "put",
            expected: 5,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "put operation must include 5 arguments, got 3"
        );
    }

    #[test]
    fn test_token_conflict_display() {
        let err = ChaincodeError::TokenConflict {
            patient: "p-001".to_string(),
            detail: "currently held by hospital-b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "token conflict for p-001: currently held by hospital-b"
        );
    }

    #[test]
    fn test_read_blocked_display() {
        let err = ChaincodeError::ReadBlocked {
            patient: "p-001".to_string(),
            holder: "hospital-a".to_string(),
        };
        assert!(err.to_string().contains("try later"));
    }

    #[test]
    fn test_not_found_display() {
        let err = ChaincodeError::NotFound {
            key: "p-404".to_string(),
        };
        assert!(err.to_string().contains("no related data has been stored"));
    }

    #[test]
    fn test_chaincode_error_from_ledger() {
        let ledger_err = LedgerError::Access {
            reason: "backend offline".to_string(),
        };
        let err: ChaincodeError = ledger_err.into();
        assert!(matches!(err, ChaincodeError::Ledger(_)));
    }
}
