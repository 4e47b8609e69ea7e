//! Wire codec for record sequences and tokens
//!
//! JSON encoding via `serde_json`. Decode failures never yield a partial
//! sequence. Encoding is always completed before the corresponding
//! `put_state`, so an encode failure aborts a write before any ledger
//! mutation.

use types::record::{Record, RecordSequence};
use types::token::Token;

use crate::errors::ChaincodeError;

/// Encode an ordered record sequence to its stored byte form.
pub fn encode_records(records: &[Record]) -> Result<Vec<u8>, ChaincodeError> {
    serde_json::to_vec(records).map_err(|e| ChaincodeError::Encode {
        reason: e.to_string(),
    })
}

/// Decode a stored byte form back into a record sequence.
pub fn decode_records(raw: &[u8]) -> Result<RecordSequence, ChaincodeError> {
    serde_json::from_slice(raw).map_err(|e| ChaincodeError::Decode {
        reason: e.to_string(),
    })
}

/// Encode a token to its stored byte form.
pub fn encode_token(token: &Token) -> Result<Vec<u8>, ChaincodeError> {
    serde_json::to_vec(token).map_err(|e| ChaincodeError::Encode {
        reason: e.to_string(),
    })
}

/// Decode a stored byte form back into a token.
pub fn decode_token(raw: &[u8]) -> Result<Token, ChaincodeError> {
    serde_json::from_slice(raw).map_err(|e| ChaincodeError::Decode {
        reason: e.to_string(),
    })
}

/// Encode a list of ledger keys, the `keys` operation result form.
pub fn encode_keys(keys: &[String]) -> Result<Vec<u8>, ChaincodeError> {
    serde_json::to_vec(keys).map_err(|e| ChaincodeError::Encode {
        reason: e.to_string(),
    })
}
