//! Token manager — the per-identifier lock state machine
//!
//! Owns every transition of the ownership token stored at the derived token
//! key. The token is cooperative mutual exclusion between well-behaved
//! callers, not a true mutex: the only enforcement is [`TokenManager::
//! validate_writer`] on the locked put path. A held token with no matching
//! release stays held until a claim by the same owner or a completed put.
//!
//! States: `Absent` (no token stored), `Available { owner }` (unlocked, last
//! claimant kept for audit), `Held { owner }` (exclusively locked).

use tracing::debug;
use types::ids::PatientId;
use types::token::{Token, TokenState};

use crate::codec;
use crate::errors::ChaincodeError;
use crate::ledger::LedgerAccessor;

/// Lock/ownership transitions for patient identifiers, executed against an
/// injected ledger accessor.
pub struct TokenManager<'a, L: LedgerAccessor> {
    ledger: &'a mut L,
}

impl<'a, L: LedgerAccessor> TokenManager<'a, L> {
    pub fn new(ledger: &'a mut L) -> Self {
        Self { ledger }
    }

    /// Read the current lock state for `patient`.
    pub fn state(&self, patient: &PatientId) -> Result<TokenState, ChaincodeError> {
        let stored = match self.ledger.get_state(&patient.token_key())? {
            Some(raw) => Some(codec::decode_token(&raw)?),
            None => None,
        };
        Ok(TokenState::from_stored(stored))
    }

    /// Claim the lock for `requester`.
    ///
    /// Fails with `TokenConflict` while the token is held by a different
    /// owner. An absent token is freely claimable: the first claim on a fresh
    /// identifier creates it. On success the token transitions to
    /// `Held { requester }` and a notification is emitted on the identifier's
    /// topic carrying the requester as payload.
    pub fn claim(&mut self, patient: &PatientId, requester: &str) -> Result<(), ChaincodeError> {
        match self.state(patient)? {
            TokenState::Held { owner } if owner != requester => {
                return Err(ChaincodeError::TokenConflict {
                    patient: patient.to_string(),
                    detail: format!("currently held by {owner}"),
                });
            }
            _ => {}
        }

        self.persist(patient, &Token::new(requester, false))?;
        debug!(patient = %patient, requester, "token claimed");

        self.ledger
            .emit_event(patient.as_str(), requester.as_bytes())?;
        Ok(())
    }

    /// Check that `writer` holds the claim required to append.
    ///
    /// Pure check, no state mutation: fails when no token exists (no pending
    /// claim to satisfy) or when the recorded owner differs from `writer`.
    /// Availability is not consulted; ownership alone gates the write.
    pub fn validate_writer(&self, patient: &PatientId, writer: &str) -> Result<(), ChaincodeError> {
        match self.state(patient)? {
            TokenState::Absent => Err(ChaincodeError::TokenConflict {
                patient: patient.to_string(),
                detail: "put failed: no pending claim to satisfy".to_string(),
            }),
            TokenState::Available { owner } | TokenState::Held { owner } => {
                if owner == writer {
                    Ok(())
                } else {
                    Err(ChaincodeError::TokenConflict {
                        patient: patient.to_string(),
                        detail: format!("put failed: claimed by {owner}, not {writer}"),
                    })
                }
            }
        }
    }

    /// Return the lock to `Available` after a successful append.
    ///
    /// Sets `availability = true` with the owner unchanged. This is the only
    /// transition back to `Available`. The locked put path always validates
    /// the writer first, so a token exists whenever this runs; an absent token
    /// leaves nothing to release.
    pub fn release(&mut self, patient: &PatientId) -> Result<(), ChaincodeError> {
        match self.state(patient)? {
            TokenState::Absent => Ok(()),
            TokenState::Available { owner } | TokenState::Held { owner } => {
                self.persist(patient, &Token::new(owner, true))?;
                debug!(patient = %patient, "token released");
                Ok(())
            }
        }
    }

    /// Decide whether `reader` may read while a write may be pending.
    ///
    /// Absent token: read allowed unconditionally. Held by someone else:
    /// denied with `ReadBlocked`. The holder itself, or anyone once
    /// availability is restored, may read.
    pub fn check_readable(&self, patient: &PatientId, reader: &str) -> Result<(), ChaincodeError> {
        match self.state(patient)? {
            TokenState::Held { owner } if owner != reader => Err(ChaincodeError::ReadBlocked {
                patient: patient.to_string(),
                holder: owner,
            }),
            _ => Ok(()),
        }
    }

    fn persist(&mut self, patient: &PatientId, token: &Token) -> Result<(), ChaincodeError> {
        let raw = codec::encode_token(token)?;
        self.ledger.put_state(&patient.token_key(), raw)?;
        Ok(())
    }
}
