//! Lock/ownership token for a patient identifier
//!
//! The stored wire form is a two-field struct (`owner` + `availability`), kept
//! for encoding stability. In-process logic works on the reified
//! [`TokenState`] so that the absent-token case is an explicit state rather
//! than an accidental zero value.

use serde::{Deserialize, Serialize};

/// Stored lock record for one patient identifier.
///
/// Lives at the derived token key, created on first claim and never deleted;
/// it is the lock's permanent home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Current or most recent claimant.
    pub owner: String,
    /// `true` = unlocked/claimable, `false` = exclusively held by `owner`.
    pub availability: bool,
}

impl Token {
    pub fn new(owner: impl Into<String>, availability: bool) -> Self {
        Self {
            owner: owner.into(),
            availability,
        }
    }
}

/// Lock state machine for one identifier.
///
/// `Available` keeps the last claimant for audit only; it is not enforced on
/// the next claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    /// No token stored under the identifier.
    Absent,
    /// Unlocked; `owner` is the most recent claimant.
    Available { owner: String },
    /// Exclusively locked by `owner`.
    Held { owner: String },
}

impl TokenState {
    /// Lift an optional stored token into the explicit state machine.
    pub fn from_stored(stored: Option<Token>) -> Self {
        match stored {
            None => TokenState::Absent,
            Some(token) if token.availability => TokenState::Available { owner: token.owner },
            Some(token) => TokenState::Held { owner: token.owner },
        }
    }

    /// Lower the state back to the stored wire form. `Absent` has no wire form.
    pub fn to_stored(&self) -> Option<Token> {
        match self {
            TokenState::Absent => None,
            TokenState::Available { owner } => Some(Token::new(owner.clone(), true)),
            TokenState::Held { owner } => Some(Token::new(owner.clone(), false)),
        }
    }

    /// Owner recorded in the state, if any.
    pub fn owner(&self) -> Option<&str> {
        match self {
            TokenState::Absent => None,
            TokenState::Available { owner } | TokenState::Held { owner } => Some(owner),
        }
    }

    /// Whether the lock is currently held exclusively.
    pub fn is_held(&self) -> bool {
        matches!(self, TokenState::Held { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_state_from_missing_token() {
        assert_eq!(TokenState::from_stored(None), TokenState::Absent);
    }

    #[test]
    fn test_available_state_from_stored() {
        let state = TokenState::from_stored(Some(Token::new("hospital-a", true)));
        assert_eq!(
            state,
            TokenState::Available {
                owner: "hospital-a".to_string()
            }
        );
        assert!(!state.is_held());
    }

    #[test]
    fn test_held_state_from_stored() {
        let state = TokenState::from_stored(Some(Token::new("hospital-a", false)));
        assert_eq!(
            state,
            TokenState::Held {
                owner: "hospital-a".to_string()
            }
        );
        assert!(state.is_held());
    }

    #[test]
    fn test_stored_roundtrip() {
        let held = TokenState::Held {
            owner: "hospital-a".to_string(),
        };
        let stored = held.to_stored().unwrap();
        assert_eq!(TokenState::from_stored(Some(stored)), held);

        assert_eq!(TokenState::Absent.to_stored(), None);
    }

    #[test]
    fn test_zero_valued_token_maps_to_held_empty_owner() {
        // The legacy zero value (empty owner, unavailable) is a representable
        // Held state, not a silent default.
        let state = TokenState::from_stored(Some(Token::new("", false)));
        assert_eq!(state.owner(), Some(""));
        assert!(state.is_held());
    }

    #[test]
    fn test_token_serialization() {
        let token = Token::new("hospital-b", false);
        let json = serde_json::to_string(&token).unwrap();
        let deserialized: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(token, deserialized);
    }
}
