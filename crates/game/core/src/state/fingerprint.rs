//! Deterministic state fingerprints for replay verification.
//!
//! Two runs that apply the same transitions to the same starting state must
//! produce the same fingerprint. All collections in [`MatchState`] are
//! ordered, so the bincode encoding is canonical.

use sha2::{Digest, Sha256};

use super::MatchState;

#[derive(Debug, thiserror::Error)]
#[error("failed to encode match state: {0}")]
pub struct FingerprintError(#[from] bincode::Error);

impl MatchState {
    /// SHA-256 over the bincode encoding of the whole state, log included.
    pub fn fingerprint(&self) -> Result<[u8; 32], FingerprintError> {
        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{MatchState, Side};

    #[test]
    fn identical_states_share_a_fingerprint() {
        let mut a = MatchState::default();
        let mut b = MatchState::default();
        a.push_log(Some(Side::Human), "hello");
        b.push_log(Some(Side::Human), "hello");
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn any_change_alters_the_fingerprint() {
        let a = MatchState::default();
        let mut b = MatchState::default();
        b.human.energy = 1;
        let fa = hex::encode(a.fingerprint().unwrap());
        let fb = hex::encode(b.fingerprint().unwrap());
        assert_eq!(fa.len(), 64);
        assert_ne!(fa, fb);
    }
}
