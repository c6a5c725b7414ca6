//! External Proof Verification
//!
//! The registry never interprets proofs itself. It hands `(proof, public_inputs)`
//! to an injected [`ProofVerifier`] and treats the answer as a boolean oracle.
//!
//! An empty proof is governed by [`EmptyProofPolicy`]. The default `Bypass`
//! accepts it without consulting the verifier: a known relaxation that disables
//! the guarantee the proof exists for. Switch to `Reject` (or build with the
//! `strict-proofs` feature) to require proofs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::sha256;
use crate::game::error::GameError;

/// Interface for the external proof verifier.
///
/// Must be deterministic: the same `(proof, public_inputs)` always yields the
/// same answer. Any closure `Fn(&[u8], &[u8]) -> bool` qualifies.
pub trait ProofVerifier: Send + Sync {
    /// Accept or reject `proof` against the encoded public inputs.
    fn verify(&self, proof: &[u8], public_inputs: &[u8]) -> bool;
}

impl<F> ProofVerifier for F
where
    F: Fn(&[u8], &[u8]) -> bool + Send + Sync,
{
    fn verify(&self, proof: &[u8], public_inputs: &[u8]) -> bool {
        self(proof, public_inputs)
    }
}

/// How a reveal with an empty proof is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyProofPolicy {
    /// Accept without calling the verifier.
    Bypass,
    /// Fail with `ProofRequired`.
    Reject,
}

impl Default for EmptyProofPolicy {
    fn default() -> Self {
        if cfg!(feature = "strict-proofs") {
            Self::Reject
        } else {
            Self::Bypass
        }
    }
}

impl fmt::Display for EmptyProofPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bypass => f.write_str("bypass"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Unknown empty-proof policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown empty proof policy: {0}")]
pub struct UnknownProofPolicy(pub String);

impl FromStr for EmptyProofPolicy {
    type Err = UnknownProofPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bypass" | "allow" => Ok(Self::Bypass),
            "reject" | "require" => Ok(Self::Reject),
            other => Err(UnknownProofPolicy(other.to_string())),
        }
    }
}

/// How a reveal's proof requirement was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProofOutcome {
    /// Empty proof accepted under `EmptyProofPolicy::Bypass`.
    Bypassed,
    /// Verifier accepted the proof.
    Verified,
}

/// Apply the proof rules for one reveal.
pub fn check_proof(
    policy: EmptyProofPolicy,
    verifier: Option<&dyn ProofVerifier>,
    proof: &[u8],
    public_inputs: &[u8],
) -> Result<ProofOutcome, GameError> {
    if proof.is_empty() {
        return match policy {
            EmptyProofPolicy::Bypass => Ok(ProofOutcome::Bypassed),
            EmptyProofPolicy::Reject => Err(GameError::ProofRequired),
        };
    }

    let verifier = verifier.ok_or(GameError::VerifierNotConfigured)?;
    if verifier.verify(proof, public_inputs) {
        Ok(ProofOutcome::Verified)
    } else {
        Err(GameError::ProofRejected)
    }
}

/// Stub verifier accepting every proof.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllVerifier;

impl ProofVerifier for AcceptAllVerifier {
    fn verify(&self, _proof: &[u8], _public_inputs: &[u8]) -> bool {
        true
    }
}

/// Stub verifier rejecting every proof.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectAllVerifier;

impl ProofVerifier for RejectAllVerifier {
    fn verify(&self, _proof: &[u8], _public_inputs: &[u8]) -> bool {
        false
    }
}

/// Deterministic stand-in for a real proving system.
///
/// A proof is valid iff it equals `sha256(public_inputs)`, so only someone who
/// saw the exact public inputs can produce it. Binds proofs to their reveal
/// without any cryptographic soundness beyond that.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigestProofVerifier;

impl DigestProofVerifier {
    /// Produce the proof this verifier accepts for `public_inputs`.
    pub fn prove(public_inputs: &[u8]) -> Vec<u8> {
        sha256(public_inputs).to_vec()
    }
}

impl ProofVerifier for DigestProofVerifier {
    fn verify(&self, proof: &[u8], public_inputs: &[u8]) -> bool {
        proof == sha256(public_inputs).as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUTS: &[u8] = b"public inputs";

    #[test]
    fn test_empty_proof_bypass() {
        // Bypass never consults the verifier, even a missing or rejecting one.
        assert_eq!(
            check_proof(EmptyProofPolicy::Bypass, None, &[], INPUTS),
            Ok(ProofOutcome::Bypassed)
        );
        assert_eq!(
            check_proof(EmptyProofPolicy::Bypass, Some(&RejectAllVerifier), &[], INPUTS),
            Ok(ProofOutcome::Bypassed)
        );
    }

    #[test]
    fn test_empty_proof_reject() {
        assert_eq!(
            check_proof(EmptyProofPolicy::Reject, Some(&AcceptAllVerifier), &[], INPUTS),
            Err(GameError::ProofRequired)
        );
    }

    #[test]
    fn test_non_empty_proof_needs_verifier() {
        assert_eq!(
            check_proof(EmptyProofPolicy::Bypass, None, &[1], INPUTS),
            Err(GameError::VerifierNotConfigured)
        );
        assert_eq!(
            check_proof(EmptyProofPolicy::Bypass, Some(&RejectAllVerifier), &[1], INPUTS),
            Err(GameError::ProofRejected)
        );
        assert_eq!(
            check_proof(EmptyProofPolicy::Reject, Some(&AcceptAllVerifier), &[1], INPUTS),
            Ok(ProofOutcome::Verified)
        );
    }

    #[test]
    fn test_digest_verifier() {
        let verifier = DigestProofVerifier;
        let proof = DigestProofVerifier::prove(INPUTS);

        assert!(verifier.verify(&proof, INPUTS));
        assert!(!verifier.verify(&proof, b"other inputs"));
        assert!(!verifier.verify(&proof[1..], INPUTS));
    }

    #[test]
    fn test_closure_verifier() {
        let only_ff = |proof: &[u8], _inputs: &[u8]| proof == [0xFF];
        assert!(check_proof(EmptyProofPolicy::Bypass, Some(&only_ff), &[0xFF], INPUTS).is_ok());
        assert_eq!(
            check_proof(EmptyProofPolicy::Bypass, Some(&only_ff), &[0x00], INPUTS),
            Err(GameError::ProofRejected)
        );
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("bypass".parse::<EmptyProofPolicy>().unwrap(), EmptyProofPolicy::Bypass);
        assert_eq!("REJECT".parse::<EmptyProofPolicy>().unwrap(), EmptyProofPolicy::Reject);
        assert!("maybe".parse::<EmptyProofPolicy>().is_err());
    }

    #[cfg(not(feature = "strict-proofs"))]
    #[test]
    fn test_default_policy_is_bypass() {
        assert_eq!(EmptyProofPolicy::default(), EmptyProofPolicy::Bypass);
    }

    #[cfg(feature = "strict-proofs")]
    #[test]
    fn test_strict_build_default_policy_is_reject() {
        assert_eq!(EmptyProofPolicy::default(), EmptyProofPolicy::Reject);
        assert_eq!(
            check_proof(EmptyProofPolicy::default(), Some(&AcceptAllVerifier), &[], INPUTS),
            Err(GameError::ProofRequired)
        );
    }
}
