//! Move Commitment Protocol
//!
//! Players commit to `H(move || salt)` before either move is visible.
//! At reveal the registry recomputes the hash from the plaintext and
//! compares it byte-for-byte with what was stored.
//!
//! The preimage is exactly one move byte followed by the 32-byte salt,
//! with no domain separator, so commitments built by other tooling
//! (e.g. `keccak256(concat([toBytes(move), salt]))`) verify unchanged.

use crate::core::bytes::fixed_bytes;
use crate::core::hash::HashFunction;
use crate::game::error::GameError;
use crate::game::moves::Move;

fixed_bytes!(
    /// Commitment hash published by a player before revealing.
    Commitment,
    32
);

fixed_bytes!(
    /// Secret salt mixed into a commitment.
    ///
    /// The move space has only three values; the salt is what makes the
    /// commitment unguessable. Treated as opaque bytes, all-zero included.
    Salt,
    32
);

/// Computes and checks move commitments with a fixed hash function.
///
/// Pure: anyone who later learns `(move, salt)` can re-derive the commitment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitmentVerifier {
    hash_fn: HashFunction,
}

impl CommitmentVerifier {
    /// Create a verifier using `hash_fn`.
    pub const fn new(hash_fn: HashFunction) -> Self {
        Self { hash_fn }
    }

    /// Hash function in use.
    pub fn hash_function(&self) -> HashFunction {
        self.hash_fn
    }

    /// Compute the commitment for `played` under `salt`.
    pub fn commit(&self, played: Move, salt: &Salt) -> Commitment {
        compute_commitment(self.hash_fn, played, salt)
    }

    /// Does `(played, salt)` open `stored`?
    pub fn verify(&self, stored: &Commitment, played: Move, salt: &Salt) -> bool {
        self.commit(played, salt) == *stored
    }

    /// Like [`verify`](Self::verify), as a `Result` for the reveal path.
    pub fn check(&self, stored: &Commitment, played: Move, salt: &Salt) -> Result<(), GameError> {
        if self.verify(stored, played, salt) {
            Ok(())
        } else {
            Err(GameError::CommitmentMismatch)
        }
    }
}

/// Compute `H(move_byte || salt)`.
pub fn compute_commitment(hash_fn: HashFunction, played: Move, salt: &Salt) -> Commitment {
    Commitment(hash_fn.digest(&[&[played.as_u8()][..], &salt.0[..]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn salt_ending_in(last: u8) -> Salt {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        Salt::new(bytes)
    }

    #[test]
    fn test_keccak_commitment_matches_evm_tooling() {
        // keccak256(0x00 || 0x00..01): Rock with salt 1
        let rock = compute_commitment(HashFunction::Keccak256, Move::Rock, &salt_ending_in(1));
        assert_eq!(
            rock.to_hex(),
            "0xc13ad76448cbefd1ee83b801bcd8f33061f2577d6118395e7b44ea21c7ef62e0"
        );

        // keccak256(0x02 || 0x00..02): Scissors with salt 2
        let scissors =
            compute_commitment(HashFunction::Keccak256, Move::Scissors, &salt_ending_in(2));
        assert_eq!(
            scissors.to_hex(),
            "0x2e530df060bd63bdca52c856e62a21a7a660895e1fa239646a163f61b019ae0e"
        );
    }

    #[test]
    fn test_sha256_commitment_vector() {
        let rock = compute_commitment(HashFunction::Sha256, Move::Rock, &salt_ending_in(1));
        assert_eq!(
            rock.to_hex(),
            "0x1fd4247443c9440cb3c48c28851937196bc156032d70a96c98e127ecb347e45f"
        );
    }

    #[test]
    fn test_verify_and_check() {
        let verifier = CommitmentVerifier::default();
        let salt = salt_ending_in(9);
        let stored = verifier.commit(Move::Paper, &salt);

        assert!(verifier.verify(&stored, Move::Paper, &salt));
        assert!(!verifier.verify(&stored, Move::Rock, &salt));
        assert!(!verifier.verify(&stored, Move::Paper, &salt_ending_in(8)));
        assert_eq!(verifier.check(&stored, Move::Paper, &salt), Ok(()));
        assert_eq!(
            verifier.check(&stored, Move::Scissors, &salt),
            Err(GameError::CommitmentMismatch)
        );
    }

    #[test]
    fn test_zero_salt_is_a_valid_salt() {
        let verifier = CommitmentVerifier::new(HashFunction::Sha256);
        let stored = verifier.commit(Move::Rock, &Salt::ZERO);
        assert!(!stored.is_zero());
        assert!(verifier.verify(&stored, Move::Rock, &Salt::ZERO));
    }

    #[test]
    fn test_hash_functions_disagree() {
        let salt = salt_ending_in(1);
        let keccak = CommitmentVerifier::new(HashFunction::Keccak256).commit(Move::Rock, &salt);
        let sha = CommitmentVerifier::new(HashFunction::Sha256).commit(Move::Rock, &salt);
        assert_ne!(keccak, sha);
    }

    proptest! {
        #[test]
        fn prop_only_the_committed_move_opens(
            salt in any::<[u8; 32]>(),
            committed in 0u8..3,
            revealed in 0u8..3,
        ) {
            let verifier = CommitmentVerifier::default();
            let salt = Salt::new(salt);
            let committed = Move::from_u8(committed).unwrap();
            let revealed = Move::from_u8(revealed).unwrap();
            let stored = verifier.commit(committed, &salt);

            prop_assert_eq!(verifier.verify(&stored, revealed, &salt), committed == revealed);
        }

        #[test]
        fn prop_other_salt_never_opens(
            salt in any::<[u8; 32]>(),
            other in any::<[u8; 32]>(),
        ) {
            prop_assume!(salt != other);
            let verifier = CommitmentVerifier::default();
            let stored = verifier.commit(Move::Paper, &Salt::new(salt));

            prop_assert!(!verifier.verify(&stored, Move::Paper, &Salt::new(other)));
        }
    }
}
