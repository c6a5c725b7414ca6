//! Proof Public Inputs
//!
//! Deterministic encoding of what a reveal proof attests to: which game,
//! which player, which move, against which commitment.
//!
//! Layout is four 32-byte big-endian words, ABI style:
//!
//! ```text
//! [0..32]    uint256  game_id
//! [32..64]   address  player (left-padded)
//! [64..96]   uint256  move
//! [96..128]  bytes32  commitment
//! ```

use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::hash::{hash_with_domain, Digest32};
use crate::game::moves::Move;
use crate::game::state::GameId;
use crate::proof::commitment::Commitment;

/// One 32-byte public input word.
pub type Word = [u8; 32];

/// Number of words in the encoding.
pub const PUBLIC_INPUT_WORD_COUNT: usize = 4;

/// Encoded length in bytes.
pub const PUBLIC_INPUT_LEN: usize = PUBLIC_INPUT_WORD_COUNT * 32;

/// Domain separator for the public input digest.
const PUBLIC_INPUTS_DOMAIN: &[u8] = b"RPS_ARENA_PUBLIC_INPUTS_V1";

/// Public inputs handed to the external verifier for one reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealPublicInputs {
    /// Game being revealed in.
    pub game_id: GameId,
    /// Revealing player.
    pub player: Address,
    /// Revealed move.
    pub played: Move,
    /// Commitment stored for the player.
    pub commitment: Commitment,
}

impl RevealPublicInputs {
    /// Bundle the inputs.
    pub fn new(game_id: GameId, player: Address, played: Move, commitment: Commitment) -> Self {
        Self {
            game_id,
            player,
            played,
            commitment,
        }
    }

    /// Encode as 32-byte words.
    pub fn to_words(&self) -> [Word; PUBLIC_INPUT_WORD_COUNT] {
        let mut player = [0u8; 32];
        player[12..].copy_from_slice(self.player.as_bytes());

        [
            u64_word(self.game_id),
            player,
            u64_word(self.played.as_u8() as u64),
            self.commitment.0,
        ]
    }

    /// Encode as one flat byte string (what the verifier receives).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_words().concat()
    }

    /// Decode a flat encoding. Rejects wrong lengths and non-canonical padding.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PUBLIC_INPUT_LEN {
            return None;
        }

        let word = |i: usize| &bytes[i * 32..(i + 1) * 32];

        let game_id = word_to_u64(word(0))?;

        let player_word = word(1);
        if player_word[..12].iter().any(|b| *b != 0) {
            return None;
        }
        let mut player = [0u8; 20];
        player.copy_from_slice(&player_word[12..]);

        let played = word_to_u64(word(2))
            .and_then(|v| u8::try_from(v).ok())
            .and_then(Move::from_u8)?;

        let mut commitment = [0u8; 32];
        commitment.copy_from_slice(word(3));

        Some(Self {
            game_id,
            player: Address::new(player),
            played,
            commitment: Commitment::new(commitment),
        })
    }

    /// Domain-separated SHA-256 of the encoding, for logs and digest-style verifiers.
    pub fn digest(&self) -> Digest32 {
        hash_with_domain(PUBLIC_INPUTS_DOMAIN, &self.to_bytes())
    }
}

/// Big-endian u64 in the low bytes of a word.
fn u64_word(value: u64) -> Word {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Inverse of `u64_word`; `None` if the high bytes are not zero.
fn word_to_u64(word: &[u8]) -> Option<u64> {
    if word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    Some(u64::from_be_bytes(low))
}
