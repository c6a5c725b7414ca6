//! Hashing Primitives
//!
//! Provides the digest functions used for:
//! - Move commitments (`H(move || salt)`)
//! - Auditable game record digests
//! - Proof public input digests

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tiny_keccak::{Hasher, Keccak};

/// Hash output type (256 bits / 32 bytes)
pub type Digest32 = [u8; 32];

/// Digest function used for move commitments.
///
/// Committing parties hash off-core, so both sides must agree on this.
/// `Keccak256` matches commitments produced by EVM tooling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFunction {
    /// Keccak-256 (Ethereum flavour, pre-NIST padding).
    #[default]
    Keccak256,
    /// SHA-256.
    Sha256,
}

impl HashFunction {
    /// Hash the concatenation of `parts`.
    pub fn digest(&self, parts: &[&[u8]]) -> Digest32 {
        match self {
            Self::Keccak256 => {
                let mut hasher = Keccak::v256();
                for part in parts {
                    hasher.update(part);
                }
                let mut out = [0u8; 32];
                hasher.finalize(&mut out);
                out
            }
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().into()
            }
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown hash function name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hash function: {0}")]
pub struct UnknownHashFunction(pub String);

impl FromStr for HashFunction {
    type Err = UnknownHashFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(Self::Keccak256),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            other => Err(UnknownHashFunction(other.to_string())),
        }
    }
}

/// Compute Keccak-256 of arbitrary data.
pub fn keccak256(data: &[u8]) -> Digest32 {
    HashFunction::Keccak256.digest(&[data])
}

/// Compute SHA-256 of arbitrary data.
pub fn sha256(data: &[u8]) -> Digest32 {
    HashFunction::Sha256.digest(&[data])
}

/// Compute SHA-256 with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Digest32 {
    HashFunction::Sha256.digest(&[domain, data])
}

/// Deterministic hasher for game records.
///
/// Wraps SHA-256 with typed update helpers.
/// Order of updates is part of the digest format.
pub struct RecordHasher {
    hasher: Sha256,
}

impl RecordHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for a single game record.
    pub fn for_game_record() -> Self {
        Self::new(b"RPS_ARENA_GAME_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with an optional value: a presence byte, then the bytes if present.
    ///
    /// Keeps `None` distinct from `Some(all zeros)`.
    #[inline]
    pub fn update_optional(&mut self, value: Option<&[u8]>) {
        match value {
            Some(bytes) => {
                self.update_bool(true);
                self.update_bytes(bytes);
            }
            None => self.update_bool(false),
        }
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> Digest32 {
        self.hasher.finalize().into()
    }
}

// =============================================================================
// TESTS
// =============================================================================
