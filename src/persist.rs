//! Registry Snapshots
//!
//! Serialize every game record so a registry can be stored and rebuilt.
//! Bincode for compact storage, JSON for inspection.
//!
//! The proof verifier is a runtime dependency and is never persisted; pass it
//! again to [`GameRegistry::restore`]. Restored records are re-validated, so a
//! tampered snapshot (forged reveal, gapped ids) is refused.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::RegistryConfig;
use crate::core::address::Address;
use crate::core::hash::{Digest32, RecordHasher};
use crate::game::registry::GameRegistry;
use crate::game::state::{Game, GameId, InvariantViolation};
use crate::proof::verify::ProofVerifier;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Binary encoding failed.
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),

    /// JSON encoding failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Written by an incompatible format version.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),

    /// Ids are not `0..n` in order.
    #[error("expected game id {expected}, found {got}")]
    NonSequentialId {
        /// Id required at this position.
        expected: GameId,
        /// Id found.
        got: GameId,
    },

    /// Owner is the zero identity.
    #[error("zero owner identity")]
    ZeroOwner,

    /// A game record is internally inconsistent.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Serialized registry state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Format version.
    pub version: u8,
    /// Registry owner.
    pub owner: Address,
    /// Configuration in force when taken.
    pub config: RegistryConfig,
    /// Every game, in id order.
    pub games: Vec<Game>,
}

impl RegistrySnapshot {
    /// Serialize to bincode.
    pub fn to_bincode(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bincode.
    pub fn from_bincode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check version, id sequence and every record's invariants.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        if self.owner.is_zero() {
            return Err(SnapshotError::ZeroOwner);
        }

        let verifier = self.config.commitment_verifier();
        for (expected, game) in (0..).zip(&self.games) {
            if game.id() != expected {
                return Err(SnapshotError::NonSequentialId {
                    expected,
                    got: game.id(),
                });
            }
            game.check_invariants(&verifier)?;
        }
        Ok(())
    }

    /// Digest over all game records, in order.
    pub fn digest(&self) -> Digest32 {
        let mut hasher = RecordHasher::new(b"RPS_ARENA_SNAPSHOT_V1");
        hasher.update_u64(self.games.len() as u64);
        for game in &self.games {
            hasher.update_bytes(&game.compute_hash());
        }
        hasher.finalize()
    }
}

impl GameRegistry {
    /// Capture every game record.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            version: SNAPSHOT_VERSION,
            owner: self.owner(),
            config: *self.config(),
            games: self.games().cloned().collect(),
        }
    }

    /// Rebuild a registry from a validated snapshot.
    pub fn restore(
        snapshot: RegistrySnapshot,
        verifier: Option<Arc<dyn ProofVerifier>>,
    ) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        info!(
            "Restored registry: {} games, digest {}",
            snapshot.games.len(),
            hex::encode(&snapshot.digest()[..8])
        );
        Ok(Self::from_parts(
            snapshot.owner,
            snapshot.config,
            verifier,
            snapshot.games,
        ))
    }
}
