//! Registry Configuration
//!
//! Fixed at construction. Read from the environment by the binary:
//!
//! - `RPS_COMMITMENT_HASH`: `keccak256` (default) or `sha256`
//! - `RPS_EMPTY_PROOF`: `bypass` (default) or `reject`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::{HashFunction, UnknownHashFunction};
use crate::proof::commitment::CommitmentVerifier;
use crate::proof::verify::{EmptyProofPolicy, UnknownProofPolicy};

/// Environment variable selecting the commitment hash function.
pub const ENV_COMMITMENT_HASH: &str = "RPS_COMMITMENT_HASH";

/// Environment variable selecting the empty-proof policy.
pub const ENV_EMPTY_PROOF: &str = "RPS_EMPTY_PROOF";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Unparseable hash function name.
    #[error("RPS_COMMITMENT_HASH: {0}")]
    HashFunction(#[from] UnknownHashFunction),

    /// Unparseable empty-proof policy.
    #[error("RPS_EMPTY_PROOF: {0}")]
    EmptyProofPolicy(#[from] UnknownProofPolicy),
}

/// Registry configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Hash used to open commitments. Must match what committing clients use.
    pub commitment_hash: HashFunction,
    /// Treatment of reveals carrying an empty proof.
    pub empty_proof_policy: EmptyProofPolicy,
}

impl RegistryConfig {
    /// Configuration that requires a proof on every reveal.
    pub fn strict() -> Self {
        Self {
            empty_proof_policy: EmptyProofPolicy::Reject,
            ..Self::default()
        }
    }

    /// Configuration that accepts empty proofs, whatever the build default.
    pub fn permissive() -> Self {
        Self {
            empty_proof_policy: EmptyProofPolicy::Bypass,
            ..Self::default()
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_COMMITMENT_HASH) {
            config.commitment_hash = value.parse()?;
        }

        if let Some(value) = lookup(ENV_EMPTY_PROOF) {
            config.empty_proof_policy = value.parse()?;
        }

        Ok(config)
    }

    /// Commitment verifier for the configured hash function.
    pub fn commitment_verifier(&self) -> CommitmentVerifier {
        CommitmentVerifier::new(self.commitment_hash)
    }
}
