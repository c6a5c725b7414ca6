//! Game Errors
//!
//! Every failure is a local validation failure: the operation is aborted,
//! the registry is left untouched, and the error goes straight back to the caller.

use thiserror::Error;

use crate::game::state::{GameId, GameStatus};

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No game with this id.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// Operation not legal in the game's current status.
    #[error("game {id} is {status:?}; operation not allowed")]
    InvalidState {
        /// Game id.
        id: GameId,
        /// Status at the time of the call.
        status: GameStatus,
    },

    /// Caller is not a legitimate participant for this operation.
    #[error("caller not authorized")]
    Unauthorized,

    /// Player 1 tried to take the second seat of their own game.
    #[error("cannot join own game")]
    SelfJoin,

    /// Caller already stored a commitment for this game.
    #[error("move already committed")]
    AlreadyCommitted,

    /// Caller already revealed for this game.
    #[error("move already revealed")]
    AlreadyRevealed,

    /// Reveal attempted before both commitments exist.
    #[error("missing commitment")]
    MissingCommitment,

    /// Move outside {0, 1, 2}.
    #[error("invalid move: {0}")]
    InvalidMove(u8),

    /// `H(move || salt)` does not match the stored commitment.
    #[error("commitment mismatch")]
    CommitmentMismatch,

    /// External verifier rejected the proof.
    #[error("proof rejected by verifier")]
    ProofRejected,

    /// Empty proof supplied while empty proofs are not accepted.
    #[error("proof required")]
    ProofRequired,

    /// Non-empty proof supplied but no verifier is wired in.
    #[error("proof verifier not configured")]
    VerifierNotConfigured,
}

/// Result alias for registry operations.
pub type GameResult<T> = Result<T, GameError>;
