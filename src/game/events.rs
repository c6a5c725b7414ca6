//! Game Events
//!
//! Emitted by every successful registry write, in execution order.
//! Consumers (indexers, UIs) drain them with `GameRegistry::take_events`.

use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::game::moves::Move;
use crate::game::outcome::Winner;
use crate::game::state::GameId;
use crate::proof::commitment::Commitment;

/// Registry event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A game was created.
    GameCreated {
        /// New game.
        game_id: GameId,
        /// Creator.
        player1: Address,
    },

    /// Second seat taken.
    PlayerJoined {
        /// Joined game.
        game_id: GameId,
        /// Joiner.
        player2: Address,
    },

    /// A player stored their commitment.
    MoveCommitted {
        /// Game committed in.
        game_id: GameId,
        /// Committing player.
        player: Address,
        /// Stored commitment hash.
        commitment: Commitment,
    },

    /// A player's reveal was accepted.
    MoveRevealed {
        /// Game revealed in.
        game_id: GameId,
        /// Revealing player.
        player: Address,
        /// Revealed move.
        played: Move,
    },

    /// Both reveals accepted; outcome fixed.
    GameCompleted {
        /// Completed game.
        game_id: GameId,
        /// Final outcome.
        winner: Winner,
    },

    /// Proof verifier replaced by the owner.
    VerifierUpdated {
        /// Owner that made the change.
        by: Address,
    },
}

impl GameEvent {
    /// Game this event concerns, if any.
    pub fn game_id(&self) -> Option<GameId> {
        match self {
            Self::GameCreated { game_id, .. }
            | Self::PlayerJoined { game_id, .. }
            | Self::MoveCommitted { game_id, .. }
            | Self::MoveRevealed { game_id, .. }
            | Self::GameCompleted { game_id, .. } => Some(*game_id),
            Self::VerifierUpdated { .. } => None,
        }
    }
}
