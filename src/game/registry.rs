//! Game Registry
//!
//! Owns every game record, allocates ids and enforces the state machine:
//!
//! ```text
//! WaitingForPlayer ──join──► Committed ──1st reveal──► Revealed ──2nd reveal──► Completed
//!                            (commits land here)
//! ```
//!
//! Each write operation validates everything before touching state, so a
//! failed call leaves the registry exactly as it was. Ordering between calls
//! is the caller's job; write-once slots and phase checks reject duplicates.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::core::address::Address;
use crate::game::error::{GameError, GameResult};
use crate::game::events::GameEvent;
use crate::game::moves::Move;
use crate::game::outcome::{resolve, Winner};
use crate::game::state::{Game, GameId, GamePhase, GameStatus, GameView, Reveal, Seat};
use crate::proof::commitment::{Commitment, CommitmentVerifier, Salt};
use crate::proof::public_inputs::RevealPublicInputs;
use crate::proof::verify::{check_proof, ProofOutcome, ProofVerifier};

/// Registry of all games.
///
/// Every successful write appends to an in-memory event log that is only
/// emptied by [`take_events`](Self::take_events). Long-lived owners must drain
/// it periodically or the log grows with every operation.
pub struct GameRegistry {
    /// Deploying identity; the only caller allowed to wire the verifier.
    owner: Address,
    config: RegistryConfig,
    commitments: CommitmentVerifier,
    verifier: Option<Arc<dyn ProofVerifier>>,
    /// Index == game id. Append-only.
    games: Vec<Game>,
    /// Undrained events, oldest first.
    pending_events: Vec<GameEvent>,
}

impl GameRegistry {
    /// Create an empty registry owned by `owner`, with no proof verifier.
    pub fn new(owner: Address, config: RegistryConfig) -> Self {
        Self {
            owner,
            commitments: config.commitment_verifier(),
            config,
            verifier: None,
            games: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Inject the proof verifier at construction.
    pub fn with_verifier(mut self, verifier: Arc<dyn ProofVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub(crate) fn from_parts(
        owner: Address,
        config: RegistryConfig,
        verifier: Option<Arc<dyn ProofVerifier>>,
        games: Vec<Game>,
    ) -> Self {
        Self {
            owner,
            commitments: config.commitment_verifier(),
            config,
            verifier,
            games,
            pending_events: Vec::new(),
        }
    }

    /// Registry owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Commitment verifier in use.
    pub fn commitment_verifier(&self) -> &CommitmentVerifier {
        &self.commitments
    }

    /// Is a proof verifier wired in?
    pub fn has_verifier(&self) -> bool {
        self.verifier.is_some()
    }

    /// Number of games ever created.
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Borrow a game record.
    pub fn game(&self, id: GameId) -> Option<&Game> {
        usize::try_from(id).ok().and_then(|i| self.games.get(i))
    }

    /// All games in id order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    /// Number of events waiting to be drained.
    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================

    /// Replace the proof verifier. Owner only; may be called repeatedly.
    pub fn set_verifier(
        &mut self,
        caller: &Address,
        verifier: Arc<dyn ProofVerifier>,
    ) -> GameResult<()> {
        if *caller != self.owner {
            warn!("set_verifier by non-owner {}", caller.short());
            return Err(GameError::Unauthorized);
        }

        self.verifier = Some(verifier);
        self.pending_events.push(GameEvent::VerifierUpdated { by: *caller });
        info!("Proof verifier updated by {}", caller.short());
        Ok(())
    }

    // =========================================================================
    // GAME OPERATIONS
    // =========================================================================

    /// Create a game with `caller` as player 1. Returns the new id.
    pub fn create_game(&mut self, caller: &Address) -> GameResult<GameId> {
        if caller.is_zero() {
            return Err(GameError::Unauthorized);
        }

        let id = self.games.len() as GameId;
        self.games.push(Game::new(id, *caller));
        self.pending_events.push(GameEvent::GameCreated {
            game_id: id,
            player1: *caller,
        });

        debug!("Game {} created by {}", id, caller.short());
        Ok(id)
    }

    /// Take the second seat of a waiting game.
    pub fn join_game(&mut self, caller: &Address, id: GameId) -> GameResult<()> {
        let game = lookup_mut(&mut self.games, id)?;

        if game.status() != GameStatus::WaitingForPlayer {
            return Err(invalid_state(game));
        }
        if caller.is_zero() {
            return Err(GameError::Unauthorized);
        }
        if *caller == game.player1() {
            return Err(GameError::SelfJoin);
        }

        if game.seat_mut(Seat::Player2).address.set(*caller).is_err() {
            return Err(invalid_state(game));
        }
        game.status = GameStatus::Committed;
        debug_assert!(game.check_invariants(&self.commitments).is_ok());

        self.pending_events.push(GameEvent::PlayerJoined {
            game_id: id,
            player2: *caller,
        });
        debug!("Game {} joined by {}", id, caller.short());
        Ok(())
    }

    /// Store the caller's commitment. The hash is kept verbatim.
    pub fn commit_move(
        &mut self,
        caller: &Address,
        id: GameId,
        commitment: Commitment,
    ) -> GameResult<()> {
        let game = lookup_mut(&mut self.games, id)?;

        let seat = game.seat_of(caller).ok_or(GameError::Unauthorized)?;
        if game.seat(seat).has_committed() {
            return Err(GameError::AlreadyCommitted);
        }
        if game.phase() != GamePhase::AwaitingCommits {
            return Err(invalid_state(game));
        }

        game.seat_mut(seat)
            .commitment
            .set(commitment)
            .map_err(|_| GameError::AlreadyCommitted)?;
        debug_assert!(game.check_invariants(&self.commitments).is_ok());

        self.pending_events.push(GameEvent::MoveCommitted {
            game_id: id,
            player: *caller,
            commitment,
        });
        debug!(
            "Game {}: {:?} committed {}",
            id,
            seat,
            &commitment.to_hex()[..10]
        );
        if game.both_committed() {
            debug!("Game {}: both players committed, reveals open", id);
        }
        Ok(())
    }

    /// Reveal the caller's move.
    ///
    /// Checks, in order: participant, not yet revealed, both commitments
    /// stored, move in range, `H(move || salt)` matches, then the proof.
    /// Returns the winner once both reveals are in, `Winner::None` before.
    pub fn reveal_move(
        &mut self,
        caller: &Address,
        id: GameId,
        played: u8,
        salt: Salt,
        proof: &[u8],
    ) -> GameResult<Winner> {
        let game = lookup_mut(&mut self.games, id)?;

        let seat = game.seat_of(caller).ok_or(GameError::Unauthorized)?;
        if game.seat(seat).has_revealed() {
            return Err(GameError::AlreadyRevealed);
        }
        let stored = game
            .seat(seat)
            .commitment()
            .ok_or(GameError::MissingCommitment)?;
        if !game.both_committed() {
            return Err(GameError::MissingCommitment);
        }

        let played = Move::try_from(played)?;

        if let Err(err) = self.commitments.check(&stored, played, &salt) {
            warn!("Game {}: commitment mismatch from {}", id, caller.short());
            return Err(err);
        }

        let public_inputs = RevealPublicInputs::new(id, *caller, played, stored);
        match check_proof(
            self.config.empty_proof_policy,
            self.verifier.as_deref(),
            proof,
            &public_inputs.to_bytes(),
        ) {
            Ok(ProofOutcome::Verified) => {
                debug!(
                    "Game {}: proof verified for inputs {}",
                    id,
                    hex::encode(&public_inputs.digest()[..4])
                );
            }
            Ok(ProofOutcome::Bypassed) => {
                debug!("Game {}: empty proof accepted (bypass policy)", id);
            }
            Err(err) => {
                warn!("Game {}: proof check failed for {}: {}", id, caller.short(), err);
                return Err(err);
            }
        }

        // All checks passed; from here on nothing can fail.
        game.seat_mut(seat)
            .reveal
            .set(Reveal { played, salt })
            .map_err(|_| GameError::AlreadyRevealed)?;

        let moves = (
            game.seat(Seat::Player1).played(),
            game.seat(Seat::Player2).played(),
        );
        let winner = match moves {
            (Some(move1), Some(move2)) => {
                let winner = resolve(move1, move2);
                game.winner = winner;
                game.status = GameStatus::Completed;
                winner
            }
            _ => {
                game.status = GameStatus::Revealed;
                Winner::None
            }
        };
        debug_assert!(game.check_invariants(&self.commitments).is_ok());

        self.pending_events.push(GameEvent::MoveRevealed {
            game_id: id,
            player: *caller,
            played,
        });
        debug!("Game {}: {:?} revealed {}", id, seat, played);

        if winner.is_decided() {
            self.pending_events.push(GameEvent::GameCompleted { game_id: id, winner });
            info!("Game {} completed: {:?}", id, winner);
        }

        Ok(winner)
    }

    /// Read a game.
    pub fn get_game(&self, id: GameId) -> GameResult<GameView> {
        self.game(id).map(Game::view).ok_or(GameError::NotFound(id))
    }
}

impl fmt::Debug for GameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameRegistry")
            .field("owner", &self.owner)
            .field("config", &self.config)
            .field("has_verifier", &self.has_verifier())
            .field("games", &self.games.len())
            .field("pending_events", &self.pending_events.len())
            .finish()
    }
}

fn lookup_mut(games: &mut [Game], id: GameId) -> GameResult<&mut Game> {
    usize::try_from(id)
        .ok()
        .and_then(|i| games.get_mut(i))
        .ok_or(GameError::NotFound(id))
}

fn invalid_state(game: &Game) -> GameError {
    GameError::InvalidState {
        id: game.id(),
        status: game.status(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
