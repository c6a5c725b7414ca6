//! Shared Registry Handle
//!
//! Cloneable async handle over one [`GameRegistry`]. Every write holds the
//! write lock for the whole operation, so concurrent callers see each
//! operation as atomic and in a single total order.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::address::Address;
use crate::game::error::GameResult;
use crate::game::events::GameEvent;
use crate::game::outcome::Winner;
use crate::game::registry::GameRegistry;
use crate::game::state::{GameId, GameView};
use crate::persist::RegistrySnapshot;
use crate::proof::commitment::{Commitment, Salt};
use crate::proof::verify::ProofVerifier;

/// Handle to a registry shared between tasks.
#[derive(Clone, Debug)]
pub struct SharedRegistry {
    inner: Arc<RwLock<GameRegistry>>,
}

impl SharedRegistry {
    /// Wrap a registry.
    pub fn new(registry: GameRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// See [`GameRegistry::create_game`].
    pub async fn create_game(&self, caller: Address) -> GameResult<GameId> {
        self.inner.write().await.create_game(&caller)
    }

    /// See [`GameRegistry::join_game`].
    pub async fn join_game(&self, caller: Address, id: GameId) -> GameResult<()> {
        self.inner.write().await.join_game(&caller, id)
    }

    /// See [`GameRegistry::commit_move`].
    pub async fn commit_move(
        &self,
        caller: Address,
        id: GameId,
        commitment: Commitment,
    ) -> GameResult<()> {
        self.inner.write().await.commit_move(&caller, id, commitment)
    }

    /// See [`GameRegistry::reveal_move`].
    pub async fn reveal_move(
        &self,
        caller: Address,
        id: GameId,
        played: u8,
        salt: Salt,
        proof: Vec<u8>,
    ) -> GameResult<Winner> {
        self.inner
            .write()
            .await
            .reveal_move(&caller, id, played, salt, &proof)
    }

    /// See [`GameRegistry::get_game`].
    pub async fn get_game(&self, id: GameId) -> GameResult<GameView> {
        self.inner.read().await.get_game(id)
    }

    /// See [`GameRegistry::set_verifier`].
    pub async fn set_verifier(
        &self,
        caller: Address,
        verifier: Arc<dyn ProofVerifier>,
    ) -> GameResult<()> {
        self.inner.write().await.set_verifier(&caller, verifier)
    }

    /// Drain pending events.
    pub async fn take_events(&self) -> Vec<GameEvent> {
        self.inner.write().await.take_events()
    }

    /// Run a read-only closure under the read lock.
    pub async fn read<R>(&self, f: impl FnOnce(&GameRegistry) -> R) -> R {
        f(&*self.inner.read().await)
    }

    /// Consistent snapshot of every game.
    pub async fn snapshot(&self) -> RegistrySnapshot {
        self.inner.read().await.snapshot()
    }
}

impl From<GameRegistry> for SharedRegistry {
    fn from(registry: GameRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::core::hash::HashFunction;
    use crate::game::error::GameError;
    use crate::game::moves::Move;
    use crate::game::state::GameStatus;
    use crate::proof::commitment::compute_commitment;

    fn player(i: u32) -> Address {
        Address::derive(&i.to_be_bytes())
    }

    fn shared() -> SharedRegistry {
        GameRegistry::new(Address::derive(b"deployer"), RegistryConfig::permissive()).into()
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let registry = shared();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.create_game(player(i)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (0..16).collect::<Vec<GameId>>());
        assert_eq!(registry.read(|r| r.game_count()).await, 16);
    }

    #[tokio::test]
    async fn test_concurrent_joins_single_winner() {
        let registry = shared();
        let id = registry.create_game(player(0)).await.unwrap();

        let handles: Vec<_> = (1..9)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.join_game(player(i), id).await })
            })
            .collect();

        let mut joined = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => joined += 1,
                Err(err) => assert!(matches!(err, GameError::InvalidState { .. })),
            }
        }

        assert_eq!(joined, 1);
        assert_eq!(registry.get_game(id).await.unwrap().status, GameStatus::Committed);
    }

    #[tokio::test]
    async fn test_full_game_across_tasks() {
        let registry = shared();
        let (alice, bob) = (player(1), player(2));
        let (alice_salt, bob_salt) = (Salt::new([0xA1; 32]), Salt::new([0xB0; 32]));

        let id = registry.create_game(alice).await.unwrap();
        registry.join_game(bob, id).await.unwrap();

        let commits = [(alice, Move::Paper, alice_salt), (bob, Move::Rock, bob_salt)].map(
            |(who, played, salt)| {
                let registry = registry.clone();
                let commitment = compute_commitment(HashFunction::Keccak256, played, &salt);
                tokio::spawn(async move { registry.commit_move(who, id, commitment).await })
            },
        );
        for handle in commits {
            handle.await.unwrap().unwrap();
        }

        let reveals = [(alice, Move::Paper, alice_salt), (bob, Move::Rock, bob_salt)].map(
            |(who, played, salt)| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    registry
                        .reveal_move(who, id, played.as_u8(), salt, Vec::new())
                        .await
                })
            },
        );
        let mut winners = Vec::new();
        for handle in reveals {
            winners.push(handle.await.unwrap().unwrap());
        }

        // Exactly one of the two reveals resolves the game.
        assert_eq!(winners.iter().filter(|w| **w == Winner::None).count(), 1);
        assert!(winners.contains(&Winner::Player1));

        let view = registry.get_game(id).await.unwrap();
        assert_eq!(view.status, GameStatus::Completed);
        assert_eq!(view.winner, Winner::Player1);
        assert_eq!(registry.take_events().await.len(), 7);
    }
}
