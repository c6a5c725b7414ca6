//! RPS Arena Demo
//!
//! Plays one full commit-reveal game through the shared registry, then
//! snapshots and restores the registry and checks the records survived.

use std::sync::Arc;

use anyhow::{ensure, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rps_arena::{
    game::GameEvent,
    proof::{compute_commitment, DigestProofVerifier, RevealPublicInputs},
    Address, GameRegistry, Move, RegistryConfig, Salt, SharedRegistry, Winner, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RegistryConfig::from_env().context("invalid registry configuration")?;

    info!("RPS Arena v{}", VERSION);
    info!("Commitment hash: {}", config.commitment_hash);
    info!("Empty proof policy: {}", config.empty_proof_policy);

    demo_game(config).await
}

/// Demo: one game, two players, one proof-carrying reveal.
async fn demo_game(config: RegistryConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Game ===");

    let owner = Address::derive(b"deployer");
    let alice = Address::derive(b"alice");
    let bob = Address::derive(b"bob");

    let registry = SharedRegistry::new(GameRegistry::new(owner, config));
    registry
        .set_verifier(owner, Arc::new(DigestProofVerifier))
        .await?;

    let id = registry.create_game(alice).await?;
    registry.join_game(bob, id).await?;
    info!("Game {}: {} vs {}", id, alice, bob);

    let mut alice_salt = [0u8; 32];
    alice_salt[31] = 1;
    let mut bob_salt = [0u8; 32];
    bob_salt[31] = 2;
    let plays = [
        (alice, Move::Rock, Salt::new(alice_salt)),
        (bob, Move::Paper, Salt::new(bob_salt)),
    ];

    // Commit phase: both players in parallel.
    let mut commits = Vec::new();
    for (player, played, salt) in plays {
        let registry = registry.clone();
        let commitment = compute_commitment(config.commitment_hash, played, &salt);
        commits.push(tokio::spawn(async move {
            registry.commit_move(player, id, commitment).await
        }));
    }
    for handle in commits {
        handle.await??;
    }

    // Reveal phase. Alice proves her reveal; Bob relies on the empty-proof policy.
    let mut reveals = Vec::new();
    for (player, played, salt) in plays {
        let registry = registry.clone();
        let commitment = compute_commitment(config.commitment_hash, played, &salt);
        let proof = if player == alice {
            DigestProofVerifier::prove(
                &RevealPublicInputs::new(id, player, played, commitment).to_bytes(),
            )
        } else {
            Vec::new()
        };
        reveals.push(tokio::spawn(async move {
            registry
                .reveal_move(player, id, played.as_u8(), salt, proof)
                .await
        }));
    }
    for handle in reveals {
        match handle.await? {
            Ok(winner) if winner.is_decided() => info!("Game {} resolved: {:?}", id, winner),
            Ok(_) => {}
            Err(err) => warn!("Reveal rejected: {}", err),
        }
    }

    let view = registry.get_game(id).await?;
    info!("Final record:\n{}", serde_json::to_string_pretty(&view)?);

    for event in registry.take_events().await {
        log_event(&event);
    }

    if view.status.is_terminal() {
        ensure!(view.winner == Winner::Player2, "paper must beat rock");
    }

    // Snapshot and restore; record hashes must match.
    let snapshot = registry.snapshot().await;
    let bytes = snapshot.to_bincode()?;
    info!("Snapshot: {} games, {} bytes", snapshot.games.len(), bytes.len());

    let restored = rps_arena::persist::RegistrySnapshot::from_bincode(&bytes)?;
    let restored = GameRegistry::restore(restored, Some(Arc::new(DigestProofVerifier)))?;

    let original_hash = registry
        .read(|r| r.game(id).map(|g| g.compute_hash()))
        .await
        .context("game vanished from registry")?;
    let restored_hash = restored
        .game(id)
        .map(|g| g.compute_hash())
        .context("game missing after restore")?;

    info!("Record hash: {}", hex::encode(original_hash));
    ensure!(
        original_hash == restored_hash,
        "restored record hash differs: {} != {}",
        hex::encode(original_hash),
        hex::encode(restored_hash)
    );
    info!("=== Determinism check PASSED ===");

    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameCreated { game_id, player1 } => {
            info!("  [{}] created by {}", game_id, player1.short())
        }
        GameEvent::PlayerJoined { game_id, player2 } => {
            info!("  [{}] joined by {}", game_id, player2.short())
        }
        GameEvent::MoveCommitted { game_id, player, .. } => {
            info!("  [{}] commit from {}", game_id, player.short())
        }
        GameEvent::MoveRevealed { game_id, player, played } => {
            info!("  [{}] {} revealed {}", game_id, player.short(), played)
        }
        GameEvent::GameCompleted { game_id, winner } => {
            info!("  [{}] completed: {:?}", game_id, winner)
        }
        GameEvent::VerifierUpdated { by } => info!("  verifier updated by {}", by.short()),
    }
}
