//! # RPS Arena
//!
//! Two-player rock-paper-scissors registry with commit-reveal and optional
//! zero-knowledge proof checks on every reveal.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       RPS ARENA                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── bytes.rs     - Fixed-size byte newtypes                 │
//! │  ├── address.rs   - 20-byte player identities                │
//! │  └── hash.rs      - Keccak/SHA-256 and record hashing        │
//! │                                                              │
//! │  game/            - Game logic (deterministic)               │
//! │  ├── moves.rs     - Rock, Paper, Scissors                    │
//! │  ├── outcome.rs   - Winner resolution                        │
//! │  ├── state.rs     - Game record and statuses                 │
//! │  ├── registry.rs  - State machine over all games             │
//! │  └── shared.rs    - Async shared handle                      │
//! │                                                              │
//! │  proof/           - Commitments and proof verification       │
//! │  config.rs        - Hash function and proof policy           │
//! │  persist.rs       - Snapshots (bincode / JSON)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Protocol
//!
//! 1. Player 1 creates a game, player 2 joins it.
//! 2. Each player commits `H(move || salt)` without revealing the move.
//! 3. Once both commitments are stored, each player reveals `(move, salt)`,
//!    optionally with a proof over the reveal's public inputs.
//! 4. The second accepted reveal fixes the winner.
//!
//! Given the same operations in the same order, every registry reaches the
//! same records and the same record hashes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod persist;
pub mod proof;

// Re-export commonly used types
pub use crate::config::RegistryConfig;
pub use crate::core::address::Address;
pub use crate::core::hash::HashFunction;
pub use game::{GameError, GameRegistry, GameStatus, GameView, Move, SharedRegistry, Winner};
pub use proof::{Commitment, ProofVerifier, Salt};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
