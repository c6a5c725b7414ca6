//! Game Logic Module
//!
//! Rock-paper-scissors matches under commit-reveal. Everything here except
//! `shared` is synchronous and deterministic.
//!
//! ## Module Structure
//!
//! - `moves`: The three moves and the beats relation
//! - `outcome`: Winner enum and the pure resolution rule
//! - `state`: Game record, statuses, write-once slots
//! - `registry`: Game store and state machine
//! - `shared`: Async handle for concurrent callers
//! - `events`: Events emitted by successful writes
//! - `error`: Operation errors

pub mod error;
pub mod events;
pub mod moves;
pub mod outcome;
pub mod registry;
pub mod shared;
pub mod state;

// Re-export key types
pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use moves::Move;
pub use outcome::{resolve, Winner};
pub use registry::GameRegistry;
pub use shared::SharedRegistry;
pub use state::{Game, GameId, GamePhase, GameStatus, GameView, Seat};
