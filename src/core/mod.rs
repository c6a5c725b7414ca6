//! Core primitives.
//!
//! Hashing, identities and fixed-size byte values shared by the game and
//! proof layers. Nothing in here depends on game rules.

pub mod address;
pub mod bytes;
pub mod hash;

// Re-export core types
pub use address::Address;
pub use bytes::HexError;
pub use hash::{Digest32, HashFunction, RecordHasher};
