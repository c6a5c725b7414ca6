//! Commitment and Proof Plumbing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF LAYER                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  commitment.rs    - H(move || salt) commitments             │
//! │  public_inputs.rs - ABI-style words handed to the verifier  │
//! │  verify.rs        - Verifier trait and empty-proof policy   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod commitment;
pub mod public_inputs;
pub mod verify;

// Re-export key types
pub use commitment::{compute_commitment, Commitment, CommitmentVerifier, Salt};
pub use public_inputs::{RevealPublicInputs, PUBLIC_INPUT_LEN};
pub use verify::{
    check_proof, AcceptAllVerifier, DigestProofVerifier, EmptyProofPolicy, ProofOutcome,
    ProofVerifier, RejectAllVerifier,
};
