//! Participant Identity
//!
//! Players are identified by 20-byte account addresses, as assigned by the
//! execution environment that submits operations on their behalf.

use super::bytes::fixed_bytes;
use super::hash::keccak256;

fixed_bytes!(
    /// Account address of a caller (20 bytes).
    ///
    /// `Address::ZERO` is the "no identity" sentinel: it never owns a seat.
    Address,
    20
);

impl Address {
    /// Derive a deterministic address from a seed.
    ///
    /// Takes the last 20 bytes of `keccak256(seed)`, the same way account
    /// addresses are derived from public keys. Used for fixtures and demos.
    pub fn derive(seed: &[u8]) -> Self {
        let hash = keccak256(seed);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic_and_distinct() {
        let alice = Address::derive(b"alice");
        assert_eq!(alice, Address::derive(b"alice"));
        assert_ne!(alice, Address::derive(b"bob"));
        assert!(!alice.is_zero());
    }

    #[test]
    fn test_parse_evm_style() {
        let addr: Address = "0x7f13ed97b75acd4835bd75b643d9f48814180fc7".parse().unwrap();
        assert_eq!(addr.0[0], 0x7f);
        assert_eq!(addr.0[19], 0xc7);
        assert_eq!(addr.to_string(), "0x7f13ed97b75acd4835bd75b643d9f48814180fc7");
        assert_eq!(addr.short(), "7f13ed97");
    }
}
