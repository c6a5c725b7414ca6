//! Fixed-Size Byte Newtypes
//!
//! Identities, commitments and salts are all fixed-width byte strings.
//! They share hex parsing, display and serde handling: hex strings for
//! human-readable formats (JSON), raw arrays for binary formats (bincode).

use thiserror::Error;

/// Errors parsing a fixed-size byte value from hex.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexError {
    /// Input is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Input decoded to the wrong number of bytes.
    #[error("expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required byte length.
        expected: usize,
        /// Decoded byte length.
        got: usize,
    },
}

/// Define a `Copy` newtype over `[u8; N]` with hex and serde support.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Length in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Create from raw bytes.
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Get raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Is every byte zero?
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Parse from hex, with or without a `0x` prefix.
            pub fn from_hex(s: &str) -> Result<Self, $crate::core::bytes::HexError> {
                let digits = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .unwrap_or(s);
                let bytes = ::hex::decode(digits)?;
                let array: [u8; $len] = bytes.as_slice().try_into().map_err(|_| {
                    $crate::core::bytes::HexError::InvalidLength {
                        expected: $len,
                        got: bytes.len(),
                    }
                })?;
                Ok(Self(array))
            }

            /// `0x`-prefixed lowercase hex.
            pub fn to_hex(&self) -> String {
                format!("0x{}", ::hex::encode(self.0))
            }

            /// First four bytes as hex, for log lines.
            pub fn short(&self) -> String {
                ::hex::encode(&self.0[..4])
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::bytes::HexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_hex())
                } else {
                    ::serde::Serialize::serialize(&self.0, serializer)
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                    Self::from_hex(&s).map_err(::serde::de::Error::custom)
                } else {
                    <[u8; $len] as ::serde::Deserialize>::deserialize(deserializer).map(Self)
                }
            }
        }
    };
}

pub(crate) use fixed_bytes;

#[cfg(test)]
mod tests {
    use super::*;

    fixed_bytes!(
        /// Test-only 4-byte value.
        Tag,
        4
    );

    #[test]
    fn test_hex_roundtrip_with_and_without_prefix() {
        let tag = Tag::new([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(tag.to_hex(), "0xdeadbeef");
        assert_eq!(Tag::from_hex("0xdeadbeef").unwrap(), tag);
        assert_eq!(Tag::from_hex("DEADBEEF").unwrap(), tag);
        assert_eq!("0xdeadbeef".parse::<Tag>().unwrap(), tag);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(
            Tag::from_hex("0xdead"),
            Err(HexError::InvalidLength { expected: 4, got: 2 })
        );
        assert!(matches!(Tag::from_hex("0xzz"), Err(HexError::InvalidHex(_))));
    }

    #[test]
    fn test_serde_formats() {
        let tag = Tag::new([1, 2, 3, 4]);

        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, "\"0x01020304\"");
        assert_eq!(serde_json::from_str::<Tag>(&json).unwrap(), tag);

        let bin = bincode::serialize(&tag).unwrap();
        assert_eq!(bin, vec![1, 2, 3, 4]);
        assert_eq!(bincode::deserialize::<Tag>(&bin).unwrap(), tag);
    }

    #[test]
    fn test_zero() {
        assert!(Tag::ZERO.is_zero());
        assert!(Tag::default().is_zero());
        assert!(!Tag::new([0, 0, 0, 1]).is_zero());
    }
}
