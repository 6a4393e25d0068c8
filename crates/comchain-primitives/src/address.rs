//! Ledger account address (20 bytes)

use std::fmt;
use thiserror::Error;

use crate::{keccak256, strip_0x, Word};

/// Why a string or slice is not an address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Not hexadecimal
    #[error("address is not hex: {0}")]
    InvalidHex(String),
    /// Not 20 bytes
    #[error("address must be 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// 20-byte account or contract address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Width in bytes
    pub const LEN: usize = 20;

    /// All-zero address
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice of exactly 20 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != Self::LEN {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Parse 40 hex digits, `0x` optional, any case
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(strip_0x(s)).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Take the trailing 20 bytes of a word
    pub fn from_word(word: &Word) -> Self {
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&word.as_bytes()[Word::LEN - Self::LEN..]);
        Self(bytes)
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the all-zero address
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Lower-case hex with `0x`
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Lower-case hex without prefix, the form used inside call data
    pub fn to_naked_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// EIP-55 mixed-case checksum encoding
    pub fn to_checksum(&self) -> String {
        let lower = self.to_naked_hex();
        let hash = keccak256(lower.as_bytes());
        let hash = hash.as_bytes();

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Check a mixed-case string against the EIP-55 checksum of its address
    pub fn is_valid_checksum(s: &str) -> bool {
        match Self::from_hex(s) {
            Ok(addr) => strip_0x(&addr.to_checksum()) == strip_0x(s),
            Err(_) => false,
        }
    }
}

/// Validate a user-supplied address.
///
/// The `0x` prefix and 40 hex digits are required. Single-case strings are
/// accepted as-is; mixed case must match the EIP-55 checksum.
pub fn validate_address(s: &str) -> bool {
    let Some(digits) = s.strip_prefix("0x") else {
        return false;
    };
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }
    Address::is_valid_checksum(s)
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_hex(s)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Serde as a 0x-prefixed hex string (behind feature flag)
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Address::from_hex(&s).map_err(de::Error::custom)
        }
    }
}
