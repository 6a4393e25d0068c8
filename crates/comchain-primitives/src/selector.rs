//! 4-byte function selector

use std::fmt;
use thiserror::Error;

use crate::{keccak256, strip_0x};

/// Selector parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid selector length: expected 4 bytes, got {0}")]
    InvalidLength(usize),
}

/// Opaque 4-byte tag naming a contract entry point.
///
/// Selectors are never interpreted; they only prefix call data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Size in bytes
    pub const LEN: usize = 4;

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Selector(bytes)
    }

    /// Parse 8 hex digits (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, SelectorError> {
        let bytes =
            hex::decode(strip_0x(s)).map_err(|e| SelectorError::InvalidHex(e.to_string()))?;
        if bytes.len() != Self::LEN {
            return Err(SelectorError::InvalidLength(bytes.len()));
        }
        let mut out = [0u8; 4];
        out.copy_from_slice(&bytes);
        Ok(Selector(out))
    }

    /// First 4 bytes of `keccak256(signature)`
    pub fn from_signature(signature: &str) -> Self {
        let hash = keccak256(signature.as_bytes());
        let mut out = [0u8; 4];
        out.copy_from_slice(&hash.as_bytes()[..4]);
        Selector(out)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// 8 hex digits, no prefix
    pub fn to_naked_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({})", self.to_hex())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Selector(bytes)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::from_hex(s)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Selector {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_naked_hex())
        }
    }

    impl<'de> Deserialize<'de> for Selector {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Selector::from_hex(&s).map_err(de::Error::custom)
        }
    }
}
