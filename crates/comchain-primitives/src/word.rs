//! 32-byte call word

use std::fmt;
use thiserror::Error;

use crate::{strip_0x, Address, U256};

/// Word parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid word length: expected at most {expected} bytes, got {got}")]
    InvalidLength {
        /// Maximum accepted length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

/// A 32-byte word, the unit of every call argument and return value.
///
/// Rendered as 64 lower-case hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word([u8; 32]);

impl Word {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Size in hex digits
    pub const HEX_LEN: usize = 64;

    /// Zero word
    pub const ZERO: Word = Word([0u8; 32]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Word(bytes)
    }

    /// Create from a slice of exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self, WordError> {
        if slice.len() != Self::LEN {
            return Err(WordError::InvalidLength {
                expected: Self::LEN,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Word(bytes))
    }

    /// Parse exactly 64 hex digits (with or without `0x`)
    pub fn from_hex(s: &str) -> Result<Self, WordError> {
        let bytes = hex::decode(strip_0x(s)).map_err(|e| WordError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Left-pad a hex value with zeros to a full word.
    ///
    /// Values wider than 64 digits are rejected.
    pub fn left_padded_hex(s: &str) -> Result<Self, WordError> {
        let s = strip_0x(s);
        if s.len() > Self::HEX_LEN {
            return Err(WordError::InvalidLength {
                expected: Self::LEN,
                got: s.len().div_ceil(2),
            });
        }
        Self::from_hex(&format!("{:0>64}", s))
    }

    /// Big-endian encoding of an unsigned integer
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Word(bytes)
    }

    /// Interpret as a big-endian unsigned integer
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Address in the low 20 bytes, zero-filled above
    pub fn from_address(address: &Address) -> Self {
        let mut bytes = [0u8; 32];
        bytes[12..].copy_from_slice(address.as_bytes());
        Word(bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// 64 hex digits, no prefix
    pub fn to_naked_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.to_hex())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Word {
    fn from(bytes: [u8; 32]) -> Self {
        Word(bytes)
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        Word::from_u256(value)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Word::from_u256(U256::from(value))
    }
}

impl From<Address> for Word {
    fn from(address: Address) -> Self {
        Word::from_address(&address)
    }
}

impl From<&Address> for Word {
    fn from(address: &Address) -> Self {
        Word::from_address(address)
    }
}

impl AsRef<[u8]> for Word {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
