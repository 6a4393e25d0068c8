//! Keccak-256 hashing

use sha3::{Digest, Keccak256};

use crate::Word;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> Word {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    Word::from_bytes(result.into())
}
