//! # comchain-primitives
//!
//! Fixed-width value types for the ComChain read client.
//!
//! Everything exchanged with a ComChain contract is built from three widths:
//! 20-byte [`Address`]es, 4-byte function [`Selector`]s and 32-byte [`Word`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hex_util;
mod keccak;
mod selector;
mod word;

pub use address::{validate_address, Address, AddressError};
pub use hex_util::{is_hex_string, sanitize_hex, strip_0x};
pub use keccak::keccak256;
pub use selector::{Selector, SelectorError};
pub use word::{Word, WordError};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Block number type
pub type BlockNumber = u64;
