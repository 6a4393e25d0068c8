//! Read client error types

use comchain_primitives::{Address, Selector};
use thiserror::Error;

/// Error surfaced by the codec, the read dispatcher and the list paginator
#[derive(Debug, Error)]
pub enum ReadError {
    /// Raw data is not hex or its length is not a multiple of 32 bytes
    #[error("Malformed word: {0}")]
    MalformedWord(String),

    /// Dynamic string fails its location or length checks
    #[error("Malformed string: {0}")]
    MalformedString(String),

    /// Unknown ABI type tag
    #[error("Unsupported ABI type: {0}")]
    UnsupportedType(String),

    /// Transport-level failure of a single read
    #[error("Failed read contract: {contract}, fn: {selector}")]
    ContractReadFailed {
        /// Contract that was called
        contract: Address,
        /// Entry point that was called
        selector: Selector,
    },

    /// A list traversal was aborted by a failed read
    #[error("List read aborted on contract: {contract}, fn: {selector}{}", fmt_index(.index))]
    RemoteReadFailed {
        /// Contract that was called
        contract: Address,
        /// Entry point that failed
        selector: Selector,
        /// List index being read, `None` for the count lookup
        index: Option<u64>,
    },

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

fn fmt_index(index: &Option<u64>) -> String {
    match index {
        Some(i) => format!(", index: {}", i),
        None => String::new(),
    }
}

impl ReadError {
    /// Turn a single-read failure into a traversal failure at `index`
    pub(crate) fn into_traversal(self, index: Option<u64>) -> Self {
        match self {
            ReadError::ContractReadFailed { contract, selector } => ReadError::RemoteReadFailed {
                contract,
                selector,
                index,
            },
            other => other,
        }
    }
}

impl From<comchain_primitives::AddressError> for ReadError {
    fn from(e: comchain_primitives::AddressError) -> Self {
        ReadError::InvalidAddress(e.to_string())
    }
}

impl From<comchain_primitives::WordError> for ReadError {
    fn from(e: comchain_primitives::WordError) -> Self {
        ReadError::MalformedWord(e.to_string())
    }
}

impl From<comchain_primitives::SelectorError> for ReadError {
    fn from(e: comchain_primitives::SelectorError) -> Self {
        ReadError::InvalidHex(e.to_string())
    }
}

impl From<toml::de::Error> for ReadError {
    fn from(e: toml::de::Error) -> Self {
        ReadError::Config(e.to_string())
    }
}
