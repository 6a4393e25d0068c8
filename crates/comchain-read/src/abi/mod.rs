//! Word codec for ComChain call data and return data
//!
//! This module provides functionality for:
//! - Encoding integers into 32-byte words
//! - Building call payloads (selector + argument words)
//! - Decoding return data as one of the supported value kinds
//!
//! # Example
//!
//! ```rust
//! use comchain_read::abi::{decode_data, encode_number_hex, AbiType};
//!
//! assert_eq!(encode_number_hex(-1i64), "f".repeat(64));
//!
//! let data = format!("0x{:0>64}", "ffffffffffff");
//! let value = decode_data(AbiType::Amount, &data).unwrap().unwrap();
//! assert_eq!(value.as_amount().unwrap().to_string(), "-0.01");
//! ```

mod decode;
mod encode;
mod types;

pub use decode::{
    decode_amount, decode_bool, decode_bytes, decode_data, decode_number, decode_string,
    decode_uint,
};
pub use encode::{build_call_payload, encode_number, encode_number_hex};
pub use types::{AbiType, Amount, DecodedValue, I256};
