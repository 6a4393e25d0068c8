//! Word encoding

use comchain_primitives::{Address, Selector, Word, U256};

use super::types::I256;
use crate::types::CallPayload;

/// Encode an integer as one word.
///
/// Non-negative values are big-endian and zero-padded. Negative values are
/// encoded as `2^256 + value`, two's complement over the full word, so they
/// come out `f`-padded.
pub fn encode_number(value: &I256) -> Word {
    if value.negative {
        let (wrapped, _) = U256::zero().overflowing_sub(value.abs);
        Word::from_u256(wrapped)
    } else {
        Word::from_u256(value.abs)
    }
}

/// [`encode_number`] rendered as 64 hex digits without prefix
pub fn encode_number_hex(value: impl Into<I256>) -> String {
    encode_number(&value.into()).to_naked_hex()
}

/// Assemble selector and arguments into a call payload
pub fn build_call_payload(target: Address, selector: Selector, args: &[Word]) -> CallPayload {
    CallPayload {
        to: target,
        selector,
        args: args.to_vec(),
    }
}
