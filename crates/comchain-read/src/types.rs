//! Read client types

use bytes::Bytes;
use comchain_primitives::{Address, BlockNumber, Selector, Word};
use serde::{Deserialize, Serialize};

use crate::abi::Amount;

/// Block at which a read is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    /// Block number, sent in hexadecimal form
    Number(BlockNumber),
    /// Latest mined block
    Latest,
    /// Pending state (includes pending transactions)
    #[default]
    Pending,
    /// Earliest block (genesis)
    Earliest,
}

impl BlockTag {
    /// Wire form: `0x`-hex for numbers, the tag name otherwise
    pub fn to_param(&self) -> String {
        match self {
            BlockTag::Number(n) => format!("0x{:x}", n),
            BlockTag::Latest => "latest".to_string(),
            BlockTag::Pending => "pending".to_string(),
            BlockTag::Earliest => "earliest".to_string(),
        }
    }
}

impl From<BlockNumber> for BlockTag {
    fn from(number: BlockNumber) -> Self {
        BlockTag::Number(number)
    }
}

impl Serialize for BlockTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_param())
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "latest" => Ok(BlockTag::Latest),
            "pending" => Ok(BlockTag::Pending),
            "earliest" => Ok(BlockTag::Earliest),
            other => {
                let digits = other.strip_prefix("0x").ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown block tag: {}", other))
                })?;
                u64::from_str_radix(digits, 16)
                    .map(BlockTag::Number)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

/// A read-only call: target contract, selector and argument words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPayload {
    /// Contract to evaluate against
    pub to: Address,
    /// Entry point
    pub selector: Selector,
    /// Arguments, one word each, in call order
    pub args: Vec<Word>,
}

impl CallPayload {
    /// Selector followed by the argument words, `4 + 32 * n` bytes
    pub fn encode(&self) -> Bytes {
        let mut out = Vec::with_capacity(Selector::LEN + Word::LEN * self.args.len());
        out.extend_from_slice(self.selector.as_bytes());
        for arg in &self.args {
            out.extend_from_slice(arg.as_bytes());
        }
        Bytes::from(out)
    }

    /// Call data as a `0x`-prefixed hex string
    pub fn data_hex(&self) -> String {
        let mut out = String::with_capacity(2 + 8 + 64 * self.args.len());
        out.push_str("0x");
        out.push_str(&self.selector.to_naked_hex());
        for arg in &self.args {
            out.push_str(&arg.to_naked_hex());
        }
        out
    }
}

impl Serialize for CallPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("to", &self.to.to_hex())?;
        map.serialize_entry("data", &self.data_hex())?;
        map.end()
    }
}

/// Selectors of one paginated list: length, index-to-entry map, entry amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListDescriptor {
    /// Returns the number of entries for a caller
    pub count: Selector,
    /// Maps `(caller, index)` to an entry word
    pub map: Selector,
    /// Maps `(caller, entry)` to an amount
    pub amount: Selector,
}

impl ListDescriptor {
    /// Create a descriptor
    pub const fn new(count: Selector, map: Selector, amount: Selector) -> Self {
        Self { count, map, amount }
    }
}

/// One entry of a paginated list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListElement {
    /// Trailing 20 bytes of the mapped entry
    pub address: Address,
    /// Amount attached to the entry, `None` if the contract returned nothing
    pub amount: Option<Amount>,
}

/// Contracts of one currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSet {
    /// Balances, account info and contract globals
    pub main: Address,
    /// Paginated lists (allowances, delegations, requests)
    pub lists: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_serialize() {
        assert_eq!(
            serde_json::to_string(&BlockTag::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&BlockTag::Number(100)).unwrap(),
            "\"0x64\""
        );
        assert_eq!(
            serde_json::to_string(&BlockTag::Latest).unwrap(),
            "\"latest\""
        );
    }

    #[test]
    fn test_block_tag_default_is_pending() {
        assert_eq!(BlockTag::default(), BlockTag::Pending);
    }

    #[test]
    fn test_block_tag_deserialize() {
        let tag: BlockTag = serde_json::from_str("\"0x1f\"").unwrap();
        assert_eq!(tag, BlockTag::Number(31));
        let tag: BlockTag = serde_json::from_str("\"latest\"").unwrap();
        assert_eq!(tag, BlockTag::Latest);
        assert!(serde_json::from_str::<BlockTag>("\"tomorrow\"").is_err());
    }

    #[test]
    fn test_call_payload_encoding() {
        let payload = CallPayload {
            to: Address::ZERO,
            selector: Selector::from_bytes([0x70, 0xa0, 0x82, 0x31]),
            args: vec![Word::from(1u64)],
        };
        let bytes = payload.encode();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(bytes[35], 1);

        let hex = payload.data_hex();
        assert_eq!(hex.len(), 2 + 8 + 64);
        assert!(hex.starts_with("0x70a08231000000"));
        assert_eq!(hex, format!("0x{}", hex::encode(&bytes)));
    }

    #[test]
    fn test_call_payload_no_args() {
        let payload = CallPayload {
            to: Address::ZERO,
            selector: Selector::from_bytes([0x54, 0xfd, 0x4d, 0x50]),
            args: vec![],
        };
        assert_eq!(payload.data_hex(), "0x54fd4d50");
    }

    #[test]
    fn test_call_payload_serialize() {
        let payload = CallPayload {
            to: Address::ZERO,
            selector: Selector::from_bytes([0x54, 0xfd, 0x4d, 0x50]),
            args: vec![],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["to"], "0x0000000000000000000000000000000000000000");
        assert_eq!(json["data"], "0x54fd4d50");
    }
}
