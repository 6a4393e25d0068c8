//! ABI type definitions

use std::fmt;
use std::str::FromStr;

use comchain_primitives::U256;

use crate::ReadError;

/// The value kinds a ComChain read can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// Full-width unsigned integer (`uint`, `uint256`)
    Uint,
    /// Raw 48-bit two's-complement integer (`number`)
    Number,
    /// 48-bit integer presented in hundredths (`number/100`)
    Amount,
    /// Dynamic string (`string`)
    String,
    /// Boolean (`bool`)
    Bool,
}

impl AbiType {
    /// Tag used in call descriptions
    pub fn as_str(&self) -> &'static str {
        match self {
            AbiType::Uint => "uint256",
            AbiType::Number => "number",
            AbiType::Amount => "number/100",
            AbiType::String => "string",
            AbiType::Bool => "bool",
        }
    }
}

impl FromStr for AbiType {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uint" | "uint256" => Ok(AbiType::Uint),
            "number" => Ok(AbiType::Number),
            "number/100" => Ok(AbiType::Amount),
            "string" => Ok(AbiType::String),
            "bool" => Ok(AbiType::Bool),
            other => Err(ReadError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// Unsigned integer
    Uint(U256),
    /// Raw signed 48-bit integer
    Number(i64),
    /// Scaled amount
    Amount(Amount),
    /// Text
    String(String),
    /// Boolean
    Bool(bool),
}

impl DecodedValue {
    /// Unsigned integer value, if this is one
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Raw number value, if this is one
    pub fn as_number(&self) -> Option<i64> {
        match self {
            DecodedValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Amount value, if this is one
    pub fn as_amount(&self) -> Option<Amount> {
        match self {
            DecodedValue::Amount(v) => Some(*v),
            _ => None,
        }
    }

    /// String value, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Boolean value, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Kind of this value
    pub fn abi_type(&self) -> AbiType {
        match self {
            DecodedValue::Uint(_) => AbiType::Uint,
            DecodedValue::Number(_) => AbiType::Number,
            DecodedValue::Amount(_) => AbiType::Amount,
            DecodedValue::String(_) => AbiType::String,
            DecodedValue::Bool(_) => AbiType::Bool,
        }
    }
}

/// A signed amount held in hundredths.
///
/// Displays as the value divided by 100 with exactly two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// Wrap an unscaled value
    pub const fn from_raw(raw: i64) -> Self {
        Amount(raw)
    }

    /// Unscaled value (hundredths)
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Signed 256-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256
    pub fn new(abs: U256, negative: bool) -> Self {
        Self { abs, negative }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self {
            abs: U256::from(value.unsigned_abs()),
            negative: value < 0,
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        I256::from_i128(value as i128)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        I256::from_i128(value)
    }
}

impl From<U256> for I256 {
    fn from(abs: U256) -> Self {
        I256::new(abs, false)
    }
}
