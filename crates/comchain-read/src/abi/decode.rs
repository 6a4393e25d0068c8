//! Word decoding

use comchain_primitives::{strip_0x, U256};

use super::types::{AbiType, Amount, DecodedValue};
use crate::ReadError;

/// Word size in bytes
const WORD_LEN: usize = 32;

/// Width of the signed field read by [`AbiType::Number`]
const NUMBER_BYTES: usize = 6;

/// Raw values strictly above this fold into the negative range
const NUMBER_SIGN_THRESHOLD: u64 = 1 << 47;

/// Subtracted from raw values above the threshold
const NUMBER_MODULUS: i64 = 1 << 48;

/// Decode hex return data as `abi_type`.
///
/// An empty payload (`""` or `"0x"`) decodes to `None`.
pub fn decode_data(abi_type: AbiType, data: &str) -> Result<Option<DecodedValue>, ReadError> {
    let data = strip_0x(data);
    if data.is_empty() {
        return Ok(None);
    }
    let bytes = hex::decode(data)
        .map_err(|e| ReadError::MalformedWord(format!("not an hex string: {}", e)))?;
    decode_bytes(abi_type, &bytes)
}

/// Decode raw return bytes as `abi_type`
pub fn decode_bytes(abi_type: AbiType, bytes: &[u8]) -> Result<Option<DecodedValue>, ReadError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    if bytes.len() % WORD_LEN != 0 {
        return Err(ReadError::MalformedWord(format!(
            "data length is not a multiple of 32: {} bytes",
            bytes.len()
        )));
    }

    let value = match abi_type {
        AbiType::Uint => DecodedValue::Uint(first_word(bytes)),
        AbiType::Number => DecodedValue::Number(decode_number_field(bytes)),
        AbiType::Amount => DecodedValue::Amount(Amount::from_raw(decode_number_field(bytes))),
        AbiType::String => DecodedValue::String(decode_dynamic_string(bytes)?),
        AbiType::Bool => DecodedValue::Bool(first_word(bytes) == U256::one()),
    };
    Ok(Some(value))
}

/// First word as a big-endian unsigned integer
fn first_word(bytes: &[u8]) -> U256 {
    U256::from_big_endian(&bytes[..WORD_LEN])
}

/// Signed 48-bit field held in the trailing 6 bytes
fn decode_number_field(bytes: &[u8]) -> i64 {
    let tail = &bytes[bytes.len() - NUMBER_BYTES..];
    let raw = tail.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));

    if raw > NUMBER_SIGN_THRESHOLD {
        raw as i64 - NUMBER_MODULUS
    } else {
        raw as i64
    }
}

/// Dynamic string: location word, then length word at that location, then
/// the padded content. The payload must end exactly at the padded content.
fn decode_dynamic_string(bytes: &[u8]) -> Result<String, ReadError> {
    let total = bytes.len();

    let location = to_offset(first_word(bytes)).ok_or_else(|| {
        ReadError::MalformedString("first 32byte word is not a valid address".to_string())
    })?;
    if location % WORD_LEN != 0 {
        return Err(ReadError::MalformedString(
            "first 32byte word is not a valid address".to_string(),
        ));
    }
    if location
        .checked_add(2 * WORD_LEN)
        .map_or(true, |end| end > total)
    {
        return Err(ReadError::MalformedString(
            "not enough data to decode length and first word at given location".to_string(),
        ));
    }

    let length = U256::from_big_endian(&bytes[location..location + WORD_LEN]);
    let start = location + WORD_LEN;
    let expected = to_offset(length)
        .and_then(|len| start.checked_add(len))
        .and_then(|end| end.div_ceil(WORD_LEN).checked_mul(WORD_LEN));
    let length = match expected {
        Some(expected) if expected == total => length.as_usize(),
        _ => {
            return Err(ReadError::MalformedString(
                "not enough data to decode advertised string".to_string(),
            ))
        }
    };

    String::from_utf8(bytes[start..start + length].to_vec())
        .map_err(|e| ReadError::MalformedString(format!("invalid UTF-8: {}", e)))
}

fn to_offset(value: U256) -> Option<usize> {
    if value > U256::from(usize::MAX) {
        None
    } else {
        Some(value.as_usize())
    }
}

/// Decode as [`AbiType::Uint`]
pub fn decode_uint(data: &str) -> Result<Option<U256>, ReadError> {
    Ok(decode_data(AbiType::Uint, data)?.and_then(|v| v.as_uint()))
}

/// Decode as [`AbiType::Number`]
pub fn decode_number(data: &str) -> Result<Option<i64>, ReadError> {
    Ok(decode_data(AbiType::Number, data)?.and_then(|v| v.as_number()))
}

/// Decode as [`AbiType::Amount`]
pub fn decode_amount(data: &str) -> Result<Option<Amount>, ReadError> {
    Ok(decode_data(AbiType::Amount, data)?.and_then(|v| v.as_amount()))
}

/// Decode as [`AbiType::String`]
pub fn decode_string(data: &str) -> Result<Option<String>, ReadError> {
    match decode_data(AbiType::String, data)? {
        Some(DecodedValue::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Decode as [`AbiType::Bool`]
pub fn decode_bool(data: &str) -> Result<Option<bool>, ReadError> {
    Ok(decode_data(AbiType::Bool, data)?.and_then(|v| v.as_bool()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(hex_value: &str) -> String {
        format!("0x{:0>64}", hex_value)
    }

    fn amount(data: &str) -> String {
        decode_amount(data).unwrap().unwrap().to_string()
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_data(AbiType::Uint, "").unwrap(), None);
        assert_eq!(decode_data(AbiType::String, "0x").unwrap(), None);
    }

    #[test]
    fn test_decode_not_hex() {
        let result = decode_data(AbiType::Uint, "0xzz");
        assert!(matches!(result, Err(ReadError::MalformedWord(_))));
    }

    #[test]
    fn test_decode_bad_length() {
        let result = decode_data(AbiType::Uint, &format!("0x{}", "00".repeat(33)));
        assert!(matches!(result, Err(ReadError::MalformedWord(_))));
    }

    #[test]
    fn test_decode_uint() {
        assert_eq!(decode_uint(&word("64")).unwrap(), Some(U256::from(100)));
        assert_eq!(decode_uint(&format!("0x{}", "ff".repeat(32))).unwrap(), Some(U256::MAX));
    }

    #[test]
    fn test_decode_amounts() {
        assert_eq!(amount(&word("1")), "0.01");
        assert_eq!(amount(&word("10")), "0.16");
        assert_eq!(amount(&word("1000")), "40.96");
    }

    #[test]
    fn test_decode_amount_ignores_high_bytes() {
        assert_eq!(amount(&word("0001000000000001")), "0.01");
    }

    #[test]
    fn test_decode_amount_sign_fold() {
        assert_eq!(amount(&word("800000000000")), "1407374883553.28");
        assert_eq!(amount(&word("800000000001")), "-1407374883553.27");
        assert_eq!(amount(&word("ffffffffffff")), "-0.01");
    }

    #[test]
    fn test_decode_number_raw() {
        assert_eq!(decode_number(&word("2a")).unwrap(), Some(42));
        assert_eq!(decode_number(&word("ffffffffffff")).unwrap(), Some(-1));
        assert_eq!(
            decode_number(&word("800000000000")).unwrap(),
            Some(140_737_488_355_328)
        );
    }

    #[test]
    fn test_decode_number_reads_trailing_word() {
        let data = format!("{}{:0>64}", word("5"), "7");
        assert_eq!(decode_number(&data).unwrap(), Some(7));
    }

    #[test]
    fn test_decode_bool() {
        assert_eq!(decode_bool(&word("1")).unwrap(), Some(true));
        assert_eq!(decode_bool(&word("0")).unwrap(), Some(false));
        // anything but one is false
        assert_eq!(decode_bool(&word("2")).unwrap(), Some(false));
    }

    #[test]
    fn test_decode_string() {
        let data = format!(
            "0x{}{}{}",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "322e300000000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(decode_string(&data).unwrap(), Some("2.0".to_string()));
    }

    #[test]
    fn test_decode_string_needs_content_word() {
        // location + length alone is too short, a content word must follow
        let data = format!("0x{:0>64}{:0>64}", "20", "0");
        assert!(matches!(
            decode_data(AbiType::String, &data),
            Err(ReadError::MalformedString(_))
        ));

        let data = format!("0x{:0>64}{:0>64}{:0>64}", "20", "0", "0");
        assert!(matches!(
            decode_data(AbiType::String, &data),
            Err(ReadError::MalformedString(_))
        ));
    }

    #[test]
    fn test_decode_string_unaligned_location() {
        let data = format!("0x{:0>64}{:0>64}{:0>64}", "21", "3", "0");
        assert!(matches!(
            decode_data(AbiType::String, &data),
            Err(ReadError::MalformedString(_))
        ));
    }

    #[test]
    fn test_decode_string_location_out_of_range() {
        let data = format!("0x{:0>64}{:0>64}", "40", "3");
        assert!(matches!(
            decode_data(AbiType::String, &data),
            Err(ReadError::MalformedString(_))
        ));
    }

    #[test]
    fn test_decode_string_length_overrun() {
        // advertises 33 bytes but only one padded word follows
        let data = format!("0x{:0>64}{:0>64}{:0>64}", "20", "21", "0");
        assert!(matches!(
            decode_data(AbiType::String, &data),
            Err(ReadError::MalformedString(_))
        ));
    }

    #[test]
    fn test_decode_string_trailing_garbage() {
        let data = format!("0x{:0>64}{:0>64}{:0>64}{:0>64}", "20", "3", "0", "0");
        assert!(matches!(
            decode_data(AbiType::String, &data),
            Err(ReadError::MalformedString(_))
        ));
    }

    #[test]
    fn test_decode_string_huge_location() {
        let data = format!("0x{}{:0>64}", "f".repeat(64), "0");
        assert!(matches!(
            decode_data(AbiType::String, &data),
            Err(ReadError::MalformedString(_))
        ));
    }
}
