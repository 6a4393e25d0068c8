//! Integration tests for comchain-primitives
//!
//! Tests how addresses, words and selectors fit together in call data.

use comchain_primitives::{
    keccak256, sanitize_hex, validate_address, Address, AddressError, Selector, Word, WordError,
    U256,
};

const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d";

/// EIP-55 reference vector
const CHECKSUMMED: &str = "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb";

// ==================== Address / Word Tests ====================

#[test]
fn test_address_word_round_trip() {
    let address = Address::from_hex(WALLET).unwrap();
    let word = Word::from(address);
    assert_eq!(&word.as_bytes()[..12], &[0u8; 12]);
    assert_eq!(Address::from_word(&word), address);
}

#[test]
fn test_address_from_word_drops_high_bytes() {
    let word = Word::from_bytes([0xff; 32]);
    assert_eq!(Address::from_word(&word), Address::from_bytes([0xff; 20]));
}

#[test]
fn test_address_word_hex_forms() {
    let address = Address::from_hex(WALLET).unwrap();
    let word = Word::from(&address);
    assert_eq!(
        word.to_naked_hex(),
        format!("{:0>64}", address.to_naked_hex())
    );
    assert_eq!(Word::left_padded_hex(&address.to_hex()).unwrap(), word);
}

#[test]
fn test_checksum_survives_round_trip() {
    let address = Address::from_hex(&CHECKSUMMED.to_lowercase()).unwrap();
    assert_eq!(address.to_checksum(), CHECKSUMMED);
    assert!(validate_address(&address.to_checksum()));
}

#[test]
fn test_validate_address_forms() {
    assert!(validate_address(&WALLET.to_lowercase()));
    assert!(validate_address(&format!("0x{}", WALLET[2..].to_uppercase())));
    assert!(!validate_address(&WALLET[2..]));
    assert!(validate_address(CHECKSUMMED));
    assert!(!validate_address("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDB"));
    assert!(!validate_address("0x742d35cc"));
}

#[test]
fn test_bad_inputs() {
    assert_eq!(
        Address::from_hex("0x1234"),
        Err(AddressError::InvalidLength(2))
    );
    assert!(matches!(
        Word::from_hex("0xabcd"),
        Err(WordError::InvalidLength { got: 2, .. })
    ));
    assert!(matches!(
        Word::left_padded_hex("0xgg"),
        Err(WordError::InvalidHex(_))
    ));
}

// ==================== Selector Tests ====================

#[test]
fn test_selector_is_hash_prefix() {
    let hash = keccak256(b"getVersion()");
    let selector = Selector::from_signature("getVersion()");
    assert_eq!(selector.as_bytes(), &hash.as_bytes()[..4]);
}

#[test]
fn test_selector_parse_forms() {
    let a: Selector = "0x70a08231".parse().unwrap();
    let b = Selector::from_hex("70A08231").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_hex(), "0x70a08231");
}

// ==================== Word / U256 Tests ====================

#[test]
fn test_word_from_integers() {
    assert_eq!(Word::from(0u64), Word::ZERO);
    assert_eq!(Word::from(255u64).as_bytes()[31], 0xff);
    assert_eq!(Word::from(U256::MAX).to_naked_hex(), "f".repeat(64));
}

#[test]
fn test_sanitize_then_pad() {
    let sanitized = sanitize_hex("abc");
    assert_eq!(sanitized, "0x0abc");
    assert_eq!(
        Word::left_padded_hex(&sanitized).unwrap().to_u256(),
        U256::from(0xabc)
    );
}

// ==================== Serde Tests ====================

#[cfg(feature = "serde")]
#[test]
fn test_serde_forms() {
    let address = Address::from_hex(WALLET).unwrap();
    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, format!("\"{}\"", WALLET.to_lowercase()));
    assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);

    let selector: Selector = serde_json::from_str("\"0x70a08231\"").unwrap();
    assert_eq!(serde_json::to_string(&selector).unwrap(), "\"70a08231\"");
}
