//! Hex string helpers shared by the codec and the transport

/// Strip an optional `0x` prefix
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Normalise a hex quantity: strip the prefix, left-pad to an even number of
/// digits and re-add `0x`. An empty input stays empty.
pub fn sanitize_hex(s: &str) -> String {
    let s = strip_0x(s);
    if s.is_empty() {
        return String::new();
    }
    if s.len() % 2 != 0 {
        format!("0x0{}", s)
    } else {
        format!("0x{}", s)
    }
}

/// Check that `s` only holds hex digits (optionally `0x`-prefixed).
/// The empty string is accepted.
pub fn is_hex_string(s: &str) -> bool {
    strip_0x(s).chars().all(|c| c.is_ascii_hexdigit())
}
