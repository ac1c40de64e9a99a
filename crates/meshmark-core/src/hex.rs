//! Fixed-width hex rendering of bytes and words.
//!
//! Encoded payloads travel inside JSON text fields, so every integer stream
//! is rendered as comma-joined hex tokens. Bytes always take exactly two
//! lowercase digits. Words are rendered big-endian, one byte-pair per
//! significant byte, so `3 -> "03"` and `300 -> "012c"`.

use alloc::string::String;

use crate::error::HexError;

const DIGITS: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Maximum token length accepted by [`decode_word`].
pub const MAX_WORD_DIGITS: usize = 8;

/// Render a byte as two lowercase hex digits.
#[must_use]
pub fn encode_byte(byte: u8) -> String {
    let mut out = String::with_capacity(2);
    push_byte(&mut out, byte);
    out
}

/// Append a byte as two lowercase hex digits.
pub fn push_byte(out: &mut String, byte: u8) {
    out.push(DIGITS[usize::from(byte >> 4)] as char);
    out.push(DIGITS[usize::from(byte & 0x0F)] as char);
}

/// Append a byte as two uppercase hex digits.
pub fn push_byte_upper(out: &mut String, byte: u8) {
    out.push(DIGITS_UPPER[usize::from(byte >> 4)] as char);
    out.push(DIGITS_UPPER[usize::from(byte & 0x0F)] as char);
}

/// Parse exactly two hex digits (either case) into a byte.
///
/// # Errors
///
/// Returns [`HexError::InvalidLength`] unless the token is two bytes long,
/// and [`HexError::InvalidDigit`] for characters outside `[0-9a-fA-F]`.
pub fn decode_byte(token: &str) -> Result<u8, HexError> {
    let bytes = token.as_bytes();
    if bytes.len() != 2 {
        return Err(HexError::InvalidLength { length: bytes.len() });
    }
    let hi = nibble(bytes[0], 0)?;
    let lo = nibble(bytes[1], 1)?;
    Ok((hi << 4) | lo)
}

/// Render a word as big-endian byte pairs, dropping leading zero bytes.
///
/// Zero renders as `"00"`; at least one byte is always emitted.
#[must_use]
pub fn encode_word(value: u32) -> String {
    let mut out = String::with_capacity(MAX_WORD_DIGITS);
    push_word(&mut out, value);
    out
}

/// Append a word rendered as by [`encode_word`].
pub fn push_word(out: &mut String, value: u32) {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take(3).take_while(|b| **b == 0).count();
    for byte in &bytes[skip..] {
        push_byte(out, *byte);
    }
}

/// Parse a word token of 2, 4, 6 or 8 hex digits.
///
/// The token is consumed as two-character groups, each decoded with
/// [`decode_byte`].
///
/// # Errors
///
/// Returns [`HexError::InvalidLength`] for empty, odd-length or over-long
/// tokens and [`HexError::InvalidDigit`] for non-hex characters.
pub fn decode_word(token: &str) -> Result<u32, HexError> {
    decode_word_bytes(token.as_bytes())
}

/// Byte-slice form of [`decode_word`].
///
/// # Errors
///
/// See [`decode_word`].
pub fn decode_word_bytes(bytes: &[u8]) -> Result<u32, HexError> {
    if bytes.is_empty() || bytes.len() % 2 != 0 || bytes.len() > MAX_WORD_DIGITS {
        return Err(HexError::InvalidLength { length: bytes.len() });
    }

    let mut value = 0u32;
    for (pair, chunk) in bytes.chunks_exact(2).enumerate() {
        let hi = nibble(chunk[0], pair * 2)?;
        let lo = nibble(chunk[1], pair * 2 + 1)?;
        value = (value << 8) | u32::from((hi << 4) | lo);
    }
    Ok(value)
}

fn nibble(byte: u8, position: usize) -> Result<u8, HexError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(HexError::InvalidDigit { byte, position }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_byte_zero_padded() {
        assert_eq!(encode_byte(0), "00");
        assert_eq!(encode_byte(7), "07");
        assert_eq!(encode_byte(0xAB), "ab");
        assert_eq!(encode_byte(255), "ff");
    }

    #[test]
    fn test_decode_byte_accepts_both_cases() {
        assert_eq!(decode_byte("ff"), Ok(255));
        assert_eq!(decode_byte("FF"), Ok(255));
        assert_eq!(decode_byte("0a"), Ok(10));
    }

    #[test]
    fn test_decode_byte_strict_length() {
        assert_eq!(decode_byte("f"), Err(HexError::InvalidLength { length: 1 }));
        assert_eq!(decode_byte("fff"), Err(HexError::InvalidLength { length: 3 }));
        assert_eq!(decode_byte(""), Err(HexError::InvalidLength { length: 0 }));
    }

    #[test]
    fn test_decode_byte_rejects_non_hex() {
        assert_eq!(
            decode_byte("0g"),
            Err(HexError::InvalidDigit { byte: b'g', position: 1 })
        );
        assert!(decode_byte("-1").is_err());
    }

    #[test]
    fn test_encode_word_byte_aligned() {
        assert_eq!(encode_word(0), "00");
        assert_eq!(encode_word(3), "03");
        assert_eq!(encode_word(255), "ff");
        assert_eq!(encode_word(256), "0100");
        assert_eq!(encode_word(300), "012c");
        assert_eq!(encode_word(65535), "ffff");
        assert_eq!(encode_word(0x0001_0000), "010000");
        assert_eq!(encode_word(u32::MAX), "ffffffff");
    }

    #[test]
    fn test_decode_word() {
        assert_eq!(decode_word("03"), Ok(3));
        assert_eq!(decode_word("012c"), Ok(300));
        assert_eq!(decode_word("012C"), Ok(300));
        assert_eq!(decode_word("ffffffff"), Ok(u32::MAX));
        // Leading zero bytes are tolerated
        assert_eq!(decode_word("0003"), Ok(3));
    }

    #[test]
    fn test_decode_word_rejects_bad_lengths() {
        assert!(decode_word("").is_err());
        assert!(decode_word("123").is_err());
        assert!(decode_word("0102030405").is_err());
        assert_eq!(
            decode_word("01zz"),
            Err(HexError::InvalidDigit { byte: b'z', position: 2 })
        );
    }
}
