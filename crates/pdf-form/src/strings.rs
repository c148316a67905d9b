//! PDF text string encoding and decoding
//!
//! Field names and values are PDF text strings: either ASCII-compatible
//! literals or UTF-16BE with a leading byte order mark.

use lopdf::{Object, StringFormat};

/// Encode a string as a PDF text string object
///
/// ASCII values stay as literal strings. Anything else is written as
/// UTF-16BE with a BOM, in hexadecimal form.
pub fn encode_text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::String(value.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode a PDF text string into a Rust string
///
/// Detects the UTF-16BE byte order mark; everything else is treated as
/// an ASCII-compatible literal.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ascii_values_stay_literal() {
        match encode_text_string("Acme Freight") {
            Object::String(bytes, StringFormat::Literal) => {
                assert_eq!(bytes, b"Acme Freight".to_vec());
            }
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn test_non_ascii_values_get_a_bom() {
        match encode_text_string("Łódź") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(decode_text_string(&bytes), "Łódź");
            }
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn test_decode_plain_literal() {
        assert_eq!(decode_text_string(b"BOLnum"), "BOLnum");
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42];
        assert_eq!(decode_text_string(&bytes), "AB");
    }

    #[test]
    fn test_decode_ignores_trailing_odd_byte() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0x00];
        assert_eq!(decode_text_string(&bytes), "A");
    }
}
