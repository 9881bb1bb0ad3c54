//! Payload codec.
//!
//! # Responsibilities
//! - Turn a human-authored payload string into the bytes sent on the wire
//! - Render bytes as hex for log output
//!
//! # Format
//! ```text
//! "\xFF\xFF\xFF\xFFTSource Engine Query\x00"
//!     → FF FF FF FF 54 53 6F 75 72 63 65 ... 79 00
//! ```
//! `\xHH` (exactly two hex digits, either case) becomes one byte. Everything
//! else, including malformed escapes such as `\xZZ` or `\x1`, is copied as
//! UTF-8 text. Parsing never fails.

use std::fmt;

/// Length of a `\xHH` escape in bytes.
const ESCAPE_LEN: usize = 4;

/// Encode a payload spec into raw bytes.
///
/// Escapes are matched leftmost-first and never overlap, so `\\x41` yields a
/// literal backslash followed by `A`.
pub fn encode(spec: &str) -> Vec<u8> {
    let src = spec.as_bytes();
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;

    while pos < src.len() {
        match escape_at(src, pos) {
            Some(byte) => {
                out.push(byte);
                pos += ESCAPE_LEN;
            }
            None => {
                // Escape bytes are ASCII, so copying byte-wise keeps multi-byte
                // UTF-8 sequences intact.
                out.push(src[pos]);
                pos += 1;
            }
        }
    }

    out
}

/// Render bytes as space-separated uppercase hex, e.g. `FF 00 7A`.
pub fn render(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_at(src: &[u8], pos: usize) -> Option<u8> {
    match src.get(pos..pos + ESCAPE_LEN)? {
        [b'\\', b'x', hi, lo] => Some((hex_digit(*hi)? << 4) | hex_digit(*lo)?),
        _ => None,
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// An encoded probe payload.
///
/// Built once from the configured spec string and shared by every probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Encode `spec` (see [`encode`]).
    pub fn from_spec(spec: &str) -> Self {
        Self(encode(spec))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_engine_query() {
        let bytes = encode(r"\xFF\xFF\xFF\xFFTSource Engine Query\x00");
        assert_eq!(
            render(&bytes),
            "FF FF FF FF 54 53 6F 75 72 63 65 20 45 6E 67 69 6E 65 20 51 75 65 72 79 00"
        );
    }

    #[test]
    fn test_plain_text_is_utf8() {
        for spec in ["ping", "", "héllo wörld ✓", "back\\slash", "x41"] {
            assert_eq!(encode(spec), spec.as_bytes());
        }
    }

    #[test]
    fn test_only_escapes() {
        assert_eq!(encode(r"\x00\x7f\x80\xAb\xff"), vec![0x00u8, 0x7F, 0x80, 0xAB, 0xFF]);
    }

    #[test]
    fn test_malformed_escapes_stay_literal() {
        assert_eq!(encode(r"\xZZ"), br"\xZZ".to_vec());
        assert_eq!(encode(r"\xG1"), br"\xG1".to_vec());
        assert_eq!(encode(r"\x1"), br"\x1".to_vec());
        assert_eq!(encode(r"\X41"), br"\X41".to_vec());
        assert_eq!(encode(r"abc\x"), br"abc\x".to_vec());
    }

    #[test]
    fn test_escapes_do_not_overlap() {
        // First backslash has no `x` after it; the second starts a valid escape.
        assert_eq!(encode(r"\\x41"), b"\\A".to_vec());
        // Third hex digit is ordinary text.
        assert_eq!(encode(r"\x414"), b"A4".to_vec());
        assert_eq!(encode(r"\x\x41"), b"\\xA".to_vec());
    }

    #[test]
    fn test_mixed_with_multibyte_text() {
        assert_eq!(encode(r"é\x00ü"), vec![0xC3u8, 0xA9, 0x00, 0xC3, 0xBC]);
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&[]), "");
        assert_eq!(render(&[0x0a]), "0A");
        assert_eq!(render(&[0xde, 0xad, 0xbe, 0xef]), "DE AD BE EF");
    }

    #[test]
    fn test_payload_display() {
        let payload = Payload::from_spec(r"\x01ping");
        assert_eq!(payload.len(), 5);
        assert!(!payload.is_empty());
        assert_eq!(payload.to_string(), "01 70 69 6E 67");
    }
}
