//! Byte classification used by the tokenizer.
//!
//! The lexer operates on raw bytes. Multi-byte UTF-8 sequences are treated
//! as opaque name characters: every byte `>= 0x80` may start or continue a
//! name, which admits non-ASCII XML names without decoding them.

/// Character-class predicates supplied to the tokenizer.
///
/// Only whitespace is grammar-specific; the name predicates have defaults
/// that match XML `NCName` closely enough for a byte-level lexer.
pub trait CharClassifier {
    /// Whitespace that separates tokens.
    fn is_whitespace(&self, b: u8) -> bool;

    /// First byte of a name.
    #[inline]
    fn is_name_start(&self, b: u8) -> bool {
        b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
    }

    /// Any byte after the first in a name.
    ///
    /// The colon is not a name character; qualified names are assembled by
    /// the tokenizer.
    #[inline]
    fn is_name_char(&self, b: u8) -> bool {
        self.is_name_start(b) || b.is_ascii_digit() || b == b'-' || b == b'.'
    }

    #[inline]
    fn is_digit(&self, b: u8) -> bool {
        b.is_ascii_digit()
    }
}

/// XML 1.0 rules: `S ::= (#x20 | #x9 | #xD | #xA)+`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct XmlChars;

impl CharClassifier for XmlChars {
    #[inline]
    fn is_whitespace(&self, b: u8) -> bool {
        matches!(b, b' ' | b'\t' | b'\r' | b'\n')
    }
}
