//! Raw return words from read-only contract calls

use std::fmt;

/// Nibbles in a full 32-byte word.
pub const WORD_NIBBLES: usize = 64;

/// A hex-encoded return word as handed back by an explorer eth_call proxy.
///
/// Nominally one `0x`-prefixed 32-byte big-endian word, but short payloads,
/// the empty string, `0x`, and `0x0` all occur in the wild; those are the
/// zero word. Shorter-than-64-nibble bodies are left-padded before any
/// fixed-width interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWord(String);

impl RawWord {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The zero word, substituted for failed calls.
    pub fn zero() -> Self {
        Self("0x0".to_string())
    }

    /// Hex body with any `0x`/`0X` prefix stripped.
    pub fn body(&self) -> &str {
        let trimmed = self.0.trim();
        trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed)
    }

    /// True when the payload is empty or the literal zero word.
    pub fn is_zero_literal(&self) -> bool {
        let body = self.body();
        body.is_empty() || body == "0"
    }

    /// True when the body contains only hex digits.
    ///
    /// Decoding never fails on dirty input (it coalesces to zero), so a
    /// caller that needs to tell "decoded zero" from "garbage payload"
    /// checks this first.
    pub fn is_clean_hex(&self) -> bool {
        self.body().chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Body left-padded with zeros to a full 64-nibble word.
    ///
    /// Bodies already longer than a word are returned unchanged; the
    /// fixed-width decoders only ever look at the tail.
    pub fn padded(&self) -> String {
        format!("{:0>width$}", self.body(), width = WORD_NIBBLES)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawWord {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for RawWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_strips_prefix() {
        assert_eq!(RawWord::new("0xabcd").body(), "abcd");
        assert_eq!(RawWord::new("0Xabcd").body(), "abcd");
        assert_eq!(RawWord::new("abcd").body(), "abcd");
    }

    #[test]
    fn test_zero_literals() {
        assert!(RawWord::new("").is_zero_literal());
        assert!(RawWord::new("0x").is_zero_literal());
        assert!(RawWord::new("0x0").is_zero_literal());
        assert!(!RawWord::new("0x00").is_zero_literal());
        assert!(!RawWord::new("0x1").is_zero_literal());
    }

    #[test]
    fn test_padded_fills_to_word() {
        let padded = RawWord::new("0xff").padded();
        assert_eq!(padded.len(), WORD_NIBBLES);
        assert!(padded.starts_with("00"));
        assert!(padded.ends_with("ff"));
    }

    #[test]
    fn test_clean_hex_flag() {
        assert!(RawWord::new("0xDeadBeef").is_clean_hex());
        assert!(!RawWord::new("0xnothex").is_clean_hex());
    }
}
