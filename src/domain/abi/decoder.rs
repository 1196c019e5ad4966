//! Fixed-width big-endian decoding of contract return words
//!
//! Every decode here is a total function: short, empty, and malformed
//! payloads coalesce to zero rather than erroring. The read aggregator
//! relies on this to substitute a zero word for a failed call and decode
//! the remaining fields uniformly.

use alloy_primitives::U256;

use super::word::{RawWord, WORD_NIBBLES};

/// Bit widths used by the pool read set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintWidth {
    U24,
    U128,
}

impl UintWidth {
    fn nibbles(self) -> usize {
        match self {
            UintWidth::U24 => 6,
            UintWidth::U128 => 32,
        }
    }
}

/// Decode the low `width` bits of a word as an unsigned big-endian integer.
pub fn decode_uint(raw: &RawWord, width: UintWidth) -> U256 {
    if raw.is_zero_literal() || !raw.body().is_ascii() {
        return U256::ZERO;
    }
    let padded = raw.padded();
    let tail = &padded[padded.len() - width.nibbles()..];
    parse_hex_u256(tail)
}

/// Convenience for uint24 fields (fee); six nibbles always fit in u32.
pub fn decode_uint24(raw: &RawWord) -> u32 {
    decode_uint(raw, UintWidth::U24).to::<u32>()
}

/// Decode a 24-bit two's-complement integer. Tick spacing may be negative.
pub fn decode_int24(raw: &RawWord) -> i32 {
    let mut value = decode_uint24(raw) as i32;
    if value >= 0x80_0000 {
        value -= 0x100_0000;
    }
    value
}

/// Decode the low 20 bytes of a word as a `0x`-prefixed address string.
///
/// Zero or empty payloads yield the all-zero address, not an error. Case of
/// the returned nibbles is preserved as received.
pub fn decode_address(raw: &RawWord) -> String {
    if raw.is_zero_literal() || !raw.body().is_ascii() {
        return format!("0x{}", "0".repeat(40));
    }
    let padded = raw.padded();
    format!("0x{}", &padded[padded.len() - 40..])
}

/// Decode the full (padded) word as an unsigned integer.
///
/// Used for fields wider than 128 bits, such as the 160-bit sqrt price
/// pulled out of a packed slot word by [`slice_word`].
pub fn decode_word(raw: &RawWord) -> U256 {
    if raw.is_zero_literal() || !raw.body().is_ascii() {
        return U256::ZERO;
    }
    let padded = raw.padded();
    let tail_len = padded.len().min(WORD_NIBBLES);
    parse_hex_u256(&padded[padded.len() - tail_len..])
}

/// Extract `len` nibbles starting at `start` from the unpadded body.
///
/// Packed multi-field returns (the slot state word) are sub-sliced with this
/// before individual decoding. Out-of-range requests clamp to the available
/// body rather than erroring; the result is itself a raw word.
pub fn slice_word(raw: &RawWord, start: usize, len: usize) -> RawWord {
    let body = raw.body();
    if !body.is_ascii() || start >= body.len() {
        return RawWord::zero();
    }
    let end = start.saturating_add(len).min(body.len());
    RawWord::new(format!("0x{}", &body[start..end]))
}

fn parse_hex_u256(nibbles: &str) -> U256 {
    if nibbles.is_empty() {
        return U256::ZERO;
    }
    U256::from_str_radix(nibbles, 16).unwrap_or(U256::ZERO)
}
