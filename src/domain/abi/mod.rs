//! ABI return-data decoding
//!
//! This module owns the bit-exact part of the crate: turning the raw hex
//! words an explorer proxy returns for no-argument read calls into typed
//! integers and addresses.

mod decoder;
mod word;

pub use decoder::{
    decode_address, decode_int24, decode_uint, decode_uint24, decode_word, slice_word, UintWidth,
};
pub use word::{RawWord, WORD_NIBBLES};
