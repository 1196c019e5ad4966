//! Decoder contract tests over full 32-byte words

use alloy_primitives::U256;

use pairlens::domain::abi::{
    decode_address, decode_int24, decode_uint, decode_uint24, decode_word, slice_word, RawWord,
    UintWidth,
};

/// Build a full 64-nibble word from a big-endian U256.
fn full_word(value: U256) -> RawWord {
    RawWord::new(format!("0x{:0>64}", format!("{value:x}")))
}

#[test]
fn test_uint128_equals_low_sixteen_bytes_of_word() {
    // For any valid 64-nibble word, the uint128 decode is the big-endian
    // value of its low 16 bytes.
    let samples = [
        U256::ZERO,
        U256::from(1u8),
        U256::from(u64::MAX),
        U256::from_str_radix("deadbeefcafebabe00112233445566778899aabbccddeeff", 16).unwrap(),
        U256::MAX,
    ];
    let low_mask = (U256::from(1u8) << 128) - U256::from(1u8);

    for value in samples {
        let word = full_word(value);
        assert_eq!(
            decode_uint(&word, UintWidth::U128),
            value & low_mask,
            "word {word}"
        );
    }
}

#[test]
fn test_empty_and_zero_literal_words_decode_to_zero() {
    for raw in ["0x", "0x0", ""] {
        let word = RawWord::new(raw);
        assert_eq!(decode_uint(&word, UintWidth::U24), U256::ZERO);
        assert_eq!(decode_uint(&word, UintWidth::U128), U256::ZERO);
        assert_eq!(decode_int24(&word), 0);
        assert_eq!(decode_word(&word), U256::ZERO);
    }
}

#[test]
fn test_address_decode_drops_padding() {
    let raw = RawWord::new(format!(
        "0x{}1111111111111111111111111111111111111111",
        "00".repeat(12)
    ));
    assert_eq!(
        decode_address(&raw),
        "0x1111111111111111111111111111111111111111"
    );
}

#[test]
fn test_int24_round_trips_twos_complement() {
    for (tail, expected) in [("fffffe", -2i32), ("000001", 1), ("ffffff", -1)] {
        let raw = RawWord::new(format!("0x{:0>64}", tail));
        assert_eq!(decode_int24(&raw), expected, "tail {tail}");
    }
}

#[test]
fn test_slice_feeds_further_decodes() {
    // A packed word: a 40-nibble price followed by a 6-nibble tick field.
    let price = U256::from(1_234_567_890_123_456_789u64);
    let packed = RawWord::new(format!("0x{:0>40}fffffe", format!("{price:x}")));

    let price_slice = slice_word(&packed, 0, 40);
    assert_eq!(decode_word(&price_slice), price);

    let tick_slice = slice_word(&packed, 40, 6);
    assert_eq!(decode_int24(&tick_slice), -2);
}

#[test]
fn test_dirty_word_flag_distinguishes_garbage_from_zero() {
    let garbage = RawWord::new("0xnothex");
    assert_eq!(decode_uint(&garbage, UintWidth::U128), U256::ZERO);
    assert!(!garbage.is_clean_hex());

    let zero = RawWord::new(format!("0x{}", "0".repeat(64)));
    assert_eq!(decode_uint(&zero, UintWidth::U128), U256::ZERO);
    assert!(zero.is_clean_hex());
}
