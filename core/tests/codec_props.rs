//! Property tests for the base58 codec.
//!
//! The codec's contract is two round-trip laws plus agreement with the
//! `bs58` crate as an independent oracle. Randomized inputs cover the
//! cases hand-written vectors never think of: long runs of zeros, inputs
//! past 64 bytes, pathological all-0xFF blobs.

use proptest::prelude::*;

use keyproof::codec;

proptest! {
    /// decode(encode(b)) == b for arbitrary byte sequences up to 96 bytes
    /// (past the 64-byte signature ceiling, with margin).
    #[test]
    fn bytes_roundtrip(input in proptest::collection::vec(any::<u8>(), 0..96)) {
        let encoded = codec::encode(&input);
        let decoded = codec::decode(&encoded).expect("own encoding always decodes");
        prop_assert_eq!(decoded, input);
    }

    /// The hand-rolled encoder agrees with the bs58 crate byte-for-byte.
    #[test]
    fn encode_matches_bs58_oracle(input in proptest::collection::vec(any::<u8>(), 0..96)) {
        prop_assert_eq!(codec::encode(&input), bs58::encode(&input).into_string());
    }

    /// The hand-rolled decoder agrees with the bs58 crate on valid input.
    #[test]
    fn decode_matches_bs58_oracle(input in proptest::collection::vec(any::<u8>(), 0..96)) {
        let encoded = bs58::encode(&input).into_string();
        let ours = codec::decode(&encoded).expect("bs58 output is valid base58");
        let theirs = bs58::decode(&encoded).into_vec().unwrap();
        prop_assert_eq!(ours, theirs);
    }

    /// encode(decode(s)) == s for canonical strings (obtained by encoding
    /// first, which never produces superfluous leading '1's).
    #[test]
    fn strings_roundtrip(input in proptest::collection::vec(any::<u8>(), 0..96)) {
        let canonical = codec::encode(&input);
        let reencoded = codec::encode(&codec::decode(&canonical).unwrap());
        prop_assert_eq!(reencoded, canonical);
    }

    /// Leading zero bytes map one-for-one to leading '1' characters.
    #[test]
    fn leading_zeros_map_to_ones(zeros in 0usize..16, tail in proptest::collection::vec(1u8..=255, 0..32)) {
        let mut input = vec![0u8; zeros];
        input.extend(&tail);
        let encoded = codec::encode(&input);
        let leading_ones = encoded.bytes().take_while(|&b| b == b'1').count();
        // The most significant digit of a nonzero value is never the zero
        // digit, so the tail contributes no leading '1'.
        prop_assert_eq!(leading_ones, zeros);
    }

    /// Any string containing a character outside the alphabet is rejected,
    /// never mis-decoded.
    #[test]
    fn invalid_characters_always_rejected(prefix in "[1-9A-HJ-NP-Za-km-z]{0,10}", bad in prop::char::ranges(vec!['0'..='0', 'I'..='I', 'O'..='O', 'l'..='l', '!'..='/'].into())) {
        let tainted = format!("{prefix}{bad}");
        prop_assert!(codec::decode(&tainted).is_err());
    }
}
