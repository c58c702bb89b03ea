//! # Base58 Codec
//!
//! Binary-to-text encoding over the Bitcoin base58 alphabet, used for
//! rendering public keys and signatures in a form humans can copy-paste
//! without transcription disasters (no `0`/`O`, no `I`/`l`).
//!
//! The implementation is the classic arbitrary-precision scheme: treat the
//! input as one big base-256 integer and repeatedly divide by 58. We keep
//! the accumulator as a little-endian byte vector rather than a fixed-width
//! integer because the inputs we care about — 32-byte keys and 64-byte
//! signatures — overflow `u128` many times over. No precision loss, ever.
//!
//! Leading zero bytes carry no numeric weight, so they are handled out of
//! band: each leading `0x00` in the input maps to exactly one leading `'1'`
//! (the zero digit of base58) in the output, and vice versa on decode.
//!
//! ## Round-trip laws
//!
//! - `decode(encode(b)) == b` for every byte sequence `b`.
//! - `encode(decode(s)) == s` for every canonical base58 string `s`.
//!
//! Both are enforced by property tests against the `bs58` crate as an
//! independent oracle.

use thiserror::Error;

use crate::config::BASE58_ALPHABET;

/// Reverse lookup from ASCII byte to base58 digit value. `-1` marks
/// characters outside the alphabet. Built at compile time so decode pays
/// one array index per character.
const DECODE_TABLE: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < 58 {
        table[BASE58_ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// Errors that can occur while decoding a base58 string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base58Error {
    /// The input contained a character outside the base58 alphabet.
    /// The offending character is carried so callers can point at it.
    #[error("invalid base58 character: {0:?}")]
    InvalidCharacter(char),
}

/// Encode a byte sequence as a base58 string.
///
/// The empty input encodes to the empty string. An all-zero input of
/// length N encodes to N `'1'` characters — zeros have no numeric value
/// in base58, only positional presence.
///
/// # Examples
///
/// ```
/// use keyproof::codec::base58;
///
/// assert_eq!(base58::encode(b"test"), "3yZe7d");
/// assert_eq!(base58::encode(&[0, 0, 0]), "111");
/// assert_eq!(base58::encode(&[]), "");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Base58 digits of the value, little-endian. Each input byte folds in
    // as `acc = acc * 256 + byte`, carried through digit by digit.
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    for &byte in &bytes[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        out.push('1');
    }
    for &digit in digits.iter().rev() {
        out.push(BASE58_ALPHABET[digit as usize] as char);
    }
    out
}

/// Decode a base58 string back into bytes.
///
/// Fails with [`Base58Error::InvalidCharacter`] on the first character
/// outside the alphabet. Every leading `'1'` becomes one leading zero
/// byte in the output.
///
/// # Examples
///
/// ```
/// use keyproof::codec::base58;
///
/// assert_eq!(base58::decode("3yZe7d").unwrap(), b"test");
/// assert!(base58::decode("O0Il").is_err());
/// ```
pub fn decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    // Value bytes, little-endian. Each character folds in as
    // `acc = acc * 58 + digit`.
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len() * 733 / 1000 + 1);
    for ch in s.chars() {
        let mut carry = digit_value(ch).ok_or(Base58Error::InvalidCharacter(ch))? as u32;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let zeros = s.bytes().take_while(|&b| b == b'1').count();
    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// Decode a base58 string into a fixed-size array. `Ok(None)` means the
/// string was valid base58 but decoded to the wrong length — the caller
/// asked for a 64-byte signature and got something else.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<Option<[u8; N]>, Base58Error> {
    let bytes = decode(s)?;
    Ok(<[u8; N]>::try_from(bytes).ok())
}

/// Map a character to its base58 digit value, or `None` if it is not in
/// the alphabet. Non-ASCII characters are out by definition.
fn digit_value(ch: char) -> Option<u8> {
    let code = ch as u32;
    if code < 128 {
        let value = DECODE_TABLE[code as usize];
        if value >= 0 {
            return Some(value as u8);
        }
    }
    None
}
