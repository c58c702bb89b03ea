//! # Protocol Constants
//!
//! Every magic number and fixed string in keyproof lives here. If you're
//! hardcoding a constant somewhere else, you're doing it wrong and you owe
//! the team coffee.
//!
//! Several of these values are load-bearing in a subtle way: the challenge
//! template strings are part of the *signed payload*, so changing a single
//! character here silently invalidates every signature produced before the
//! change. Treat edits to this file like consensus changes.

// ---------------------------------------------------------------------------
// Encoding Alphabets
// ---------------------------------------------------------------------------

/// The Bitcoin base58 alphabet. 58 symbols: digits and letters minus the
/// visually ambiguous `0`, `O`, `I`, and `l`. Order matters — the index of
/// each character is its numeric value.
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// The 62-symbol alphanumeric alphabet used for challenge nonces.
pub const NONCE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default nonce length in symbols. 24 symbols over a 62-symbol alphabet
/// gives ~142 bits of entropy — comfortably beyond brute-force replay.
pub const DEFAULT_NONCE_LENGTH: usize = 24;

// ---------------------------------------------------------------------------
// Challenge Template
// ---------------------------------------------------------------------------

/// First line of every rendered challenge.
pub const CHALLENGE_TITLE: &str = "Sign-In Challenge";

/// The fixed human-readable statement embedded in every challenge.
pub const CHALLENGE_STATEMENT: &str = "Sign this message to prove ownership \
of your wallet. This request will not trigger a blockchain transaction or \
cost any fees.";

/// Challenge format version. Bump only with a coordinated template change.
pub const CHALLENGE_VERSION: &str = "1";

/// Literal placeholder used in the `Address:` field when no wallet is
/// connected. The message stays well-formed and signable, but a signature
/// over this sentinel is unverifiable against any real key.
pub const ADDRESS_PLACEHOLDER: &str = "<WALLET_NOT_CONNECTED>";

/// How long a challenge stays valid after issuance.
pub const CHALLENGE_VALIDITY_SECS: i64 = 5 * 60;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 public keys are exactly 32 bytes. Always.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 secret seeds are also exactly 32 bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 signatures are exactly 64 bytes. Also always.
pub const SIGNATURE_LENGTH: usize = 64;

/// The fixed SPKI (SubjectPublicKeyInfo) prefix that identifies an Ed25519
/// public key to DER-speaking verification primitives. DER-encoded
/// `SEQUENCE { AlgorithmIdentifier(id-Ed25519), BIT STRING }` header — the
/// 32 raw key bytes follow immediately after.
pub const SPKI_ED25519_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Total length of an SPKI-wrapped Ed25519 key: 12-byte prefix + 32 key bytes.
pub const SPKI_KEY_LENGTH: usize = SPKI_ED25519_PREFIX.len() + PUBLIC_KEY_LENGTH;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base58_alphabet_has_no_ambiguous_characters() {
        for banned in [b'0', b'O', b'I', b'l'] {
            assert!(!BASE58_ALPHABET.contains(&banned));
        }
        assert_eq!(BASE58_ALPHABET.len(), 58);
    }

    #[test]
    fn nonce_alphabet_is_unique_symbols() {
        let mut seen = [false; 256];
        for &b in NONCE_ALPHABET.iter() {
            assert!(!seen[b as usize], "duplicate symbol {}", b as char);
            seen[b as usize] = true;
        }
    }

    #[test]
    fn spki_key_length_is_44() {
        assert_eq!(SPKI_KEY_LENGTH, 44);
    }
}
