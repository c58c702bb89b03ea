//! # Built-In Acceptance Checks
//!
//! A sequence of named boolean checks over the core's contractual
//! properties: codec round-trips and known vectors, nonce shape and
//! freshness, SPKI wrapping, tamper rejection, and the exact challenge
//! template. The CLI exposes these as `keyproof selftest`; CI and curious
//! operators get the same acceptance evidence the test suite encodes,
//! without needing a Rust toolchain on the box.
//!
//! Every check reports a label, a pass/fail bit, and a human-readable
//! detail string. Checks are independent — one failing never hides
//! another.

use chrono::{Duration, TimeZone, Utc};
use ed25519_dalek::{Signer as _, SigningKey};

use crate::challenge::{ChallengeBuilder, FixedClock};
use crate::codec;
use crate::config::NONCE_ALPHABET;
use crate::nonce;
use crate::verify::{
    verify, verify_with, BackendFailure, KeyError, VerificationKey, VerificationResult,
    VerifierBackend,
};

/// One named check: what was tested, whether it held, and the evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Short stable identifier for the property under test.
    pub label: String,
    /// Whether the property held.
    pub passed: bool,
    /// Human-readable observed-vs-expected detail.
    pub detail: String,
}

impl CheckResult {
    fn new(label: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

/// A backend that reports the verification primitive as absent, for
/// exercising the `Unsupported` path.
struct AbsentBackend;

impl VerifierBackend for AbsentBackend {
    fn is_available(&self) -> bool {
        false
    }
    fn verify_ed25519(
        &self,
        _raw_key: &[u8; 32],
        _message: &[u8],
        _signature: &[u8],
    ) -> Result<bool, BackendFailure> {
        Ok(false)
    }
}

/// Run every acceptance check and collect the results.
pub fn run_selftests() -> Vec<CheckResult> {
    let mut results = Vec::new();

    // --- Base58 codec ---
    let empty = codec::encode(&[]);
    results.push(CheckResult::new(
        "base58/empty",
        empty.is_empty(),
        format!("encode([]) == {empty:?}, expected \"\""),
    ));

    let zeros = codec::encode(&[0, 0, 0]);
    results.push(CheckResult::new(
        "base58/leading-zeros",
        zeros == "111",
        format!("encode([0,0,0]) == {zeros:?}, expected \"111\""),
    ));

    let vector = codec::encode(b"test");
    results.push(CheckResult::new(
        "base58/known-vector",
        vector == "3yZe7d",
        format!("encode(\"test\") == {vector:?}, expected \"3yZe7d\""),
    ));

    let blob: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(89).wrapping_add(3)).collect();
    let roundtrip = codec::decode(&codec::encode(&blob)).ok() == Some(blob.clone());
    results.push(CheckResult::new(
        "base58/roundtrip-64-bytes",
        roundtrip,
        "decode(encode(b)) == b for a 64-byte signature-sized input",
    ));

    let rejected = codec::decode("bad0input").is_err();
    results.push(CheckResult::new(
        "base58/invalid-character",
        rejected,
        "decode rejects characters outside the alphabet ('0')",
    ));

    let hex = codec::encode_hex(&[0, 1, 2, 254, 255]);
    results.push(CheckResult::new(
        "hex/known-vector",
        hex == "000102feff",
        format!("hex([0,1,2,254,255]) == {hex:?}, expected \"000102feff\""),
    ));

    // --- Nonce generation ---
    let a = nonce::generate(24);
    let b = nonce::generate(24);
    let well_formed = a.value().len() == 24
        && a.value().bytes().all(|ch| NONCE_ALPHABET.contains(&ch));
    results.push(CheckResult::new(
        "nonce/shape",
        well_formed,
        format!("24 symbols from the 62-symbol alphabet: {:?}", a.value()),
    ));
    results.push(CheckResult::new(
        "nonce/freshness",
        a.value() != b.value(),
        "two consecutive nonces differ",
    ));
    results.push(CheckResult::new(
        "nonce/strength",
        a.is_cryptographic(),
        "nonce came from the OS cryptographic RNG",
    ));

    // --- SPKI wrapping ---
    let wrapped = VerificationKey::from_raw(&[0u8; 32]);
    let spki_ok = wrapped
        .as_ref()
        .map(|k| k.as_spki_bytes().len() == 44)
        .unwrap_or(false);
    results.push(CheckResult::new(
        "spki/zero-key-is-44-bytes",
        spki_ok,
        "wrapping a 32-byte all-zero key yields exactly 44 bytes",
    ));

    let short = VerificationKey::from_raw(&[0u8; 31]);
    results.push(CheckResult::new(
        "spki/wrong-length-rejected",
        matches!(short, Err(KeyError::InvalidKeyLength { got: 31 })),
        "a 31-byte key fails with InvalidKeyLength",
    ));

    // --- Verification ---
    let signing_key = SigningKey::from_bytes(&[0x5Au8; 32]);
    let message = b"keyproof selftest message";
    let signature = signing_key.sign(message).to_bytes();
    let key = VerificationKey::from_raw(&signing_key.verifying_key().to_bytes())
        .expect("32-byte key wraps");

    results.push(CheckResult::new(
        "verify/valid-signature",
        verify(&key, message, &signature) == VerificationResult::Verified,
        "a genuine signature verifies",
    ));

    let mut tampered = message.to_vec();
    tampered[0] ^= 1;
    results.push(CheckResult::new(
        "verify/tampered-message",
        verify(&key, &tampered, &signature) == VerificationResult::Failed,
        "flipping one message bit yields Failed, not a panic",
    ));

    results.push(CheckResult::new(
        "verify/short-signature",
        verify(&key, message, &signature[..63]) == VerificationResult::Failed,
        "a 63-byte signature yields Failed, not a panic",
    ));

    let other_key = VerificationKey::from_raw(&SigningKey::from_bytes(&[7u8; 32]).verifying_key().to_bytes())
        .expect("32-byte key wraps");
    results.push(CheckResult::new(
        "verify/mismatched-key",
        verify(&other_key, message, &signature) == VerificationResult::Failed,
        "a different key yields Failed",
    ));

    results.push(CheckResult::new(
        "verify/unsupported-backend",
        verify_with(&AbsentBackend, &key, message, &signature) == VerificationResult::Unsupported,
        "an absent primitive reports Unsupported, distinct from Failed",
    ));

    // --- Challenge template ---
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    let challenge = ChallengeBuilder::new("example.com")
        .address("ExampleAddr")
        .build(&clock);
    let rendered = challenge.render();
    let lines: Vec<&str> = rendered.split('\n').collect();
    let prefixes = [
        "Sign-In Challenge",
        "Domain: ",
        "Address: ",
        "Statement: ",
        "URI: ",
        "Version: ",
        "Nonce: ",
        "Issued At: ",
        "Expiration Time: ",
    ];
    let order_ok = lines.len() == prefixes.len()
        && lines.iter().zip(prefixes.iter()).all(|(line, p)| line.starts_with(p));
    results.push(CheckResult::new(
        "challenge/field-order",
        order_ok,
        "rendered lines appear in the documented order with no extras",
    ));

    results.push(CheckResult::new(
        "challenge/expiration-window",
        challenge.expiration() - challenge.issued_at() == Duration::minutes(5),
        "Expiration Time equals Issued At + 5 minutes",
    ));

    results
}

/// `true` when every check passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.passed)
}
