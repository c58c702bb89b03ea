//! # Signature Verification
//!
//! Ed25519 verification of a signed challenge against a raw 32-byte public
//! key, with two deliberate quirks inherited from the environment this
//! protocol grew up in:
//!
//! 1. **SPKI wrapping.** The verification primitive expects keys in
//!    SubjectPublicKeyInfo shape, so a raw key is prefixed with the fixed
//!    12-byte Ed25519 algorithm identifier before use. This is pure byte
//!    plumbing — no cryptographic computation happens during wrapping.
//!
//! 2. **Tri-state results.** Verification answers `Verified`, `Failed`, or
//!    `Unsupported`. The third state exists because the primitive may be
//!    absent in some runtimes; it is a capability report, **not** a
//!    security failure, and must never be rendered as one.
//!
//! A failed verification is an expected, user-meaningful outcome — wrong
//! key, tampered message, truncated signature — so it is a value, not an
//! `Err`. Nothing in this module panics or propagates crypto errors;
//! anything that goes wrong inside the primitive folds into `Failed`.

use std::fmt;

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};
use thiserror::Error;

use crate::codec;
use crate::config::{PUBLIC_KEY_LENGTH, SPKI_ED25519_PREFIX, SPKI_KEY_LENGTH};

/// Errors constructing a verification key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The raw public key was not exactly 32 bytes.
    #[error("invalid public key length: expected {PUBLIC_KEY_LENGTH} bytes, got {got}")]
    InvalidKeyLength {
        /// The length that was actually supplied.
        got: usize,
    },

    /// A base58 address failed to decode.
    #[error(transparent)]
    Base58(#[from] codec::Base58Error),
}

/// The outcome of a signature verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    /// The signature is valid for this key and message.
    Verified,
    /// The signature is not valid: wrong key, altered message, malformed
    /// or truncated signature. All the same answer — we don't hand
    /// attackers an oracle for *why*.
    Failed,
    /// The runtime has no verification primitive. Not a security verdict.
    Unsupported,
}

impl VerificationResult {
    /// `true` only for [`VerificationResult::Verified`].
    pub fn is_verified(self) -> bool {
        self == VerificationResult::Verified
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationResult::Verified => "Verified",
            VerificationResult::Failed => "Failed",
            VerificationResult::Unsupported => "Unsupported",
        };
        f.write_str(s)
    }
}

/// An Ed25519 public key in the SPKI shape the verification primitive
/// consumes: the fixed 12-byte algorithm prefix followed by the 32 raw
/// key bytes. Always exactly 44 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationKey {
    spki: [u8; SPKI_KEY_LENGTH],
}

impl VerificationKey {
    /// Wrap a raw 32-byte Ed25519 public key in SPKI shape.
    ///
    /// Fails with [`KeyError::InvalidKeyLength`] for any other input
    /// length. Deterministic, allocation-free, and does no curve math —
    /// the wrapping only satisfies the primitive's encoding demands.
    pub fn from_raw(raw: &[u8]) -> Result<Self, KeyError> {
        if raw.len() != PUBLIC_KEY_LENGTH {
            return Err(KeyError::InvalidKeyLength { got: raw.len() });
        }
        let mut spki = [0u8; SPKI_KEY_LENGTH];
        spki[..SPKI_ED25519_PREFIX.len()].copy_from_slice(&SPKI_ED25519_PREFIX);
        spki[SPKI_ED25519_PREFIX.len()..].copy_from_slice(raw);
        Ok(Self { spki })
    }

    /// Parse a base58 wallet address into a verification key.
    pub fn from_base58(address: &str) -> Result<Self, KeyError> {
        let bytes = codec::decode(address)?;
        Self::from_raw(&bytes)
    }

    /// The full 44-byte SPKI blob.
    pub fn as_spki_bytes(&self) -> &[u8; SPKI_KEY_LENGTH] {
        &self.spki
    }

    /// The raw 32 key bytes, stripped of the prefix.
    pub fn raw_key(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let mut raw = [0u8; PUBLIC_KEY_LENGTH];
        raw.copy_from_slice(&self.spki[SPKI_ED25519_PREFIX.len()..]);
        raw
    }

    /// The key's base58 address form.
    pub fn to_base58(&self) -> String {
        codec::encode(&self.raw_key())
    }
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationKey({})", self.to_base58())
    }
}

/// A reason the backend could not even attempt verification. Folded into
/// [`VerificationResult::Failed`] by [`verify_with`] — callers never see it.
#[derive(Debug, Error)]
#[error("verification backend failure: {0}")]
pub struct BackendFailure(pub String);

/// The runtime's verification primitive, behind a capability probe.
///
/// The standard implementation is [`DalekBackend`]. Alternative backends
/// exist so environments without the primitive can report themselves
/// unavailable instead of faking answers, and so tests can exercise the
/// `Unsupported` and error-folding paths.
pub trait VerifierBackend: Send + Sync {
    /// Whether the primitive is present in this runtime. Checked before
    /// any cryptographic call.
    fn is_available(&self) -> bool;

    /// Raw Ed25519 verification. `Ok(true)` means valid, `Ok(false)` means
    /// invalid; `Err` means the attempt itself blew up (and becomes
    /// `Failed` upstream, never a panic or a propagated error).
    fn verify_ed25519(
        &self,
        raw_key: &[u8; PUBLIC_KEY_LENGTH],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, BackendFailure>;
}

/// ed25519-dalek, with strict point validation. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DalekBackend;

impl VerifierBackend for DalekBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn verify_ed25519(
        &self,
        raw_key: &[u8; PUBLIC_KEY_LENGTH],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, BackendFailure> {
        // A key that isn't a valid curve point can never have produced a
        // valid signature; the parse failure is a verification failure.
        let Ok(verifying_key) = VerifyingKey::from_bytes(raw_key) else {
            return Ok(false);
        };
        // Same for signatures of the wrong length.
        let sig_bytes: [u8; 64] = match signature.try_into() {
            Ok(b) => b,
            Err(_) => return Ok(false),
        };
        let dalek_sig = DalekSignature::from_bytes(&sig_bytes);
        Ok(verifying_key.verify(message, &dalek_sig).is_ok())
    }
}

/// Verify a signature over a message against an SPKI-wrapped key, using
/// the given backend.
///
/// Pure function of its inputs: no hidden state, no I/O, no network.
/// Returns [`VerificationResult::Unsupported`] before touching any
/// cryptography when the backend reports itself unavailable.
pub fn verify_with(
    backend: &dyn VerifierBackend,
    key: &VerificationKey,
    message: &[u8],
    signature: &[u8],
) -> VerificationResult {
    if !backend.is_available() {
        return VerificationResult::Unsupported;
    }
    match backend.verify_ed25519(&key.raw_key(), message, signature) {
        Ok(true) => VerificationResult::Verified,
        Ok(false) => VerificationResult::Failed,
        Err(err) => {
            tracing::debug!(error = %err, "verification backend error; reporting Failed");
            VerificationResult::Failed
        }
    }
}

/// Verify with the standard [`DalekBackend`]. The common path.
pub fn verify(key: &VerificationKey, message: &[u8], signature: &[u8]) -> VerificationResult {
    verify_with(&DalekBackend, key, message, signature)
}
