//! # The External Signing Boundary
//!
//! The core never holds the user's private key — signing happens in an
//! external wallet that may take arbitrarily long, refuse, or simply not
//! offer the capability. [`Signer`] is that boundary: an async trait the
//! workflow awaits, whose failures are ordinary user-visible outcomes
//! (declined, unavailable), never crashes.
//!
//! [`LocalSigner`] is the in-process implementation over an Ed25519
//! signing key. It exists so the CLI and tests can run the full
//! build → sign → verify → export cycle without a wallet in the loop.
//! Key hygiene rules apply: secret material is never logged, never
//! printed by `Debug`, and only loaded from hex deliberately.

use async_trait::async_trait;
use ed25519_dalek::{Signer as DalekSigner, SigningKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::codec;
use crate::config::SECRET_KEY_LENGTH;

/// Failures at the signing boundary. Both are non-fatal: the workflow
/// reports them to the user and carries on unsigned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
    /// The signer refused, or the user cancelled the request.
    #[error("signing request was declined or cancelled")]
    Declined,

    /// The connected signer offers no message-signing capability at all.
    #[error("no signing capability available")]
    Unavailable,
}

/// An external capability that signs raw message bytes.
///
/// Implementations may suspend for as long as they like (a human is
/// usually on the other end). Cancellation surfaces as
/// [`SignerError::Declined`], not as a timeout inside the core.
#[async_trait]
pub trait Signer: Send + Sync {
    /// The signer's base58 public key — the address challenges are
    /// issued against.
    fn address(&self) -> String;

    /// Sign the message, returning the raw 64-byte signature.
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// An in-process Ed25519 signer holding its own key.
pub struct LocalSigner {
    signing_key: SigningKey,
}

impl LocalSigner {
    /// Generate a signer with a fresh random key (OS RNG).
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Construct from a 32-byte seed. Weak seed in, weak key out.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Load from a hex-encoded 32-byte seed. Dev and CLI convenience —
    /// don't keep production keys in shell history.
    pub fn from_hex(hex_seed: &str) -> Result<Self, SignerError> {
        let bytes = hex::decode(hex_seed).map_err(|_| SignerError::Unavailable)?;
        let seed: [u8; SECRET_KEY_LENGTH] =
            bytes.try_into().map_err(|_| SignerError::Unavailable)?;
        Ok(Self::from_seed(&seed))
    }

    /// The raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}

#[async_trait]
impl Signer for LocalSigner {
    fn address(&self) -> String {
        codec::encode(&self.public_key_bytes())
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        Ok(self.signing_key.sign(message).to_bytes().to_vec())
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only. The seed stays out of logs, always.
        write!(f, "LocalSigner(pub={})", self.address())
    }
}
