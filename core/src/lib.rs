// Copyright (c) 2026 Keyproof Contributors. MIT License.
// See LICENSE for details.

//! # Keyproof — Core Library
//!
//! Prove you own an Ed25519 keypair by signing a human-readable challenge,
//! entirely off-chain. No transaction, no fees, no token issuance — the
//! output is a verifiable signed artifact and nothing more.
//!
//! The pieces, leaf-first:
//!
//! - **codec** — base58 (Bitcoin alphabet) and lowercase hex. The base58
//!   implementation is arbitrary-precision; 64-byte signatures round-trip
//!   exactly, every time.
//! - **nonce** — fresh anti-replay tokens from the OS RNG, with an
//!   *observable* degraded mode if the OS lets us down.
//! - **challenge** — the canonical sign-in message. The rendered text is
//!   the signed payload; field order and newlines are law.
//! - **verify** — SPKI-wrapped Ed25519 verification with a tri-state
//!   result. `Unsupported` is a capability report, not a failure.
//! - **artifact** — the exportable JSON record (message, address,
//!   signature in base58 *and* hex).
//! - **signer** — the async boundary to the external wallet, plus a local
//!   in-process signer for CLI and tests.
//! - **workflow** — build → sign → verify → export, sequenced explicitly.
//! - **selftest** — the acceptance checks, runnable from the CLI.
//! - **config** — every constant and fixed string, in one place.
//!
//! ## Design Philosophy
//!
//! 1. The signed payload is sacred. Anything that changes rendered bytes
//!    is a breaking change, whatever the diff looks like.
//! 2. Failed verification is a value, not an error. Users tamper, keys
//!    mismatch, signatures truncate — the answer is `Failed`, calmly.
//! 3. No hidden state. Every operation is a pure function of its inputs
//!    or a clearly bounded effect (RNG, clock, external signer).

pub mod artifact;
pub mod challenge;
pub mod codec;
pub mod config;
pub mod nonce;
pub mod selftest;
pub mod signer;
pub mod verify;
pub mod workflow;

// Re-export the types people actually need so they don't have to memorize
// the module hierarchy.
pub use artifact::SignedArtifact;
pub use challenge::{Challenge, ChallengeBuilder, Clock, FixedClock, SystemClock};
pub use nonce::{Nonce, NonceStrength};
pub use signer::{LocalSigner, Signer, SignerError};
pub use verify::{VerificationKey, VerificationResult};
pub use workflow::SignInFlow;
