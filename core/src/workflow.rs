//! # The Sign-In Workflow
//!
//! One invocation of the proof-of-ownership cycle, as an explicit
//! sequence instead of a tangle of UI event callbacks:
//!
//! ```text
//! build  ->  sign (external, async)  ->  verify  ->  export
//! ```
//!
//! [`SignInFlow`] owns exactly one challenge at a time plus whatever
//! signature and verification state has accumulated against it. Rebuilding
//! the challenge discards that state — a signature over the old payload is
//! worthless against the new one, and keeping it around would only invite
//! confusion. Flows are independent; nothing is shared across invocations.

use thiserror::Error;

use crate::artifact::SignedArtifact;
use crate::challenge::{Challenge, ChallengeBuilder, Clock};
use crate::signer::{Signer, SignerError};
use crate::verify::{self, DalekBackend, KeyError, VerificationResult, VerifierBackend};

/// Errors surfaced by workflow steps taken out of order or against
/// malformed inputs. Signing failures pass through as [`SignerError`].
#[derive(Debug, Error)]
pub enum FlowError {
    /// `verify` was called before a signature exists.
    #[error("no signature to verify; sign the challenge first")]
    NotSigned,

    /// The challenge's address is not a usable public key — either the
    /// placeholder sentinel or a malformed base58 string.
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// A single build → sign → verify → export cycle.
pub struct SignInFlow {
    builder: ChallengeBuilder,
    challenge: Challenge,
    message: String,
    signature: Option<Vec<u8>>,
    verification: Option<VerificationResult>,
}

impl SignInFlow {
    /// Start a flow: builds the initial challenge from the given builder
    /// and clock.
    pub fn new(builder: ChallengeBuilder, clock: &dyn Clock) -> Self {
        let challenge = builder.build(clock);
        let message = challenge.render();
        Self {
            builder,
            challenge,
            message,
            signature: None,
            verification: None,
        }
    }

    /// Start a flow for a connected signer — the challenge's address is
    /// the signer's own.
    pub fn for_signer(domain: impl Into<String>, signer: &dyn Signer, clock: &dyn Clock) -> Self {
        Self::new(ChallengeBuilder::new(domain).address(signer.address()), clock)
    }

    /// The current challenge.
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    /// The exact message text being signed.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw signature bytes, once signing has happened.
    pub fn signature(&self) -> Option<&[u8]> {
        self.signature.as_deref()
    }

    /// The most recent verification outcome, if any.
    pub fn verification(&self) -> Option<VerificationResult> {
        self.verification
    }

    /// Discard the current challenge and build a fresh one (new nonce,
    /// new timestamps). Any held signature and verification state is
    /// dropped with it.
    pub fn rebuild(&mut self, clock: &dyn Clock) {
        self.challenge = self.builder.build(clock);
        self.message = self.challenge.render();
        self.signature = None;
        self.verification = None;
        tracing::debug!(domain = %self.challenge.domain(), "challenge rebuilt; signature state discarded");
    }

    /// Ask the external signer for a signature over the rendered message.
    ///
    /// A declined or unavailable signer is an ordinary outcome — the error
    /// is returned for the caller to show the user, and the flow stays
    /// usable (still unsigned). A previous verification result, if any, is
    /// cleared because it no longer describes the stored signature.
    pub async fn sign(&mut self, signer: &dyn Signer) -> Result<(), SignerError> {
        let signature = signer.sign_message(self.message.as_bytes()).await?;
        tracing::debug!(bytes = signature.len(), "message signed");
        self.signature = Some(signature);
        self.verification = None;
        Ok(())
    }

    /// Verify the stored signature with the standard backend.
    pub fn verify(&mut self) -> Result<VerificationResult, FlowError> {
        self.verify_with(&DalekBackend)
    }

    /// Verify the stored signature against the challenge's address using
    /// the given backend.
    ///
    /// The address must be a real base58 public key: a flow built without
    /// a connected wallet carries the placeholder sentinel, which is not
    /// decodable as a key, so verification is refused with a [`KeyError`]
    /// rather than silently reported as `Failed`.
    pub fn verify_with(
        &mut self,
        backend: &dyn VerifierBackend,
    ) -> Result<VerificationResult, FlowError> {
        let signature = self.signature.as_deref().ok_or(FlowError::NotSigned)?;
        let key = verify::VerificationKey::from_base58(self.challenge.address_text())?;
        let result = verify::verify_with(backend, &key, self.message.as_bytes(), signature);
        tracing::debug!(%result, "challenge verification finished");
        self.verification = Some(result);
        Ok(result)
    }

    /// Package the current state as an exportable artifact. Works at any
    /// stage: before signing the signature fields are `null`.
    pub fn export(&self) -> SignedArtifact {
        SignedArtifact::export(
            self.challenge.domain(),
            self.message.clone(),
            self.challenge.address(),
            self.signature.as_deref(),
            self.challenge.issued_at(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::FixedClock;
    use crate::signer::LocalSigner;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap())
    }

    #[tokio::test]
    async fn full_cycle_verifies_and_exports() {
        let signer = LocalSigner::generate();
        let mut flow = SignInFlow::for_signer("example.com", &signer, &clock());

        flow.sign(&signer).await.unwrap();
        assert_eq!(flow.verify().unwrap(), VerificationResult::Verified);

        let artifact = flow.export();
        assert!(artifact.is_signed());
        assert_eq!(artifact.public_key.as_deref(), Some(signer.address().as_str()));
        assert_eq!(artifact.message, flow.message());
    }

    #[tokio::test]
    async fn rebuild_discards_signature_state() {
        let signer = LocalSigner::generate();
        let mut flow = SignInFlow::for_signer("example.com", &signer, &clock());

        flow.sign(&signer).await.unwrap();
        flow.verify().unwrap();
        assert!(flow.signature().is_some());
        assert!(flow.verification().is_some());

        flow.rebuild(&clock());
        assert!(flow.signature().is_none());
        assert!(flow.verification().is_none());
    }

    #[test]
    fn verify_before_sign_is_refused() {
        let mut flow = SignInFlow::new(ChallengeBuilder::new("example.com"), &clock());
        assert!(matches!(flow.verify(), Err(FlowError::NotSigned)));
    }

    #[tokio::test]
    async fn placeholder_address_is_not_verifiable() {
        let signer = LocalSigner::generate();
        // Flow built without a connected wallet: address is the sentinel.
        let mut flow = SignInFlow::new(ChallengeBuilder::new("example.com"), &clock());
        flow.sign(&signer).await.unwrap();
        assert!(matches!(flow.verify(), Err(FlowError::Key(_))));
    }

    #[tokio::test]
    async fn signing_again_clears_stale_verification() {
        let signer = LocalSigner::generate();
        let mut flow = SignInFlow::for_signer("example.com", &signer, &clock());
        flow.sign(&signer).await.unwrap();
        flow.verify().unwrap();

        flow.sign(&signer).await.unwrap();
        assert!(flow.verification().is_none());
    }

    #[test]
    fn unsigned_export_has_null_signature() {
        let flow = SignInFlow::new(ChallengeBuilder::new("example.com"), &clock());
        let artifact = flow.export();
        assert!(!artifact.is_signed());
        assert!(artifact.public_key.is_none());
    }

    #[tokio::test]
    async fn declined_signer_leaves_flow_usable() {
        struct DecliningSigner;

        #[async_trait::async_trait]
        impl Signer for DecliningSigner {
            fn address(&self) -> String {
                LocalSigner::from_seed(&[1u8; 32]).address()
            }
            async fn sign_message(&self, _message: &[u8]) -> Result<Vec<u8>, SignerError> {
                Err(SignerError::Declined)
            }
        }

        let mut flow = SignInFlow::for_signer("example.com", &DecliningSigner, &clock());
        assert_eq!(flow.sign(&DecliningSigner).await, Err(SignerError::Declined));
        assert!(flow.signature().is_none());

        // The flow is still good: a cooperative signer can take over.
        let real = LocalSigner::from_seed(&[1u8; 32]);
        flow.sign(&real).await.unwrap();
        assert_eq!(flow.verify().unwrap(), VerificationResult::Verified);
    }
}
