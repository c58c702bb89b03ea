//! # Sign-In Challenge Construction
//!
//! Builds the canonical human-readable challenge a user signs to prove key
//! ownership. The rendered text **is** the signed payload: field order,
//! spelling, and newline placement are all load-bearing. Reorder one line
//! or add a trailing newline and every existing signature stops verifying.
//!
//! Anti-replay comes from two fields: a fresh random nonce per challenge
//! and a five-minute expiration window anchored to the issue time. Time is
//! injected through the [`Clock`] trait so tests can freeze it and the
//! template check becomes byte-exact.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::config::{
    ADDRESS_PLACEHOLDER, CHALLENGE_STATEMENT, CHALLENGE_TITLE, CHALLENGE_VALIDITY_SECS,
    CHALLENGE_VERSION, DEFAULT_NONCE_LENGTH,
};
use crate::nonce::{self, Nonce};

/// An injectable time source.
///
/// Production code uses [`SystemClock`]; tests use [`FixedClock`] to pin
/// `Issued At` and `Expiration Time` to known values.
pub trait Clock: Send + Sync {
    /// The current moment, UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant. Test-and-reproduction tool.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A fully constructed sign-in challenge.
///
/// Immutable once built. [`render`](Challenge::render) produces the exact
/// text to hand to the signer; everything else is structured access for
/// verifiers and exporters.
#[derive(Debug, Clone)]
pub struct Challenge {
    domain: String,
    address: Option<String>,
    nonce: Nonce,
    issued_at: DateTime<Utc>,
    expiration: DateTime<Utc>,
}

impl Challenge {
    /// The domain the challenge was issued for.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The base58 wallet address, if one was connected at build time.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The text that appears in the `Address:` field — the real address,
    /// or the literal placeholder sentinel when no wallet was connected.
    ///
    /// A signature over the placeholder is well-formed but unverifiable
    /// against any real key; verifiers must treat it so.
    pub fn address_text(&self) -> &str {
        self.address.as_deref().unwrap_or(ADDRESS_PLACEHOLDER)
    }

    /// Whether the challenge carries the placeholder instead of an address.
    pub fn has_placeholder_address(&self) -> bool {
        self.address.is_none()
    }

    /// The anti-replay nonce embedded in this challenge.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// When the challenge was issued.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// When the challenge stops being acceptable (issued_at + 5 minutes).
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Render the canonical challenge text — the exact signed payload.
    ///
    /// Fixed field order, single `\n` separators, no trailing newline.
    pub fn render(&self) -> String {
        [
            CHALLENGE_TITLE.to_string(),
            format!("Domain: {}", self.domain),
            format!("Address: {}", self.address_text()),
            format!("Statement: {}", CHALLENGE_STATEMENT),
            format!("URI: https://{}", self.domain),
            format!("Version: {}", CHALLENGE_VERSION),
            format!("Nonce: {}", self.nonce),
            format!("Issued At: {}", render_timestamp(self.issued_at)),
            format!("Expiration Time: {}", render_timestamp(self.expiration)),
        ]
        .join("\n")
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix — the one true
/// timestamp spelling used in both the challenge text and the exported
/// artifact.
pub fn render_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builder for [`Challenge`] values.
///
/// # Examples
///
/// ```
/// use keyproof::challenge::{ChallengeBuilder, SystemClock};
///
/// let challenge = ChallengeBuilder::new("example.com")
///     .address("4iGDwygceA9cfAfy9wZnCm42mxTs8mZ9W3CqknU3WVvB")
///     .build(&SystemClock);
/// assert!(challenge.render().starts_with("Sign-In Challenge\nDomain: example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct ChallengeBuilder {
    domain: String,
    address: Option<String>,
    nonce_length: usize,
}

impl ChallengeBuilder {
    /// Start a builder for the given domain (hostname, no scheme).
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            address: None,
            nonce_length: DEFAULT_NONCE_LENGTH,
        }
    }

    /// Attach the connected wallet's base58 address. Without this, the
    /// rendered challenge carries the placeholder sentinel.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Override the nonce length. The default of 24 is right for almost
    /// everyone; this exists for test vectors and paranoid deployments.
    pub fn nonce_length(mut self, length: usize) -> Self {
        self.nonce_length = length;
        self
    }

    /// Build the challenge: generate a fresh nonce, capture `now()` from
    /// the given clock, and derive the expiration.
    ///
    /// Each call produces an independent challenge with its own nonce.
    /// Callers holding a signature over a previous challenge must discard
    /// it — the new rendered text will not match the old signed payload.
    pub fn build(&self, clock: &dyn Clock) -> Challenge {
        let issued_at = clock.now();
        let expiration = issued_at + Duration::seconds(CHALLENGE_VALIDITY_SECS);
        let nonce = nonce::generate(self.nonce_length);
        if !nonce.is_cryptographic() {
            tracing::warn!(domain = %self.domain, "challenge built with a degraded-entropy nonce");
        }
        Challenge {
            domain: self.domain.clone(),
            address: self.address.clone(),
            nonce,
            issued_at,
            expiration,
        }
    }
}
