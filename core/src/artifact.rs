//! # Signed Artifact Export
//!
//! Packages a challenge, the signer's address, and the signature into a
//! single JSON record suitable for download or display. The key set and
//! null-handling of that JSON are an external contract:
//!
//! ```json
//! { "domain": "...", "message": "...", "publicKey": "..." | null,
//!   "signature_base58": "..." | null, "signature_hex": "..." | null,
//!   "issuedAt": "2026-03-14T15:09:26.000Z" }
//! ```
//!
//! All six keys are always present — absent values serialize as explicit
//! `null`, never as a missing key. An artifact is immutable once built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec;

/// The exportable record of a (possibly signed) challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedArtifact {
    /// Domain the challenge was issued for.
    pub domain: String,

    /// The exact challenge text that was (or would be) signed.
    pub message: String,

    /// Base58 public key of the signer, or `null` when no wallet was
    /// connected.
    #[serde(rename = "publicKey")]
    pub public_key: Option<String>,

    /// Base58 encoding of the 64-byte signature, or `null` when unsigned.
    pub signature_base58: Option<String>,

    /// Lowercase hex encoding of the same signature, or `null` when
    /// unsigned. Both encodings are carried so consumers never have to
    /// transcode.
    pub signature_hex: Option<String>,

    /// When the underlying challenge was issued, ISO-8601 with
    /// millisecond precision.
    #[serde(rename = "issuedAt", with = "iso8601_millis")]
    pub issued_at: DateTime<Utc>,
}

impl SignedArtifact {
    /// Build an artifact from the workflow's pieces.
    ///
    /// When `signature` is present its base58 and hex encodings are
    /// computed here; otherwise both signature fields are `null`.
    pub fn export(
        domain: impl Into<String>,
        message: impl Into<String>,
        public_key: Option<&str>,
        signature: Option<&[u8]>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            domain: domain.into(),
            message: message.into(),
            public_key: public_key.map(str::to_owned),
            signature_base58: signature.map(codec::encode),
            signature_hex: signature.map(codec::encode_hex),
            issued_at,
        }
    }

    /// Serialize to pretty-printed JSON — the file-download form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether this artifact actually carries a signature.
    pub fn is_signed(&self) -> bool {
        self.signature_base58.is_some()
    }
}

/// Serde codec pinning `issuedAt` to the exact `.SSSZ` rendering used
/// everywhere else in the challenge format.
mod iso8601_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::challenge::render_timestamp;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&render_timestamp(*ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn signed_artifact_carries_both_encodings() {
        let sig = [0xA5u8; 64];
        let artifact = SignedArtifact::export(
            "example.com",
            "message text",
            Some("SomeBase58Key"),
            Some(&sig),
            ts(),
        );
        assert!(artifact.is_signed());
        assert_eq!(artifact.signature_hex.as_deref(), Some(codec::encode_hex(&sig).as_str()));
        assert_eq!(artifact.signature_base58.as_deref(), Some(codec::encode(&sig).as_str()));
    }

    #[test]
    fn unsigned_artifact_has_null_signature_fields() {
        let artifact = SignedArtifact::export("example.com", "msg", None, None, ts());
        assert!(!artifact.is_signed());

        let json: serde_json::Value = serde_json::from_str(&artifact.to_json().unwrap()).unwrap();
        assert!(json["publicKey"].is_null());
        assert!(json["signature_base58"].is_null());
        assert!(json["signature_hex"].is_null());
    }

    #[test]
    fn json_has_exactly_the_contract_keys() {
        let artifact = SignedArtifact::export("example.com", "msg", None, None, ts());
        let json: serde_json::Value = serde_json::from_str(&artifact.to_json().unwrap()).unwrap();
        let obj = json.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "domain",
                "issuedAt",
                "message",
                "publicKey",
                "signature_base58",
                "signature_hex"
            ]
        );
    }

    #[test]
    fn issued_at_renders_iso8601_with_millis() {
        let artifact = SignedArtifact::export("example.com", "msg", None, None, ts());
        let json: serde_json::Value = serde_json::from_str(&artifact.to_json().unwrap()).unwrap();
        assert_eq!(json["issuedAt"], "2026-03-14T15:09:26.000Z");
    }

    #[test]
    fn serde_roundtrip() {
        let artifact = SignedArtifact::export(
            "example.com",
            "msg",
            Some("Key111"),
            Some(&[7u8; 64]),
            ts(),
        );
        let json = artifact.to_json().unwrap();
        let recovered: SignedArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, artifact);
    }
}
