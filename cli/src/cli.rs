//! # CLI Interface
//!
//! Command-line argument structure for the `keyproof` binary using `clap`
//! derive. Five subcommands: `challenge`, `sign`, `verify`, `selftest`,
//! and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Off-chain key-ownership proofs.
///
/// Builds human-readable sign-in challenges, signs them with a local
/// Ed25519 key, verifies signatures from any wallet, and exports the
/// result as a portable JSON artifact.
#[derive(Parser, Debug)]
#[command(
    name = "keyproof",
    about = "Off-chain Ed25519 key-ownership proofs",
    version,
    propagate_version = true
)]
pub struct KeyproofCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "KEYPROOF_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the keyproof binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and print a fresh sign-in challenge.
    Challenge(ChallengeArgs),
    /// Build a challenge, sign it with a local key, verify the signature,
    /// and print (or write) the JSON artifact.
    Sign(SignArgs),
    /// Verify a signature over a challenge message against a public key.
    Verify(VerifyArgs),
    /// Run the built-in acceptance checks and report pass/fail per check.
    Selftest,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `challenge` subcommand.
#[derive(Parser, Debug)]
pub struct ChallengeArgs {
    /// Domain (hostname) the challenge is issued for.
    #[arg(long, short = 'd')]
    pub domain: String,

    /// Base58 wallet address to embed. When omitted, the challenge
    /// carries the not-connected placeholder and cannot be verified
    /// against a real key.
    #[arg(long, short = 'a')]
    pub address: Option<String>,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Domain (hostname) the challenge is issued for.
    #[arg(long, short = 'd')]
    pub domain: String,

    /// Hex-encoded 32-byte Ed25519 seed for the local signer.
    ///
    /// **Never pass production keys on the command line** — shell history
    /// is forever. Use the environment variable or a throwaway key.
    #[arg(long, short = 'k', env = "KEYPROOF_SIGNING_KEY")]
    pub key: String,

    /// Write the JSON artifact to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for the `verify` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path to a file holding the exact challenge message bytes.
    #[arg(long, short = 'm')]
    pub message_file: PathBuf,

    /// Base58 public key of the claimed signer.
    #[arg(long, short = 'p')]
    pub pubkey: String,

    /// The signature, base58 or lowercase hex (tried in that order).
    #[arg(long, short = 's')]
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        KeyproofCli::command().debug_assert();
    }

    #[test]
    fn parses_challenge_command() {
        let cli = KeyproofCli::parse_from(["keyproof", "challenge", "--domain", "example.com"]);
        match cli.command {
            Commands::Challenge(args) => {
                assert_eq!(args.domain, "example.com");
                assert!(args.address.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_verify_command_with_short_flags() {
        let cli = KeyproofCli::parse_from([
            "keyproof", "verify", "-m", "msg.txt", "-p", "SomeKey", "-s", "SomeSig",
        ]);
        assert!(matches!(cli.command, Commands::Verify(_)));
    }
}
