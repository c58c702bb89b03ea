// Copyright (c) 2026 Keyproof Contributors. MIT License.
// See LICENSE for details.

//! # Keyproof CLI
//!
//! Entry point for the `keyproof` binary. Parses CLI arguments,
//! initializes logging, and dispatches to the library workflow.
//!
//! The binary supports five subcommands:
//!
//! - `challenge` — build and print a fresh sign-in challenge
//! - `sign`      — build, sign locally, verify, and export the artifact
//! - `verify`    — check a signature against a message and public key
//! - `selftest`  — run the built-in acceptance checks
//! - `version`   — print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;

use keyproof::challenge::SystemClock;
use keyproof::verify::{verify, VerificationKey};
use keyproof::{ChallengeBuilder, LocalSigner, SignInFlow, Signer, VerificationResult};

use cli::{Commands, KeyproofCli};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = KeyproofCli::parse();
    logging::init_logging(
        "keyproof=info,keyproof_cli=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Challenge(args) => print_challenge(args),
        Commands::Sign(args) => sign_and_export(args).await,
        Commands::Verify(args) => verify_signature(args),
        Commands::Selftest => run_selftest(),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Builds a challenge and prints the exact signable text to stdout.
fn print_challenge(args: cli::ChallengeArgs) -> Result<()> {
    let mut builder = ChallengeBuilder::new(&args.domain);
    if let Some(address) = &args.address {
        builder = builder.address(address);
    }
    let challenge = builder.build(&SystemClock);
    if challenge.has_placeholder_address() {
        tracing::info!("no address supplied; challenge carries the placeholder sentinel");
    }
    println!("{}", challenge.render());
    Ok(())
}

/// The full happy path: build, sign with a local key, verify, export.
async fn sign_and_export(args: cli::SignArgs) -> Result<()> {
    let signer = LocalSigner::from_hex(&args.key)
        .context("signing key must be a hex-encoded 32-byte seed")?;
    tracing::info!(address = %signer.address(), domain = %args.domain, "signing challenge");

    let mut flow = SignInFlow::for_signer(&args.domain, &signer, &SystemClock);
    flow.sign(&signer)
        .await
        .context("local signing failed")?;

    let result = flow.verify().context("verification setup failed")?;
    if !result.is_verified() {
        bail!("freshly signed challenge did not verify ({result}); refusing to export");
    }

    let json = flow.export().to_json().context("artifact serialization failed")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write artifact to {}", path.display()))?;
            tracing::info!(path = %path.display(), "artifact written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Verifies a signature from any wallet against a message file and a
/// base58 public key. Exit codes: 0 verified, 1 failed, 2 unsupported.
fn verify_signature(args: cli::VerifyArgs) -> Result<()> {
    let message = std::fs::read(&args.message_file)
        .with_context(|| format!("failed to read {}", args.message_file.display()))?;
    let key = VerificationKey::from_base58(&args.pubkey)
        .context("public key must be a base58-encoded 32-byte Ed25519 key")?;
    let signature = parse_signature(&args.signature)?;

    match verify(&key, &message, &signature) {
        VerificationResult::Verified => {
            println!("Verified");
            Ok(())
        }
        VerificationResult::Failed => {
            println!("Failed: signature does not match this message and key");
            std::process::exit(1);
        }
        VerificationResult::Unsupported => {
            // A capability report, not a security verdict — distinct text,
            // distinct exit code.
            println!("Unsupported: no verification primitive in this runtime");
            std::process::exit(2);
        }
    }
}

/// Accepts a signature in base58 or lowercase hex, in that order —
/// wallets hand out base58, exported artifacts carry both.
fn parse_signature(input: &str) -> Result<Vec<u8>> {
    if let Ok(Some(bytes)) = keyproof::codec::decode_fixed::<64>(input) {
        return Ok(bytes.to_vec());
    }
    if let Ok(bytes) = hex::decode(input) {
        if bytes.len() == 64 {
            return Ok(bytes);
        }
    }
    bail!("signature must be 64 bytes, base58- or hex-encoded");
}

/// Runs the acceptance checks and prints one line per check.
fn run_selftest() -> Result<()> {
    let results = keyproof::selftest::run_selftests();
    let mut failures = 0usize;
    for check in &results {
        let status = if check.passed { "PASS" } else { "FAIL" };
        println!("[{status}] {:<32} {}", check.label, check.detail);
        if !check.passed {
            failures += 1;
        }
    }
    println!("{} checks, {} failed", results.len(), failures);
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Prints version and build information.
fn print_version() {
    println!("keyproof {}", env!("CARGO_PKG_VERSION"));
    println!("challenge format version 1, Ed25519 signatures, base58 (Bitcoin alphabet)");
}
