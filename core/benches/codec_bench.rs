// Codec and verification benchmarks for keyproof.
//
// Covers base58 encode/decode at key and signature sizes, challenge
// rendering, and Ed25519 verification of a signed challenge.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ed25519_dalek::{Signer as _, SigningKey};

use keyproof::challenge::{ChallengeBuilder, SystemClock};
use keyproof::codec;
use keyproof::verify::{verify, VerificationKey};

fn bench_base58_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("base58/encode");
    for size in [32usize, 64, 128] {
        let input: Vec<u8> = (0..size).map(|i| (i * 31 % 256) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| codec::encode(input));
        });
    }
    group.finish();
}

fn bench_base58_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("base58/decode");
    for size in [32usize, 64, 128] {
        let input: Vec<u8> = (0..size).map(|i| (i * 31 % 256) as u8).collect();
        let encoded = codec::encode(&input);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| codec::decode(encoded).unwrap());
        });
    }
    group.finish();
}

fn bench_challenge_render(c: &mut Criterion) {
    let challenge = ChallengeBuilder::new("example.com")
        .address("4iGDwygceA9cfAfy9wZnCm42mxTs8mZ9W3CqknU3WVvB")
        .build(&SystemClock);

    c.bench_function("challenge/render", |b| {
        b.iter(|| challenge.render());
    });
}

fn bench_verify_challenge(c: &mut Criterion) {
    let signing_key = SigningKey::from_bytes(&[0x5Au8; 32]);
    let key = VerificationKey::from_raw(&signing_key.verifying_key().to_bytes()).unwrap();
    let message = ChallengeBuilder::new("example.com")
        .address(codec::encode(&signing_key.verifying_key().to_bytes()))
        .build(&SystemClock)
        .render();
    let signature = signing_key.sign(message.as_bytes()).to_bytes();

    c.bench_function("ed25519/verify_challenge", |b| {
        b.iter(|| verify(&key, message.as_bytes(), &signature));
    });
}

criterion_group!(
    benches,
    bench_base58_encode,
    bench_base58_decode,
    bench_challenge_render,
    bench_verify_challenge
);
criterion_main!(benches);
