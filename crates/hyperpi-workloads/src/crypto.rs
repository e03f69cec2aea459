//! Cryptography workloads.

use std::hint::black_box;

use hmac::{Hmac, Mac};
use hyperpi_core::{Category, Workload, WorkloadError, WorkloadInput};
use rand::{RngCore, SeedableRng};
use rand_chacha::{ChaCha20Rng, ChaCha8Rng};
use sha2::{Digest, Sha224, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

const BLOCK_BYTES: usize = 1024;
const HASH_AND_STREAM_OPS: usize = 50_000;
const HMAC_AND_KEYED_OPS: usize = 500;
const HASH_MIX_OPS: usize = 200_000;

/// SHA-256, SHA-512, BLAKE3 and a ChaCha20 keystream over 1 KiB blocks.
pub fn hash_and_stream() -> Workload {
    Workload::new(
        "hash-and-stream",
        Category::Cryptography,
        HASH_AND_STREAM_OPS,
        hash_and_stream_body,
    )
    .with_description("sha256, sha512, blake3 and chacha20 xor over 1 KiB")
    .with_score_scale(0.1)
}

/// HMAC-SHA512, keyed BLAKE3 and a ChaCha20 encrypt/decrypt round trip.
pub fn hmac_and_keyed() -> Workload {
    Workload::new(
        "hmac-and-keyed",
        Category::Cryptography,
        HMAC_AND_KEYED_OPS,
        hmac_and_keyed_body,
    )
    .with_description("sha512 + hmac-sha512, keyed blake3 + chacha20 round trip")
    .with_score_scale(0.1)
}

/// SHA-256, SHA-224, SHA-512 and BLAKE3 over random 1 KiB input.
pub fn hash_mix() -> Workload {
    Workload::new("hash-mix", Category::Cryptography, HASH_MIX_OPS, hash_mix_body)
        .with_description("sha256, sha224, sha512 and blake3 over random 1 KiB")
        .with_score_scale(1e-3)
}

// Folds the first 8 bytes of a digest into a word.
fn digest_word(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

fn patterned_block() -> Vec<u8> {
    (0..BLOCK_BYTES).map(|i| i as u8).collect()
}

fn xor_keystream(stream: &mut ChaCha20Rng, data: &[u8], out: &mut [u8]) {
    stream.fill_bytes(out);
    for (o, d) in out.iter_mut().zip(data) {
        *o ^= d;
    }
}

fn hash_and_stream_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let data = patterned_block();
    let quarter = input.size / 4;
    let mut acc = 0u64;

    for _ in 0..quarter {
        acc ^= digest_word(&Sha256::digest(black_box(&data)));
    }
    for _ in 0..quarter {
        acc ^= digest_word(&Sha512::digest(black_box(&data)));
    }
    for _ in 0..quarter {
        acc ^= digest_word(blake3::hash(black_box(&data)).as_bytes());
    }

    let mut stream = ChaCha20Rng::seed_from_u64(input.seed);
    let mut encrypted = vec![0u8; data.len()];
    for _ in 0..quarter {
        xor_keystream(&mut stream, black_box(&data), &mut encrypted);
    }
    acc ^= digest_word(&encrypted);

    Ok(acc)
}

fn hmac_and_keyed_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let mut rng = ChaCha8Rng::seed_from_u64(input.seed);
    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);
    let data = patterned_block();
    let half = input.size / 2;
    let mut acc = 0u64;

    for _ in 0..half {
        acc ^= digest_word(&Sha512::digest(black_box(&data)));
        let mut mac = HmacSha512::new_from_slice(&key)
            .map_err(|e| WorkloadError::Crypto(e.to_string()))?;
        mac.update(&data);
        acc ^= digest_word(&mac.finalize().into_bytes());
    }

    let mut encrypted = vec![0u8; data.len()];
    let mut decrypted = vec![0u8; data.len()];
    for i in 0..half {
        acc ^= digest_word(blake3::keyed_hash(&key, black_box(&data)).as_bytes());

        let nonce = input.seed.wrapping_add(i as u64);
        xor_keystream(&mut ChaCha20Rng::seed_from_u64(nonce), &data, &mut encrypted);
        xor_keystream(&mut ChaCha20Rng::seed_from_u64(nonce), &encrypted, &mut decrypted);
        if decrypted != data {
            return Err(WorkloadError::Crypto(
                "chacha20 round trip mismatch".to_string(),
            ));
        }
        acc ^= digest_word(&encrypted);
    }

    Ok(acc)
}

fn hash_mix_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let mut rng = ChaCha8Rng::seed_from_u64(input.seed);
    let mut data = vec![0u8; BLOCK_BYTES];
    rng.fill_bytes(&mut data);
    let quarter = input.size / 4;
    let mut acc = 0u64;

    for _ in 0..quarter {
        acc ^= digest_word(&Sha256::digest(black_box(&data)));
    }
    for _ in 0..quarter {
        acc ^= digest_word(&Sha224::digest(black_box(&data)));
    }
    for _ in 0..quarter {
        acc ^= digest_word(&Sha512::digest(black_box(&data)));
    }
    for _ in 0..quarter {
        acc ^= digest_word(blake3::hash(black_box(&data)).as_bytes());
    }

    Ok(acc)
}
