// src/crypto.rs
//! Secure randomness used by the password sampler.
//!
//! Every draw site takes an injected `RngCore + CryptoRng`. Production code
//! passes [`OsRng`] or a per-thread [`rand::rngs::ThreadRng`]; tests may pass a
//! seeded ChaCha generator, which is also a CSPRNG.
use rand::{CryptoRng, Rng, RngCore, seq::SliceRandom};

pub use rand::rngs::OsRng;

/// Marker for randomness sources the sampler accepts.
pub trait SecureRng: RngCore + CryptoRng {}

impl<R: RngCore + CryptoRng + ?Sized> SecureRng for R {}

/// Pick one character uniformly from `alphabet`.
///
/// `gen_range` samples by rejection, so there is no modulo bias.
/// The caller guarantees `alphabet` is non-empty.
pub fn pick<R: SecureRng>(rng: &mut R, alphabet: &[char]) -> char {
    alphabet[rng.gen_range(0..alphabet.len())]
}

/// Fisher–Yates shuffle driven by the secure generator.
pub fn secure_shuffle<R: SecureRng>(rng: &mut R, chars: &mut [char]) {
    chars.shuffle(rng);
}
