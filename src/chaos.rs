// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Key-seeded chaotic traversal.
//!
//! Collapses a textual key into a 32-bit seed (SHA-256, XOR-folded) and
//! drives a logistic-map sequence from it. The sequence is the sole source of
//! pixel positions for embedding and extraction: both sides construct it from
//! the same key and must observe the identical stream. Two sequences built
//! from the same key produce identical streams, and a sequence after
//! [`reset`](LogisticSequence::reset) replays the stream of a freshly
//! constructed one. Extraction depends on both properties.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// Logistic-map parameter. Fixed in the chaotic regime near 4.
const R: f64 = 3.99;

/// Collapse a key into a 32-bit seed.
///
/// SHA-256 of the UTF-8 key bytes, read as eight little-endian u32 words and
/// XOR-folded into one. The result is signed; consumers take the absolute
/// value.
///
/// # Errors
/// [`StegoError::EmptyKey`] if the key is empty or whitespace-only.
pub fn key_seed(key: &str) -> Result<i32, StegoError> {
    if key.trim().is_empty() {
        return Err(StegoError::EmptyKey);
    }
    let digest: Zeroizing<[u8; 32]> = Zeroizing::new(Sha256::digest(key.as_bytes()).into());
    let mut folded = 0u32;
    for word in digest.chunks_exact(4) {
        folded ^= u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
    }
    Ok(folded as i32)
}

/// The logistic-map pseudo-random stream `x(n+1) = r * x(n) * (1 - x(n))`.
#[derive(Debug, Clone)]
pub struct LogisticSequence {
    x: f64,
    x0: f64,
}

impl LogisticSequence {
    /// Build the sequence for a key (digest the key, then seed the map).
    pub fn from_key(key: &str) -> Result<Self, StegoError> {
        Ok(Self::from_seed(key_seed(key)?))
    }

    /// Build the sequence from a raw seed.
    ///
    /// `x0 = ((|seed| mod 9999) + 1) / 10000`, so `x0` lies in
    /// `[0.0001, 0.9999]` and never hits the fixed points 0 or 1.
    pub fn from_seed(seed: i32) -> Self {
        let x0 = ((seed.unsigned_abs() % 9999) + 1) as f64 / 10000.0;
        Self { x: x0, x0 }
    }

    /// Advance one step and return the new state.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.x = R * self.x * (1.0 - self.x);
        self.x
    }

    /// Advance one step and project the state into `[0, n)`.
    ///
    /// May return the same index more than once across calls. The embedding
    /// algorithm tolerates re-selection: the order of selections is what
    /// matters, not uniqueness.
    pub fn next_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "next_index over an empty range");
        (self.next() * n as f64) as usize % n
    }

    /// Restore the initial state `x0`.
    pub fn reset(&mut self) {
        self.x = self.x0;
    }
}
