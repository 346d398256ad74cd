//! Membership Filter Module
//!
//! Fixed-size Bloom filter deciding whether a key has likely been seen before.
//!
//! Indices are derived from SHA-256 so they are identical across runs and
//! across implementations: index `i` of a key is
//! `sha256(key ++ decimal(i))`, read as a big-endian integer, modulo `size`.

use bitvec::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::{CacheError, Result};

// == Membership Filter ==
/// Probabilistic set membership over an append-only set of keys.
///
/// No false negatives: once a key is inserted, `might_contain` returns true
/// for it forever. Bits are only ever set, never cleared.
#[derive(Debug, Clone)]
pub struct MembershipFilter {
    /// Packed bit slots, all zero at creation
    bits: BitVec<u8, Lsb0>,
    /// Number of hash derivations per key
    hash_count: usize,
}

impl MembershipFilter {
    // == Constructor ==
    /// Creates an empty filter.
    ///
    /// # Arguments
    /// * `size` - Number of bit slots
    /// * `hash_count` - Number of hash derivations per key
    ///
    /// Both must be positive.
    pub fn new(size: usize, hash_count: usize) -> Result<Self> {
        if size == 0 {
            return Err(CacheError::InvalidConfig(
                "bloom size must be positive".to_string(),
            ));
        }
        if hash_count == 0 {
            return Err(CacheError::InvalidConfig(
                "hash count must be positive".to_string(),
            ));
        }

        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; size],
            hash_count,
        })
    }

    // == Derive Indices ==
    /// Returns the `hash_count` bit indices for a key, each in `[0, size)`.
    ///
    /// Indices may repeat within one key.
    pub fn derive_indices(&self, key: &str) -> Vec<usize> {
        let size = self.size();
        (0..self.hash_count)
            .map(|i| {
                let mut hasher = Sha256::new();
                hasher.update(key.as_bytes());
                hasher.update(i.to_string().as_bytes());
                reduce_digest(&hasher.finalize(), size)
            })
            .collect()
    }

    // == Insert ==
    /// Records a key. Idempotent.
    pub fn insert(&mut self, key: &str) {
        for index in self.derive_indices(key) {
            self.bits.set(index, true);
        }
    }

    // == Might Contain ==
    /// Returns false if the key was definitely never inserted, true if it
    /// possibly was.
    pub fn might_contain(&self, key: &str) -> bool {
        self.derive_indices(key)
            .into_iter()
            .all(|index| self.bits[index])
    }

    /// Number of bit slots.
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Number of hash derivations per key.
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits currently set.
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.size() as f64
    }

    // == Estimated False Positive Rate ==
    /// Probability that a never-inserted key reads all ones, given the
    /// current fill: `fill_ratio ^ hash_count`.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(self.hash_count as i32)
    }
}

/// Reduces a big-endian digest modulo `modulus` without a bignum type.
///
/// The accumulator stays below `modulus`, so `acc * 256 + byte` fits in a u128.
fn reduce_digest(digest: &[u8], modulus: usize) -> usize {
    let modulus = modulus as u128;
    digest
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + byte as u128) % modulus) as usize
}
