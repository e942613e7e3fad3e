//! Hash chain derivation for MAC keys
//!
//! Starting from the system seed, the hash function is applied repeatedly and
//! every intermediate digest becomes a MAC key:
//!
//! ```text
//! chain[0] = H(seed)
//! chain[i] = H(chain[i - 1])
//! ```
//!
//! Every legitimate station holds the same seed, so every station derives the
//! same chain and can verify any other station's tags given only the index.
//!
//! # Security Properties
//!
//! - Determinism: same (seed, length, algorithm) always yields the same chain
//! - Keys are zeroized when the chain is dropped
//! - `Debug` never prints key material

use std::fmt;

use zeroize::Zeroize;

use crate::{CryptoError, HashAlgorithm};

/// An immutable sequence of MAC keys derived from one seed.
pub struct HashChain {
    keys: Vec<Vec<u8>>,
    algorithm: HashAlgorithm,
}

impl HashChain {
    /// Number of keys in the chain. Never zero.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; a chain holds at least one key.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at `index`, or `None` past the end of the chain.
    pub fn key(&self, index: usize) -> Option<&[u8]> {
        self.keys.get(index).map(Vec::as_slice)
    }

    /// Keys in chain order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.keys.iter().map(Vec::as_slice)
    }

    /// Hash function the chain was derived with.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for HashChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashChain")
            .field("length", &self.keys.len())
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl Drop for HashChain {
    fn drop(&mut self) {
        for key in &mut self.keys {
            key.zeroize();
        }
    }
}

/// Builds [`HashChain`]s with a fixed hash function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashChainGenerator {
    algorithm: HashAlgorithm,
}

impl HashChainGenerator {
    /// Generator hashing with `algorithm`.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Derive a chain of `length` keys from `seed`.
    ///
    /// # Errors
    ///
    /// - `InvalidChainLength`: `length` is zero, or its largest index does
    ///   not fit the 4-byte signed index field carried on the wire
    pub fn build(&self, seed: &[u8], length: usize) -> Result<HashChain, CryptoError> {
        if length == 0 || length - 1 > i32::MAX as usize {
            return Err(CryptoError::InvalidChainLength { length });
        }

        let mut keys: Vec<Vec<u8>> = Vec::with_capacity(length);
        let mut current = self.algorithm.digest(&[seed]);
        for _ in 1..length {
            let next = self.algorithm.digest(&[&current]);
            keys.push(current);
            current = next;
        }
        keys.push(current);

        Ok(HashChain { keys, algorithm: self.algorithm })
    }
}
