//! Pseudo-identity generation
//!
//! A pseudo-identity (pseudonym) is a 20-byte identifier that stands in for a
//! station's real identity on the wire. Two generators exist, one per scheme:
//!
//! - [`RandomPseudonymGenerator`]: `tail20(H(r))` for a caller-supplied random
//!   value `r`. Stations pre-generate a small pool and pick one per message.
//! - [`TimedPseudonymGenerator`]: a fresh pseudonym per timestamp,
//!   `tail20(H(api || sk || id || kmbr) ⊕ H(api || t))`. The static half is
//!   computed once; only the dynamic half depends on the timestamp.

use std::fmt;

use zeroize::Zeroize;

use crate::{HashAlgorithm, truncate_tail, xor_bytes};

/// Length of a pseudo-identity on the wire.
pub const PSEUDONYM_LEN: usize = 20;

/// A 20-byte pseudonym. Compared and hashed by content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PseudoIdentity([u8; PSEUDONYM_LEN]);

impl PseudoIdentity {
    /// Wrap raw pseudonym bytes.
    pub fn from_bytes(bytes: [u8; PSEUDONYM_LEN]) -> Self {
        Self(bytes)
    }

    /// Take the last 20 bytes of a digest.
    ///
    /// Returns `None` if the digest is shorter than a pseudonym.
    pub fn from_digest_tail(digest: &[u8]) -> Option<Self> {
        let tail: [u8; PSEUDONYM_LEN] = truncate_tail(digest, PSEUDONYM_LEN).try_into().ok()?;
        Some(Self(tail))
    }

    /// Raw pseudonym bytes.
    pub fn as_bytes(&self) -> &[u8; PSEUDONYM_LEN] {
        &self.0
    }
}

impl fmt::Debug for PseudoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PseudoIdentity({self})")
    }
}

impl fmt::Display for PseudoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Pseudonyms salted with a caller-provided random value.
///
/// Successive pseudonyms are independent; nothing links one to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPseudonymGenerator {
    algorithm: HashAlgorithm,
}

impl RandomPseudonymGenerator {
    /// Generator hashing with `algorithm`.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Pseudonym for the random value `salt` (big-endian encoded).
    ///
    /// Caller MUST provide a cryptographically random `salt` in production.
    pub fn create(&self, salt: u64) -> PseudoIdentity {
        let digest = self.algorithm.digest(&[&salt.to_be_bytes()]);
        let Some(pseudonym) = PseudoIdentity::from_digest_tail(&digest) else {
            unreachable!("supported digests are longer than a pseudonym");
        };
        pseudonym
    }
}

/// Timestamp-bound pseudonyms from static per-device secrets.
///
/// ```text
/// static  = H(api_key || device_secret || device_id || membership_key)
/// dynamic = H(api_key || i32_be(timestamp))
/// pid     = tail20(static ⊕ dynamic)
/// ```
///
/// Deterministic: the same timestamp always yields the same pseudonym on the
/// same device.
pub struct TimedPseudonymGenerator {
    algorithm: HashAlgorithm,
    api_key: Vec<u8>,
    static_part: Vec<u8>,
}

impl TimedPseudonymGenerator {
    /// Precompute the static half from the device secrets.
    pub fn new(
        algorithm: HashAlgorithm,
        api_key: &[u8],
        device_secret: &[u8],
        device_id: &[u8],
        membership_key: &[u8],
    ) -> Self {
        let static_part = algorithm.digest(&[api_key, device_secret, device_id, membership_key]);
        Self { algorithm, api_key: api_key.to_vec(), static_part }
    }

    /// Pseudonym bound to `timestamp`.
    pub fn create(&self, timestamp: i32) -> PseudoIdentity {
        let dynamic_part = self.algorithm.digest(&[&self.api_key, &timestamp.to_be_bytes()]);

        let Ok(mut mixed) = xor_bytes(&self.static_part, &dynamic_part) else {
            unreachable!("both halves come from the same hash function");
        };
        let Some(pseudonym) = PseudoIdentity::from_digest_tail(&mixed) else {
            unreachable!("supported digests are longer than a pseudonym");
        };
        mixed.zeroize();

        pseudonym
    }

    /// Hash function used for both halves.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for TimedPseudonymGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedPseudonymGenerator")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl Drop for TimedPseudonymGenerator {
    fn drop(&mut self) {
        self.api_key.zeroize();
        self.static_part.zeroize();
    }
}
