//! Device for the pseudonym-MAC scheme.
//!
//! ```text
//! t    = current epoch second (i32, big-endian)
//! pid  = timed pseudonym for t
//! mac  = tail20(H(pid || regional_key || m || t))
//! out  = t || mac || pid || m
//! ```
//!
//! The verifier takes `pid` as received. It cannot re-derive the sender's
//! pseudonym (that needs the sender's device secrets); the regional key is
//! what binds the tag to the group.

use roadseal_crypto::{HashAlgorithm, TimedPseudonymGenerator, tags_match, truncate_tail};
use roadseal_proto::{PSEUDONYM_MAC_LEN, PseudonymMacHeader, WireError, WireHeader};
use zeroize::Zeroize;

use super::{Rejection, TamperProofDevice, check_freshness, settle};
use crate::{SetupError, env::Environment, setup::PseudonymMacConfig};

/// Key store and codec of the pseudonym-MAC scheme.
pub struct PseudonymMacDevice<E: Environment> {
    env: E,
    hash: HashAlgorithm,
    pseudonyms: TimedPseudonymGenerator,
    regional_key: Vec<u8>,
}

impl<E: Environment> PseudonymMacDevice<E> {
    /// Precompute the static pseudonym half and take the regional key.
    ///
    /// # Errors
    ///
    /// - `SetupError::Crypto` for an unknown hash algorithm name
    pub fn new(env: E, config: &PseudonymMacConfig) -> Result<Self, SetupError> {
        let hash: HashAlgorithm = config.hash_algorithm.parse()?;
        let pseudonyms = TimedPseudonymGenerator::new(
            hash,
            &config.api_key,
            &config.device_secret,
            &config.device_id,
            &config.membership_key,
        );

        tracing::info!(%hash, "pseudonym-MAC device ready");

        Ok(Self { env, hash, pseudonyms, regional_key: config.regional_key.clone() })
    }

    fn tag(&self, pseudo_id: &[u8], payload: &[u8], timestamp: &[u8]) -> [u8; PSEUDONYM_MAC_LEN] {
        let full = self.hash.digest(&[pseudo_id, &self.regional_key, payload, timestamp]);
        let Ok(tag) = truncate_tail(&full, PSEUDONYM_MAC_LEN).try_into() else {
            unreachable!("digest output is longer than the truncated tag");
        };
        tag
    }

    fn verify(&self, protected: &[u8]) -> Result<Vec<u8>, Rejection> {
        let (header, payload) = PseudonymMacHeader::split(protected)?;
        check_freshness(header.timestamp(), self.env.timestamp())?;

        let expected = self.tag(header.pseudo_id(), payload, &header.timestamp_bytes());
        if !tags_match(&expected, header.mac()) {
            return Err(Rejection::MacMismatch);
        }

        Ok(payload.to_vec())
    }
}

impl<E: Environment> TamperProofDevice for PseudonymMacDevice<E> {
    fn encapsulate(&self, message: &[u8]) -> Vec<u8> {
        let timestamp = self.env.timestamp();
        let pseudo_id = self.pseudonyms.create(timestamp);
        let tag = self.tag(pseudo_id.as_bytes(), message, &timestamp.to_be_bytes());

        tracing::trace!(%pseudo_id, timestamp, "pseudonym-MAC encapsulate");

        PseudonymMacHeader::new(timestamp, &tag, pseudo_id.as_bytes()).frame(message)
    }

    fn decapsulate(&self, protected: &[u8]) -> Option<Vec<u8>> {
        settle("pseudonym-mac", self.verify(protected))
    }

    fn security_fields(&self, protected: &[u8]) -> Result<Vec<u8>, WireError> {
        let (header, _) = PseudonymMacHeader::split(protected)?;
        Ok(header.to_vec())
    }

    fn header_len(&self) -> usize {
        PseudonymMacHeader::SIZE
    }
}

impl<E: Environment> std::fmt::Debug for PseudonymMacDevice<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PseudonymMacDevice").field("hash", &self.hash).finish_non_exhaustive()
    }
}

impl<E: Environment> Drop for PseudonymMacDevice<E> {
    fn drop(&mut self) {
        self.regional_key.zeroize();
    }
}
