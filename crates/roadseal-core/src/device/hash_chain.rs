//! Device for the hash-chain scheme.
//!
//! # Encapsulation
//!
//! ```text
//! pid  = random pick from the pseudonym pool
//! k    = random index in [0, chain length)
//! t    = current epoch second (i32, big-endian)
//! mac  = tail12(HMAC(chain[k], pid || m || t))
//! out  = pid || mac || k || t || m
//! ```
//!
//! # Verification
//!
//! The verifier trusts the index `k` carried in the message and recomputes
//! the tag with its own copy of `chain[k]`. Every station derives the same
//! chain from the shared seed, so any station can verify any other.

use roadseal_crypto::{
    HashAlgorithm, HashChain, HashChainGenerator, MacAlgorithm, PseudoIdentity,
    RandomPseudonymGenerator, tags_match, truncate_tail,
};
use roadseal_proto::{HASH_CHAIN_MAC_LEN, HashChainHeader, WireError, WireHeader};

use super::{Rejection, TamperProofDevice, check_freshness, settle};
use crate::{SetupError, env::Environment, setup::HashChainConfig};

/// Key store and codec of the hash-chain scheme.
///
/// Holds the hash chain and a fixed pool of pseudonyms, both built once in
/// [`HashChainDevice::new`] and never modified.
pub struct HashChainDevice<E: Environment> {
    env: E,
    chain: HashChain,
    pseudonyms: Vec<PseudoIdentity>,
    mac: MacAlgorithm,
}

impl<E: Environment> HashChainDevice<E> {
    /// Derive the chain and draw the pseudonym pool.
    ///
    /// # Errors
    ///
    /// - `SetupError::Crypto` for an unknown algorithm name or a zero chain
    ///   length
    /// - `SetupError::EmptyPseudonymPool` if the pool size is zero
    pub fn new(env: E, config: &HashChainConfig) -> Result<Self, SetupError> {
        let hash: HashAlgorithm = config.hash_algorithm.parse()?;
        let mac: MacAlgorithm = config.mac_algorithm.parse()?;
        if config.pseudonym_pool_size == 0 {
            return Err(SetupError::EmptyPseudonymPool);
        }

        let chain = HashChainGenerator::new(hash).build(&config.seed, config.chain_length)?;

        let generator = RandomPseudonymGenerator::new(hash);
        let pseudonyms: Vec<PseudoIdentity> = (0..config.pseudonym_pool_size)
            .map(|_| generator.create(env.random_u64()))
            .collect();

        tracing::info!(
            chain_length = chain.len(),
            pool_size = pseudonyms.len(),
            %hash,
            %mac,
            "hash-chain device ready"
        );

        Ok(Self { env, chain, pseudonyms, mac })
    }

    /// Pseudonyms this device signs under.
    pub fn pseudonyms(&self) -> &[PseudoIdentity] {
        &self.pseudonyms
    }

    /// Number of keys in the hash chain.
    pub fn chain_length(&self) -> usize {
        self.chain.len()
    }

    fn tag(
        &self,
        key: &[u8],
        pseudo_id: &[u8],
        payload: &[u8],
        timestamp: &[u8],
    ) -> [u8; HASH_CHAIN_MAC_LEN] {
        let full = self.mac.mac(key, &[pseudo_id, payload, timestamp]);
        let Ok(tag) = truncate_tail(&full, HASH_CHAIN_MAC_LEN).try_into() else {
            unreachable!("HMAC output is longer than the truncated tag");
        };
        tag
    }

    fn verify(&self, protected: &[u8]) -> Result<Vec<u8>, Rejection> {
        let (header, payload) = HashChainHeader::split(protected)?;
        check_freshness(header.timestamp(), self.env.timestamp())?;

        let index = header.key_index_usize()?;
        let key = self.chain.key(index).ok_or(Rejection::UnknownKeyIndex { index })?;

        let expected = self.tag(key, header.pseudo_id(), payload, &header.timestamp_bytes());
        if !tags_match(&expected, header.mac()) {
            return Err(Rejection::MacMismatch);
        }

        Ok(payload.to_vec())
    }
}

impl<E: Environment> TamperProofDevice for HashChainDevice<E> {
    fn encapsulate(&self, message: &[u8]) -> Vec<u8> {
        let pseudo_id = self.pseudonyms[self.env.random_below(self.pseudonyms.len())];
        let index = self.env.random_below(self.chain.len());
        let timestamp = self.env.timestamp();

        let Some(key) = self.chain.key(index) else {
            unreachable!("index drawn below chain length");
        };
        let Ok(wire_index) = i32::try_from(index) else {
            unreachable!("chain length is capped to the i32 index range");
        };

        let tag = self.tag(key, pseudo_id.as_bytes(), message, &timestamp.to_be_bytes());
        tracing::trace!(%pseudo_id, key_index = index, timestamp, "hash-chain encapsulate");

        HashChainHeader::new(pseudo_id.as_bytes(), &tag, wire_index, timestamp).frame(message)
    }

    fn decapsulate(&self, protected: &[u8]) -> Option<Vec<u8>> {
        settle("hash-chain", self.verify(protected))
    }

    fn security_fields(&self, protected: &[u8]) -> Result<Vec<u8>, WireError> {
        let (header, _) = HashChainHeader::split(protected)?;
        Ok(header.to_vec())
    }

    fn header_len(&self) -> usize {
        HashChainHeader::SIZE
    }
}

impl<E: Environment> std::fmt::Debug for HashChainDevice<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashChainDevice")
            .field("chain", &self.chain)
            .field("pool_size", &self.pseudonyms.len())
            .field("mac", &self.mac)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_utils::MockEnv;

    const NOW: u64 = 1_700_000_000;

    fn device(env: MockEnv) -> HashChainDevice<MockEnv> {
        HashChainDevice::new(env, &HashChainConfig::default()).unwrap()
    }

    #[test]
    fn known_answer_frame() {
        let device = device(MockEnv::zeroed(NOW));
        let frame = device.encapsulate(&[0x42]);

        assert_eq!(
            hex::encode(&frame),
            "c70a660f0df51e42baf91d4de5b2328de0e83dfc\
             a45b48489ce27284d75729d5\
             00000000\
             6553f100\
             42"
        );
    }

    #[test]
    fn one_byte_message_layout() {
        let device = device(MockEnv::seeded(1, NOW));
        let frame = device.encapsulate(&[0x42]);

        assert_eq!(frame.len(), 41);
        assert_eq!(frame[40], 0x42);
        assert_eq!(&frame[36..40], &0x6553_F100_i32.to_be_bytes());

        let index = i32::from_be_bytes(frame[32..36].try_into().unwrap());
        assert!((0..5).contains(&index));
        assert!(device.pseudonyms().iter().any(|pid| pid.as_bytes() == &frame[0..20]));
    }

    #[test]
    fn round_trip_same_second() {
        let device = device(MockEnv::seeded(2, NOW));
        for message in [&b""[..], b"x", b"a longer cooperative awareness payload"] {
            let frame = device.encapsulate(message);
            assert_eq!(device.decapsulate(&frame).as_deref(), Some(message));
        }
    }

    #[test]
    fn stations_sharing_the_seed_verify_each_other() {
        let env = MockEnv::seeded(3, NOW);
        let sender = device(env.clone());
        let receiver = device(env);

        let frame = sender.encapsulate(b"hello");
        assert_eq!(receiver.decapsulate(&frame), Some(b"hello".to_vec()));
    }

    #[test]
    fn rejects_other_seed() {
        let env = MockEnv::seeded(4, NOW);
        let sender = device(env.clone());
        let config = HashChainConfig { seed: vec![0x01; 32], ..HashChainConfig::default() };
        let receiver = HashChainDevice::new(env, &config).unwrap();

        assert_eq!(receiver.decapsulate(&sender.encapsulate(b"hello")), None);
    }

    #[test]
    fn rejects_stale_and_future_timestamps() {
        let env = MockEnv::seeded(5, NOW);
        let device = device(env.clone());
        let frame = device.encapsulate(b"hello");

        env.set_time(NOW + 1);
        assert_eq!(device.decapsulate(&frame), None);

        env.set_time(NOW - 1);
        assert_eq!(device.decapsulate(&frame), None);

        env.set_time(NOW);
        assert!(device.decapsulate(&frame).is_some());
    }

    #[test]
    fn rejects_out_of_range_and_negative_index() {
        let device = device(MockEnv::zeroed(NOW));
        let mut frame = device.encapsulate(b"hello");

        frame[32..36].copy_from_slice(&5i32.to_be_bytes());
        assert_eq!(device.verify(&frame), Err(Rejection::UnknownKeyIndex { index: 5 }));

        frame[32..36].copy_from_slice(&(-1i32).to_be_bytes());
        assert_eq!(
            device.verify(&frame),
            Err(Rejection::Malformed(WireError::NegativeIndex { value: -1 }))
        );
        assert_eq!(device.decapsulate(&frame), None);
    }

    #[test]
    fn rejects_index_swap() {
        let device = device(MockEnv::zeroed(NOW));
        let mut frame = device.encapsulate(b"hello");
        frame[32..36].copy_from_slice(&1i32.to_be_bytes());

        assert_eq!(device.verify(&frame), Err(Rejection::MacMismatch));
    }

    #[test]
    fn rejects_truncated_input() {
        let device = device(MockEnv::zeroed(NOW));
        let frame = device.encapsulate(b"");

        assert_eq!(frame.len(), HashChainHeader::SIZE);
        assert!(device.decapsulate(&frame).is_some());
        assert_eq!(device.decapsulate(&frame[..39]), None);
        assert_eq!(device.decapsulate(&[]), None);
    }

    #[test]
    fn security_fields_are_the_header() {
        let device = device(MockEnv::zeroed(NOW));
        let frame = device.encapsulate(b"payload");

        assert_eq!(device.security_fields(&frame).unwrap(), &frame[..40]);
        assert_eq!(device.header_len(), 40);
        assert!(device.security_fields(&frame[..10]).is_err());
    }

    #[test]
    fn pool_is_drawn_once() {
        let device = device(MockEnv::seeded(6, NOW));
        assert_eq!(device.pseudonyms().len(), 3);
        assert_eq!(device.chain_length(), 5);

        for _ in 0..20 {
            let frame = device.encapsulate(b"m");
            assert!(device.pseudonyms().iter().any(|pid| pid.as_bytes() == &frame[0..20]));
        }
    }

    #[test]
    fn configuration_errors() {
        let env = MockEnv::zeroed(NOW);

        let config = HashChainConfig { pseudonym_pool_size: 0, ..HashChainConfig::default() };
        assert_eq!(
            HashChainDevice::new(env.clone(), &config).err(),
            Some(SetupError::EmptyPseudonymPool)
        );

        let config = HashChainConfig { chain_length: 0, ..HashChainConfig::default() };
        assert!(matches!(
            HashChainDevice::new(env.clone(), &config),
            Err(SetupError::Crypto(roadseal_crypto::CryptoError::InvalidChainLength { length: 0 }))
        ));

        let config =
            HashChainConfig { mac_algorithm: "HmacMD5".to_string(), ..HashChainConfig::default() };
        assert!(matches!(HashChainDevice::new(env, &config), Err(SetupError::Crypto(_))));
    }

    #[test]
    fn sha512_variant_round_trips() {
        let env = MockEnv::seeded(7, NOW);
        let config = HashChainConfig {
            hash_algorithm: "SHA-512".to_string(),
            mac_algorithm: "HmacSHA512".to_string(),
            ..HashChainConfig::default()
        };
        let device = HashChainDevice::new(env, &config).unwrap();

        let frame = device.encapsulate(b"payload");
        assert_eq!(frame.len(), 40 + 7);
        assert_eq!(device.decapsulate(&frame), Some(b"payload".to_vec()));
    }

    #[test]
    fn debug_hides_key_material() {
        let rendered = format!("{:?}", device(MockEnv::zeroed(NOW)));
        assert!(rendered.contains("pool_size: 3"));
        assert!(!rendered.contains("c70a66"));
    }
}
