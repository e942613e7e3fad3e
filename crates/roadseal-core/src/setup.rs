//! Configuration and the protocol factory.
//!
//! Defaults carry the key material and parameters every station of the
//! deployment is provisioned with. Real deployments replace the secrets;
//! tests rely on the defaults for known-answer vectors.

use std::fmt;

use crate::{
    ProtocolKind, SetupError,
    device::{HashChainDevice, PseudonymMacDevice},
    env::Environment,
    presence::{FixedPresence, PresenceCheck},
    protocol::{HashChainScheme, Passthrough, Protocol, PseudonymMacScheme, SecurityProtocol},
};

const SYSTEM_SEED: [u8; 32] = [
    0xEF, 0xF4, 0xC5, 0x82, 0xDB, 0x80, 0xFB, 0x50, 0xE2, 0xDC, 0x1B, 0xAE, 0x8F, 0x45, 0x3C, 0x50,
    0xC0, 0x41, 0x63, 0xD4, 0x63, 0x7C, 0x69, 0xDA, 0xA1, 0x19, 0xF9, 0x13, 0x26, 0x2D, 0x26, 0x2D,
];

const API_KEY: [u8; 32] = [
    0xFA, 0xFA, 0x06, 0xFF, 0xFD, 0xFF, 0xCD, 0x51, 0xB9, 0x01, 0xB9, 0x01, 0xFA, 0xFA, 0x06, 0xFF,
    0xFD, 0xFF, 0xCD, 0x51, 0xB9, 0x01, 0xFA, 0xFA, 0x06, 0xFF, 0xFD, 0xFF, 0xCD, 0x51, 0xB9, 0x01,
];

const DEVICE_SECRET: [u8; 32] = [
    0xC4, 0xC2, 0x3C, 0xF6, 0xDB, 0xF4, 0xFB, 0x08, 0xF9, 0x13, 0xF9, 0x13, 0xC4, 0xC2, 0x3C, 0xF6,
    0xDB, 0xF4, 0xFB, 0x08, 0xF9, 0x13, 0xC4, 0xC2, 0x3C, 0xF6, 0xDB, 0xF4, 0xFB, 0x08, 0xF9, 0x13,
];

const DEVICE_ID: [u8; 32] = [
    0xF6, 0xEC, 0xE2, 0xD8, 0xCE, 0xC4, 0xBA, 0xB0, 0xA6, 0xF6, 0xA6, 0xF6, 0xF6, 0xEC, 0xE2, 0xD8,
    0xCE, 0xC4, 0xBA, 0xB0, 0xA6, 0xF6, 0xF6, 0xEC, 0xE2, 0xD8, 0xCE, 0xC4, 0xBA, 0xB0, 0xA6, 0xF6,
];

const MEMBERSHIP_KEY: [u8; 32] = [
    0xC0, 0xBF, 0x04, 0xD8, 0xF9, 0xFE, 0x05, 0xF8, 0xF5, 0x16, 0xF5, 0x16, 0xC0, 0xBF, 0x04, 0xD8,
    0xF9, 0xFE, 0x05, 0xF8, 0xF5, 0x16, 0xC0, 0xBF, 0x04, 0xD8, 0xF9, 0xFE, 0x05, 0xF8, 0xF5, 0x16,
];

const REGIONAL_KEY: [u8; 32] = [
    0xF0, 0x09, 0xCC, 0xCD, 0xD6, 0xA0, 0x68, 0x65, 0x07, 0x11, 0xA5, 0x2A, 0xB8, 0x38, 0x70, 0x4C,
    0x67, 0x73, 0xED, 0xDF, 0x1F, 0x89, 0x52, 0x71, 0xA2, 0x72, 0x90, 0xAF, 0xC7, 0xA2, 0x6A, 0xD8,
];

/// Default number of hash chain keys.
pub const DEFAULT_CHAIN_LENGTH: usize = 5;

/// Default number of pre-generated pseudonyms.
pub const DEFAULT_POOL_SIZE: usize = 3;

/// Hash-chain scheme parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct HashChainConfig {
    /// Shared system seed; `chain[0] = H(seed)`
    pub seed: Vec<u8>,
    /// Keys in the chain, at least 1
    pub chain_length: usize,
    /// Pseudonyms drawn at construction, at least 1
    pub pseudonym_pool_size: usize,
    /// Hash function name, e.g. `"SHA-256"`
    pub hash_algorithm: String,
    /// MAC name, e.g. `"HmacSHA256"`
    pub mac_algorithm: String,
}

impl Default for HashChainConfig {
    fn default() -> Self {
        Self {
            seed: SYSTEM_SEED.to_vec(),
            chain_length: DEFAULT_CHAIN_LENGTH,
            pseudonym_pool_size: DEFAULT_POOL_SIZE,
            hash_algorithm: "SHA-256".to_string(),
            mac_algorithm: "HmacSHA256".to_string(),
        }
    }
}

impl fmt::Debug for HashChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashChainConfig")
            .field("chain_length", &self.chain_length)
            .field("pseudonym_pool_size", &self.pseudonym_pool_size)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("mac_algorithm", &self.mac_algorithm)
            .finish_non_exhaustive()
    }
}

/// Pseudonym-MAC scheme parameters.
///
/// The four pseudonym inputs form the static pseudonym half
/// `H(api_key || device_secret || device_id || membership_key)`.
#[derive(Clone, PartialEq, Eq)]
pub struct PseudonymMacConfig {
    /// Hash function name for pseudonyms and tags
    pub hash_algorithm: String,
    /// Application key, also salts the per-timestamp half
    pub api_key: Vec<u8>,
    /// Per-device secret
    pub device_secret: Vec<u8>,
    /// Device identifier
    pub device_id: Vec<u8>,
    /// Group membership key
    pub membership_key: Vec<u8>,
    /// Key shared by every station in the region; binds the tag
    pub regional_key: Vec<u8>,
}

impl Default for PseudonymMacConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: "SHA-256".to_string(),
            api_key: API_KEY.to_vec(),
            device_secret: DEVICE_SECRET.to_vec(),
            device_id: DEVICE_ID.to_vec(),
            membership_key: MEMBERSHIP_KEY.to_vec(),
            regional_key: REGIONAL_KEY.to_vec(),
        }
    }
}

impl fmt::Debug for PseudonymMacConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PseudonymMacConfig")
            .field("hash_algorithm", &self.hash_algorithm)
            .finish_non_exhaustive()
    }
}

/// Parameters for every scheme; only the selected one is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupConfig {
    /// Hash-chain scheme
    pub hash_chain: HashChainConfig,
    /// Pseudonym-MAC scheme
    pub pseudonym_mac: PseudonymMacConfig,
}

/// Builds fully wired protocol instances.
///
/// Stateless. Every call returns an independent instance; hash-chain
/// pseudonym pools are drawn afresh each time.
pub struct ProtocolSetup;

impl ProtocolSetup {
    /// Build `kind` with the default configuration and no presence prompt.
    ///
    /// # Errors
    ///
    /// See [`ProtocolSetup::build_with`].
    pub fn build<E: Environment>(kind: ProtocolKind, env: E) -> Result<Protocol<E>, SetupError> {
        Self::build_with(kind, env, &SetupConfig::default(), &FixedPresence::default())
    }

    /// Build `kind` from explicit configuration.
    ///
    /// `presence` is asked once, and only for the hash-chain scheme.
    ///
    /// # Errors
    ///
    /// - `SetupError::Crypto` for unknown algorithm names or a zero chain
    ///   length
    /// - `SetupError::EmptyPseudonymPool` for a zero pool size
    /// - `SetupError::PresenceCheckFailed` if `presence` refuses
    pub fn build_with<E: Environment>(
        kind: ProtocolKind,
        env: E,
        config: &SetupConfig,
        presence: &dyn PresenceCheck,
    ) -> Result<Protocol<E>, SetupError> {
        let protocol = match kind {
            ProtocolKind::None => Protocol::Passthrough(Passthrough),
            ProtocolKind::HashChain => {
                let device = HashChainDevice::new(env, &config.hash_chain)?;
                Protocol::HashChain(HashChainScheme::new(device, presence)?)
            },
            ProtocolKind::PseudonymMac => {
                let device = PseudonymMacDevice::new(env, &config.pseudonym_mac)?;
                Protocol::PseudonymMac(PseudonymMacScheme::new(device))
            },
        };

        tracing::info!(protocol = %kind, overhead = protocol.overhead(), "security protocol selected");
        Ok(protocol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_utils::MockEnv;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn builds_every_kind() {
        for kind in ProtocolKind::ALL {
            let protocol = ProtocolSetup::build(kind, MockEnv::seeded(1, NOW)).unwrap();
            assert_eq!(protocol.kind(), kind);
        }
    }

    #[test]
    fn overhead_per_kind() {
        let overhead = |kind| ProtocolSetup::build(kind, MockEnv::zeroed(NOW)).unwrap().overhead();
        assert_eq!(overhead(ProtocolKind::None), 0);
        assert_eq!(overhead(ProtocolKind::HashChain), 40);
        assert_eq!(overhead(ProtocolKind::PseudonymMac), 44);
    }

    #[test]
    fn instances_draw_independent_pools() {
        let env = MockEnv::seeded(9, NOW);
        let Protocol::HashChain(first) = ProtocolSetup::build(ProtocolKind::HashChain, env.clone()).unwrap() else {
            panic!("expected hash-chain protocol");
        };
        let Protocol::HashChain(second) = ProtocolSetup::build(ProtocolKind::HashChain, env).unwrap() else {
            panic!("expected hash-chain protocol");
        };

        assert_ne!(first.device().pseudonyms(), second.device().pseudonyms());
    }

    #[test]
    fn presence_only_gates_hash_chain() {
        let refuse = FixedPresence(false);
        let config = SetupConfig::default();

        for kind in [ProtocolKind::None, ProtocolKind::PseudonymMac] {
            assert!(ProtocolSetup::build_with(kind, MockEnv::zeroed(NOW), &config, &refuse).is_ok());
        }
        assert_eq!(
            ProtocolSetup::build_with(ProtocolKind::HashChain, MockEnv::zeroed(NOW), &config, &refuse)
                .err(),
            Some(SetupError::PresenceCheckFailed)
        );
    }

    #[test]
    fn bad_configuration_aborts_construction() {
        let mut config = SetupConfig::default();
        config.hash_chain.hash_algorithm = "MD5".to_string();
        config.pseudonym_mac.hash_algorithm = "SHA-1".to_string();

        for kind in [ProtocolKind::HashChain, ProtocolKind::PseudonymMac] {
            let result =
                ProtocolSetup::build_with(kind, MockEnv::zeroed(NOW), &config, &FixedPresence::default());
            assert!(matches!(result, Err(SetupError::Crypto(_))));
        }
    }

    #[test]
    fn debug_hides_secrets() {
        let rendered = format!("{:?}", SetupConfig::default());
        assert!(rendered.contains("SHA-256"));
        assert!(!rendered.to_lowercase().contains("0xef"));
        assert!(!rendered.contains("239"));
    }
}
