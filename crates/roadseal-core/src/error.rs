//! Error types for protocol construction.
//!
//! Only construction can fail with an error. Per-message verification
//! failures are deliberately not errors: `decapsulate` returns `None` for all
//! of them so callers (and attackers) cannot tell them apart.

use roadseal_crypto::CryptoError;
use thiserror::Error;

/// Errors raised while assembling a security protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Unsupported algorithm or invalid key-material parameters
    #[error("crypto configuration error: {0}")]
    Crypto(#[from] CryptoError),

    /// Presence check refused the user at construction time
    #[error("user was not authenticated by the presence check")]
    PresenceCheckFailed,

    /// Hash-chain scheme configured with no pseudonyms to pick from
    #[error("pseudonym pool must hold at least one pseudonym")]
    EmptyPseudonymPool,

    /// Requested feature exists in the configuration surface but has no
    /// implementation yet
    #[error("not implemented: {what}")]
    Unimplemented {
        /// Missing feature
        what: &'static str,
    },
}

impl SetupError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Construction is never retried automatically; every setup error means
    /// the configuration must change first.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Crypto(err) => err.is_fatal(),
            Self::PresenceCheckFailed => true,
            Self::EmptyPseudonymPool => true,
            Self::Unimplemented { .. } => true,
        }
    }

    /// Returns true for gaps in the implementation, as opposed to bad
    /// configuration values.
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }
}

/// Protocol designation that matches no known scheme.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown security protocol: {0}")]
pub struct UnknownProtocol(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_errors_are_fatal() {
        assert!(SetupError::PresenceCheckFailed.is_fatal());
        assert!(SetupError::EmptyPseudonymPool.is_fatal());
        assert!(SetupError::Unimplemented { what: "DENM generation" }.is_fatal());
        assert!(
            SetupError::from(CryptoError::UnsupportedAlgorithm { name: "MD5".to_string() })
                .is_fatal()
        );
    }

    #[test]
    fn unimplemented_is_distinguishable() {
        assert!(SetupError::Unimplemented { what: "DENM generation" }.is_unimplemented());
        assert!(!SetupError::PresenceCheckFailed.is_unimplemented());
    }

    #[test]
    fn error_display() {
        let err = SetupError::from(CryptoError::InvalidChainLength { length: 0 });
        assert_eq!(err.to_string(), "crypto configuration error: invalid hash chain length: 0");

        let err = UnknownProtocol("ECDSA".to_string());
        assert_eq!(err.to_string(), "unknown security protocol: ECDSA");
    }
}
