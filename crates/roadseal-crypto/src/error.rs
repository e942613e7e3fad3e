//! Error types for cryptographic configuration

use thiserror::Error;

/// Errors from building key material.
///
/// All of these surface while a device is being configured. None of them can
/// happen while a message is being protected or verified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Algorithm identifier is not one we implement
    #[error("unsupported algorithm: {name}")]
    UnsupportedAlgorithm {
        /// The identifier as it was configured
        name: String,
    },

    /// A hash chain must hold at least one key and its indices must fit the
    /// 4-byte signed wire field
    #[error("invalid hash chain length: {length}")]
    InvalidChainLength {
        /// Requested number of chain elements
        length: usize,
    },

    /// XOR operands have different lengths
    #[error("length mismatch: {left} bytes vs {right} bytes")]
    LengthMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },
}

impl CryptoError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Every crypto error is a configuration problem. Retrying with the same
    /// configuration yields the same error.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::UnsupportedAlgorithm { .. } => true,
            Self::InvalidChainLength { .. } => true,
            Self::LengthMismatch { .. } => true,
        }
    }
}
