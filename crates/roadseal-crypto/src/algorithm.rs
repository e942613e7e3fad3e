//! Digest and MAC algorithm identifiers
//!
//! Algorithms are named the way station configuration names them
//! (`"SHA-256"`, `"HmacSHA256"`); lowercase and dash-free spellings such as
//! `"sha256"` are accepted too. Unknown names are configuration errors.

use std::{fmt, str::FromStr};

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;

use crate::CryptoError;

/// Hash function used for chain derivation, pseudonyms and hash-based tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256 (32-byte output)
    Sha256,
    /// SHA-512 (64-byte output)
    Sha512,
}

impl HashAlgorithm {
    /// Digest output length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Hash the concatenation of `parts`.
    ///
    /// Equivalent to hashing the parts joined into one buffer, without
    /// allocating that buffer.
    pub fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    Digest::update(&mut hasher, part);
                }
                hasher.finalize().to_vec()
            },
            Self::Sha512 => {
                let mut hasher = Sha512::new();
                for part in parts {
                    Digest::update(&mut hasher, part);
                }
                hasher.finalize().to_vec()
            },
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => f.write_str("SHA-256"),
            Self::Sha512 => f.write_str("SHA-512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match normalize(name).as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(CryptoError::UnsupportedAlgorithm { name: name.to_string() }),
        }
    }
}

/// Keyed MAC used by the hash-chain scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacAlgorithm {
    /// HMAC over SHA-256 (32-byte tag)
    HmacSha256,
    /// HMAC over SHA-512 (64-byte tag)
    HmacSha512,
}

impl MacAlgorithm {
    /// Full (untruncated) tag length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::HmacSha256 => 32,
            Self::HmacSha512 => 64,
        }
    }

    /// MAC the concatenation of `parts` under `key`.
    pub fn mac(self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
        match self {
            Self::HmacSha256 => {
                let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(key) else {
                    unreachable!("HMAC-SHA256 accepts any key size");
                };
                for part in parts {
                    Mac::update(&mut mac, part);
                }
                mac.finalize().into_bytes().to_vec()
            },
            Self::HmacSha512 => {
                let Ok(mut mac) = Hmac::<Sha512>::new_from_slice(key) else {
                    unreachable!("HMAC-SHA512 accepts any key size");
                };
                for part in parts {
                    Mac::update(&mut mac, part);
                }
                mac.finalize().into_bytes().to_vec()
            },
        }
    }
}

impl fmt::Display for MacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HmacSha256 => f.write_str("HmacSHA256"),
            Self::HmacSha512 => f.write_str("HmacSHA512"),
        }
    }
}

impl FromStr for MacAlgorithm {
    type Err = CryptoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match normalize(name).as_str() {
            "hmacsha256" => Ok(Self::HmacSha256),
            "hmacsha512" => Ok(Self::HmacSha512),
            _ => Err(CryptoError::UnsupportedAlgorithm { name: name.to_string() }),
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).map(|c| c.to_ascii_lowercase()).collect()
}

/// Last `len` bytes of `bytes`.
///
/// Returns all of `bytes` when it is shorter than `len`.
pub fn truncate_tail(bytes: &[u8], len: usize) -> &[u8] {
    &bytes[bytes.len().saturating_sub(len)..]
}

/// Byte-wise XOR of two equal-length buffers.
pub fn xor_bytes(left: &[u8], right: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if left.len() != right.len() {
        return Err(CryptoError::LengthMismatch { left: left.len(), right: right.len() });
    }
    Ok(left.iter().zip(right).map(|(a, b)| a ^ b).collect())
}

/// Constant-time tag comparison. Different lengths never match.
pub fn tags_match(expected: &[u8], received: &[u8]) -> bool {
    bool::from(expected.ct_eq(received))
}
