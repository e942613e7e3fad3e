//! Shared behaviour of fixed-width security headers.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::errors::{Result, WireError};

/// A fixed-size header that precedes the payload of a protected message.
///
/// Implementors are plain byte-array structs, so every `SIZE`-byte pattern is
/// a valid header and parsing is a zero-copy cast.
pub trait WireHeader: FromBytes + IntoBytes + KnownLayout + Immutable + Sized {
    /// Serialized header size in bytes.
    const SIZE: usize;

    /// Split a protected message into its header and trailing payload.
    ///
    /// # Errors
    ///
    /// - `WireError::TooShort` if `bytes` cannot hold the header
    fn split(bytes: &[u8]) -> Result<(&Self, &[u8])> {
        Self::ref_from_prefix(bytes)
            .map_err(|_| WireError::TooShort { expected: Self::SIZE, actual: bytes.len() })
    }

    /// Header bytes followed by `payload`.
    fn frame(&self, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE + payload.len());
        out.extend_from_slice(self.as_bytes());
        out.extend_from_slice(payload);
        out
    }

    /// Header bytes alone.
    fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}
