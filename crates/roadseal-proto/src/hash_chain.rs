//! Hash-chain scheme header.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    I32_FIELD_LEN, PSEUDO_ID_LEN, WireHeader,
    errors::{Result, WireError},
};

/// Truncated HMAC length carried by the hash-chain scheme.
pub const HASH_CHAIN_MAC_LEN: usize = 12;

/// Fixed 40-byte header of the hash-chain scheme (Big Endian).
///
/// | Offset | Size | Field |
/// |---|---|---|
/// | 0 | 20 | pseudo-identity |
/// | 20 | 12 | truncated HMAC |
/// | 32 | 4 | hash chain key index (`i32`) |
/// | 36 | 4 | timestamp, epoch seconds (`i32`) |
///
/// The payload starts at offset 40.
///
/// # Security
///
/// The key index is attacker-controlled. Verifiers must bounds-check it
/// against their own chain before selecting a key.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct HashChainHeader {
    pseudo_id: [u8; PSEUDO_ID_LEN],
    mac: [u8; HASH_CHAIN_MAC_LEN],
    key_index: [u8; I32_FIELD_LEN],
    timestamp: [u8; I32_FIELD_LEN],
}

const _: () = assert!(size_of::<HashChainHeader>() == HashChainHeader::SIZE);

impl WireHeader for HashChainHeader {
    const SIZE: usize = 40;
}

impl HashChainHeader {
    /// Assemble a header from its fields.
    #[must_use]
    pub fn new(
        pseudo_id: &[u8; PSEUDO_ID_LEN],
        mac: &[u8; HASH_CHAIN_MAC_LEN],
        key_index: i32,
        timestamp: i32,
    ) -> Self {
        Self {
            pseudo_id: *pseudo_id,
            mac: *mac,
            key_index: key_index.to_be_bytes(),
            timestamp: timestamp.to_be_bytes(),
        }
    }

    /// Sender pseudo-identity.
    #[must_use]
    pub fn pseudo_id(&self) -> &[u8; PSEUDO_ID_LEN] {
        &self.pseudo_id
    }

    /// Truncated HMAC as received.
    #[must_use]
    pub fn mac(&self) -> &[u8; HASH_CHAIN_MAC_LEN] {
        &self.mac
    }

    /// Hash chain key index as a signed wire value.
    #[must_use]
    pub fn key_index(&self) -> i32 {
        i32::from_be_bytes(self.key_index)
    }

    /// Hash chain key index usable for lookup.
    ///
    /// # Errors
    ///
    /// - `WireError::NegativeIndex` if the wire value is below zero
    pub fn key_index_usize(&self) -> Result<usize> {
        let value = self.key_index();
        usize::try_from(value).map_err(|_| WireError::NegativeIndex { value })
    }

    /// Timestamp in epoch seconds.
    #[must_use]
    pub fn timestamp(&self) -> i32 {
        i32::from_be_bytes(self.timestamp)
    }

    /// Timestamp exactly as it appears on the wire.
    #[must_use]
    pub fn timestamp_bytes(&self) -> [u8; I32_FIELD_LEN] {
        self.timestamp
    }
}

impl PartialEq for HashChainHeader {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for HashChainHeader {}

impl fmt::Debug for HashChainHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashChainHeader")
            .field("key_index", &self.key_index())
            .field("timestamp", &self.timestamp())
            .finish_non_exhaustive()
    }
}
