//! Pseudonym-MAC scheme header.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{I32_FIELD_LEN, PSEUDO_ID_LEN, WireHeader};

/// Truncated hash-tag length carried by the pseudonym-MAC scheme.
pub const PSEUDONYM_MAC_LEN: usize = 20;

/// Fixed 44-byte header of the pseudonym-MAC scheme (Big Endian).
///
/// | Offset | Size | Field |
/// |---|---|---|
/// | 0 | 4 | timestamp, epoch seconds (`i32`) |
/// | 4 | 20 | truncated hash tag |
/// | 24 | 20 | pseudo-identity |
///
/// The payload starts at offset 44. Field order differs from
/// [`crate::HashChainHeader`]: the timestamp leads.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct PseudonymMacHeader {
    timestamp: [u8; I32_FIELD_LEN],
    mac: [u8; PSEUDONYM_MAC_LEN],
    pseudo_id: [u8; PSEUDO_ID_LEN],
}

const _: () = assert!(size_of::<PseudonymMacHeader>() == PseudonymMacHeader::SIZE);

impl WireHeader for PseudonymMacHeader {
    const SIZE: usize = 44;
}

impl PseudonymMacHeader {
    /// Assemble a header from its fields.
    #[must_use]
    pub fn new(
        timestamp: i32,
        mac: &[u8; PSEUDONYM_MAC_LEN],
        pseudo_id: &[u8; PSEUDO_ID_LEN],
    ) -> Self {
        Self { timestamp: timestamp.to_be_bytes(), mac: *mac, pseudo_id: *pseudo_id }
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

    /// Truncated hash tag as received.
    #[must_use]
    pub fn mac(&self) -> &[u8; PSEUDONYM_MAC_LEN] {
        &self.mac
    }

    /// Sender pseudo-identity.
    #[must_use]
    pub fn pseudo_id(&self) -> &[u8; PSEUDO_ID_LEN] {
        &self.pseudo_id
    }
}

impl PartialEq for PseudonymMacHeader {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for PseudonymMacHeader {}

impl fmt::Debug for PseudonymMacHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PseudonymMacHeader")
            .field("timestamp", &self.timestamp())
            .finish_non_exhaustive()
    }
}
