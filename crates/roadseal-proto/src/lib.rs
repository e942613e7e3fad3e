//! Roadseal wire formats.
//!
//! A protected message is a fixed-width security header followed by the
//! original payload bytes, untouched:
//!
//! ```text
//! hash-chain scheme:     [pid 20][mac 12][key index 4][timestamp 4][payload ..]
//! pseudonym-MAC scheme:  [timestamp 4][mac 20][pid 20][payload ..]
//! ```
//!
//! All integers are big-endian two's-complement `i32`. Headers are parsed in
//! place with `zerocopy`; every byte pattern of the right length is a
//! structurally valid header, so parsing can only fail on length.
//!
//! Parsing says nothing about authenticity. Tags and timestamps are checked
//! by the scheme that owns the header.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod errors;
mod hash_chain;
mod header;
mod pseudonym_mac;

pub use errors::{Result, WireError};
pub use hash_chain::{HASH_CHAIN_MAC_LEN, HashChainHeader};
pub use header::WireHeader;
pub use pseudonym_mac::{PSEUDONYM_MAC_LEN, PseudonymMacHeader};

/// Length of a pseudo-identity field.
pub const PSEUDO_ID_LEN: usize = 20;

/// Length of a big-endian `i32` field (timestamps, key indices).
pub const I32_FIELD_LEN: usize = 4;
