//! Tamper-proof devices.
//!
//! A device owns the secret key material of one scheme and is the only place
//! that material is used. It implements the scheme's framing and verification
//! over raw byte buffers; the protocol layer wraps it in the
//! [`crate::SecurityProtocol`] contract.
//!
//! # Security
//!
//! Every verification failure (short input, stale timestamp, unknown key
//! index, tag mismatch) collapses to `None`. The precise reason is logged at
//! `debug` and never returned, so a peer cannot probe the scheme by varying
//! its input.

mod hash_chain;
mod pseudonym_mac;

pub use hash_chain::HashChainDevice;
pub use pseudonym_mac::PseudonymMacDevice;
use roadseal_proto::WireError;
use thiserror::Error;

/// Key-holding half of a security scheme.
pub trait TamperProofDevice: Send + Sync {
    /// Prefix `message` with this scheme's security header.
    fn encapsulate(&self, message: &[u8]) -> Vec<u8>;

    /// Verify `protected` and return its payload, or `None` if it does not
    /// verify right now.
    fn decapsulate(&self, protected: &[u8]) -> Option<Vec<u8>>;

    /// Header bytes of `protected` in wire order, payload excluded.
    ///
    /// Purely structural; says nothing about authenticity.
    ///
    /// # Errors
    ///
    /// - `WireError::TooShort` if `protected` cannot hold the header
    fn security_fields(&self, protected: &[u8]) -> Result<Vec<u8>, WireError>;

    /// Fixed header size in bytes.
    fn header_len(&self) -> usize;
}

/// Why a protected message failed to verify. Logged, never surfaced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    #[error("malformed message: {0}")]
    Malformed(#[from] WireError),

    #[error("stale timestamp: received {received}, now {now}")]
    Stale { received: i32, now: i32 },

    #[error("key index {index} outside the hash chain")]
    UnknownKeyIndex { index: usize },

    #[error("tag mismatch")]
    MacMismatch,
}

/// Accept only a timestamp equal to the verifier's current second.
///
/// Exact equality, no tolerance window: any transit delay that crosses a
/// second boundary rejects the message. Kept for wire compatibility with
/// deployed stations.
pub(crate) fn check_freshness(received: i32, now: i32) -> Result<(), Rejection> {
    if received == now { Ok(()) } else { Err(Rejection::Stale { received, now }) }
}

/// Log a rejection and erase its reason.
pub(crate) fn settle(scheme: &'static str, verdict: Result<Vec<u8>, Rejection>) -> Option<Vec<u8>> {
    match verdict {
        Ok(payload) => {
            tracing::debug!(scheme, len = payload.len(), "message verified");
            Some(payload)
        },
        Err(rejection) => {
            tracing::debug!(scheme, %rejection, "message rejected");
            None
        },
    }
}
